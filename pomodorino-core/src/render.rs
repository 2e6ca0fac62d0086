//! Pixel frame rendering
//!
//! Turns timer progress and cycle counts into full-strip frames. A
//! [`Frame`] is a plain value; the hardware side decides how to push it
//! out. Redraw suppression happens above this layer, in the supervisor,
//! by comparing lit pixel counts between passes.

use crate::engine::Progress;

/// Number of addressable pixels on the indicator strip
pub const MAX_PIXELS: usize = 10;

/// One 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// All channels dark
    pub const OFF: Self = Self { r: 0, g: 0, b: 0 };

    /// Build from a packed `0xRRGGBB` word
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }
}

/// One full strip's worth of pixel colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pixels: [Rgb; MAX_PIXELS],
}

impl Frame {
    /// Every pixel off
    pub const BLANK: Self = Self {
        pixels: [Rgb::OFF; MAX_PIXELS],
    };

    /// The first `count` pixels lit in `color`, the rest off
    pub fn solid(count: u8, color: Rgb) -> Self {
        let mut frame = Self::BLANK;
        for px in frame.pixels.iter_mut().take(count as usize) {
            *px = color;
        }
        frame
    }

    /// `n` rendered in base 2: bit `i` of `n` lights pixel `i`.
    ///
    /// Bits above the strip width are ignored, so counts past 1023 wrap
    /// visually rather than panicking.
    pub fn binary(n: u16, color: Rgb) -> Self {
        let mut frame = Self::BLANK;
        for (i, px) in frame.pixels.iter_mut().enumerate() {
            if n & (1 << i) != 0 {
                *px = color;
            }
        }
        frame
    }

    /// Overwrite a single pixel; out-of-range indices are ignored
    pub fn set(&mut self, index: usize, color: Rgb) {
        if let Some(px) = self.pixels.get_mut(index) {
            *px = color;
        }
    }

    /// Pixel colors in strip order
    pub fn pixels(&self) -> &[Rgb; MAX_PIXELS] {
        &self.pixels
    }
}

/// Lit pixel count for a progress fraction.
///
/// `1 + floor(MAX_PIXELS * remaining / duration)`, clamped to
/// `[1, MAX_PIXELS]`. The floor plus one keeps at least one pixel lit
/// for the whole phase, so an almost-finished phase still reads
/// differently from a dark strip. Operands arrive pre-scaled from the
/// engine, which keeps the multiply inside 32 bits for any phase length
/// the configuration allows.
pub fn progress_pixels(progress: Progress) -> u8 {
    let max = MAX_PIXELS as u32;
    let count = 1 + max * progress.remaining_scaled / progress.duration_scaled;
    count.clamp(1, max) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const RED: Rgb = Rgb { r: 255, g: 11, b: 11 };

    fn lit(frame: &Frame) -> usize {
        frame.pixels().iter().filter(|px| **px != Rgb::OFF).count()
    }

    #[test]
    fn test_from_hex_unpacks_channels() {
        let color = Rgb::from_hex(0xff0b0b);
        assert_eq!(color, Rgb { r: 0xff, g: 0x0b, b: 0x0b });
        assert_eq!(Rgb::from_hex(0x000000), Rgb::OFF);
    }

    #[test]
    fn test_solid_lights_prefix() {
        let frame = Frame::solid(4, RED);
        assert_eq!(lit(&frame), 4);
        assert_eq!(frame.pixels()[3], RED);
        assert_eq!(frame.pixels()[4], Rgb::OFF);
    }

    #[test]
    fn test_solid_count_saturates_at_strip_width() {
        let frame = Frame::solid(200, RED);
        assert_eq!(lit(&frame), MAX_PIXELS);
    }

    #[test]
    fn test_binary_lights_bit_positions() {
        // 6 = 0b110: pixels 1 and 2
        let frame = Frame::binary(6, RED);
        assert_eq!(frame.pixels()[0], Rgb::OFF);
        assert_eq!(frame.pixels()[1], RED);
        assert_eq!(frame.pixels()[2], RED);
        assert_eq!(lit(&frame), 2);
    }

    #[test]
    fn test_binary_zero_is_blank() {
        assert_eq!(Frame::binary(0, RED), Frame::BLANK);
    }

    #[test]
    fn test_binary_ignores_bits_past_strip() {
        // 1024 has only bit 10 set, which has no pixel
        assert_eq!(Frame::binary(1024, RED), Frame::BLANK);
        assert_eq!(lit(&Frame::binary(1023, RED)), MAX_PIXELS);
    }

    #[test]
    fn test_set_ignores_out_of_range() {
        let mut frame = Frame::BLANK;
        frame.set(MAX_PIXELS, RED);
        assert_eq!(frame, Frame::BLANK);
        frame.set(0, RED);
        assert_eq!(frame.pixels()[0], RED);
    }

    #[test]
    fn test_progress_pixels_at_endpoints() {
        let full = Progress { remaining_scaled: 1000, duration_scaled: 1000 };
        assert_eq!(progress_pixels(full), MAX_PIXELS as u8);

        let empty = Progress { remaining_scaled: 0, duration_scaled: 1000 };
        assert_eq!(progress_pixels(empty), 1);
    }

    #[test]
    fn test_progress_pixels_at_half() {
        // 25 min phase with 12.5 min left: 1 + floor(10 * 0.5) = 6
        let half = Progress { remaining_scaled: 500, duration_scaled: 1000 };
        assert_eq!(progress_pixels(half), 6);
    }

    proptest! {
        /// More time remaining never means fewer lit pixels
        #[test]
        fn test_progress_pixels_monotone_in_remaining(
            duration in 1u32..=u32::MAX / MAX_PIXELS as u32,
            a in 0u32..=u32::MAX,
            b in 0u32..=u32::MAX,
        ) {
            let a = a.min(duration);
            let b = b.min(duration);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

            let fewer = progress_pixels(Progress { remaining_scaled: lo, duration_scaled: duration });
            let more = progress_pixels(Progress { remaining_scaled: hi, duration_scaled: duration });

            prop_assert!(fewer <= more);
            prop_assert!((1..=MAX_PIXELS as u8).contains(&fewer));
            prop_assert!((1..=MAX_PIXELS as u8).contains(&more));
        }

        /// Binary rendering round-trips: reading lit pixels as bits
        /// reconstructs the displayed count
        #[test]
        fn test_binary_round_trips(n in 0u16..1024) {
            let frame = Frame::binary(n, RED);
            let mut read_back = 0u16;
            for (i, px) in frame.pixels().iter().enumerate() {
                if *px != Rgb::OFF {
                    read_back |= 1 << i;
                }
            }
            prop_assert_eq!(read_back, n);
        }
    }
}
