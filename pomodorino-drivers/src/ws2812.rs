//! WS2812 pixel encoding and strip timing
//!
//! The strip is driven by a PIO program that shifts 24 bits per pixel
//! out of the TX FIFO, most significant bit first, at 10 state machine
//! cycles per bit. This module holds the pure math: packing frames
//! into FIFO words, the global brightness scale, and the clock divider
//! that puts the state machine at the WS2812 bit rate. The PIO plumbing
//! itself lives in the firmware crate.

use pomodorino_core::render::{Frame, Rgb, MAX_PIXELS};

/// WS2812 data rate, bits per second
pub const BIT_RATE_HZ: u32 = 800_000;

/// State machine cycles spent per bit by the PIO program
pub const CYCLES_PER_BIT: u32 = 10;

/// Low time after a frame that makes the strip latch, microseconds
pub const LATCH_US: u64 = 300;

/// Scale one color by an 8-bit brightness, 255 meaning full.
///
/// The +1 makes 255 an exact passthrough while 0 blacks out, and the
/// shift keeps everything in integer math.
pub fn scale(color: Rgb, brightness: u8) -> Rgb {
    let scale = brightness as u16 + 1;
    Rgb {
        r: ((color.r as u16 * scale) >> 8) as u8,
        g: ((color.g as u16 * scale) >> 8) as u8,
        b: ((color.b as u16 * scale) >> 8) as u8,
    }
}

/// Pack a color into a TX FIFO word.
///
/// WS2812 wants green first, then red, then blue. The 24 data bits sit
/// at the top of the word because the state machine shifts left.
pub fn pixel_word(color: Rgb) -> u32 {
    ((color.g as u32) << 24) | ((color.r as u32) << 16) | ((color.b as u32) << 8)
}

/// Encode a frame into FIFO words with brightness applied
pub fn encode_frame(frame: &Frame, brightness: u8) -> [u32; MAX_PIXELS] {
    let mut words = [0u32; MAX_PIXELS];
    for (word, px) in words.iter_mut().zip(frame.pixels()) {
        *word = pixel_word(scale(*px, brightness));
    }
    words
}

/// PIO clock divider for the WS2812 bit rate, as (integer, fractional)
/// parts of an 8.8 fixed-point value.
pub fn clock_divider(sys_clk_hz: u32) -> (u16, u8) {
    let target_hz = BIT_RATE_HZ * CYCLES_PER_BIT;
    let divider_x256 = (sys_clk_hz as u64 * 256) / target_hz as u64;
    ((divider_x256 >> 8) as u16, (divider_x256 & 0xFF) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_endpoints() {
        let color = Rgb { r: 255, g: 128, b: 1 };

        assert_eq!(scale(color, 255), color);
        assert_eq!(scale(color, 0), Rgb::OFF);
    }

    #[test]
    fn test_scale_dim() {
        // Brightness 10: 255 -> 10, 11 -> 0
        let dim = scale(Rgb { r: 255, g: 11, b: 11 }, 10);
        assert_eq!(dim, Rgb { r: 10, g: 0, b: 0 });
    }

    #[test]
    fn test_pixel_word_is_grb_left_aligned() {
        let word = pixel_word(Rgb { r: 0x12, g: 0x34, b: 0x56 });
        assert_eq!(word, 0x3412_5600);
    }

    #[test]
    fn test_encode_frame_orders_pixels() {
        let mut frame = Frame::BLANK;
        frame.set(0, Rgb { r: 255, g: 0, b: 0 });
        frame.set(9, Rgb { r: 0, g: 0, b: 255 });

        let words = encode_frame(&frame, 255);
        assert_eq!(words[0], 0x00FF_0000);
        assert_eq!(words[9], 0x0000_FF00);
        assert_eq!(words[1], 0);
    }

    #[test]
    fn test_clock_divider_at_125_mhz() {
        // 125 MHz / 8 MHz = 15.625: integer 15, fraction 160/256
        assert_eq!(clock_divider(125_000_000), (15, 160));
    }

    #[test]
    fn test_clock_divider_at_133_mhz() {
        // 133 MHz / 8 MHz = 16.625
        assert_eq!(clock_divider(133_000_000), (16, 160));
    }
}
