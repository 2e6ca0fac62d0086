//! Piezo buzzer PWM parameter math
//!
//! The buzzer is a square wave from a PWM slice: pick a divider so a
//! full 16-bit counter period is longer than the tone period, derive
//! the wrap value from the target frequency, and sit the compare level
//! at half for an even duty cycle. Pure math, tested on the host; the
//! slice configuration lives in the firmware crate.

/// PWM slice settings for one tone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TonePwm {
    /// Integer clock divider for the slice
    pub divider: u8,
    /// Counter wrap value
    pub top: u16,
    /// Compare level for a 50% duty square wave
    pub compare: u16,
}

/// Compute slice settings for `freq_hz` on a `sys_clk_hz` system clock.
///
/// Returns `None` for frequencies the slice cannot produce: zero, above
/// the system clock, or anything needing a divider beyond 255.
pub fn tone_params(sys_clk_hz: u32, freq_hz: u16) -> Option<TonePwm> {
    if freq_hz == 0 {
        return None;
    }

    // Smallest divider that fits one tone period into the counter range
    let counts_per_period = sys_clk_hz / freq_hz as u32;
    if counts_per_period == 0 {
        return None;
    }
    let divider = counts_per_period.div_ceil(0x1_0000);
    if divider > 255 {
        return None;
    }

    let top = (counts_per_period / divider - 1) as u16;
    Some(TonePwm {
        divider: divider as u8,
        top,
        compare: top / 2 + 1,
    })
}
