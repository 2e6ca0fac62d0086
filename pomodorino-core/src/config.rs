//! Timer configuration types
//!
//! Durations, colors, and boundary tones for the three phases. The
//! defaults are the classic 25/5/15 minute split. There is no runtime
//! facility for changing them; configuration here means compile-time
//! tuning by whoever builds the firmware.

use crate::render::Rgb;

/// Low C, the work boundary pitch
pub const PITCH_C3_HZ: u16 = 130;
/// E above it, the short break boundary pitch
pub const PITCH_E3_HZ: u16 = 164;
/// G above it, the long break boundary pitch
pub const PITCH_G3_HZ: u16 = 196;

/// Settings for one phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhaseSetting {
    /// Phase length in seconds. The progress math supports lengths up
    /// to a little under two hours.
    pub duration_s: u32,
    /// Strip color while the phase runs
    pub color: Rgb,
    /// Tone announced when the phase begins
    pub tone_hz: u16,
}

/// Full timer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerConfig {
    pub work: PhaseSetting,
    pub short_break: PhaseSetting,
    pub long_break: PhaseSetting,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work: PhaseSetting {
                duration_s: 25 * 60,
                color: Rgb::from_hex(0xff0b0b),
                tone_hz: PITCH_C3_HZ,
            },
            short_break: PhaseSetting {
                duration_s: 5 * 60,
                color: Rgb::from_hex(0xff0aff),
                tone_hz: PITCH_E3_HZ,
            },
            long_break: PhaseSetting {
                duration_s: 15 * 60,
                color: Rgb::from_hex(0x0affff),
                tone_hz: PITCH_G3_HZ,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_durations() {
        let config = TimerConfig::default();
        assert_eq!(config.work.duration_s, 1500);
        assert_eq!(config.short_break.duration_s, 300);
        assert_eq!(config.long_break.duration_s, 900);
    }

    #[test]
    fn test_default_colors_are_distinct() {
        let config = TimerConfig::default();
        assert_ne!(config.work.color, config.short_break.color);
        assert_ne!(config.work.color, config.long_break.color);
        assert_ne!(config.short_break.color, config.long_break.color);
    }

    #[test]
    fn test_default_pitches_ascend() {
        let config = TimerConfig::default();
        assert!(config.work.tone_hz < config.short_break.tone_hz);
        assert!(config.short_break.tone_hz < config.long_break.tone_hz);
    }
}
