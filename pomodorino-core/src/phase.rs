//! Phase identity and the phase attribute table
//!
//! Work, short break, and long break each carry a fixed duration, a
//! strip color, and a boundary tone. The attributes live in an
//! immutable table resolved once at startup; all lookups go through
//! [`Phase`] values, never raw indices.

use crate::config::{PhaseSetting, TimerConfig};
use crate::render::Rgb;

/// One timed segment of the pomodoro cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    /// Number of phase kinds
    pub const COUNT: usize = 3;

    /// True for the focused-work phase
    pub fn is_work(self) -> bool {
        matches!(self, Phase::Work)
    }

    /// True for either break phase
    pub fn is_break(self) -> bool {
        !self.is_work()
    }

    const fn index(self) -> usize {
        match self {
            Phase::Work => 0,
            Phase::ShortBreak => 1,
            Phase::LongBreak => 2,
        }
    }
}

/// Fixed attributes of one phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhaseSpec {
    /// Phase length in microseconds
    pub duration_us: u64,
    /// Strip color while the phase runs
    pub color: Rgb,
    /// Tone announced when the phase begins
    pub tone_hz: u16,
}

impl PhaseSpec {
    fn from_setting(setting: &PhaseSetting) -> Self {
        Self {
            duration_us: setting.duration_s as u64 * 1_000_000,
            color: setting.color,
            tone_hz: setting.tone_hz,
        }
    }
}

/// Immutable phase attribute lookup, built once at startup
#[derive(Debug, Clone, Copy)]
pub struct PhaseTable {
    specs: [PhaseSpec; Phase::COUNT],
}

impl PhaseTable {
    /// Resolve the table from a timer configuration
    pub fn new(config: &TimerConfig) -> Self {
        Self {
            specs: [
                PhaseSpec::from_setting(&config.work),
                PhaseSpec::from_setting(&config.short_break),
                PhaseSpec::from_setting(&config.long_break),
            ],
        }
    }

    /// Attributes for `phase`
    pub fn spec(&self, phase: Phase) -> &PhaseSpec {
        &self.specs[phase.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_maps_phases_to_their_settings() {
        let config = TimerConfig::default();
        let table = PhaseTable::new(&config);

        assert_eq!(table.spec(Phase::Work).duration_us, 1500 * 1_000_000);
        assert_eq!(table.spec(Phase::Work).color, config.work.color);
        assert_eq!(table.spec(Phase::ShortBreak).tone_hz, config.short_break.tone_hz);
        assert_eq!(table.spec(Phase::LongBreak).duration_us, 900 * 1_000_000);
    }

    #[test]
    fn test_phase_predicates() {
        assert!(Phase::Work.is_work());
        assert!(!Phase::Work.is_break());
        assert!(Phase::ShortBreak.is_break());
        assert!(Phase::LongBreak.is_break());
    }
}
