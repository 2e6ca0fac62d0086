//! Pomodoro cycle accounting
//!
//! Counts completed work sessions, both within the current cycle and
//! across the whole power-on session. Consulted only from the engine's
//! transition path and the session-count displays.

use crate::phase::Phase;

/// Work sessions per cycle before the long break
pub const SESSIONS_PER_CYCLE: u8 = 4;

/// Snapshot of the counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleStats {
    /// Completed work phases since the last long break
    pub sessions_this_cycle: u8,
    /// Completed work phases since boot, never reset
    pub total_completed: u16,
}

/// Tracks progress through the four-session pomodoro cycle
#[derive(Debug, Clone, Copy, Default)]
pub struct CycleCounter {
    sessions_this_cycle: u8,
    total_completed: u16,
}

impl CycleCounter {
    pub const fn new() -> Self {
        Self {
            sessions_this_cycle: 0,
            total_completed: 0,
        }
    }

    /// Record a finished work phase and pick the break that follows.
    ///
    /// Every fourth completion closes the cycle: the in-cycle counter
    /// resets and the reward is a long break. Otherwise a short one.
    pub fn record_work_completion(&mut self) -> Phase {
        self.sessions_this_cycle += 1;
        self.total_completed = self.total_completed.saturating_add(1);

        if self.sessions_this_cycle >= SESSIONS_PER_CYCLE {
            self.sessions_this_cycle = 0;
            Phase::LongBreak
        } else {
            Phase::ShortBreak
        }
    }

    /// Current counters
    pub fn stats(&self) -> CycleStats {
        CycleStats {
            sessions_this_cycle: self.sessions_this_cycle,
            total_completed: self.total_completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_three_completions_earn_short_breaks() {
        let mut cycle = CycleCounter::new();
        assert_eq!(cycle.record_work_completion(), Phase::ShortBreak);
        assert_eq!(cycle.record_work_completion(), Phase::ShortBreak);
        assert_eq!(cycle.record_work_completion(), Phase::ShortBreak);
        assert_eq!(cycle.stats().sessions_this_cycle, 3);
    }

    #[test]
    fn test_fourth_completion_earns_long_break_and_resets() {
        let mut cycle = CycleCounter::new();
        for _ in 0..3 {
            cycle.record_work_completion();
        }

        assert_eq!(cycle.record_work_completion(), Phase::LongBreak);
        assert_eq!(cycle.stats().sessions_this_cycle, 0);
        assert_eq!(cycle.stats().total_completed, 4);
    }

    #[test]
    fn test_total_survives_cycle_reset() {
        let mut cycle = CycleCounter::new();
        let mut long_breaks = 0;
        for _ in 0..8 {
            if cycle.record_work_completion() == Phase::LongBreak {
                long_breaks += 1;
            }
        }

        assert_eq!(long_breaks, 2);
        assert_eq!(cycle.stats().total_completed, 8);
        assert_eq!(cycle.stats().sessions_this_cycle, 0);
    }
}
