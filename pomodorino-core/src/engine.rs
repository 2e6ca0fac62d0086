//! Countdown engine
//!
//! Owns the current phase and its remaining time, and decides when a
//! phase is over. Remaining time is a signed microsecond count: the
//! pass that drives it negative triggers the transition and the
//! overshoot is discarded, so a late pass costs at most one poll
//! interval of wall-clock drift and nothing compounds.

use crate::cycle::{CycleCounter, CycleStats};
use crate::phase::{Phase, PhaseSpec, PhaseTable};

/// Shift applied to both operands of the progress division before the
/// pixel multiply, keeping the math inside 32 bits.
pub const PRESCALE_SHIFT: u32 = 4;

/// Remaining and total phase time, pre-scaled for the pixel math.
///
/// Construction keeps `remaining_scaled <= duration_scaled` and
/// `duration_scaled >= 1`, so consumers can divide freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Progress {
    /// Remaining microseconds, scaled down by [`PRESCALE_SHIFT`]
    pub remaining_scaled: u32,
    /// Phase duration in microseconds, scaled down by [`PRESCALE_SHIFT`]
    pub duration_scaled: u32,
}

impl Progress {
    /// Scale a remaining/duration pair. Negative remaining clamps to
    /// zero; remaining above the duration clamps to the duration.
    pub fn new(remaining_us: i64, duration_us: u64) -> Self {
        let duration_scaled = ((duration_us >> PRESCALE_SHIFT) as u32).max(1);
        let remaining_scaled = ((remaining_us.max(0) as u64) >> PRESCALE_SHIFT) as u32;
        Self {
            remaining_scaled: remaining_scaled.min(duration_scaled),
            duration_scaled,
        }
    }
}

/// Outcome of one engine pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickResult {
    /// Phase still active; payload is the remaining fraction
    Continued(Progress),
    /// The phase ended; payload is the phase now running
    Transitioned(Phase),
}

/// Phase countdown and transition state machine
pub struct TimerEngine {
    table: PhaseTable,
    cycle: CycleCounter,
    phase: Phase,
    remaining_us: i64,
}

impl TimerEngine {
    /// Start at the top of a work phase
    pub fn new(table: PhaseTable) -> Self {
        let remaining_us = table.spec(Phase::Work).duration_us as i64;
        Self {
            table,
            cycle: CycleCounter::new(),
            phase: Phase::Work,
            remaining_us,
        }
    }

    /// Advance the countdown by `elapsed_us`.
    ///
    /// Callers pass 0 for passes whose wall time should not be charged
    /// (paused, powered off, just resumed). When the counter goes
    /// negative the engine moves to the next phase with its full
    /// duration; the overshoot is not carried forward.
    pub fn tick(&mut self, elapsed_us: u64) -> TickResult {
        self.remaining_us -= elapsed_us as i64;

        if self.remaining_us >= 0 {
            return TickResult::Continued(self.progress());
        }

        let next = match self.phase {
            Phase::Work => self.cycle.record_work_completion(),
            Phase::ShortBreak | Phase::LongBreak => Phase::Work,
        };
        self.phase = next;
        self.remaining_us = self.table.spec(next).duration_us as i64;

        TickResult::Transitioned(next)
    }

    /// Phase currently running
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Remaining time in the current phase, microseconds
    pub fn remaining_us(&self) -> i64 {
        self.remaining_us
    }

    /// Remaining fraction of the current phase
    pub fn progress(&self) -> Progress {
        Progress::new(self.remaining_us, self.table.spec(self.phase).duration_us)
    }

    /// Attributes of the current phase
    pub fn current_spec(&self) -> &PhaseSpec {
        self.table.spec(self.phase)
    }

    /// The resolved attribute table
    pub fn table(&self) -> &PhaseTable {
        &self.table
    }

    /// Session counters
    pub fn stats(&self) -> CycleStats {
        self.cycle.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimerConfig;
    use crate::render::progress_pixels;

    const WORK_US: u64 = 1500 * 1_000_000;
    const SHORT_US: u64 = 300 * 1_000_000;
    const LONG_US: u64 = 900 * 1_000_000;

    fn make_engine() -> TimerEngine {
        TimerEngine::new(PhaseTable::new(&TimerConfig::default()))
    }

    fn seconds(s: u64) -> u64 {
        s * 1_000_000
    }

    #[test]
    fn test_starts_with_full_work_phase() {
        let engine = make_engine();
        assert_eq!(engine.phase(), Phase::Work);
        assert_eq!(engine.remaining_us(), WORK_US as i64);
    }

    #[test]
    fn test_tick_charges_elapsed_time() {
        let mut engine = make_engine();
        let result = engine.tick(seconds(100));

        assert!(matches!(result, TickResult::Continued(_)));
        assert_eq!(engine.remaining_us(), (WORK_US - seconds(100)) as i64);
    }

    #[test]
    fn test_zero_elapsed_changes_nothing() {
        let mut engine = make_engine();
        engine.tick(seconds(100));
        let before = engine.remaining_us();

        let result = engine.tick(0);

        assert!(matches!(result, TickResult::Continued(_)));
        assert_eq!(engine.remaining_us(), before);
    }

    #[test]
    fn test_reaching_zero_exactly_does_not_transition() {
        // The counter is allowed to sit at zero; only going negative ends
        // the phase
        let mut engine = make_engine();
        let result = engine.tick(WORK_US);

        assert!(matches!(result, TickResult::Continued(_)));
        assert_eq!(engine.remaining_us(), 0);
        assert_eq!(engine.phase(), Phase::Work);
    }

    #[test]
    fn test_transition_discards_overshoot() {
        let mut engine = make_engine();
        engine.tick(WORK_US);
        // A late pass overshoots by an hour; the break still starts full
        let result = engine.tick(seconds(3600));

        assert_eq!(result, TickResult::Transitioned(Phase::ShortBreak));
        assert_eq!(engine.remaining_us(), SHORT_US as i64);
    }

    #[test]
    fn test_breaks_always_return_to_work() {
        let mut engine = make_engine();
        engine.tick(WORK_US + 1);
        assert_eq!(engine.phase(), Phase::ShortBreak);

        let result = engine.tick(SHORT_US + 1);
        assert_eq!(result, TickResult::Transitioned(Phase::Work));
        assert_eq!(engine.remaining_us(), WORK_US as i64);
    }

    #[test]
    fn test_fourth_work_completion_earns_long_break() {
        let mut engine = make_engine();

        for expected_break in [Phase::ShortBreak, Phase::ShortBreak, Phase::ShortBreak] {
            assert_eq!(engine.tick(WORK_US + 1), TickResult::Transitioned(expected_break));
            assert_eq!(engine.tick(SHORT_US + 1), TickResult::Transitioned(Phase::Work));
        }

        assert_eq!(engine.tick(WORK_US + 1), TickResult::Transitioned(Phase::LongBreak));
        assert_eq!(engine.remaining_us(), LONG_US as i64);
        assert_eq!(engine.stats().total_completed, 4);
        assert_eq!(engine.stats().sessions_this_cycle, 0);
    }

    #[test]
    fn test_half_elapsed_work_phase_shows_six_pixels() {
        let mut engine = make_engine();
        let result = engine.tick(seconds(750));

        match result {
            TickResult::Continued(progress) => assert_eq!(progress_pixels(progress), 6),
            TickResult::Transitioned(_) => panic!("phase should still be running"),
        }
    }

    #[test]
    fn test_progress_stays_in_bounds_near_the_end() {
        let mut engine = make_engine();
        engine.tick(WORK_US - 1);

        let progress = engine.progress();
        assert_eq!(progress_pixels(progress), 1);
        assert!(progress.remaining_scaled <= progress.duration_scaled);
    }

    #[test]
    fn test_progress_clamps_negative_remaining() {
        let progress = Progress::new(-500, seconds(300));
        assert_eq!(progress.remaining_scaled, 0);
    }
}
