//! Main loop supervisor
//!
//! One [`Supervisor::poll`] call is one pass of the device's main loop:
//! observe the control flags, advance the countdown, decide what (if
//! anything) to redraw, and say how long to wait before the next pass.
//! The pause animation and the session-count overlay are explicit
//! sub-states advanced one step per pass, so the loop never blocks and
//! every flag change is noticed within one poll interval.
//!
//! The supervisor owns all mutable state except the flags themselves;
//! input handlers never call in here.

use crate::config::TimerConfig;
use crate::cycle::CycleStats;
use crate::engine::{TickResult, TimerEngine};
use crate::flags::ControlFlags;
use crate::phase::{Phase, PhaseTable};
use crate::render::{progress_pixels, Frame, Rgb, MAX_PIXELS};

/// Poll interval while running or powered off, milliseconds
pub const RUN_POLL_MS: u32 = 100;

/// Poll interval while the pause animation runs, milliseconds
pub const ANIM_STEP_MS: u32 = 42;

/// Boundary tone length, milliseconds
pub const TONE_DURATION_MS: u16 = 50;

/// Animation passes spent on the binary session count before the sweep
const SHOW_TOTAL_STEPS: u8 = 10;

/// Animation passes spent idle after the sweep
const REST_STEPS: u8 = 6;

/// Passes the session-count overlay stays up while running (~1.2 s)
const STATS_HOLD_POLLS: u8 = 12;

/// Tone request for the hardware layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ToneCommand {
    pub freq_hz: u16,
    pub duration_ms: u16,
}

impl ToneCommand {
    /// The short chime played at phase boundaries
    pub const fn chime(freq_hz: u16) -> Self {
        Self {
            freq_hz,
            duration_ms: TONE_DURATION_MS,
        }
    }
}

/// Top-level loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoopState {
    /// Switch off: strip dark, countdown frozen, state retained
    PoweredOff,
    /// Halted by a tap or a phase boundary; pause animation cycling
    Paused,
    /// Countdown active
    Running,
}

/// Pause animation position, advanced one step per pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PauseStep {
    /// Holding the binary session count on the strip
    ShowTotal { polls_left: u8 },
    /// Painting phase color one pixel per pass over the count
    Sweep { next: u8 },
    /// Idle gap before the animation repeats
    Rest { polls_left: u8 },
}

/// What one pass decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOutput {
    /// Frame to push to the strip, if the display should change
    pub frame: Option<Frame>,
    /// Tone to play, if a boundary was crossed with tones enabled
    pub tone: Option<ToneCommand>,
    /// Delay before the next pass, milliseconds
    pub next_poll_ms: u32,
}

impl PollOutput {
    const fn quiet(next_poll_ms: u32) -> Self {
        Self {
            frame: None,
            tone: None,
            next_poll_ms,
        }
    }
}

/// Drives the countdown engine from control flags and wall-clock time
pub struct Supervisor {
    engine: TimerEngine,
    state: LoopState,
    /// Pixel count of the last progress frame pushed to the strip;
    /// progress redraws are suppressed while it is unchanged
    lit_count: u8,
    /// Set when the cache must not suppress the next progress redraw
    force_redraw: bool,
    pause_step: PauseStep,
    /// Frame the sweep paints over, kept between animation passes
    anim_frame: Frame,
    /// Remaining passes of the session-count overlay; 0 means none
    stats_hold: u8,
    /// Clock reading at the previous pass
    last_us: Option<u64>,
}

impl Supervisor {
    /// Build the supervisor in its boot state: full work phase ahead,
    /// the whole strip considered lit.
    pub fn new(config: &TimerConfig) -> Self {
        Self {
            engine: TimerEngine::new(PhaseTable::new(config)),
            state: LoopState::Running,
            lit_count: MAX_PIXELS as u8,
            force_redraw: false,
            pause_step: PauseStep::ShowTotal {
                polls_left: SHOW_TOTAL_STEPS,
            },
            anim_frame: Frame::BLANK,
            stats_hold: 0,
            last_us: None,
        }
    }

    /// Frame to draw once at startup: the full strip in work color,
    /// drawn whatever the switch position says.
    pub fn boot_frame(&self) -> Frame {
        Frame::solid(MAX_PIXELS as u8, self.engine.current_spec().color)
    }

    /// One main-loop pass at clock reading `now_us`
    pub fn poll(&mut self, now_us: u64, flags: &ControlFlags) -> PollOutput {
        let mut elapsed_us = self.observe_elapsed(now_us);

        if !flags.power_on() {
            let _ = flags.take_stats_request();
            return self.powered_off_pass();
        }

        if self.state == LoopState::PoweredOff {
            // Power restored: the interval spent off costs nothing, and
            // the strip was cleared, so the cache must not suppress the
            // repaint
            self.state = LoopState::Running;
            self.force_redraw = true;
            elapsed_us = 0;
        }

        if flags.is_paused() {
            if self.state != LoopState::Paused {
                self.enter_paused();
            }
            let _ = flags.take_stats_request();
            return self.animation_pass();
        }

        if flags.take_pause_toggled() {
            // Resumed, or a tap pair landed inside one poll interval.
            // Either way the gap is not charged, and the progress
            // display replaces whatever the animation left behind.
            self.state = LoopState::Running;
            self.stats_hold = 0;
            self.force_redraw = true;
            elapsed_us = 0;
        }

        self.running_pass(elapsed_us, flags)
    }

    /// Loop state as of the last pass
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Phase currently on the engine
    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    /// Remaining time in the current phase, microseconds
    pub fn remaining_us(&self) -> i64 {
        self.engine.remaining_us()
    }

    /// Session counters
    pub fn stats(&self) -> CycleStats {
        self.engine.stats()
    }

    /// Elapsed microseconds since the previous pass. Observed on every
    /// pass, including paused and powered-off ones, so intervals that
    /// must not be charged are consumed here instead of accumulating
    /// into the first running pass.
    fn observe_elapsed(&mut self, now_us: u64) -> u64 {
        let elapsed = match self.last_us {
            Some(last) => now_us.saturating_sub(last),
            None => 0,
        };
        self.last_us = Some(now_us);
        elapsed
    }

    fn powered_off_pass(&mut self) -> PollOutput {
        let mut out = PollOutput::quiet(RUN_POLL_MS);
        if self.state != LoopState::PoweredOff {
            self.state = LoopState::PoweredOff;
            self.stats_hold = 0;
            out.frame = Some(Frame::BLANK);
        }
        out
    }

    fn enter_paused(&mut self) {
        self.state = LoopState::Paused;
        self.stats_hold = 0;
        self.pause_step = PauseStep::ShowTotal {
            polls_left: SHOW_TOTAL_STEPS,
        };
    }

    /// One step of the pause animation
    fn animation_pass(&mut self) -> PollOutput {
        let mut out = PollOutput::quiet(ANIM_STEP_MS);

        match self.pause_step {
            PauseStep::ShowTotal { polls_left } => {
                if polls_left == SHOW_TOTAL_STEPS {
                    // Fresh animation cycle: completed sessions in
                    // binary, always in work color whatever phase we
                    // paused in
                    let total = self.engine.stats().total_completed;
                    self.anim_frame = Frame::binary(total, self.work_color());
                    out.frame = Some(self.anim_frame);
                }
                self.pause_step = if polls_left <= 1 {
                    PauseStep::Sweep { next: 0 }
                } else {
                    PauseStep::ShowTotal {
                        polls_left: polls_left - 1,
                    }
                };
            }
            PauseStep::Sweep { next } => {
                // One more pixel of phase color on top of the count
                self.anim_frame.set(next as usize, self.engine.current_spec().color);
                out.frame = Some(self.anim_frame);

                self.pause_step = if next + 1 >= self.lit_count {
                    PauseStep::Rest {
                        polls_left: REST_STEPS,
                    }
                } else {
                    PauseStep::Sweep { next: next + 1 }
                };
            }
            PauseStep::Rest { polls_left } => {
                self.pause_step = if polls_left <= 1 {
                    PauseStep::ShowTotal {
                        polls_left: SHOW_TOTAL_STEPS,
                    }
                } else {
                    PauseStep::Rest {
                        polls_left: polls_left - 1,
                    }
                };
            }
        }

        out
    }

    /// A pass with the countdown live
    fn running_pass(&mut self, elapsed_us: u64, flags: &ControlFlags) -> PollOutput {
        let mut out = PollOutput::quiet(RUN_POLL_MS);

        if flags.take_stats_request() && self.stats_hold == 0 {
            self.stats_hold = STATS_HOLD_POLLS;
            let total = self.engine.stats().total_completed;
            out.frame = Some(Frame::binary(total, self.work_color()));
        }

        match self.engine.tick(elapsed_us) {
            TickResult::Continued(progress) => {
                let count = progress_pixels(progress);

                if self.stats_hold > 0 {
                    // Overlay owns the strip; keep the cache tracking so
                    // the repaint afterwards lands on the right count
                    self.lit_count = count;
                    self.stats_hold -= 1;
                    if self.stats_hold == 0 {
                        out.frame = Some(self.progress_frame());
                    }
                } else if self.force_redraw || count != self.lit_count {
                    self.force_redraw = false;
                    self.lit_count = count;
                    out.frame = Some(self.progress_frame());
                }
            }
            TickResult::Transitioned(_) => {
                // Boundary: full strip in the next phase's color, a
                // chime if enabled, then halt until the user taps
                flags.set_paused(true);
                self.enter_paused();
                self.lit_count = MAX_PIXELS as u8;
                self.force_redraw = false;

                let spec = self.engine.current_spec();
                out.frame = Some(Frame::solid(MAX_PIXELS as u8, spec.color));
                if flags.tones_enabled() {
                    out.tone = Some(ToneCommand::chime(spec.tone_hz));
                }
                out.next_poll_ms = ANIM_STEP_MS;
            }
        }

        out
    }

    fn progress_frame(&self) -> Frame {
        Frame::solid(self.lit_count, self.engine.current_spec().color)
    }

    fn work_color(&self) -> Rgb {
        self.engine.table().spec(Phase::Work).color
    }
}
