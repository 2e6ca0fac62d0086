//! Inter-task communication
//!
//! Defines the static flags and signals shared between Embassy tasks.
//! Everything here is latest-wins: the strip only ever wants the newest
//! frame and the buzzer the newest tone, so plain signals are enough
//! and nothing queues.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use pomodorino_core::flags::ControlFlags;
use pomodorino_core::render::Frame;
use pomodorino_core::supervisor::ToneCommand;

/// Control flags flipped by the input tasks, read by the supervisor
pub static FLAGS: ControlFlags = ControlFlags::new();

/// Pulsed by input tasks so the supervisor re-polls immediately instead
/// of sleeping out its current interval
pub static INPUT_EVENT: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Newest frame for the strip (updated by the supervisor)
pub static FRAME_SIGNAL: Signal<CriticalSectionRawMutex, Frame> = Signal::new();

/// Tone request for the buzzer task (updated by the supervisor)
pub static TONE_SIGNAL: Signal<CriticalSectionRawMutex, ToneCommand> = Signal::new();
