//! Embassy async tasks
//!
//! Each task runs independently and communicates via the statics in
//! `channels`.

pub mod inputs;
pub mod pixels;
pub mod supervisor;
pub mod tone;

pub use inputs::{power_switch_task, stats_button_task, tap_task, tones_button_task};
pub use pixels::pixels_task;
pub use supervisor::supervisor_task;
pub use tone::tone_task;
