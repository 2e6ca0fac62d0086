//! Tuning constants for the reference Pomodorino board
//!
//! Pin assignments live next to the peripheral setup in `main`; this
//! module collects the values someone might actually want to tweak.

/// System clock, Hz (the default embassy-rp clock tree)
pub const SYS_CLK_HZ: u32 = 125_000_000;

/// Global strip brightness out of 255. The strip faces the user from
/// arm's length, so it runs dim.
pub const STRIP_BRIGHTNESS: u8 = 10;

/// Button debounce hold-off after an edge, milliseconds
pub const DEBOUNCE_MS: u64 = 50;

/// Slide switch settle time after an edge, milliseconds
pub const SWITCH_SETTLE_MS: u64 = 20;

/// Idle heartbeat interval for the main task, seconds
pub const HEARTBEAT_SECS: u64 = 60;
