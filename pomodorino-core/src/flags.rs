//! Control flags shared between input handlers and the main loop
//!
//! The one piece of state touched from outside the supervisor's
//! sequential control. Input handlers (tap sensor, buttons, power
//! switch) flip individual bits; the supervisor reads them every pass
//! and clears the one-shot markers itself. Each bit is a boolean with
//! no data attached, so relaxed atomics are all the synchronization
//! this needs, and `portable-atomic` makes them available on cores
//! without native compare-and-swap.

use portable_atomic::{AtomicBool, Ordering};

/// Flag store set by hardware inputs and consumed by the supervisor.
///
/// Lives in a `static` so interrupt-context handlers and the main loop
/// can share it without locking.
pub struct ControlFlags {
    paused: AtomicBool,
    pause_toggled: AtomicBool,
    tones_enabled: AtomicBool,
    power_on: AtomicBool,
    stats_requested: AtomicBool,
}

impl ControlFlags {
    /// Boot state: running, tones on. Power starts false and is set
    /// from the physical switch level before the first poll.
    pub const fn new() -> Self {
        Self {
            paused: AtomicBool::new(false),
            pause_toggled: AtomicBool::new(false),
            tones_enabled: AtomicBool::new(true),
            power_on: AtomicBool::new(false),
            stats_requested: AtomicBool::new(false),
        }
    }

    // Input side

    /// Tap handler: flip the pause level and leave a marker so the
    /// supervisor can tell a toggle happened even if the level ends up
    /// back where it started.
    pub fn toggle_paused(&self) {
        self.paused.fetch_xor(true, Ordering::Relaxed);
        self.pause_toggled.store(true, Ordering::Relaxed);
    }

    /// Button handler: flip boundary tones on or off
    pub fn toggle_tones(&self) {
        self.tones_enabled.fetch_xor(true, Ordering::Relaxed);
    }

    /// Switch handler: record the current switch level
    pub fn set_power(&self, on: bool) {
        self.power_on.store(on, Ordering::Relaxed);
    }

    /// Button handler: ask for the session-count display
    pub fn request_stats(&self) {
        self.stats_requested.store(true, Ordering::Relaxed);
    }

    // Supervisor side

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }

    /// Assert pause from the supervisor; phase boundaries halt the
    /// countdown until the user taps.
    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Relaxed);
    }

    /// Read and clear the pause-toggle marker
    pub fn take_pause_toggled(&self) -> bool {
        self.pause_toggled.swap(false, Ordering::Relaxed)
    }

    pub fn tones_enabled(&self) -> bool {
        self.tones_enabled.load(Ordering::Relaxed)
    }

    pub fn power_on(&self) -> bool {
        self.power_on.load(Ordering::Relaxed)
    }

    /// Read and clear a pending session-count request
    pub fn take_stats_request(&self) -> bool {
        self.stats_requested.swap(false, Ordering::Relaxed)
    }
}

impl Default for ControlFlags {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boot_state() {
        let flags = ControlFlags::new();
        assert!(!flags.is_paused());
        assert!(!flags.take_pause_toggled());
        assert!(flags.tones_enabled());
        assert!(!flags.power_on());
        assert!(!flags.take_stats_request());
    }

    #[test]
    fn test_toggle_paused_flips_level_and_marks() {
        let flags = ControlFlags::new();

        flags.toggle_paused();
        assert!(flags.is_paused());
        assert!(flags.take_pause_toggled());
        assert!(!flags.take_pause_toggled());

        flags.toggle_paused();
        assert!(!flags.is_paused());
        assert!(flags.take_pause_toggled());
    }

    #[test]
    fn test_double_toggle_restores_level_but_keeps_marker() {
        let flags = ControlFlags::new();
        flags.toggle_paused();
        flags.toggle_paused();

        assert!(!flags.is_paused());
        assert!(flags.take_pause_toggled());
    }

    #[test]
    fn test_supervisor_pause_does_not_mark_toggle() {
        let flags = ControlFlags::new();
        flags.set_paused(true);

        assert!(flags.is_paused());
        assert!(!flags.take_pause_toggled());
    }

    #[test]
    fn test_toggle_tones() {
        let flags = ControlFlags::new();
        flags.toggle_tones();
        assert!(!flags.tones_enabled());
        flags.toggle_tones();
        assert!(flags.tones_enabled());
    }

    #[test]
    fn test_stats_request_is_one_shot() {
        let flags = ControlFlags::new();
        flags.request_stats();
        assert!(flags.take_stats_request());
        assert!(!flags.take_stats_request());
    }
}
