//! Supervisor task
//!
//! Owns the core supervisor and runs the main poll loop: one pass per
//! wakeup, where a wakeup is either the poll interval expiring or an
//! input task pulsing [`INPUT_EVENT`]. Frames and tones decided by a
//! pass are forwarded to the hardware tasks through their signals.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Instant, Timer};

use pomodorino_core::config::TimerConfig;
use pomodorino_core::supervisor::Supervisor;

use crate::channels::{FLAGS, FRAME_SIGNAL, INPUT_EVENT, TONE_SIGNAL};

/// Main coordination loop
#[embassy_executor::task]
pub async fn supervisor_task() {
    info!("Supervisor task started");

    let mut supervisor = Supervisor::new(&TimerConfig::default());

    // Whole strip lit during boot, whatever the switch says
    FRAME_SIGNAL.signal(supervisor.boot_frame());

    let mut last_state = supervisor.state();
    let mut last_phase = supervisor.phase();

    loop {
        let out = supervisor.poll(Instant::now().as_micros(), &FLAGS);

        if let Some(frame) = out.frame {
            FRAME_SIGNAL.signal(frame);
        }
        if let Some(tone) = out.tone {
            TONE_SIGNAL.signal(tone);
        }

        let phase = supervisor.phase();
        if phase != last_phase {
            let stats = supervisor.stats();
            info!(
                "Phase boundary: {:?} next, {} sessions done ({} this cycle)",
                phase, stats.total_completed, stats.sessions_this_cycle
            );
            last_phase = phase;
        }

        let state = supervisor.state();
        if state != last_state {
            info!("State: {:?} -> {:?}", last_state, state);
            last_state = state;
        }

        // Sleep out the interval, but re-poll right away on any input
        match select(
            Timer::after_millis(out.next_poll_ms as u64),
            INPUT_EVENT.wait(),
        )
        .await
        {
            Either::First(()) => {}
            Either::Second(()) => trace!("Input wakeup"),
        }
    }
}
