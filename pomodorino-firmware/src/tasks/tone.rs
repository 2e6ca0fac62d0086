//! Buzzer task
//!
//! Plays tone commands from the supervisor on a PWM slice. The slice
//! idles with compare at zero, which holds the line low between tones.

use defmt::*;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_time::Timer;
use fixed::types::U12F4;

use pomodorino_drivers::buzzer;

use crate::board::SYS_CLK_HZ;
use crate::channels::TONE_SIGNAL;

/// Buzzer output task
#[embassy_executor::task]
pub async fn tone_task(mut pwm: Pwm<'static>) {
    info!("Tone task started");

    loop {
        let cmd = TONE_SIGNAL.wait().await;

        let Some(params) = buzzer::tone_params(SYS_CLK_HZ, cmd.freq_hz) else {
            warn!("Unplayable tone: {} Hz", cmd.freq_hz);
            continue;
        };

        trace!("Tone: {} Hz for {} ms", cmd.freq_hz, cmd.duration_ms);

        let mut cfg = PwmConfig::default();
        cfg.divider = U12F4::from_bits((params.divider as u16) << 4);
        cfg.top = params.top;
        cfg.compare_a = params.compare;
        pwm.set_config(&cfg);

        Timer::after_millis(cmd.duration_ms as u64).await;

        cfg.compare_a = 0;
        pwm.set_config(&cfg);
    }
}
