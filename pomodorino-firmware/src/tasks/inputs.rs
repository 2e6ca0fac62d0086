//! Input tasks: tap sensor, buttons, power switch
//!
//! Each input gets its own task waiting on a GPIO edge. Handlers only
//! flip control flags and pulse [`INPUT_EVENT`]; every decision about
//! what a flag means happens in the supervisor's next pass.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::Timer;

use pomodorino_drivers::lis3dh::Lis3dh;

use crate::board::{DEBOUNCE_MS, SWITCH_SETTLE_MS};
use crate::channels::{FLAGS, INPUT_EVENT};

/// Tap sensor interrupt task
///
/// The LIS3DH raises INT1 on a single tap and latches it; reading the
/// click source register re-arms it for the next tap. Tap-to-tap dead
/// time is enforced by the sensor itself.
#[embassy_executor::task]
pub async fn tap_task(mut int_pin: Input<'static>, mut sensor: Lis3dh<I2c<'static, I2C0, Blocking>>) {
    info!("Tap task started");

    loop {
        int_pin.wait_for_rising_edge().await;

        FLAGS.toggle_paused();
        INPUT_EVENT.signal(());
        debug!("Tap: paused={}", FLAGS.is_paused());

        if let Err(e) = sensor.clear_tap() {
            warn!("Failed to re-arm tap interrupt: {:?}", e);
        }
    }
}

/// Right button: toggle boundary tones
#[embassy_executor::task]
pub async fn tones_button_task(mut button: Input<'static>) {
    info!("Tones button task started");

    loop {
        button.wait_for_falling_edge().await;

        FLAGS.toggle_tones();
        INPUT_EVENT.signal(());
        debug!("Tones enabled: {}", FLAGS.tones_enabled());

        Timer::after_millis(DEBOUNCE_MS).await;
    }
}

/// Left button: show the completed-session count
#[embassy_executor::task]
pub async fn stats_button_task(mut button: Input<'static>) {
    info!("Stats button task started");

    loop {
        button.wait_for_falling_edge().await;

        FLAGS.request_stats();
        INPUT_EVENT.signal(());
        debug!("Session count requested");

        Timer::after_millis(DEBOUNCE_MS).await;
    }
}

/// Power slide switch, level-read on every edge.
///
/// The switch shorts to ground in the on position, so the level is
/// inverted. Reading the level instead of counting edges means a missed
/// or doubled edge can never leave the firmware disagreeing with the
/// physical switch.
#[embassy_executor::task]
pub async fn power_switch_task(mut switch: Input<'static>) {
    info!("Power switch task started");

    loop {
        switch.wait_for_any_edge().await;
        Timer::after_millis(SWITCH_SETTLE_MS).await;

        let on = switch.is_low();
        FLAGS.set_power(on);
        INPUT_EVENT.signal(());
        info!("Power switch: {}", if on { "on" } else { "off" });
    }
}
