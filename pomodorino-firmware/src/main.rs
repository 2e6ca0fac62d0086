//! Pomodorino - Pomodoro Desk Timer Firmware
//!
//! Main firmware binary for the RP2040-based desk pomodoro timer: ten
//! WS2812 pixels count down the current phase, a tap on the enclosure
//! pauses and resumes, and a piezo marks phase boundaries.
//!
//! Named after the Italian "pomodorino", a little tomato - this is the
//! pomodoro technique in desk-ornament form.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::Pio;
use embassy_rp::pwm::Pwm;
use {defmt_rtt as _, panic_probe as _};

use pomodorino_drivers::lis3dh::{self, Lis3dh, TapConfig};

use crate::ws2812::PioWs2812;

mod board;
mod channels;
mod tasks;
mod ws2812;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => embassy_rp::pio::InterruptHandler<PIO0>;
});

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Pomodorino firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Setup PIO0 for the pixel strip
    // Pin assignment is board-specific (reference board: data on GPIO16)
    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);
    let strip = PioWs2812::new(&mut common, sm0, p.PIN_16);
    info!("WS2812 strip initialized");

    // Setup the buzzer PWM slice (GPIO14 is PWM7 channel A)
    // Default config leaves compare at zero, so the line idles low
    let pwm = Pwm::new_output_a(p.PWM_SLICE7, p.PIN_14, Default::default());
    info!("Buzzer PWM initialized");

    // Setup the tap sensor on I2C0 (SDA=GPIO4, SCL=GPIO5, INT1=GPIO10)
    // A missing or broken accelerometer costs tap control, nothing else,
    // so bring-up failure degrades instead of halting
    let i2c_bus = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c::Config::default());
    let mut sensor = Lis3dh::new(i2c_bus, lis3dh::DEFAULT_ADDR);
    let tap_int = Input::new(p.PIN_10, Pull::Down);

    match sensor.init(&TapConfig::default()) {
        Ok(()) => {
            spawner.spawn(tasks::tap_task(tap_int, sensor)).unwrap();
            info!("Tap sensor initialized");
        }
        Err(e) => {
            warn!("Tap sensor unavailable, pause control disabled: {:?}", e);
        }
    }

    // Buttons and the power slide switch, all switching to ground
    let tones_button = Input::new(p.PIN_7, Pull::Up);
    let stats_button = Input::new(p.PIN_8, Pull::Up);
    let power_switch = Input::new(p.PIN_9, Pull::Up);

    // The supervisor needs the switch level before its first pass
    let power_on = power_switch.is_low();
    channels::FLAGS.set_power(power_on);
    info!("Power switch at boot: {}", if power_on { "on" } else { "off" });

    // Spawn tasks
    spawner.spawn(tasks::supervisor_task()).unwrap();
    spawner.spawn(tasks::pixels_task(strip)).unwrap();
    spawner.spawn(tasks::tone_task(pwm)).unwrap();
    spawner.spawn(tasks::tones_button_task(tones_button)).unwrap();
    spawner.spawn(tasks::stats_button_task(stats_button)).unwrap();
    spawner.spawn(tasks::power_switch_task(power_switch)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(board::HEARTBEAT_SECS).await;
        trace!("Main loop heartbeat");
    }
}
