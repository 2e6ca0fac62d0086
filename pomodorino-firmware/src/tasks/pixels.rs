//! Pixel strip task
//!
//! Waits for frames from the supervisor and shifts them out. Frames
//! are latest-wins; if a new one arrives while the strip is latching,
//! the stale picture lasts one frame time at most.

use defmt::*;
use embassy_rp::peripherals::PIO0;

use crate::board::STRIP_BRIGHTNESS;
use crate::channels::FRAME_SIGNAL;
use crate::ws2812::PioWs2812;

/// Strip output task on PIO0 state machine 0
#[embassy_executor::task]
pub async fn pixels_task(mut strip: PioWs2812<'static, PIO0, 0>) {
    info!("Pixel task started");

    loop {
        let frame = FRAME_SIGNAL.wait().await;
        strip.write(&frame, STRIP_BRIGHTNESS).await;
    }
}
