//! PIO-based WS2812 strip driver
//!
//! Uses one RP2040 PIO state machine to generate WS2812 waveforms. The
//! program shifts 24 bits per pixel out of the TX FIFO with the line
//! level side-set, at 10 state machine cycles per bit; the clock
//! divider puts the state machine at 8 MHz so each bit lasts 1.25 us.
//! Encoding and timing math come from the drivers crate.

use embassy_rp::pio::{
    Common, Config, Direction as PioDirection, FifoJoin, Instance, PioPin, ShiftConfig,
    ShiftDirection, StateMachine,
};
use embassy_rp::Peri;
use embassy_time::Timer;
use fixed::types::U24F8;

use pomodorino_core::render::{Frame, MAX_PIXELS};
use pomodorino_drivers::ws2812;

use crate::board::SYS_CLK_HZ;

/// Low time that covers draining the FIFO plus the latch interval
const FRAME_SETTLE_US: u64 =
    ws2812::LATCH_US + MAX_PIXELS as u64 * 24 * 1_000_000 / ws2812::BIT_RATE_HZ as u64;

/// WS2812 strip driver on a PIO state machine
pub struct PioWs2812<'d, PIO: Instance, const SM: usize> {
    sm: StateMachine<'d, PIO, SM>,
}

impl<'d, PIO: Instance, const SM: usize> PioWs2812<'d, PIO, SM> {
    /// Load the WS2812 program and point it at `data_pin`
    pub fn new<DATA: PioPin>(
        common: &mut Common<'d, PIO>,
        mut sm: StateMachine<'d, PIO, SM>,
        data_pin: Peri<'d, DATA>,
    ) -> Self {
        // One WS2812 bit per wrap: 2 cycles high, then 5 more high for a
        // one or 5 low for a zero, then 3 low going into the next bit
        let prg = pio::pio_asm!(
            ".side_set 1",
            ".wrap_target",
            "bitloop:",
            "out x, 1       side 0 [2]",
            "jmp !x do_zero side 1 [1]",
            "jmp bitloop    side 1 [4]",
            "do_zero:",
            "nop            side 0 [4]",
            ".wrap",
        );

        let installed = common.load_program(&prg.program);
        let data = common.make_pio_pin(data_pin);

        let mut cfg = Config::default();
        cfg.use_program(&installed, &[&data]);
        cfg.shift_out = ShiftConfig {
            auto_fill: true,
            threshold: 24,
            direction: ShiftDirection::Left,
        };
        // Frames are pushed one way; reclaim the RX FIFO for depth
        cfg.fifo_join = FifoJoin::TxOnly;

        let (int_div, frac_div) = ws2812::clock_divider(SYS_CLK_HZ);
        cfg.clock_divider = U24F8::from_bits(((int_div as u32) << 8) | frac_div as u32);

        sm.set_config(&cfg);
        sm.set_pin_dirs(PioDirection::Out, &[&data]);
        sm.set_enable(true);

        Self { sm }
    }

    /// Shift out one frame and hold the line low long enough for the
    /// strip to latch it.
    pub async fn write(&mut self, frame: &Frame, brightness: u8) {
        for word in ws2812::encode_frame(frame, brightness) {
            self.sm.tx().wait_push(word).await;
        }
        Timer::after_micros(FRAME_SETTLE_US).await;
    }
}
