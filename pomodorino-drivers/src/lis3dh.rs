//! LIS3DH accelerometer bring-up for single-tap detection
//!
//! The timer only uses the accelerometer as a tap sensor: the click
//! engine is configured for single taps on all three axes and routed to
//! the INT1 pin, which the firmware watches for edges. Nothing ever
//! reads acceleration samples.
//!
//! Register writes go over blocking I2C. Tap detection itself happens
//! in silicon; after an interrupt fires the latched source register
//! must be read to re-arm it.

use embedded_hal::i2c::I2c;

/// LIS3DH register addresses and magic values
pub mod reg {
    /// Device identification register
    pub const WHO_AM_I: u8 = 0x0F;
    /// Value `WHO_AM_I` reads on a real LIS3DH
    pub const DEVICE_ID: u8 = 0x33;

    /// Data rate and axis enable
    pub const CTRL_REG1: u8 = 0x20;
    /// Interrupt routing for INT1
    pub const CTRL_REG3: u8 = 0x22;
    /// Full-scale range, block update, resolution
    pub const CTRL_REG4: u8 = 0x23;
    /// Interrupt latching
    pub const CTRL_REG5: u8 = 0x24;

    /// Click engine axis/mode enable
    pub const CLICK_CFG: u8 = 0x38;
    /// Click engine status; reading clears a latched interrupt
    pub const CLICK_SRC: u8 = 0x39;
    /// Click acceleration threshold
    pub const CLICK_THS: u8 = 0x3A;
    /// Maximum over-threshold duration for a click
    pub const TIME_LIMIT: u8 = 0x3B;
    /// Dead time between clicks
    pub const TIME_LATENCY: u8 = 0x3C;
    /// Double-click window (unused in single-click mode)
    pub const TIME_WINDOW: u8 = 0x3D;

    /// 400 Hz data rate, X/Y/Z enabled
    pub const CTRL1_400HZ_XYZ: u8 = 0x77;
    /// Route the click interrupt to INT1
    pub const CTRL3_I1_CLICK: u8 = 0x80;
    /// Block data update, high resolution, +/-2 g
    pub const CTRL4_BDU_HR_2G: u8 = 0x88;
    /// Latch the interrupt until `CLICK_SRC` is read
    pub const CTRL5_LIR_INT1: u8 = 0x08;
    /// Single click detection on X, Y and Z
    pub const CLICK_CFG_SINGLE_XYZ: u8 = 0x15;
}

/// Click engine tuning.
///
/// The threshold is in full-scale/128 steps, so 15 at +/-2 g is about
/// 0.23 g of impact, a deliberate knock on the enclosure rather than a
/// desk bump. The timing values are in ODR ticks (2.5 ms at 400 Hz).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TapConfig {
    pub threshold: u8,
    pub time_limit: u8,
    pub time_latency: u8,
    pub time_window: u8,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            threshold: 15,
            time_limit: 10,
            time_latency: 20,
            time_window: 255,
        }
    }
}

/// Register writes that take a powered-up LIS3DH to tap-detection duty
pub fn init_sequence(config: &TapConfig) -> [(u8, u8); 9] {
    [
        (reg::CTRL_REG1, reg::CTRL1_400HZ_XYZ),
        (reg::CTRL_REG3, reg::CTRL3_I1_CLICK),
        (reg::CTRL_REG4, reg::CTRL4_BDU_HR_2G),
        (reg::CTRL_REG5, reg::CTRL5_LIR_INT1),
        (reg::CLICK_CFG, reg::CLICK_CFG_SINGLE_XYZ),
        (reg::CLICK_THS, config.threshold),
        (reg::TIME_LIMIT, config.time_limit),
        (reg::TIME_LATENCY, config.time_latency),
        (reg::TIME_WINDOW, config.time_window),
    ]
}

/// LIS3DH driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lis3dhError<E> {
    /// `WHO_AM_I` returned something other than [`reg::DEVICE_ID`];
    /// either the wrong part answers at this address or nothing does
    WrongDevice(u8),
    /// I2C transfer failed
    Bus(E),
}

impl<E> From<E> for Lis3dhError<E> {
    fn from(err: E) -> Self {
        Lis3dhError::Bus(err)
    }
}

/// I2C address with the SDO pin pulled high
pub const DEFAULT_ADDR: u8 = 0x19;

/// Tap sensor handle over a blocking I2C bus
pub struct Lis3dh<I2C> {
    i2c: I2C,
    addr: u8,
}

impl<I2C: I2c> Lis3dh<I2C> {
    pub fn new(i2c: I2C, addr: u8) -> Self {
        Self { i2c, addr }
    }

    /// Verify the device identity and configure the click engine.
    ///
    /// Fails without touching any control register if the identity
    /// check fails, so a missing or mis-addressed sensor leaves the bus
    /// alone.
    pub fn init(&mut self, config: &TapConfig) -> Result<(), Lis3dhError<I2C::Error>> {
        let id = self.read_reg(reg::WHO_AM_I)?;
        if id != reg::DEVICE_ID {
            return Err(Lis3dhError::WrongDevice(id));
        }

        for (register, value) in init_sequence(config) {
            self.write_reg(register, value)?;
        }
        Ok(())
    }

    /// Read and clear the latched click interrupt. Returns the raw
    /// `CLICK_SRC` value for anyone curious which axis fired.
    pub fn clear_tap(&mut self) -> Result<u8, Lis3dhError<I2C::Error>> {
        self.read_reg(reg::CLICK_SRC)
    }

    fn read_reg(&mut self, register: u8) -> Result<u8, Lis3dhError<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.i2c.write_read(self.addr, &[register], &mut buf)?;
        Ok(buf[0])
    }

    fn write_reg(&mut self, register: u8, value: u8) -> Result<(), Lis3dhError<I2C::Error>> {
        self.i2c.write(self.addr, &[register, value])?;
        Ok(())
    }
}
