//! Hardware driver support
//!
//! This crate provides the hardware-facing pieces of the Pomodorino
//! timer that are not tied to a specific MCU peripheral API:
//!
//! - LIS3DH accelerometer bring-up for single-tap detection
//! - WS2812 pixel encoding and strip timing parameters
//! - Piezo buzzer PWM parameter math
//!
//! The actual peripheral plumbing (PIO state machines, PWM slices,
//! interrupt wiring) lives in the firmware crate; everything here is
//! testable on the host.

#![no_std]
#![deny(unsafe_code)]

pub mod buzzer;
pub mod lis3dh;
pub mod ws2812;
