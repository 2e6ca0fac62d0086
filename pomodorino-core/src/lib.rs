//! Board-agnostic core logic for the Pomodorino desk timer firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Phase identity and the phase attribute table
//! - Control flags shared with interrupt-context input handlers
//! - Pomodoro cycle accounting (four work sessions per long break)
//! - The countdown engine and phase transition policy
//! - Pixel frame rendering (progress bars and binary counts)
//! - The main-loop supervisor, including the pause animation

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod cycle;
pub mod engine;
pub mod flags;
pub mod phase;
pub mod render;
pub mod supervisor;
