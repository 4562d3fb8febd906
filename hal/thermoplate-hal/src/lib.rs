//! Thermoplate Hardware Abstraction Layer
//!
//! This crate defines the two-wire bus transport used by the sensor
//! drivers. Any `embedded_hal::i2c::I2c` implementation (for example
//! `linux_embedded_hal::I2cdev` on a single-board computer) is an
//! [`I2cBus`] through a blanket implementation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  thermoplate-daemon / drivers           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  thermoplate-hal (this crate - traits)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  embedded-hal I2C (linux, mcu, mock)    │
//! └─────────────────────────────────────────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;

pub use i2c::{Address, I2cBus};
