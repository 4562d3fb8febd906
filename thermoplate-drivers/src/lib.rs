//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in thermoplate-core:
//!
//! - Temperature sensors (DS1624 over I2C)

#![no_std]
#![deny(unsafe_code)]

pub mod sensor;
