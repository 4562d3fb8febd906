//! Board-agnostic core logic for the Thermoplate controller
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - DS1624 register decoding ([`temperature`])
//! - Collaborator traits (display, buttons, sensor, system info)
//! - Button mask and debouncing
//! - Menu state machine and page cadence
//! - 16x2 frame buffer and text formatting
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod buttons;
pub mod config;
pub mod format;
pub mod frame;
pub mod menu;
pub mod temperature;
pub mod traits;

pub use buttons::{Buttons, Debouncer};
pub use frame::Frame;
pub use temperature::{decode, RawReading, Temperature};
