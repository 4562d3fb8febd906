//! Configuration type definitions

use heapless::String;

use crate::frame::{Frame, COLS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum bus device path length
pub const MAX_PATH_LEN: usize = 32;

/// Maximum network interface name length (Linux IFNAMSIZ - 1)
pub const MAX_INTERFACE_LEN: usize = 15;

/// Maximum shutdown command length
pub const MAX_COMMAND_LEN: usize = 64;

/// Lowest DS1624 address (A2..A0 low)
pub const DS1624_BASE_ADDRESS: u8 = 0x48;

/// Highest DS1624 address (A2..A0 high)
pub const DS1624_MAX_ADDRESS: u8 = 0x4F;

/// Reasons a configuration is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InvalidConfig {
    /// Sensor address outside the DS1624 range
    SensorAddress(u8),
    /// A timing value of zero
    ZeroInterval,
    /// Empty bus path, interface or command
    EmptyField,
}

impl core::fmt::Display for InvalidConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InvalidConfig::SensorAddress(addr) => write!(
                f,
                "sensor address {:#04x} outside {:#04x}..={:#04x}",
                addr, DS1624_BASE_ADDRESS, DS1624_MAX_ADDRESS
            ),
            InvalidConfig::ZeroInterval => f.write_str("tick, poll and settle times must be non-zero"),
            InvalidConfig::EmptyField => {
                f.write_str("bus path, interface and shutdown command must not be empty")
            }
        }
    }
}

/// Plate controller configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlateConfig {
    /// I2C bus device, opened as given
    pub i2c_bus: String<MAX_PATH_LEN>,
    /// 7-bit DS1624 address
    pub sensor_address: u8,
    /// Delay between starting a conversion and reading it (ms)
    pub settle_ms: u32,
    /// Interval between sensor reads (ms)
    pub sensor_poll_ms: u32,
    /// Button sampling and page cadence tick (ms)
    pub tick_ms: u32,
    /// Interface whose address the system page shows
    pub network_interface: String<MAX_INTERFACE_LEN>,
    /// Command run on shutdown, through `sh -c`
    pub shutdown_command: String<MAX_COMMAND_LEN>,
    /// Banner top row
    pub banner_top: String<COLS>,
    /// Banner bottom row
    pub banner_bottom: String<COLS>,
    /// Log every raw register word at debug level
    pub log_raw_readings: bool,
}

impl Default for PlateConfig {
    fn default() -> Self {
        Self {
            i2c_bus: truncated("/dev/i2c-1"),
            sensor_address: DS1624_BASE_ADDRESS,
            settle_ms: 100,
            sensor_poll_ms: 5000,
            tick_ms: 100,
            network_interface: truncated("eth0"),
            shutdown_command: truncated("sudo shutdown now"),
            banner_top: truncated("  Raspberry Pi  "),
            banner_bottom: truncated("     ready!     "),
            log_raw_readings: false,
        }
    }
}

impl PlateConfig {
    /// Check values that would make the controller misbehave
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if !(DS1624_BASE_ADDRESS..=DS1624_MAX_ADDRESS).contains(&self.sensor_address) {
            return Err(InvalidConfig::SensorAddress(self.sensor_address));
        }
        if self.settle_ms == 0 || self.sensor_poll_ms == 0 || self.tick_ms == 0 {
            return Err(InvalidConfig::ZeroInterval);
        }
        if self.i2c_bus.is_empty()
            || self.network_interface.is_empty()
            || self.shutdown_command.is_empty()
        {
            return Err(InvalidConfig::EmptyField);
        }
        Ok(())
    }

    /// Banner as a frame
    pub fn banner(&self) -> Frame {
        Frame::new(&self.banner_top, &self.banner_bottom)
    }
}

fn truncated<const N: usize>(text: &str) -> String<N> {
    let mut out = String::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
