//! Host system information trait

use heapless::String;

use crate::frame::COLS;

/// Errors from querying or commanding the host system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SystemError {
    /// The command ran but reported failure
    CommandFailed,
    /// The information source is missing
    Unavailable,
    /// The information could not be parsed
    Parse,
}

/// Wall-clock time broken into display fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// Host system queries used by the information pages
pub trait SystemInfo {
    /// Primary IPv4 address of the configured interface
    fn ip_address(&mut self) -> Result<String<COLS>, SystemError>;

    /// Seconds since boot
    fn uptime_seconds(&mut self) -> Result<u64, SystemError>;

    /// Current local time
    fn local_time(&mut self) -> ClockTime;

    /// Power the system down
    fn shutdown(&mut self) -> Result<(), SystemError>;
}
