//! Collaborator traits
//!
//! These traits define the interface between the menu logic and the
//! hardware or operating-system specific implementations.

pub mod buttons;
pub mod display;
pub mod sensor;
pub mod system;

pub use buttons::ButtonSource;
pub use display::{CharDisplay, CharDisplayExt, DisplayError};
pub use sensor::{SensorError, SensorStatus, TemperatureSensor};
pub use system::{ClockTime, SystemError, SystemInfo};
