//! Embassy async tasks
//!
//! Each task runs independently and communicates via signals.

pub mod controller;
pub mod display;
pub mod sensor;

pub use controller::controller_task;
pub use display::display_task;
pub use sensor::{sensor_task, PlateSensor};
