//! Inter-task communication channels
//!
//! Defines the statics shared between the embassy tasks. Signals are
//! latest-wins: a value not yet taken is overwritten by the next one.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;

use thermoplate_core::traits::SensorError;
use thermoplate_core::{Frame, Temperature};

use crate::console::{ConsoleDisplay, Terminal};

/// Next frame for the display task
pub static FRAME: Signal<CriticalSectionRawMutex, Frame> = Signal::new();

/// Raised by the display task after a frame has been written
pub static FRAME_SHOWN: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Latest sensor result (updated by sensor task)
pub static TEMP_READING: Signal<CriticalSectionRawMutex, Result<Temperature, SensorError>> =
    Signal::new();

/// Display shared by the display task (frames) and the controller
/// (clear, backlight)
pub static PLATE: Mutex<CriticalSectionRawMutex, ConsoleDisplay<Terminal>> =
    Mutex::new(ConsoleDisplay::new(Terminal));
