//! Display refresh task
//!
//! Writes the most recent frame to the plate. Frames queued faster than
//! the display can take them are dropped in favour of the newest.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;
use log::*;

use thermoplate_core::traits::{CharDisplay, CharDisplayExt};
use thermoplate_core::Frame;

use crate::channels::{FRAME, FRAME_SHOWN, PLATE};

#[embassy_executor::task]
pub async fn display_task() {
    info!("Display task started");

    loop {
        show_next(&FRAME, &PLATE, &FRAME_SHOWN).await;
    }
}

/// Wait for the next frame, write it and raise `shown`
pub async fn show_next<D: CharDisplay>(
    frames: &Signal<CriticalSectionRawMutex, Frame>,
    plate: &Mutex<CriticalSectionRawMutex, D>,
    shown: &Signal<CriticalSectionRawMutex, ()>,
) {
    let frame = frames.wait().await;

    {
        let mut plate = plate.lock().await;
        if let Err(e) = plate.show(&frame) {
            warn!("Failed to show frame: {:?}", e);
        }
    }

    trace!("Frame shown: {:?}", frame.to_message());
    shown.signal(());
}
