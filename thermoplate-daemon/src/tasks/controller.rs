//! Main controller task
//!
//! Samples the buttons on every tick, drives the menu and executes the
//! resulting display actions. Picks up the latest sensor result without
//! waiting for it.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_time::{with_timeout, Duration, Ticker};
use log::*;

use thermoplate_core::menu::{Action, Actions};
use thermoplate_core::traits::{ButtonSource, CharDisplay, SystemInfo};
use thermoplate_core::Frame;

use crate::channels::{FRAME, FRAME_SHOWN, PLATE, TEMP_READING};
use crate::console::StdinButtons;
use crate::controller::Controller;
use crate::system::LinuxSystem;

/// Longest wait for the shutdown message to reach the display
const SHUTDOWN_FRAME_TIMEOUT: Duration = Duration::from_secs(2);

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(
    mut controller: Controller<LinuxSystem>,
    mut buttons: StdinButtons,
    tick_ms: u32,
) {
    info!("Controller task started");

    let boot = controller.boot();
    execute(&mut controller, boot).await;

    let mut ticker = Ticker::every(Duration::from_millis(tick_ms as u64));

    loop {
        ticker.next().await;

        if let Some(reading) = TEMP_READING.try_take() {
            controller.on_reading(reading);
        }

        match buttons.buttons() {
            Ok(sample) => {
                let actions = controller.on_buttons(sample);
                execute(&mut controller, actions).await;
            }
            Err(e) => warn!("Failed to read buttons: {:?}", e),
        }

        if let Some(frame) = controller.on_tick() {
            show(frame);
        }
    }
}

/// Queue a frame, replacing any the display has not taken yet
fn show(frame: Frame) {
    FRAME_SHOWN.reset();
    FRAME.signal(frame);
}

async fn execute(controller: &mut Controller<LinuxSystem>, actions: Actions) {
    for action in actions {
        match action {
            Action::Clear => {
                if let Err(e) = PLATE.lock().await.clear() {
                    warn!("Failed to clear display: {:?}", e);
                }
            }
            Action::Show(frame) => show(frame),
            Action::Backlight(on) => {
                if let Err(e) = PLATE.lock().await.set_backlight(on) {
                    warn!("Failed to switch backlight: {:?}", e);
                }
            }
            Action::Shutdown => shut_down(controller).await,
        }
    }
}

/// Wait for the shutdown message, run the command, blank the plate and exit
async fn shut_down(controller: &mut Controller<LinuxSystem>) -> ! {
    let code = shutdown_sequence(controller, &PLATE, &FRAME_SHOWN).await;
    info!("Exiting");
    std::process::exit(code)
}

/// Shut the host down once `shown` confirms the goodbye frame
///
/// Returns the process exit code: 0 when the command succeeded, 1 when it
/// failed. The plate is blanked and darkened either way.
pub async fn shutdown_sequence<S: SystemInfo, D: CharDisplay>(
    controller: &mut Controller<S>,
    plate: &Mutex<CriticalSectionRawMutex, D>,
    shown: &Signal<CriticalSectionRawMutex, ()>,
) -> i32 {
    if with_timeout(SHUTDOWN_FRAME_TIMEOUT, shown.wait())
        .await
        .is_err()
    {
        warn!("Shutdown message not confirmed by display");
    }

    let code = match controller.shutdown() {
        Ok(()) => 0,
        Err(e) => {
            error!("Shutdown failed: {:?}", e);
            1
        }
    };

    let mut plate = plate.lock().await;
    let _ = plate.clear();
    let _ = plate.set_backlight(false);
    code
}
