//! Controller tying the menu to live data
//!
//! The controller owns the menu state machine and the system
//! information collaborator. It:
//! - Debounces sampled button state into presses
//! - Turns presses into display actions
//! - Fulfils page refresh requests with live data
//! - Keeps the latest sensor status for the temperature page

use log::*;

use thermoplate_core::buttons::{Buttons, Debouncer};
use thermoplate_core::format::{clock_frame, ip_frame, temperature_frame, uptime_frame};
use thermoplate_core::frame::Frame;
use thermoplate_core::menu::{Actions, Menu, Refresh, State};
use thermoplate_core::traits::{SensorError, SensorStatus, SystemError, SystemInfo};
use thermoplate_core::Temperature;

/// Menu controller backed by a system information source
pub struct Controller<S> {
    menu: Menu,
    debouncer: Debouncer,
    system: S,
    sensor: SensorStatus,
}

impl<S: SystemInfo> Controller<S> {
    /// Create a controller idling on `banner`
    pub fn new(banner: Frame, system: S) -> Self {
        Self {
            menu: Menu::new(banner),
            debouncer: Debouncer::new(),
            system,
            sensor: SensorStatus::default(),
        }
    }

    /// Current menu state
    pub fn state(&self) -> State {
        self.menu.state()
    }

    /// Latest sensor status
    pub fn sensor_status(&self) -> SensorStatus {
        self.sensor
    }

    /// Startup actions
    pub fn boot(&mut self) -> Actions {
        self.menu.boot()
    }

    /// Feed one button sample
    pub fn on_buttons(&mut self, sample: Buttons) -> Actions {
        match self.debouncer.update(sample) {
            Some(pressed) => {
                debug!("Pressed {:#04x} in {:?}", pressed.bits(), self.menu.state());
                self.menu.press(pressed)
            }
            None => Actions::new(),
        }
    }

    /// Record a sensor result
    pub fn on_reading(&mut self, reading: Result<Temperature, SensorError>) {
        self.sensor = reading.into();
    }

    /// Advance the page cadence; returns a frame when the page changes
    pub fn on_tick(&mut self) -> Option<Frame> {
        let refresh = self.menu.tick()?;
        trace!("Refreshing {:?}", refresh);
        Some(self.render(refresh))
    }

    /// Run the shutdown command
    pub fn shutdown(&mut self) -> Result<(), SystemError> {
        self.system.shutdown()
    }

    fn render(&mut self, refresh: Refresh) -> Frame {
        match refresh {
            Refresh::IpAddress => match self.system.ip_address() {
                Ok(address) => ip_frame(Some(address.as_str())),
                Err(e) => {
                    debug!("IP address unavailable: {:?}", e);
                    ip_frame(None)
                }
            },
            Refresh::Uptime => match self.system.uptime_seconds() {
                Ok(seconds) => uptime_frame(Some(seconds)),
                Err(e) => {
                    debug!("Uptime unavailable: {:?}", e);
                    uptime_frame(None)
                }
            },
            Refresh::Clock => clock_frame(&self.system.local_time()),
            Refresh::Temperature => temperature_frame(self.sensor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::String;
    use thermoplate_core::frame::COLS;
    use thermoplate_core::menu::{machine::UPTIME_PHASE_TICKS, Action, MenuItem};
    use thermoplate_core::traits::ClockTime;
    use thermoplate_core::{decode, RawReading};

    #[derive(Default)]
    struct FakeSystem {
        ip: Option<&'static str>,
        shutdowns: u32,
    }

    impl SystemInfo for FakeSystem {
        fn ip_address(&mut self) -> Result<String<COLS>, SystemError> {
            self.ip
                .ok_or(SystemError::Unavailable)
                .and_then(|ip| String::try_from(ip).map_err(|_| SystemError::Parse))
        }

        fn uptime_seconds(&mut self) -> Result<u64, SystemError> {
            Ok(90_061)
        }

        fn local_time(&mut self) -> ClockTime {
            ClockTime {
                year: 2024,
                month: 3,
                day: 9,
                hour: 7,
                minute: 5,
                second: 0,
            }
        }

        fn shutdown(&mut self) -> Result<(), SystemError> {
            self.shutdowns += 1;
            Ok(())
        }
    }

    fn controller() -> Controller<FakeSystem> {
        let system = FakeSystem {
            ip: Some("192.168.1.42"),
            ..Default::default()
        };
        Controller::new(Frame::new("  Raspberry Pi  ", "     ready!     "), system)
    }

    /// Press and release, as one tick each
    fn press(c: &mut Controller<FakeSystem>, buttons: Buttons) -> Actions {
        let actions = c.on_buttons(buttons);
        assert!(c.on_buttons(Buttons::NONE).is_empty());
        actions
    }

    fn open(c: &mut Controller<FakeSystem>, item: MenuItem) {
        press(c, Buttons::SELECT);
        for _ in 0..item.index() {
            press(c, Buttons::DOWN);
        }
        press(c, Buttons::SELECT);
    }

    #[test]
    fn test_held_button_acts_once() {
        let mut c = controller();
        c.boot();
        assert!(!c.on_buttons(Buttons::SELECT).is_empty());
        assert!(c.on_buttons(Buttons::SELECT).is_empty());
        assert_eq!(c.state(), State::Menu(MenuItem::SystemInfo));
    }

    #[test]
    fn test_system_info_pages() {
        let mut c = controller();
        open(&mut c, MenuItem::SystemInfo);
        assert_eq!(c.state(), State::SystemInfo);

        let ip = c.on_tick().unwrap();
        assert_eq!(ip.line(0), Some("IP Address:     "));
        assert_eq!(ip.line(1), Some("192.168.1.42    "));

        for _ in 1..UPTIME_PHASE_TICKS {
            assert!(c.on_tick().is_none());
        }
        let uptime = c.on_tick().unwrap();
        assert_eq!(uptime.line(0), Some("RPi Uptime:     "));
        assert_eq!(uptime.line(1), Some("1d 01:01:01     "));
    }

    #[test]
    fn test_missing_ip() {
        let mut c = Controller::new(Frame::blank(), FakeSystem::default());
        open(&mut c, MenuItem::SystemInfo);
        assert_eq!(c.on_tick().unwrap().line(1), Some("unavailable     "));
    }

    #[test]
    fn test_clock_page() {
        let mut c = controller();
        open(&mut c, MenuItem::Clock);
        let frame = c.on_tick().unwrap();
        assert_eq!(frame.line(0), Some("   09.03.2024   "));
        assert_eq!(frame.line(1), Some("    07:05:00    "));
    }

    #[test]
    fn test_temperature_page_follows_readings() {
        let mut c = controller();
        open(&mut c, MenuItem::Temperature);
        assert_eq!(c.on_tick().unwrap().line(1), Some("  waiting...    "));

        c.on_reading(Ok(decode(RawReading(0x1019))));
        let frame = (0..10).find_map(|_| c.on_tick()).unwrap();
        assert_eq!(frame.line(1), Some("  25.06 C       "));

        c.on_reading(Err(SensorError::NotResponding));
        assert_eq!(
            c.sensor_status(),
            SensorStatus::Fault(SensorError::NotResponding)
        );
        let frame = (0..10).find_map(|_| c.on_tick()).unwrap();
        assert_eq!(frame.line(1), Some("  sensor fault  "));
    }

    #[test]
    fn test_shutdown_selection() {
        let mut c = controller();
        press(&mut c, Buttons::SELECT);
        press(&mut c, Buttons::UP);
        press(&mut c, Buttons::UP);
        let actions = press(&mut c, Buttons::SELECT);

        assert_eq!(c.state(), State::ShuttingDown);
        assert_eq!(actions.last(), Some(&Action::Shutdown));
        c.shutdown().unwrap();
        assert_eq!(c.system.shutdowns, 1);

        // Terminal: further input is ignored
        assert!(press(&mut c, Buttons::SELECT).is_empty());
    }

    #[test]
    fn test_no_refresh_outside_pages() {
        let mut c = controller();
        c.boot();
        assert!(c.on_tick().is_none());
        press(&mut c, Buttons::SELECT);
        assert!(c.on_tick().is_none());
    }
}
