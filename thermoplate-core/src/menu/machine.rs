//! Menu state machine
//!
//! All display behavior is a function of the current state and either a
//! button press or a tick.

use heapless::Vec;

use super::items::MenuItem;
use crate::buttons::Buttons;
use crate::frame::Frame;

/// Ticks between IP address pages on the system information page
pub const SYSTEM_INFO_PERIOD_TICKS: u16 = 80;

/// Tick within the system information period at which uptime is shown
pub const UPTIME_PHASE_TICKS: u16 = 40;

/// Ticks between clock refreshes
pub const CLOCK_PERIOD_TICKS: u16 = 5;

/// Ticks between temperature refreshes
pub const TEMPERATURE_PERIOD_TICKS: u16 = 10;

/// Menu states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Idle banner
    Banner,
    /// Item list with the given entry highlighted
    Menu(MenuItem),
    /// Alternating IP address and uptime pages
    SystemInfo,
    /// Date and time
    Clock,
    /// Latest sensor reading
    Temperature,
    /// Shutdown requested; no further input is handled
    ShuttingDown,
}

impl State {
    /// Whether this state is one of the live information pages
    pub fn is_page(&self) -> bool {
        matches!(self, State::SystemInfo | State::Clock | State::Temperature)
    }

    fn period_ticks(&self) -> u16 {
        match self {
            State::SystemInfo => SYSTEM_INFO_PERIOD_TICKS,
            State::Clock => CLOCK_PERIOD_TICKS,
            State::Temperature => TEMPERATURE_PERIOD_TICKS,
            _ => 1,
        }
    }
}

/// Display side effect of a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Clear the display
    Clear,
    /// Queue a frame for display
    Show(Frame),
    /// Switch the backlight
    Backlight(bool),
    /// Power the system down once the queued frame is visible
    Shutdown,
}

/// Actions produced by one transition, in execution order
pub type Actions = Vec<Action, 4>;

/// Live data a page wants shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Refresh {
    IpAddress,
    Uptime,
    Clock,
    Temperature,
}

/// Menu controller
#[derive(Debug, Clone)]
pub struct Menu {
    state: State,
    /// Ticks since entering the current page, modulo its period
    phase: u16,
    banner: Frame,
}

impl Menu {
    /// Create a menu showing `banner` when idle
    pub fn new(banner: Frame) -> Self {
        Self {
            state: State::Banner,
            phase: 0,
            banner,
        }
    }

    /// Current state
    pub fn state(&self) -> State {
        self.state
    }

    /// Idle banner
    pub fn banner(&self) -> &Frame {
        &self.banner
    }

    /// Frame shown while the system goes down
    pub fn shutdown_frame() -> Frame {
        Frame::new("Shutting down", "System now! ... ")
    }

    /// Actions that bring up the display at startup
    pub fn boot(&mut self) -> Actions {
        self.state = State::Banner;
        actions(&[
            Action::Clear,
            Action::Backlight(true),
            Action::Show(self.banner.clone()),
        ])
    }

    /// Process a debounced press and return the display actions
    ///
    /// Presses act on the exact mask, so chords are ignored.
    pub fn press(&mut self, pressed: Buttons) -> Actions {
        match (self.state, pressed) {
            (State::Banner, Buttons::SELECT) => {
                let first = MenuItem::ALL[0];
                self.state = State::Menu(first);
                actions(&[Action::Clear, Action::Show(first.frame())])
            }

            (State::Menu(item), Buttons::UP) => {
                let item = item.previous();
                self.state = State::Menu(item);
                actions(&[Action::Show(item.frame())])
            }
            (State::Menu(item), Buttons::DOWN) => {
                let item = item.next();
                self.state = State::Menu(item);
                actions(&[Action::Show(item.frame())])
            }
            (State::Menu(item), Buttons::SELECT) => self.activate(item),

            (state, Buttons::SELECT) if state.is_page() => self.restore_banner(),

            _ => Actions::new(),
        }
    }

    /// Advance the page cadence by one tick
    ///
    /// Returns the data the current page wants refreshed on this tick.
    /// The first tick after entering a page always refreshes.
    pub fn tick(&mut self) -> Option<Refresh> {
        let refresh = match self.state {
            State::SystemInfo => match self.phase {
                0 => Some(Refresh::IpAddress),
                UPTIME_PHASE_TICKS => Some(Refresh::Uptime),
                _ => None,
            },
            State::Clock if self.phase == 0 => Some(Refresh::Clock),
            State::Temperature if self.phase == 0 => Some(Refresh::Temperature),
            _ => None,
        };
        self.phase = (self.phase + 1) % self.state.period_ticks();
        refresh
    }

    fn activate(&mut self, item: MenuItem) -> Actions {
        match item {
            MenuItem::SystemInfo => self.enter_page(State::SystemInfo),
            MenuItem::Clock => self.enter_page(State::Clock),
            MenuItem::Temperature => self.enter_page(State::Temperature),
            MenuItem::Shutdown => {
                self.state = State::ShuttingDown;
                actions(&[Action::Show(Self::shutdown_frame()), Action::Shutdown])
            }
            MenuItem::Exit => self.restore_banner(),
        }
    }

    fn enter_page(&mut self, page: State) -> Actions {
        self.state = page;
        self.phase = 0;
        actions(&[Action::Backlight(true)])
    }

    fn restore_banner(&mut self) -> Actions {
        self.state = State::Banner;
        self.phase = 0;
        actions(&[Action::Show(self.banner.clone())])
    }
}

fn actions(list: &[Action]) -> Actions {
    let mut out = Actions::new();
    for action in list {
        let _ = out.push(action.clone());
    }
    out
}
