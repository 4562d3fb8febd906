//! Menu entries

use crate::frame::Frame;

/// Menu entries in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuItem {
    SystemInfo,
    Clock,
    Temperature,
    Shutdown,
    Exit,
}

impl MenuItem {
    /// All entries, in display order
    pub const ALL: [MenuItem; 5] = [
        MenuItem::SystemInfo,
        MenuItem::Clock,
        MenuItem::Temperature,
        MenuItem::Shutdown,
        MenuItem::Exit,
    ];

    /// Position in the list
    pub fn index(self) -> usize {
        match self {
            MenuItem::SystemInfo => 0,
            MenuItem::Clock => 1,
            MenuItem::Temperature => 2,
            MenuItem::Shutdown => 3,
            MenuItem::Exit => 4,
        }
    }

    /// Next entry, wrapping to the first
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous entry, wrapping to the last
    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Two-line label shown while the entry is highlighted
    pub fn label(self) -> (&'static str, &'static str) {
        match self {
            MenuItem::SystemInfo => ("1. Show System  ", "   Information  "),
            MenuItem::Clock => ("2. Show Clock   ", "                "),
            MenuItem::Temperature => ("3. Show Temp    ", "   Sensor       "),
            MenuItem::Shutdown => ("4. Shutdown     ", "   System       "),
            MenuItem::Exit => ("5. Exit         ", "                "),
        }
    }

    /// Label as a frame
    pub fn frame(self) -> Frame {
        let (top, bottom) = self.label();
        Frame::new(top, bottom)
    }
}
