//! Button source trait

use crate::buttons::Buttons;

use super::display::DisplayError;

/// Source of the current button state
///
/// On the LCD plate the buttons share the display's port expander, so
/// read failures are reported as [`DisplayError`]s.
pub trait ButtonSource {
    /// Sample which buttons are currently held down
    fn buttons(&mut self) -> Result<Buttons, DisplayError>;
}
