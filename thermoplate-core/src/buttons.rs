//! Plate button mask and press detection

/// Button state bitmask as reported by the plate's port expander
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(u8);

impl Buttons {
    pub const NONE: Self = Self(0x00);
    pub const SELECT: Self = Self(0x01);
    pub const RIGHT: Self = Self(0x02);
    pub const DOWN: Self = Self(0x04);
    pub const UP: Self = Self(0x08);
    pub const LEFT: Self = Self(0x10);
    pub const UP_AND_DOWN: Self = Self(0x0C);
    pub const LEFT_AND_RIGHT: Self = Self(0x12);

    /// All defined button bits
    const ALL_BITS: u8 = 0x1F;

    /// Create from a raw mask, dropping bits that are not buttons
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::ALL_BITS)
    }

    /// Raw mask
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether no button is pressed
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether every button in `other` is pressed
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl core::ops::BitOr for Buttons {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Turns sampled button state into discrete presses
///
/// A press is reported once, on the first sample where any button is
/// down. Nothing more is reported until every button has been released.
#[derive(Debug, Clone, Default)]
pub struct Debouncer {
    held: bool,
}

impl Debouncer {
    pub const fn new() -> Self {
        Self { held: false }
    }

    /// Feed one sample; returns the mask if this sample starts a press
    pub fn update(&mut self, sample: Buttons) -> Option<Buttons> {
        if sample.is_empty() {
            self.held = false;
            None
        } else if self.held {
            None
        } else {
            self.held = true;
            Some(sample)
        }
    }

    /// Whether a press is still being held
    pub fn is_held(&self) -> bool {
        self.held
    }
}
