//! Character frame for the 16x2 plate display
//!
//! A frame is always fully populated: every row is exactly [`COLS`]
//! characters, padded with spaces, so writing it over the previous
//! content never needs a clear.

use heapless::String;

/// Number of character rows on the plate
pub const ROWS: usize = 2;

/// Number of character columns on the plate
pub const COLS: usize = 16;

/// Length of a frame rendered as `"row0\nrow1"`
pub const MESSAGE_LEN: usize = ROWS * COLS + ROWS - 1;

/// One screenful of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    lines: [String<COLS>; ROWS],
}

impl Default for Frame {
    fn default() -> Self {
        Self::blank()
    }
}

impl Frame {
    /// A frame of spaces
    pub fn blank() -> Self {
        let mut frame = Self {
            lines: core::array::from_fn(|_| String::new()),
        };
        for row in 0..ROWS {
            frame.set_line(row, "");
        }
        frame
    }

    /// Build a frame from two lines of text
    pub fn new(top: &str, bottom: &str) -> Self {
        let mut frame = Self::blank();
        frame.set_line(0, top);
        frame.set_line(1, bottom);
        frame
    }

    /// Build a frame from a newline separated message
    ///
    /// Lines beyond the second are dropped; missing lines are blank.
    pub fn from_message(message: &str) -> Self {
        let mut frame = Self::blank();
        for (row, line) in message.split('\n').take(ROWS).enumerate() {
            frame.set_line(row, line);
        }
        frame
    }

    /// Label on the top row, value on the bottom row
    pub fn page(label: &str, value: &str) -> Self {
        Self::new(label, value)
    }

    /// Replace a row, truncating to [`COLS`] and padding with spaces
    ///
    /// Non-ASCII characters are shown as `?`.
    pub fn set_line(&mut self, row: usize, text: &str) {
        if let Some(line) = self.lines.get_mut(row) {
            line.clear();
            for c in text.chars().take(COLS) {
                let c = if c.is_ascii() && !c.is_ascii_control() {
                    c
                } else {
                    '?'
                };
                let _ = line.push(c);
            }
            while line.len() < COLS {
                let _ = line.push(' ');
            }
        }
    }

    /// Content of a row
    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// All rows, top first
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }

    /// Render as a single newline separated message
    pub fn to_message(&self) -> String<MESSAGE_LEN> {
        let mut message = String::new();
        for (row, line) in self.lines.iter().enumerate() {
            if row > 0 {
                let _ = message.push('\n');
            }
            let _ = message.push_str(line);
        }
        message
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Frame {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Frame[{}|{}]", self.lines[0].as_str(), self.lines[1].as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank() {
        let frame = Frame::blank();
        assert_eq!(frame.line(0), Some("                "));
        assert_eq!(frame.line(1), Some("                "));
        assert_eq!(frame.line(2), None);
    }

    #[test]
    fn test_padding_and_truncation() {
        let frame = Frame::new("IP Address:", "192.168.100.200 extra");
        assert_eq!(frame.line(0), Some("IP Address:     "));
        assert_eq!(frame.line(1), Some("192.168.100.200 "));
    }

    #[test]
    fn test_from_message() {
        let frame = Frame::from_message("  Raspberry Pi  \n     ready!     ");
        assert_eq!(frame.line(0), Some("  Raspberry Pi  "));
        assert_eq!(frame.line(1), Some("     ready!     "));

        let single = Frame::from_message("Hello");
        assert_eq!(single.line(0), Some("Hello           "));
        assert_eq!(single.line(1), Some("                "));

        let extra = Frame::from_message("a\nb\nc");
        assert_eq!(extra, Frame::new("a", "b"));
    }

    #[test]
    fn test_non_ascii_replaced() {
        let frame = Frame::new("25.0°C", "");
        assert_eq!(frame.line(0), Some("25.0?C          "));
    }

    #[test]
    fn test_to_message() {
        let frame = Frame::new("top", "bottom");
        assert_eq!(
            frame.to_message().as_str(),
            "top             \nbottom          "
        );
    }
}
