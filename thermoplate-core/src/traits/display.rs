//! Character display trait

use crate::frame::{Frame, COLS, ROWS};

/// Errors that can occur when driving the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication with the display failed
    Communication,
    /// Cursor position outside the display
    InvalidCoordinates,
}

/// Character LCD with a controllable backlight
///
/// The plate driver itself lives outside this crate; anything that can
/// place a cursor and print ASCII can sit behind this trait.
pub trait CharDisplay {
    /// Clear the entire display and home the cursor
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Move the cursor
    ///
    /// - `col`: Column number (0-based)
    /// - `row`: Row number (0-based)
    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError>;

    /// Print text at the cursor
    fn write_str(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Switch the backlight on or off
    fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError>;

    /// Push buffered writes out; unbuffered displays need nothing here
    fn flush(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    /// Display dimensions as (columns, rows)
    fn dimensions(&self) -> (u8, u8) {
        (COLS as u8, ROWS as u8)
    }
}

/// Helpers built on [`CharDisplay`]
pub trait CharDisplayExt: CharDisplay {
    /// Overwrite the display with a frame, row by row from the home position
    fn show(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        let (_, rows) = self.dimensions();
        for (row, line) in frame.lines().enumerate().take(rows as usize) {
            self.set_cursor(0, row as u8)?;
            self.write_str(line)?;
        }
        self.flush()
    }
}

impl<T: CharDisplay> CharDisplayExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::{String, Vec};

    #[derive(Default)]
    struct Recorder {
        ops: Vec<(u8, u8, String<16>), 4>,
        cursor: (u8, u8),
        flushes: u8,
    }

    impl CharDisplay for Recorder {
        fn clear(&mut self) -> Result<(), DisplayError> {
            self.ops.clear();
            Ok(())
        }

        fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
            if row >= 2 {
                return Err(DisplayError::InvalidCoordinates);
            }
            self.cursor = (col, row);
            Ok(())
        }

        fn write_str(&mut self, text: &str) -> Result<(), DisplayError> {
            let mut line = String::new();
            let _ = line.push_str(text);
            self.ops
                .push((self.cursor.0, self.cursor.1, line))
                .map_err(|_| DisplayError::Communication)
        }

        fn set_backlight(&mut self, _on: bool) -> Result<(), DisplayError> {
            Ok(())
        }

        fn flush(&mut self) -> Result<(), DisplayError> {
            self.flushes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_show_writes_each_row() {
        let mut display = Recorder::default();
        display.show(&Frame::new("hello", "world")).unwrap();

        assert_eq!(display.ops.len(), 2);
        assert_eq!(display.ops[0].0, 0);
        assert_eq!(display.ops[0].1, 0);
        assert_eq!(display.ops[0].2.as_str(), "hello           ");
        assert_eq!(display.ops[1].1, 1);
        assert_eq!(display.ops[1].2.as_str(), "world           ");
        assert_eq!(display.flushes, 1);
    }
}
