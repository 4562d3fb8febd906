//! Console stand-in for the LCD plate
//!
//! Renders the 16x2 display as a framed box on stdout and reads button
//! presses from stdin, so the controller runs on any Linux host.

use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread;

use log::*;

use thermoplate_core::buttons::Buttons;
use thermoplate_core::frame::{COLS, ROWS};
use thermoplate_core::traits::{ButtonSource, CharDisplay, DisplayError};

/// Move to the top-left corner
const CURSOR_HOME: &str = "\x1b[H";

/// Erase the whole terminal
const ERASE_SCREEN: &str = "\x1b[2J";

/// Standard output as a zero-sized, const-constructible writer
#[derive(Debug, Clone, Copy, Default)]
pub struct Terminal;

impl Write for Terminal {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}

/// Character display drawn on a terminal
///
/// Text written with [`CharDisplay::write_str`] is buffered and drawn on
/// [`CharDisplay::flush`], so a whole frame appears at once. Clearing and
/// switching the backlight draw immediately.
#[derive(Debug)]
pub struct ConsoleDisplay<W = Terminal> {
    out: W,
    cells: [[u8; COLS]; ROWS],
    cursor: (usize, usize),
    backlight: bool,
}

impl<W: Write> ConsoleDisplay<W> {
    pub const fn new(out: W) -> Self {
        Self {
            out,
            cells: [[b' '; COLS]; ROWS],
            cursor: (0, 0),
            backlight: false,
        }
    }

    pub fn backlight(&self) -> bool {
        self.backlight
    }

    /// Row contents as text
    pub fn row(&self, row: usize) -> Option<&str> {
        self.cells
            .get(row)
            .and_then(|cells| core::str::from_utf8(cells).ok())
    }

    /// Draw the framed display
    pub fn render_to<O: Write>(&self, out: &mut O) -> io::Result<()> {
        write!(out, "{}", CURSOR_HOME)?;
        writeln!(out, "+{}+", "-".repeat(COLS))?;
        for row in 0..ROWS {
            writeln!(out, "|{}|", self.row(row).unwrap_or_default())?;
        }
        writeln!(out, "+{}+", "-".repeat(COLS))?;
        if self.backlight {
            writeln!(out, "{:width$}", "", width = COLS + 2)?;
        } else {
            writeln!(out, "{:<width$}", "[backlight off]", width = COLS + 2)?;
        }
        out.flush()
    }

    /// End the session and return the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn redraw(&mut self) -> Result<(), DisplayError> {
        let mut frame = Vec::new();
        self.render_to(&mut frame)
            .and_then(|()| self.out.write_all(&frame))
            .and_then(|()| self.out.flush())
            .map_err(|_| DisplayError::Communication)
    }
}

impl<W: Write> CharDisplay for ConsoleDisplay<W> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.cells = [[b' '; COLS]; ROWS];
        self.cursor = (0, 0);
        write!(self.out, "{}", ERASE_SCREEN).map_err(|_| DisplayError::Communication)?;
        self.redraw()
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        let (col, row) = (col as usize, row as usize);
        if col >= COLS || row >= ROWS {
            return Err(DisplayError::InvalidCoordinates);
        }
        self.cursor = (col, row);
        Ok(())
    }

    fn write_str(&mut self, text: &str) -> Result<(), DisplayError> {
        let (mut col, row) = self.cursor;
        for byte in text.bytes() {
            if col >= COLS {
                break;
            }
            self.cells[row][col] = if byte.is_ascii_graphic() || byte == b' ' {
                byte
            } else {
                b'?'
            };
            col += 1;
        }
        self.cursor = (col.min(COLS - 1), row);
        Ok(())
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError> {
        self.backlight = on;
        self.redraw()
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.redraw()
    }
}

/// Map one input line to a button mask
///
/// An empty line (bare enter) is SELECT.
pub fn key_to_buttons(line: &str) -> Buttons {
    match line.trim() {
        "" | "s" => Buttons::SELECT,
        "u" | "w" => Buttons::UP,
        "d" | "x" => Buttons::DOWN,
        "l" | "a" => Buttons::LEFT,
        "r" => Buttons::RIGHT,
        _ => Buttons::NONE,
    }
}

/// Buttons read from stdin
///
/// A reader thread stores the latest press; [`ButtonSource::buttons`]
/// returns it once and then reads as released, like a button let go.
#[derive(Debug, Clone)]
pub struct StdinButtons {
    pending: Arc<AtomicU8>,
}

impl StdinButtons {
    /// Start the reader thread
    pub fn spawn() -> io::Result<Self> {
        let pending = Arc::new(AtomicU8::new(0));
        let shared = Arc::clone(&pending);
        thread::Builder::new()
            .name("stdin-buttons".into())
            .spawn(move || {
                for line in io::stdin().lock().lines() {
                    match line {
                        Ok(line) => {
                            let pressed = key_to_buttons(&line);
                            trace!("Key {:?} -> buttons {:#04x}", line, pressed.bits());
                            shared.store(pressed.bits(), Ordering::Release);
                        }
                        Err(e) => {
                            warn!("Button input closed: {}", e);
                            break;
                        }
                    }
                }
            })?;
        Ok(Self { pending })
    }
}

impl ButtonSource for StdinButtons {
    fn buttons(&mut self) -> Result<Buttons, DisplayError> {
        Ok(Buttons::from_bits(self.pending.swap(0, Ordering::AcqRel)))
    }
}
