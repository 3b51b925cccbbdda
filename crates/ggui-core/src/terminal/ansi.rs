//! Crossterm-backed production terminal.

use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::error::{GguiError, Result};
use crate::event::Input;

use super::{InputSource, TerminalBackend, features};

/// Terminal backend using crossterm for real terminal I/O.
pub struct AnsiBackend {
    raw_mode: bool,
    features: u8,
    input_taken: bool,
}

impl AnsiBackend {
    /// Create a backend; nothing touches the terminal until `init`.
    pub fn new() -> Self {
        Self {
            raw_mode: false,
            features: features::PLAIN,
            input_taken: false,
        }
    }

    /// The features probed by the last `init`.
    pub const fn features(&self) -> u8 {
        self.features
    }
}

impl Default for AnsiBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalBackend for AnsiBackend {
    fn init(&mut self) -> Result<u8> {
        if !io::stdout().is_terminal() {
            // Redirected output: plain bytes, no raw mode, no probing.
            self.features = features::PLAIN;
            return Ok(self.features);
        }

        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;
        self.raw_mode = true;
        self.features = probe_features();
        Ok(self.features)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        io::stdout().write_all(bytes)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        io::stdout().flush()?;
        Ok(())
    }

    fn dimensions(&self) -> Result<(u16, u16)> {
        let (w, h) = terminal::size()?;
        Ok((w, h))
    }

    fn deinit(&mut self) -> Result<()> {
        if self.raw_mode {
            execute!(
                io::stdout(),
                DisableMouseCapture,
                LeaveAlternateScreen,
                cursor::Show
            )?;
            terminal::disable_raw_mode()?;
            self.raw_mode = false;
        }
        Ok(())
    }

    fn take_input(&mut self) -> Result<Box<dyn InputSource>> {
        if self.input_taken {
            return Err(GguiError::Terminal("input source already taken".into()));
        }
        self.input_taken = true;
        Ok(Box::new(CrosstermInput))
    }
}

impl Drop for AnsiBackend {
    fn drop(&mut self) {
        if self.raw_mode {
            let _ = execute!(
                io::stdout(),
                DisableMouseCapture,
                LeaveAlternateScreen,
                cursor::Show
            );
            let _ = terminal::disable_raw_mode();
        }
    }
}

/// Blocking input via crossterm's event queue.
struct CrosstermInput;

impl InputSource for CrosstermInput {
    fn wait_for_input(&mut self, timeout: Duration) -> Result<Option<Vec<Input>>> {
        if !crossterm::event::poll(timeout)? {
            return Ok(None);
        }
        let event = crossterm::event::read()?;
        Ok(Some(crate::input::convert(event)))
    }
}

/// Probe features from the environment, the same way color support is
/// usually detected.
fn probe_features() -> u8 {
    let mut f = features::ANSI_COLOR | features::MOUSE | features::ALT_SCREEN | features::UTF8;
    if let Ok(ct) = std::env::var("COLORTERM")
        && (ct == "truecolor" || ct == "24bit")
    {
        f |= features::TRUE_COLOR;
    }
    if let Ok(term) = std::env::var("TERM")
        && term.contains("truecolor")
    {
        f |= features::TRUE_COLOR;
    }
    if std::env::var("NO_COLOR").is_ok() {
        f &= !(features::ANSI_COLOR | features::TRUE_COLOR);
    }
    f
}
