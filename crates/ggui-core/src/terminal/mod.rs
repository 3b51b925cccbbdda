//! Terminal backend abstraction: the trait the runtime drives, the
//! probed feature bitset, and the split-off blocking input source.

pub mod ansi;
pub mod drm;

use std::time::Duration;

use crate::cell::Cell;
use crate::error::Result;
use crate::event::Input;

pub use ansi::AnsiBackend;
pub use drm::DrmBackend;
pub use test::TestBackend;

/// Probed terminal features.
pub mod features {
    /// Basic ANSI colors are honored.
    pub const ANSI_COLOR: u8 = 1 << 0;
    /// 24-bit SGR colors are honored.
    pub const TRUE_COLOR: u8 = 1 << 1;
    /// Mouse reporting is available.
    pub const MOUSE: u8 = 1 << 2;
    /// The alternate screen buffer is available.
    pub const ALT_SCREEN: u8 = 1 << 3;
    /// Output is UTF-8.
    pub const UTF8: u8 = 1 << 4;
    /// No features: plain byte output (non-TTY downgrade).
    pub const PLAIN: u8 = 0;
}

/// One composed frame offered to the backend as cells, before escape
/// encoding.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    /// Frame width.
    pub width: u16,
    /// Frame height.
    pub height: u16,
    /// Row-major cells, `width * height` of them.
    pub cells: &'a [Cell],
}

/// The blocking read half of a backend, owned by the input reader
/// thread so the renderer keeps exclusive ownership of the write half.
pub trait InputSource: Send {
    /// Block up to `timeout` for input. `Ok(None)` on timeout; an error
    /// signals the source is gone (EOF), after which the reader idles.
    fn wait_for_input(&mut self, timeout: Duration) -> Result<Option<Vec<Input>>>;
}

/// A terminal the runtime can draw to.
pub trait TerminalBackend: Send {
    /// Initialize (raw mode, alternate screen, mouse reporting where
    /// available) and return the probed [`features`] bitset. A non-TTY
    /// environment downgrades to [`features::PLAIN`] without error.
    fn init(&mut self) -> Result<u8>;

    /// Emit escape-encoded bytes.
    fn write(&mut self, bytes: &[u8]) -> Result<()>;

    /// Flush buffered output.
    fn flush(&mut self) -> Result<()>;

    /// Current dimensions in cells.
    fn dimensions(&self) -> Result<(u16, u16)>;

    /// Restore the prior terminal state.
    fn deinit(&mut self) -> Result<()>;

    /// Split off the blocking input source. Callable once; the runtime
    /// hands it to the reader thread.
    fn take_input(&mut self) -> Result<Box<dyn InputSource>>;

    /// Offer the abstract cell frame before escape encoding. A backend
    /// that consumes frames directly (the DRM transport) returns true
    /// and never sees `write`; the default declines.
    fn write_frame(&mut self, _frame: &Frame<'_>) -> Result<bool> {
        Ok(false)
    }
}
