//! Remote rendering transport: frames as length-prefixed cell grids
//! over TCP, substituting for escape emission.
//!
//! The wire format per frame is `{width: u32, height: u32, cells}` with
//! each cell as 4 glyph bytes, foreground RGB and background RGB, all in
//! host byte order, the whole frame preceded by its byte length. The
//! peer's port is read from a handshake file.

use std::io::Write;
use std::net::TcpStream;
use std::path::Path;
use std::time::Duration;

use crate::error::{GguiError, Result};
use crate::event::Input;

use super::{Frame, InputSource, TerminalBackend, features};

/// Backend shipping abstract cell frames to a TCP peer.
pub struct DrmBackend {
    stream: TcpStream,
    size: (u16, u16),
}

impl DrmBackend {
    /// Connect to the renderer whose port is recorded in the handshake
    /// file (a single decimal port number).
    pub fn connect(handshake: impl AsRef<Path>, width: u16, height: u16) -> Result<Self> {
        let contents = std::fs::read_to_string(handshake)?;
        let port: u16 = contents
            .trim()
            .parse()
            .map_err(|e| GguiError::Terminal(format!("bad handshake port: {e}")))?;
        let stream = TcpStream::connect(("127.0.0.1", port))?;
        Ok(Self {
            stream,
            size: (width, height),
        })
    }

    /// Wrap an existing stream (tests, pre-negotiated transports).
    pub fn from_stream(stream: TcpStream, width: u16, height: u16) -> Self {
        Self {
            stream,
            size: (width, height),
        }
    }
}

/// Serialize one frame into the wire format, length prefix included.
pub fn encode_frame(frame: &Frame<'_>) -> Vec<u8> {
    let cell_bytes = 4 + 3 + 3;
    let body_len = 8 + frame.cells.len() * cell_bytes;
    let mut out = Vec::with_capacity(4 + body_len);
    out.extend_from_slice(&(body_len as u32).to_ne_bytes());
    out.extend_from_slice(&u32::from(frame.width).to_ne_bytes());
    out.extend_from_slice(&u32::from(frame.height).to_ne_bytes());
    for cell in frame.cells {
        let s = cell.glyph.as_str().as_bytes();
        let mut utf = [0u8; 4];
        utf[..s.len().min(4)].copy_from_slice(&s[..s.len().min(4)]);
        out.extend_from_slice(&utf);
        out.extend_from_slice(&[cell.fg.r, cell.fg.g, cell.fg.b]);
        out.extend_from_slice(&[cell.bg.r, cell.bg.g, cell.bg.b]);
    }
    out
}

impl TerminalBackend for DrmBackend {
    fn init(&mut self) -> Result<u8> {
        Ok(features::TRUE_COLOR | features::UTF8)
    }

    fn write(&mut self, _bytes: &[u8]) -> Result<()> {
        // Escape bytes never reach a frame sink.
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stream.flush()?;
        Ok(())
    }

    fn dimensions(&self) -> Result<(u16, u16)> {
        Ok(self.size)
    }

    fn deinit(&mut self) -> Result<()> {
        let _ = self.stream.shutdown(std::net::Shutdown::Write);
        Ok(())
    }

    fn take_input(&mut self) -> Result<Box<dyn InputSource>> {
        Ok(Box::new(NoInput))
    }

    fn write_frame(&mut self, frame: &Frame<'_>) -> Result<bool> {
        let bytes = encode_frame(frame);
        self.stream.write_all(&bytes)?;
        Ok(true)
    }
}

/// A source with no input: idles at the poll interval.
struct NoInput;

impl InputSource for NoInput {
    fn wait_for_input(&mut self, timeout: Duration) -> Result<Option<Vec<Input>>> {
        std::thread::sleep(timeout.min(Duration::from_millis(20)));
        Ok(None)
    }
}
