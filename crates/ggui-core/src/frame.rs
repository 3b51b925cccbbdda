//! Frame composition: diff the freshly rendered root buffer against the
//! previous frame and emit the minimal escape-encoded byte stream.

use std::fmt::Write;

use crate::cell::{Cell, ENCODE_END, ENCODE_START};
use crate::color::Rgba;

/// Double-buffered frame compositor.
///
/// Holds the previously emitted frame; each cycle diffs the new root
/// buffer cell-by-cell into run-length spans of changed cells and encodes
/// each span as one cursor move plus color-elided cell writes, terminated
/// by an attribute reset. A resize invalidates the previous frame, so the
/// next cycle repaints in full.
pub struct FrameComposer {
    width: u16,
    height: u16,
    previous: Vec<Cell>,
    valid: bool,
}

/// A contiguous run of changed cells within one row.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Span {
    x: u16,
    y: u16,
    len: usize,
}

impl FrameComposer {
    /// A compositor for the given root dimensions.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            previous: vec![Cell::EMPTY; usize::from(width) * usize::from(height)],
            valid: false,
        }
    }

    /// Current frame dimensions.
    pub const fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Resize and invalidate; the next frame is emitted in full.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.previous.clear();
        self.previous
            .resize(usize::from(width) * usize::from(height), Cell::EMPTY);
        self.valid = false;
    }

    /// Drop the previous frame without resizing (full repaint next cycle).
    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    /// Diff `frame` against the previous frame and encode the changes.
    /// The frame becomes the new reference. Returns an empty string when
    /// nothing changed.
    pub fn compose(&mut self, frame: &[Cell]) -> String {
        let expected = usize::from(self.width) * usize::from(self.height);
        if frame.len() != expected {
            // A mis-sized frame forces a full repaint of the overlap.
            self.valid = false;
        }

        let spans = if self.valid {
            self.diff_spans(frame)
        } else {
            self.full_spans(frame.len().min(expected))
        };

        let out = self.encode(frame, &spans);

        self.previous.clear();
        self.previous.extend_from_slice(&frame[..frame.len().min(expected)]);
        self.previous.resize(expected, Cell::EMPTY);
        self.valid = true;

        out
    }

    /// Run-length spans of cells differing from the previous frame.
    fn diff_spans(&self, frame: &[Cell]) -> Vec<Span> {
        let w = usize::from(self.width);
        let mut spans = Vec::new();
        for y in 0..usize::from(self.height) {
            let mut x = 0;
            while x < w {
                let idx = y * w + x;
                let (Some(cur), Some(prev)) = (frame.get(idx), self.previous.get(idx)) else {
                    break;
                };
                if cur == prev {
                    x += 1;
                    continue;
                }
                let start = x;
                while x < w {
                    let idx = y * w + x;
                    let (Some(cur), Some(prev)) = (frame.get(idx), self.previous.get(idx)) else {
                        break;
                    };
                    if cur == prev {
                        break;
                    }
                    x += 1;
                }
                spans.push(Span {
                    x: start as u16,
                    y: y as u16,
                    len: x - start,
                });
            }
        }
        spans
    }

    /// One span per row, covering everything (full repaint).
    fn full_spans(&self, len: usize) -> Vec<Span> {
        let w = usize::from(self.width);
        if w == 0 {
            return Vec::new();
        }
        let mut spans = Vec::new();
        let rows = len / w;
        for y in 0..rows {
            spans.push(Span {
                x: 0,
                y: y as u16,
                len: w,
            });
        }
        spans
    }

    /// Encode spans: cursor move, color-elided cells, trailing reset.
    fn encode(&self, frame: &[Cell], spans: &[Span]) -> String {
        let mut out = String::new();
        let w = usize::from(self.width);
        for span in spans {
            let _ = write!(out, "\x1b[{};{}H", span.y + 1, span.x + 1);
            let mut prev: Option<(Rgba, Rgba)> = None;
            for i in 0..span.len {
                let idx = usize::from(span.y) * w + usize::from(span.x) + i;
                let Some(cell) = frame.get(idx) else {
                    break;
                };
                let mut cell = *cell;
                if i == 0 {
                    cell.flags |= ENCODE_START;
                }
                if i + 1 == span.len {
                    cell.flags |= ENCODE_END;
                }
                cell.to_escape(prev, &mut out);
                prev = Some((cell.fg, cell.bg));
            }
        }
        out
    }
}
