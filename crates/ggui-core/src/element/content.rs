//! Widget content payloads.
//!
//! Concrete widget kinds are a sum type over the base element rather than
//! subclasses; the render pipeline paints the payload after the color
//! pass, and the widget modules provide the constructors and mutators.

use crate::color::Rgba;

/// What an element draws inside its content area.
#[derive(Debug, Default)]
#[non_exhaustive]
pub enum Content {
    /// Nothing beyond the background fill.
    #[default]
    None,
    /// Anchored text lines.
    Text(TextContent),
    /// A progress bar.
    Progress(ProgressContent),
    /// A toggle / radio switch.
    Switch(SwitchContent),
    /// A freely drawable color grid.
    Canvas(CanvasContent),
}

impl Content {
    /// Returns true for canvas payloads.
    pub const fn is_canvas(&self) -> bool {
        matches!(self, Content::Canvas(_))
    }
}

/// Text lines painted into the content area.
#[derive(Clone, Debug, Default)]
pub struct TextContent {
    /// The text; newlines split lines.
    pub text: String,
}

/// A fraction rendered as a run of filled glyphs.
#[derive(Clone, Debug)]
pub struct ProgressContent {
    /// Completion in `0.0..=1.0`.
    pub fraction: f32,
    /// Glyph for the filled run.
    pub filled: char,
    /// Glyph for the head of the filled run.
    pub head: char,
    /// Glyph for the remainder.
    pub empty: char,
}

impl Default for ProgressContent {
    fn default() -> Self {
        Self {
            fraction: 0.0,
            filled: '\u{2588}',
            head: '\u{2588}',
            empty: '\u{2591}',
        }
    }
}

/// A two-state switch with a symbol pair and a label.
#[derive(Clone, Debug)]
pub struct SwitchContent {
    /// Current state.
    pub on: bool,
    /// Symbol shown when off.
    pub off_symbol: char,
    /// Symbol shown when on.
    pub on_symbol: char,
    /// Label drawn after the symbol.
    pub label: String,
    /// Radio group name; at most one member of a group is on.
    pub group: Option<String>,
}

impl Default for SwitchContent {
    fn default() -> Self {
        Self {
            on: false,
            off_symbol: '\u{2610}',
            on_symbol: '\u{2612}',
            label: String::new(),
            group: None,
        }
    }
}

/// A grid of background colors addressed by cell.
#[derive(Clone, Debug, Default)]
pub struct CanvasContent {
    /// Row-major color grid.
    pub cells: Vec<Rgba>,
    /// Grid width.
    pub width: u16,
    /// Grid height.
    pub height: u16,
}

impl CanvasContent {
    /// A transparent grid of the given dimensions.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            cells: vec![Rgba::TRANSPARENT; usize::from(width) * usize::from(height)],
            width,
            height,
        }
    }

    /// Set one cell; out-of-bounds coordinates are ignored.
    pub fn set(&mut self, x: u16, y: u16, color: Rgba) {
        if x < self.width && y < self.height {
            let idx = usize::from(y) * usize::from(self.width) + usize::from(x);
            if let Some(c) = self.cells.get_mut(idx) {
                *c = color;
            }
        }
    }

    /// Get one cell, or `None` out of bounds.
    pub fn get(&self, x: u16, y: u16) -> Option<Rgba> {
        if x < self.width && y < self.height {
            self.cells
                .get(usize::from(y) * usize::from(self.width) + usize::from(x))
                .copied()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    #[test]
    fn canvas_set_get() {
        let mut c = CanvasContent::new(4, 3);
        c.set(2, 1, Rgba::opaque(Rgb::RED));
        assert_eq!(c.get(2, 1), Some(Rgba::opaque(Rgb::RED)));
        assert_eq!(c.get(0, 0), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn canvas_out_of_bounds_ignored() {
        let mut c = CanvasContent::new(2, 2);
        c.set(5, 5, Rgba::opaque(Rgb::RED));
        assert_eq!(c.get(5, 5), None);
    }

    #[test]
    fn default_switch_symbols() {
        let s = SwitchContent::default();
        assert_eq!(s.off_symbol, '\u{2610}');
        assert_eq!(s.on_symbol, '\u{2612}');
        assert!(!s.on);
    }

    #[test]
    fn only_canvas_is_canvas() {
        assert!(Content::Canvas(CanvasContent::default()).is_canvas());
        assert!(!Content::None.is_canvas());
        assert!(!Content::Text(TextContent::default()).is_canvas());
    }
}
