//! Canvas: a freely drawable color grid.

use crate::color::Rgba;
use crate::element::stain::Stain;
use crate::element::{CanvasContent, Content, Element};
use crate::error::{GguiError, Result};
use crate::style::attribute::{height, width};
use crate::style::chain::StyleChain;

/// A canvas element with a `cells_w` x `cells_h` drawable grid. The
/// element itself sizes to the grid unless the chain overrides it.
pub fn canvas(cells_w: u16, cells_h: u16, chain: StyleChain) -> Element {
    let mut e = Element::new((width(cells_w) | height(cells_h)).as_defaults() | chain);
    *e.content_mut() = Content::Canvas(CanvasContent::new(cells_w, cells_h));
    e
}

/// Set one canvas cell. Fails on non-canvas elements; out-of-bounds
/// coordinates are ignored.
pub fn draw(el: &mut Element, x: u16, y: u16, color: Rgba) -> Result<()> {
    match el.content_mut() {
        Content::Canvas(c) => {
            c.set(x, y, color);
            el.stain.dirty(Stain::COLOR);
            Ok(())
        }
        _ => Err(GguiError::TypeMismatch(
            "draw requires a canvas element".into(),
        )),
    }
}
