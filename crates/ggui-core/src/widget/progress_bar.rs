//! Progress bar: a fraction rendered as a run of filled glyphs.

use crate::element::stain::Stain;
use crate::element::{Content, Element, ProgressContent};
use crate::error::{GguiError, Result};
use crate::style::chain::StyleChain;

/// A progress bar element starting at zero.
pub fn progress_bar(chain: StyleChain) -> Element {
    let mut e = Element::new(chain);
    *e.content_mut() = Content::Progress(ProgressContent::default());
    e
}

/// Update the fraction (clamped to `0.0..=1.0`).
pub fn set_progress(el: &mut Element, fraction: f32) -> Result<()> {
    match el.content_mut() {
        Content::Progress(p) => {
            p.fraction = fraction.clamp(0.0, 1.0);
            el.stain.dirty(Stain::COLOR);
            Ok(())
        }
        _ => Err(GguiError::TypeMismatch(
            "set_progress requires a progress bar".into(),
        )),
    }
}

/// The current fraction, or `None` for non-progress elements.
pub fn progress(el: &Element) -> Option<f32> {
    match el.content() {
        Content::Progress(p) => Some(p.fraction),
        _ => None,
    }
}
