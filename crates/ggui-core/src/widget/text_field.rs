//! Text fields: static text and a line-editing input field.

use crate::element::{Content, Element};
use crate::element::stain::Stain;
use crate::event::criteria;
use crate::style::attribute::text;
use crate::style::chain::StyleChain;

/// A text element. Auto-sizes to its content unless the chain fixes
/// dimensions; wrapping and anchoring come from the chain.
pub fn text_field(content: &str, chain: StyleChain) -> Element {
    Element::new(text(content).into_chain() | chain)
}

/// An editable text field: printable keys append, backspace deletes,
/// enter inserts a newline. Input is delivered while the mouse is over
/// the field.
pub fn input_field(chain: StyleChain) -> Element {
    let mut field = Element::new(text("").into_chain() | chain);
    field.on(
        criteria::KEY_PRESS | criteria::BACKSPACE | criteria::ENTER,
        |el, input| {
            match input.criteria {
                criteria::KEY_PRESS => append_char(el, input.data),
                criteria::BACKSPACE => backspace(el),
                criteria::ENTER => append_char(el, '\n'),
                _ => return false,
            }
            true
        },
        false,
    );
    field
}

/// Append a character to a text element's content.
pub fn append_char(el: &mut Element, c: char) {
    if let Content::Text(t) = el.content_mut() {
        t.text.push(c);
        el.stain.dirty(Stain::COLOR);
    }
}

/// Remove the last character of a text element's content.
pub fn backspace(el: &mut Element) {
    if let Content::Text(t) = el.content_mut() {
        t.text.pop();
        el.stain.dirty(Stain::COLOR);
    }
}
