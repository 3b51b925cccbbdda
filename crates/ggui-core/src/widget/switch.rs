//! Switches: click-toggled checkboxes and exclusive radio buttons.

use crate::element::stain::Stain;
use crate::element::{Content, Element, SwitchContent};
use crate::event::criteria;
use crate::style::chain::StyleChain;

/// A toggle switch with a label; clicking flips it.
pub fn switch(label: impl Into<String>, chain: StyleChain) -> Element {
    build(label.into(), None, chain)
}

/// A radio button belonging to a group; use [`select_radio`] on the
/// parent to keep the group exclusive.
pub fn radio_button(
    label: impl Into<String>,
    group: impl Into<String>,
    chain: StyleChain,
) -> Element {
    build(label.into(), Some(group.into()), chain)
}

fn build(label: String, group: Option<String>, chain: StyleChain) -> Element {
    let mut e = Element::new(chain);
    let radio = group.is_some();
    *e.content_mut() = Content::Switch(SwitchContent {
        label,
        group,
        ..SwitchContent::default()
    });
    e.on(
        criteria::MOUSE_LEFT_CLICKED,
        move |el, _| {
            if radio {
                // Exclusivity runs through the parent; a lone radio
                // can only switch on.
                set_on(el, true);
            } else {
                toggle(el);
            }
            true
        },
        false,
    );
    e
}

/// Flip a switch, returning the new state. `None` for non-switches.
pub fn toggle(el: &mut Element) -> Option<bool> {
    match el.content_mut() {
        Content::Switch(s) => {
            s.on = !s.on;
            let now = s.on;
            el.stain.dirty(Stain::STATE | Stain::COLOR);
            Some(now)
        }
        _ => None,
    }
}

/// Set a switch state directly.
pub fn set_on(el: &mut Element, on: bool) {
    if let Content::Switch(s) = el.content_mut()
        && s.on != on
    {
        s.on = on;
        el.stain.dirty(Stain::STATE | Stain::COLOR);
    }
}

/// Whether a switch is on. `None` for non-switches.
pub fn is_on(el: &Element) -> Option<bool> {
    match el.content() {
        Content::Switch(s) => Some(s.on),
        _ => None,
    }
}

/// Turn on the child with `id` and turn off every other switch sharing
/// its radio group.
pub fn select_radio(parent: &mut Element, id: u64) {
    let group = parent.childs().iter().find_map(|c| {
        if c.id() != id {
            return None;
        }
        match c.content() {
            Content::Switch(s) => s.group.clone(),
            _ => None,
        }
    });
    let Some(group) = group else {
        return;
    };

    for child in parent.childs_mut() {
        let matches_group = match child.content() {
            Content::Switch(s) => s.group.as_deref() == Some(group.as_str()),
            _ => false,
        };
        if matches_group {
            let on = child.id() == id;
            set_on(child, on);
        }
    }
}
