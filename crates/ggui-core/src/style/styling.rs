//! The settled style bundle owned by every element, and the embed
//! protocol that folds a style chain into it.

use crate::color::{Rgb, Rgba};
use crate::element::Element;
use crate::element::stain::Stain;
use crate::error::Result;
use crate::style::attribute::{
    Anchor, Attribute, ColorValue, EmbedOrder, Flow, Margin, PositionValue, Shadow,
};
use crate::style::border::BorderGlyphs;
use crate::style::chain::StyleChain;
use crate::style::value::{LengthValue, Prop};

/// One canonical slot per attribute variant, plus the not-yet-embedded
/// chain. Defaults match the original white-on-black scheme; hover and
/// focus slots fall back to the base slots until styled.
#[derive(Debug)]
pub struct Styling {
    /// Element position.
    pub position: Prop<PositionValue>,
    /// Element width.
    pub width: Prop<LengthValue>,
    /// Element height.
    pub height: Prop<LengthValue>,
    /// Border toggle.
    pub border_enabled: Prop<bool>,
    /// Border glyph set.
    pub border_glyphs: Prop<BorderGlyphs>,
    /// Content foreground.
    pub text_color: Prop<ColorValue>,
    /// Content background.
    pub background_color: Prop<ColorValue>,
    /// Border foreground.
    pub border_color: Prop<ColorValue>,
    /// Border background.
    pub border_background_color: Prop<ColorValue>,
    /// Content foreground while hovered.
    pub hover_text_color: Prop<ColorValue>,
    /// Content background while hovered.
    pub hover_background_color: Prop<ColorValue>,
    /// Border foreground while hovered.
    pub hover_border_color: Prop<ColorValue>,
    /// Border background while hovered.
    pub hover_border_background_color: Prop<ColorValue>,
    /// Content foreground while focused.
    pub focus_text_color: Prop<ColorValue>,
    /// Content background while focused.
    pub focus_background_color: Prop<ColorValue>,
    /// Border foreground while focused.
    pub focus_border_color: Prop<ColorValue>,
    /// Border background while focused.
    pub focus_border_background_color: Prop<ColorValue>,
    /// Child flow direction.
    pub flow: Prop<Flow>,
    /// Wrap flowed children.
    pub wrap: Prop<bool>,
    /// Children may draw outside the content area.
    pub allow_overflow: Prop<bool>,
    /// Grow to fit children.
    pub allow_dynamic_size: Prop<bool>,
    /// Content spacing.
    pub margin: Prop<Margin>,
    /// Subtree opacity.
    pub opacity: Prop<f32>,
    /// Drop shadow.
    pub shadow: Prop<Shadow>,
    /// Scroll inputs offset the content.
    pub allow_scrolling: Prop<bool>,
    /// Content anchoring.
    pub anchor: Prop<Anchor>,
    pub(crate) chain: StyleChain,
}

impl Styling {
    /// A styling bundle holding the given chain, not yet embedded.
    pub fn with_chain(chain: StyleChain) -> Self {
        Self {
            chain,
            ..Self::default()
        }
    }

    /// The active (foreground, background) pair for content cells.
    /// Precedence: focus > hover > base; unset focus/hover slots fall
    /// back toward base.
    pub fn content_colors(&self, focused: bool, hovered: bool) -> (Rgba, Rgba) {
        let fg = self.pick(
            focused,
            hovered,
            &self.focus_text_color,
            &self.hover_text_color,
            &self.text_color,
        );
        let bg = self.pick(
            focused,
            hovered,
            &self.focus_background_color,
            &self.hover_background_color,
            &self.background_color,
        );
        (fg, bg)
    }

    /// The active (foreground, background) pair for border cells.
    pub fn border_colors(&self, focused: bool, hovered: bool) -> (Rgba, Rgba) {
        let fg = self.pick(
            focused,
            hovered,
            &self.focus_border_color,
            &self.hover_border_color,
            &self.border_color,
        );
        let bg = self.pick(
            focused,
            hovered,
            &self.focus_border_background_color,
            &self.hover_border_background_color,
            &self.border_background_color,
        );
        (fg, bg)
    }

    fn pick(
        &self,
        focused: bool,
        hovered: bool,
        focus: &Prop<ColorValue>,
        hover: &Prop<ColorValue>,
        base: &Prop<ColorValue>,
    ) -> Rgba {
        if focused && focus.is_set() {
            focus.get().resolve()
        } else if hovered && hover.is_set() {
            hover.get().resolve()
        } else {
            base.get().resolve()
        }
    }

    /// Cells on each side occupied by the border.
    pub fn border_inset(&self) -> u16 {
        u16::from(self.border_enabled.value())
    }

    /// The basis children evaluate their percentages against: own size
    /// minus the border on both sides, so a fraction of 1.0 never
    /// overflows the content area.
    pub fn content_basis(&self) -> (u16, u16) {
        let inset = self.border_inset() * 2;
        let w = self.width.get().evaluate(0).saturating_sub(inset);
        let h = self.height.get().evaluate(0).saturating_sub(inset);
        (w, h)
    }

    /// Resolve every dynamic value against the parent styling. Returns
    /// true when any value changed.
    pub(crate) fn evaluate(&mut self, parent: Option<&Styling>) -> bool {
        let Some(parent) = parent else {
            return false;
        };
        let (basis_w, basis_h) = parent.content_basis();
        let mut changed = false;

        if self.width.get().is_dynamic() {
            let px = self.width.get().evaluate(basis_w);
            let state = self.width.state();
            self.width
                .assign(LengthValue::pixels(f32::from(px)), state);
            changed = true;
        }
        if self.height.get().is_dynamic() {
            let px = self.height.get().evaluate(basis_h);
            let state = self.height.state();
            self.height
                .assign(LengthValue::pixels(f32::from(px)), state);
            changed = true;
        }
        if self.position.get().is_dynamic() {
            let pt = self.position.get().evaluate(basis_w, basis_h);
            let state = self.position.state();
            self.position.assign(
                PositionValue {
                    x: LengthValue::pixels(pt.x as f32),
                    y: LengthValue::pixels(pt.y as f32),
                    z: pt.z,
                },
                state,
            );
            changed = true;
        }

        let mut m = *self.margin.get();
        let mut margin_changed = false;
        for (side, basis) in [
            (&mut m.top, basis_h),
            (&mut m.bottom, basis_h),
            (&mut m.left, basis_w),
            (&mut m.right, basis_w),
        ] {
            if side.is_dynamic() {
                *side = LengthValue::pixels(f32::from(side.evaluate(basis)));
                margin_changed = true;
            }
        }
        if margin_changed {
            let state = self.margin.state();
            self.margin.assign(m, state);
            changed = true;
        }

        changed |= self.text_color.get_mut().evaluate(parent.text_color.get());
        changed |= self
            .background_color
            .get_mut()
            .evaluate(parent.background_color.get());
        changed |= self
            .border_color
            .get_mut()
            .evaluate(parent.border_color.get());
        changed |= self
            .border_background_color
            .get_mut()
            .evaluate(parent.border_background_color.get());
        changed |= self
            .hover_text_color
            .get_mut()
            .evaluate(parent.hover_text_color.get());
        changed |= self
            .hover_background_color
            .get_mut()
            .evaluate(parent.hover_background_color.get());
        changed |= self
            .hover_border_color
            .get_mut()
            .evaluate(parent.hover_border_color.get());
        changed |= self
            .hover_border_background_color
            .get_mut()
            .evaluate(parent.hover_border_background_color.get());
        changed |= self
            .focus_text_color
            .get_mut()
            .evaluate(parent.focus_text_color.get());
        changed |= self
            .focus_background_color
            .get_mut()
            .evaluate(parent.focus_background_color.get());
        changed |= self
            .focus_border_color
            .get_mut()
            .evaluate(parent.focus_border_color.get());
        changed |= self
            .focus_border_background_color
            .get_mut()
            .evaluate(parent.focus_border_background_color.get());

        changed
    }
}

impl Default for Styling {
    fn default() -> Self {
        let white = ColorValue::Absolute(Rgba::opaque(Rgb::WHITE));
        let black = ColorValue::Absolute(Rgba::opaque(Rgb::BLACK));
        Self {
            position: Prop::initialized(PositionValue::default()),
            width: Prop::uninitialized(LengthValue::pixels(1.0)),
            height: Prop::uninitialized(LengthValue::pixels(1.0)),
            border_enabled: Prop::initialized(false),
            border_glyphs: Prop::initialized(BorderGlyphs::single()),
            text_color: Prop::initialized(white),
            background_color: Prop::initialized(black),
            border_color: Prop::initialized(white),
            border_background_color: Prop::uninitialized(black),
            hover_text_color: Prop::uninitialized(white),
            hover_background_color: Prop::uninitialized(black),
            hover_border_color: Prop::uninitialized(white),
            hover_border_background_color: Prop::uninitialized(black),
            focus_text_color: Prop::uninitialized(white),
            focus_background_color: Prop::uninitialized(black),
            focus_border_color: Prop::uninitialized(white),
            focus_border_background_color: Prop::uninitialized(black),
            flow: Prop::initialized(Flow::Row),
            wrap: Prop::initialized(false),
            allow_overflow: Prop::initialized(false),
            allow_dynamic_size: Prop::initialized(false),
            margin: Prop::initialized(Margin::default()),
            opacity: Prop::initialized(1.0),
            shadow: Prop::initialized(Shadow::default()),
            allow_scrolling: Prop::initialized(false),
            anchor: Prop::initialized(Anchor::Center),
            chain: StyleChain::new(),
        }
    }
}

/// Fold a style chain into `owner`.
///
/// Instant attributes apply in chain order; delayed attributes (children)
/// are buffered, dynamic values are evaluated against the parent styling,
/// and only then do the buffered children go through the official
/// `add_child` path, so a container sees its final dimensions. The
/// accumulated stain mask is applied to the owner and returned.
pub(crate) fn embed_chain(
    owner: &mut Element,
    chain: StyleChain,
    parent: Option<&Styling>,
) -> Result<Stain> {
    let mut mask = Stain::CLEAN;
    let mut pending: Vec<Element> = Vec::new();

    for (attr, state) in chain.entries {
        match attr.order() {
            EmbedOrder::Instant => mask |= attr.embed(owner, state)?,
            EmbedOrder::Delayed => match attr {
                Attribute::Node(child) => pending.push(*child),
                Attribute::Childs(children) => pending.extend(children),
                _ => {}
            },
        }
    }

    // A percentage dimension wins over dynamic sizing on its axis.
    let width_was_pct = owner.style.width.get().is_dynamic();
    let height_was_pct = owner.style.height.get().is_dynamic();

    if owner.style.evaluate(parent) {
        mask |= Stain::STRETCH | Stain::MOVE | Stain::COLOR;
    }
    owner.dynamic_w = owner.style.allow_dynamic_size.value() && !width_was_pct;
    owner.dynamic_h = owner.style.allow_dynamic_size.value() && !height_was_pct;
    owner.apply_evaluated_geometry();

    for child in pending {
        mask |= Stain::DEEP;
        if let Err(e) = owner.add_child(child) {
            // Layout overflow is reported, the child is not inserted.
            tracing::warn!("child not inserted: {e}");
        }
    }

    owner.stain.dirty(mask);
    Ok(mask)
}
