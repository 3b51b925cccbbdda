//! Style attributes: the tagged value types a style chain is made of,
//! their embed-into-element protocol and the builder functions.

use std::fmt;

use crate::color::{Rgb, Rgba};
use crate::element::stain::Stain;
use crate::element::{Element, EventHandler, Hook};
use crate::error::{GguiError, Result};
use crate::event::criteria;
use crate::geometry::Point3;
use crate::style::border::BorderGlyphs;
use crate::style::chain::StyleChain;
use crate::style::value::{LengthValue, ValueState};

/// When an attribute is applied during the embed protocol.
///
/// `Delayed` attributes (children) are buffered and applied only after
/// every `Instant` attribute has settled, so a container's `add_child`
/// sees final geometry and colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmbedOrder {
    /// Applied in chain order on the first pass.
    Instant,
    /// Buffered and applied on the second pass.
    Delayed,
}

/// Child flow direction inside a container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Flow {
    /// Children advance along the x axis.
    #[default]
    Row,
    /// Children advance along the y axis.
    Column,
}

/// Edge or center an element snaps to inside its parent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Anchor {
    /// Top edge.
    Up,
    /// Bottom edge.
    Down,
    /// Left edge.
    Left,
    /// Right edge.
    Right,
    /// Centered.
    #[default]
    Center,
}

/// A color that is either absolute or a fraction of the parent's value
/// for the same slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColorValue {
    /// A concrete color.
    Absolute(Rgba),
    /// A channel-wise fraction of the parent's color; resolved at embed.
    Relative(f32),
}

impl ColorValue {
    /// The concrete color; a still-unresolved relative value renders white.
    pub fn resolve(&self) -> Rgba {
        match self {
            ColorValue::Absolute(c) => *c,
            ColorValue::Relative(_) => Rgba::opaque(Rgb::WHITE),
        }
    }

    /// Resolve a relative value against the parent's color for this slot.
    /// Returns true when the value changed.
    pub fn evaluate(&mut self, parent: &ColorValue) -> bool {
        let ColorValue::Relative(fraction) = *self else {
            return false;
        };
        let p = parent.resolve();
        let scale = |c: u8| (f32::from(c) * fraction).round().clamp(0.0, 255.0) as u8;
        *self = ColorValue::Absolute(Rgba::new(scale(p.r), scale(p.g), scale(p.b), p.a));
        true
    }
}

impl From<Rgb> for ColorValue {
    fn from(c: Rgb) -> Self {
        ColorValue::Absolute(Rgba::opaque(c))
    }
}

impl From<Rgba> for ColorValue {
    fn from(c: Rgba) -> Self {
        ColorValue::Absolute(c)
    }
}

impl From<f32> for ColorValue {
    fn from(fraction: f32) -> Self {
        ColorValue::Relative(fraction)
    }
}

/// An element position whose x/y components may be percentages of the
/// parent's content basis. `z` is the stacking priority.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PositionValue {
    /// Horizontal offset.
    pub x: LengthValue,
    /// Vertical offset.
    pub y: LengthValue,
    /// Stacking priority.
    pub z: i32,
}

impl PositionValue {
    /// Resolve to a concrete point against the parent's content basis.
    pub fn evaluate(&self, basis_w: u16, basis_h: u16) -> Point3 {
        Point3::new(
            i32::from(self.x.evaluate(basis_w)),
            i32::from(self.y.evaluate(basis_h)),
            self.z,
        )
    }

    /// Returns true if either axis is percentage-based.
    pub const fn is_dynamic(&self) -> bool {
        self.x.is_dynamic() || self.y.is_dynamic()
    }
}

impl From<(i32, i32)> for PositionValue {
    fn from((x, y): (i32, i32)) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            z: 0,
        }
    }
}

impl From<(i32, i32, i32)> for PositionValue {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            z,
        }
    }
}

impl From<(f32, f32)> for PositionValue {
    fn from((x, y): (f32, f32)) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            z: 0,
        }
    }
}

/// Per-side spacing around an element's content.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margin {
    /// Top spacing.
    pub top: LengthValue,
    /// Bottom spacing.
    pub bottom: LengthValue,
    /// Left spacing.
    pub left: LengthValue,
    /// Right spacing.
    pub right: LengthValue,
}

impl Margin {
    /// The same spacing on every side.
    pub fn all(v: impl Into<LengthValue>) -> Self {
        let v = v.into();
        Self {
            top: v,
            bottom: v,
            left: v,
            right: v,
        }
    }

    /// Explicit per-side spacing.
    pub fn new(
        top: impl Into<LengthValue>,
        bottom: impl Into<LengthValue>,
        left: impl Into<LengthValue>,
        right: impl Into<LengthValue>,
    ) -> Self {
        Self {
            top: top.into(),
            bottom: bottom.into(),
            left: left.into(),
            right: right.into(),
        }
    }
}

/// A drop shadow. The direction's `z` component doubles as the shadow
/// length; the halo alpha decays geometrically per ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    /// Shadow color.
    pub color: Rgba,
    /// Cast direction; `z` scales the length.
    pub direction: (f32, f32, f32),
    /// Starting opacity of the innermost ring.
    pub opacity: f32,
    /// Whether the shadow is drawn.
    pub enabled: bool,
}

impl Shadow {
    /// Rings the shadow extends beyond the element on each side.
    pub fn length(&self) -> u16 {
        if !self.enabled {
            return 0;
        }
        (self.direction.2 * self.opacity).round().max(0.0) as u16
    }
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            color: Rgba::opaque(Rgb::BLACK),
            direction: (0.0, 0.0, 0.0),
            opacity: 1.0,
            enabled: false,
        }
    }
}

/// One style attribute: a recognized value plus what it does to the
/// element it is embedded into.
#[non_exhaustive]
pub enum Attribute {
    /// Element position (x, y, stacking z).
    Position(PositionValue),
    /// Element width.
    Width(LengthValue),
    /// Element height.
    Height(LengthValue),
    /// Toggle the border.
    EnableBorder(bool),
    /// Replace the border glyph set.
    StyledBorder(BorderGlyphs),
    /// Foreground for content.
    TextColor(ColorValue),
    /// Background for content.
    BackgroundColor(ColorValue),
    /// Foreground for border glyphs.
    BorderColor(ColorValue),
    /// Background behind border glyphs.
    BorderBackgroundColor(ColorValue),
    /// Foreground while hovered.
    HoverTextColor(ColorValue),
    /// Background while hovered.
    HoverBackgroundColor(ColorValue),
    /// Border foreground while hovered.
    HoverBorderColor(ColorValue),
    /// Border background while hovered.
    HoverBorderBackgroundColor(ColorValue),
    /// Foreground while focused.
    FocusTextColor(ColorValue),
    /// Background while focused.
    FocusBackgroundColor(ColorValue),
    /// Border foreground while focused.
    FocusBorderColor(ColorValue),
    /// Border background while focused.
    FocusBorderBackgroundColor(ColorValue),
    /// Child flow direction.
    FlowPriority(Flow),
    /// Wrap children/text past the far edge.
    Wrap(bool),
    /// Let children draw outside the content area.
    AllowOverflow(bool),
    /// Grow to fit children instead of resizing them.
    AllowDynamicSize(bool),
    /// Content spacing.
    Margin(Margin),
    /// Whole-subtree opacity, `0.0..=1.0`.
    Opacity(f32),
    /// Drop shadow.
    Shadow(Shadow),
    /// Let scroll inputs offset the content.
    AllowScrolling(bool),
    /// Snap edge inside the parent.
    Anchor(Anchor),
    /// A single child, applied on the delayed pass.
    Node(Box<Element>),
    /// Several children, applied on the delayed pass.
    Childs(Vec<Element>),
    /// Lifecycle: fired once after styles settle.
    OnInit(Hook),
    /// Lifecycle: fired when the element is destroyed.
    OnDestroy(Hook),
    /// Lifecycle: fired when hidden.
    OnHide(Hook),
    /// Lifecycle: fired when shown.
    OnShow(Hook),
    /// Fired after every render of this element.
    OnRender(Hook),
    /// Canvas draw callback; only canvases accept it.
    OnDraw(Hook),
    /// Left-click handler, collision-gated.
    OnClick(EventHandler),
    /// Keyboard handler for the focused element.
    OnInput(EventHandler),
    /// Element name for lookups.
    Name(String),
    /// Title painted into the top border.
    Title(String),
    /// Initial shown flag.
    Display(bool),
    /// Text content.
    Text(String),
}

impl Attribute {
    /// When this attribute is applied during embedding.
    pub fn order(&self) -> EmbedOrder {
        match self {
            Attribute::Node(_) | Attribute::Childs(_) => EmbedOrder::Delayed,
            _ => EmbedOrder::Instant,
        }
    }

    /// Write the value into the owner, returning the stain bits the
    /// owner must mark dirty.
    pub(crate) fn embed(self, owner: &mut Element, state: ValueState) -> Result<Stain> {
        let style = &mut owner.style;
        let stain = match self {
            Attribute::Position(v) => {
                style.position.assign(v, state);
                Stain::MOVE
            }
            Attribute::Width(v) => {
                style.width.assign(v, state);
                Stain::STRETCH
            }
            Attribute::Height(v) => {
                style.height.assign(v, state);
                Stain::STRETCH
            }
            Attribute::EnableBorder(v) => {
                style.border_enabled.assign(v, state);
                // A fresh border inherits its backdrop from the element
                // background unless one was already chosen.
                if v && !style.border_background_color.is_set() {
                    let bg = *style.background_color.get();
                    style
                        .border_background_color
                        .assign(bg, ValueState::Initialized);
                }
                Stain::EDGE
            }
            Attribute::StyledBorder(v) => {
                style.border_glyphs.assign(v, state);
                style.border_enabled.assign(true, state);
                Stain::EDGE
            }
            Attribute::TextColor(v) => {
                style.text_color.assign(v, state);
                Stain::COLOR
            }
            Attribute::BackgroundColor(v) => {
                style.background_color.assign(v, state);
                Stain::COLOR
            }
            Attribute::BorderColor(v) => {
                style.border_color.assign(v, state);
                Stain::COLOR
            }
            Attribute::BorderBackgroundColor(v) => {
                style.border_background_color.assign(v, state);
                Stain::COLOR
            }
            Attribute::HoverTextColor(v) => {
                style.hover_text_color.assign(v, state);
                Stain::COLOR
            }
            Attribute::HoverBackgroundColor(v) => {
                style.hover_background_color.assign(v, state);
                Stain::COLOR
            }
            Attribute::HoverBorderColor(v) => {
                style.hover_border_color.assign(v, state);
                Stain::COLOR
            }
            Attribute::HoverBorderBackgroundColor(v) => {
                style.hover_border_background_color.assign(v, state);
                Stain::COLOR
            }
            Attribute::FocusTextColor(v) => {
                style.focus_text_color.assign(v, state);
                Stain::COLOR
            }
            Attribute::FocusBackgroundColor(v) => {
                style.focus_background_color.assign(v, state);
                Stain::COLOR
            }
            Attribute::FocusBorderColor(v) => {
                style.focus_border_color.assign(v, state);
                Stain::COLOR
            }
            Attribute::FocusBorderBackgroundColor(v) => {
                style.focus_border_background_color.assign(v, state);
                Stain::COLOR
            }
            Attribute::FlowPriority(v) => {
                style.flow.assign(v, state);
                Stain::DEEP
            }
            Attribute::Wrap(v) => {
                style.wrap.assign(v, state);
                Stain::DEEP
            }
            Attribute::AllowOverflow(v) => {
                style.allow_overflow.assign(v, state);
                Stain::CLEAN
            }
            Attribute::AllowDynamicSize(v) => {
                style.allow_dynamic_size.assign(v, state);
                Stain::CLEAN
            }
            Attribute::Margin(v) => {
                style.margin.assign(v, state);
                Stain::CLEAN
            }
            Attribute::Opacity(v) => {
                style.opacity.assign(v.clamp(0.0, 1.0), state);
                Stain::STRETCH
            }
            Attribute::Shadow(v) => {
                style.shadow.assign(v, state);
                Stain::STRETCH
            }
            Attribute::AllowScrolling(v) => {
                style.allow_scrolling.assign(v, state);
                Stain::CLEAN
            }
            Attribute::Anchor(v) => {
                style.anchor.assign(v, state);
                Stain::CLEAN
            }
            Attribute::Node(_) | Attribute::Childs(_) => {
                return Err(GguiError::Internal(
                    "delayed attribute reached the instant pass".into(),
                ));
            }
            Attribute::OnInit(h) => {
                owner.hooks.on_init = Some(h);
                Stain::CLEAN
            }
            Attribute::OnDestroy(h) => {
                owner.hooks.on_destroy = Some(h);
                Stain::CLEAN
            }
            Attribute::OnHide(h) => {
                owner.hooks.on_hide = Some(h);
                Stain::CLEAN
            }
            Attribute::OnShow(h) => {
                owner.hooks.on_show = Some(h);
                Stain::CLEAN
            }
            Attribute::OnRender(h) => {
                owner.hooks.on_render = Some(h);
                Stain::CLEAN
            }
            Attribute::OnDraw(h) => {
                if !owner.is_canvas() {
                    return Err(GguiError::TypeMismatch(
                        "on_draw requires a canvas element".into(),
                    ));
                }
                owner.hooks.on_draw = Some(h);
                Stain::CLEAN
            }
            Attribute::OnClick(handler) => {
                owner.subscribe(criteria::MOUSE_LEFT_CLICKED, handler, false);
                Stain::CLEAN
            }
            Attribute::OnInput(handler) => {
                owner.subscribe(criteria::KEYBOARD_ANY, handler, false);
                Stain::CLEAN
            }
            Attribute::Name(v) => {
                owner.name = Some(v);
                Stain::CLEAN
            }
            Attribute::Title(v) => {
                owner.title = Some(v);
                Stain::EDGE
            }
            Attribute::Display(v) => {
                owner.shown = v;
                Stain::STATE
            }
            Attribute::Text(v) => {
                owner.set_text_content(v)?;
                Stain::COLOR
            }
        };
        Ok(stain)
    }
}

impl fmt::Debug for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Attribute::Position(_) => "position",
            Attribute::Width(_) => "width",
            Attribute::Height(_) => "height",
            Attribute::EnableBorder(_) => "enable_border",
            Attribute::StyledBorder(_) => "styled_border",
            Attribute::TextColor(_) => "text_color",
            Attribute::BackgroundColor(_) => "background_color",
            Attribute::BorderColor(_) => "border_color",
            Attribute::BorderBackgroundColor(_) => "border_background_color",
            Attribute::HoverTextColor(_) => "hover_text_color",
            Attribute::HoverBackgroundColor(_) => "hover_background_color",
            Attribute::HoverBorderColor(_) => "hover_border_color",
            Attribute::HoverBorderBackgroundColor(_) => "hover_border_background_color",
            Attribute::FocusTextColor(_) => "focus_text_color",
            Attribute::FocusBackgroundColor(_) => "focus_background_color",
            Attribute::FocusBorderColor(_) => "focus_border_color",
            Attribute::FocusBorderBackgroundColor(_) => "focus_border_background_color",
            Attribute::FlowPriority(_) => "flow_priority",
            Attribute::Wrap(_) => "wrap",
            Attribute::AllowOverflow(_) => "allow_overflow",
            Attribute::AllowDynamicSize(_) => "allow_dynamic_size",
            Attribute::Margin(_) => "margin",
            Attribute::Opacity(_) => "opacity",
            Attribute::Shadow(_) => "shadow",
            Attribute::AllowScrolling(_) => "allow_scrolling",
            Attribute::Anchor(_) => "anchor",
            Attribute::Node(_) => "node",
            Attribute::Childs(_) => "childs",
            Attribute::OnInit(_) => "on_init",
            Attribute::OnDestroy(_) => "on_destroy",
            Attribute::OnHide(_) => "on_hide",
            Attribute::OnShow(_) => "on_show",
            Attribute::OnRender(_) => "on_render",
            Attribute::OnDraw(_) => "on_draw",
            Attribute::OnClick(_) => "on_click",
            Attribute::OnInput(_) => "on_input",
            Attribute::Name(_) => "name",
            Attribute::Title(_) => "title",
            Attribute::Display(_) => "display",
            Attribute::Text(_) => "text",
        };
        f.write_str(name)
    }
}

// --- builder functions ---

/// Position the element at (x, y) or (x, y, z); floats are percentages.
pub fn position(v: impl Into<PositionValue>) -> Attribute {
    Attribute::Position(v.into())
}

/// Set the width; an integer is cells, a float a fraction of the parent.
pub fn width(v: impl Into<LengthValue>) -> Attribute {
    Attribute::Width(v.into())
}

/// Set the height; an integer is cells, a float a fraction of the parent.
pub fn height(v: impl Into<LengthValue>) -> Attribute {
    Attribute::Height(v.into())
}

/// Toggle the border.
pub fn enable_border(v: bool) -> Attribute {
    Attribute::EnableBorder(v)
}

/// Use a custom border glyph set (implies a border).
pub fn styled_border(v: BorderGlyphs) -> Attribute {
    Attribute::StyledBorder(v)
}

/// Content foreground color.
pub fn text_color(v: impl Into<ColorValue>) -> Attribute {
    Attribute::TextColor(v.into())
}

/// Content background color.
pub fn background_color(v: impl Into<ColorValue>) -> Attribute {
    Attribute::BackgroundColor(v.into())
}

/// Border foreground color.
pub fn border_color(v: impl Into<ColorValue>) -> Attribute {
    Attribute::BorderColor(v.into())
}

/// Border background color.
pub fn border_background_color(v: impl Into<ColorValue>) -> Attribute {
    Attribute::BorderBackgroundColor(v.into())
}

/// Content foreground while hovered.
pub fn hover_text_color(v: impl Into<ColorValue>) -> Attribute {
    Attribute::HoverTextColor(v.into())
}

/// Content background while hovered.
pub fn hover_background_color(v: impl Into<ColorValue>) -> Attribute {
    Attribute::HoverBackgroundColor(v.into())
}

/// Border foreground while hovered.
pub fn hover_border_color(v: impl Into<ColorValue>) -> Attribute {
    Attribute::HoverBorderColor(v.into())
}

/// Border background while hovered.
pub fn hover_border_background_color(v: impl Into<ColorValue>) -> Attribute {
    Attribute::HoverBorderBackgroundColor(v.into())
}

/// Content foreground while focused.
pub fn focus_text_color(v: impl Into<ColorValue>) -> Attribute {
    Attribute::FocusTextColor(v.into())
}

/// Content background while focused.
pub fn focus_background_color(v: impl Into<ColorValue>) -> Attribute {
    Attribute::FocusBackgroundColor(v.into())
}

/// Border foreground while focused.
pub fn focus_border_color(v: impl Into<ColorValue>) -> Attribute {
    Attribute::FocusBorderColor(v.into())
}

/// Border background while focused.
pub fn focus_border_background_color(v: impl Into<ColorValue>) -> Attribute {
    Attribute::FocusBorderBackgroundColor(v.into())
}

/// Child flow direction.
pub fn flow_priority(v: Flow) -> Attribute {
    Attribute::FlowPriority(v)
}

/// Wrap flowed children past the far edge.
pub fn wrap(v: bool) -> Attribute {
    Attribute::Wrap(v)
}

/// Allow children to draw outside the content area.
pub fn allow_overflow(v: bool) -> Attribute {
    Attribute::AllowOverflow(v)
}

/// Grow to fit children instead of resizing them.
pub fn allow_dynamic_size(v: bool) -> Attribute {
    Attribute::AllowDynamicSize(v)
}

/// Content spacing.
pub fn margin(v: impl Into<Margin>) -> Attribute {
    Attribute::Margin(v.into())
}

/// Subtree opacity, `0.0..=1.0`.
pub fn opacity(v: f32) -> Attribute {
    Attribute::Opacity(v)
}

/// Drop shadow.
pub fn shadow(v: Shadow) -> Attribute {
    Attribute::Shadow(v)
}

/// Let scroll inputs offset the content.
pub fn allow_scrolling(v: bool) -> Attribute {
    Attribute::AllowScrolling(v)
}

/// Snap edge inside the parent.
pub fn anchor(v: Anchor) -> Attribute {
    Attribute::Anchor(v)
}

/// Add one child element.
pub fn node(child: Element) -> Attribute {
    Attribute::Node(Box::new(child))
}

/// Add several child elements.
pub fn childs(children: Vec<Element>) -> Attribute {
    Attribute::Childs(children)
}

/// Lifecycle hook: fired once after styles settle.
pub fn on_init(hook: impl FnMut(&mut Element) + 'static) -> Attribute {
    Attribute::OnInit(Box::new(hook))
}

/// Lifecycle hook: fired at destruction.
pub fn on_destroy(hook: impl FnMut(&mut Element) + 'static) -> Attribute {
    Attribute::OnDestroy(Box::new(hook))
}

/// Lifecycle hook: fired when hidden.
pub fn on_hide(hook: impl FnMut(&mut Element) + 'static) -> Attribute {
    Attribute::OnHide(Box::new(hook))
}

/// Lifecycle hook: fired when shown.
pub fn on_show(hook: impl FnMut(&mut Element) + 'static) -> Attribute {
    Attribute::OnShow(Box::new(hook))
}

/// Fired after every render of this element.
pub fn on_render(hook: impl FnMut(&mut Element) + 'static) -> Attribute {
    Attribute::OnRender(Box::new(hook))
}

/// Canvas draw callback.
pub fn on_draw(hook: impl FnMut(&mut Element) + 'static) -> Attribute {
    Attribute::OnDraw(Box::new(hook))
}

/// Left-click handler.
pub fn on_click(handler: impl FnMut(&mut Element, &crate::event::Input) -> bool + 'static) -> Attribute {
    Attribute::OnClick(Box::new(handler))
}

/// Keyboard handler.
pub fn on_input(handler: impl FnMut(&mut Element, &crate::event::Input) -> bool + 'static) -> Attribute {
    Attribute::OnInput(Box::new(handler))
}

/// Element name for lookups.
pub fn name(v: impl Into<String>) -> Attribute {
    Attribute::Name(v.into())
}

/// Title painted into the top border.
pub fn title(v: impl Into<String>) -> Attribute {
    Attribute::Title(v.into())
}

/// Initial shown flag.
pub fn display(v: bool) -> Attribute {
    Attribute::Display(v)
}

/// Text content.
pub fn text(v: impl Into<String>) -> Attribute {
    Attribute::Text(v.into())
}

impl Attribute {
    /// Lift a single attribute into a chain.
    pub fn into_chain(self) -> StyleChain {
        StyleChain::from(self)
    }
}

impl std::ops::BitOr for Attribute {
    type Output = StyleChain;
    fn bitor(self, rhs: Attribute) -> StyleChain {
        StyleChain::new() | self | rhs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_and_childs_are_delayed() {
        assert_eq!(node(Element::plain()).order(), EmbedOrder::Delayed);
        assert_eq!(childs(vec![]).order(), EmbedOrder::Delayed);
        assert_eq!(width(3u16).order(), EmbedOrder::Instant);
    }

    #[test]
    fn relative_color_evaluates_against_parent() {
        let mut c: ColorValue = 0.5f32.into();
        let parent: ColorValue = Rgb::new(200, 100, 0).into();
        assert!(c.evaluate(&parent));
        assert_eq!(c.resolve().rgb(), Rgb::new(100, 50, 0));
        // Second evaluation is a no-op.
        assert!(!c.evaluate(&parent));
    }

    #[test]
    fn shadow_length_scales_with_opacity() {
        let s = Shadow {
            direction: (0.0, 0.0, 4.0),
            opacity: 0.5,
            enabled: true,
            ..Shadow::default()
        };
        assert_eq!(s.length(), 2);
        let off = Shadow::default();
        assert_eq!(off.length(), 0);
    }

    #[test]
    fn position_value_percentage() {
        let p: PositionValue = (0.5f32, 0.25f32).into();
        assert!(p.is_dynamic());
        let pt = p.evaluate(20, 8);
        assert_eq!((pt.x, pt.y), (10, 2));
    }

    #[test]
    fn attribute_debug_names() {
        assert_eq!(format!("{:?}", width(3u16)), "width");
        assert_eq!(format!("{:?}", text("hi")), "text");
    }
}
