//! The element tree: the unit of composition, rendering and input.
//!
//! Elements exclusively own their children and their styling bundle.
//! There is no parent pointer at rest; parent-dependent data (border
//! inset, absolute position) is passed down during the render pass and
//! cached per element until a MOVE stain invalidates it.

pub mod content;
pub mod stain;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use unicode_width::UnicodeWidthStr;

use crate::cell::Cell;
use crate::error::{GguiError, Result};
use crate::event::Input;
use crate::geometry::{Point, Point3, Rect};
use crate::style::chain::StyleChain;
use crate::style::styling::{self, Styling};
use crate::style::value::LengthValue;

pub use content::{CanvasContent, Content, ProgressContent, SwitchContent, TextContent};
pub use stain::Stain;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// A lifecycle hook, owned by the element it fires on.
pub type Hook = Box<dyn FnMut(&mut Element)>;

/// An event handler: receives the host element and the input, returns
/// true to consume the event.
pub type EventHandler = Box<dyn FnMut(&mut Element, &Input) -> bool>;

/// A registered event subscription.
pub struct Subscription {
    /// The criteria bits this handler listens for.
    pub criteria: u64,
    /// Global handlers fire regardless of mouse collision.
    pub global: bool,
    pub(crate) handler: EventHandler,
}

/// Lifecycle hooks of one element.
#[derive(Default)]
pub(crate) struct Hooks {
    pub on_init: Option<Hook>,
    pub on_destroy: Option<Hook>,
    pub on_hide: Option<Hook>,
    pub on_show: Option<Hook>,
    pub on_render: Option<Hook>,
    pub on_draw: Option<Hook>,
}

/// The rectangle of a parent's buffer a child may be written into, plus
/// the amount clipped off the child's own top-left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct FitArea {
    pub start_x: u16,
    pub start_y: u16,
    pub end_x: u16,
    pub end_y: u16,
    pub offset_x: u16,
    pub offset_y: u16,
}

/// One node of the visual tree.
pub struct Element {
    pub(crate) id: u64,
    pub(crate) name: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) position: Point3,
    pub(crate) width: u16,
    pub(crate) height: u16,
    pub(crate) post_width: u16,
    pub(crate) post_height: u16,
    pub(crate) absolute: Option<Point>,
    pub(crate) shown: bool,
    pub(crate) focused: bool,
    pub(crate) hovered: bool,
    pub(crate) dynamic_w: bool,
    pub(crate) dynamic_h: bool,
    pub(crate) style: Styling,
    pub(crate) childs: Vec<Element>,
    pub(crate) stain: Stain,
    pub(crate) buffer: Vec<Cell>,
    pub(crate) content: Content,
    pub(crate) hooks: Hooks,
    pub(crate) subscriptions: Vec<Subscription>,
}

impl Element {
    /// Create an element holding an unembedded style chain. The chain is
    /// settled when the element is finalized (directly, or on insertion
    /// into a parent).
    pub fn new(chain: StyleChain) -> Self {
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            name: None,
            title: None,
            position: Point3::default(),
            width: 1,
            height: 1,
            post_width: 1,
            post_height: 1,
            absolute: None,
            shown: true,
            focused: false,
            hovered: false,
            dynamic_w: false,
            dynamic_h: false,
            style: Styling::with_chain(chain),
            childs: Vec::new(),
            stain: Stain::COLOR | Stain::EDGE | Stain::DEEP | Stain::STRETCH | Stain::MOVE,
            buffer: Vec::new(),
            content: Content::None,
            hooks: Hooks::default(),
            subscriptions: Vec::new(),
        }
    }

    /// An element with no styling.
    pub fn plain() -> Self {
        Self::new(StyleChain::new())
    }

    /// Stable element id.
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// The element's name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The element's title, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Position relative to the parent's content area.
    pub const fn position(&self) -> Point3 {
        self.position
    }

    /// Element width in cells.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Element height in cells.
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Whether the element is shown.
    pub const fn is_displayed(&self) -> bool {
        self.shown
    }

    /// Whether the element currently has focus.
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Whether the mouse is currently over the element.
    pub const fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Whether the element draws a border.
    pub fn has_border(&self) -> bool {
        self.style.border_enabled.value()
    }

    /// The settled styling bundle.
    pub const fn style(&self) -> &Styling {
        &self.style
    }

    /// The widget payload.
    pub const fn content(&self) -> &Content {
        &self.content
    }

    /// The widget payload, mutably. Mutators must dirty the relevant
    /// stain themselves (usually [`Stain::COLOR`]).
    pub const fn content_mut(&mut self) -> &mut Content {
        &mut self.content
    }

    /// Children in render order (ascending z).
    pub fn childs(&self) -> &[Element] {
        &self.childs
    }

    /// Children, mutably.
    pub fn childs_mut(&mut self) -> &mut [Element] {
        &mut self.childs
    }

    /// Returns true for canvas elements.
    pub const fn is_canvas(&self) -> bool {
        self.content.is_canvas()
    }

    // --- mutation, each dirtying its stain ---

    /// Move the element. Invalidates the absolute-position cache of the
    /// whole subtree.
    pub fn set_position(&mut self, position: impl Into<Point3>) {
        self.position = position.into();
        self.propagate_move();
    }

    /// Resize the element.
    pub fn set_size(&mut self, width: u16, height: u16) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.style.width.set(LengthValue::pixels(f32::from(self.width)));
        self.style
            .height
            .set(LengthValue::pixels(f32::from(self.height)));
        self.stain.dirty(Stain::STRETCH);
    }

    /// Replace the text content.
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<()> {
        self.set_text_content(text.into())?;
        self.stain.dirty(Stain::COLOR);
        Ok(())
    }

    /// Change the shown flag, firing on_show / on_hide.
    pub fn display(&mut self, show: bool) {
        if self.shown == show {
            return;
        }
        self.shown = show;
        if show {
            self.fire_on_show();
        } else {
            self.fire_on_hide();
        }
        self.stain.dirty(Stain::STATE);
    }

    /// Shift every child by the given delta (scroll). No-op unless the
    /// element allows scrolling.
    pub fn scroll_by(&mut self, dx: i32, dy: i32) {
        if !self.style.allow_scrolling.value() {
            return;
        }
        for child in &mut self.childs {
            child.position.x += dx;
            child.position.y += dy;
            child.propagate_move();
        }
        self.stain.dirty(Stain::DEEP);
    }

    /// Register an event handler owned by this element. Unless `global`,
    /// the handler only fires while the mouse collides with the element.
    pub fn on(
        &mut self,
        criteria: u64,
        handler: impl FnMut(&mut Element, &Input) -> bool + 'static,
        global: bool,
    ) {
        self.subscribe(criteria, Box::new(handler), global);
    }

    pub(crate) fn subscribe(&mut self, criteria: u64, handler: EventHandler, global: bool) {
        self.subscriptions.push(Subscription {
            criteria,
            global,
            handler,
        });
    }

    /// Embed the style chain, fire on_init and mark the element
    /// finalized. Idempotent.
    pub fn finalize(&mut self, parent: Option<&Styling>) -> Result<()> {
        if self.stain.is(Stain::FINALIZE) {
            return Ok(());
        }
        let chain = std::mem::take(&mut self.style.chain);
        styling::embed_chain(self, chain, parent)?;
        self.fire_on_init();
        self.stain.dirty(Stain::FINALIZE);
        Ok(())
    }

    /// Insert a child. The child is finalized against this element's
    /// styling first. If its bounding box exceeds the content area the
    /// parent grows (when dynamically sized), or the child is asked to
    /// shrink; a refusal leaves the tree unchanged and surfaces as an
    /// error.
    pub fn add_child(&mut self, mut child: Element) -> Result<()> {
        child.finalize(Some(&self.style))?;

        let inset = self.style.border_inset() * 2;
        let content_w = i32::from(self.width.saturating_sub(inset));
        let content_h = i32::from(self.height.saturating_sub(inset));
        let need_w = child.position.x + i32::from(child.processed_width());
        let need_h = child.position.y + i32::from(child.processed_height());

        if (need_w > content_w || need_h > content_h) && !self.style.allow_overflow.value() {
            let grow_w = self.dynamic_w && need_w > content_w;
            let grow_h = self.dynamic_h && need_h > content_h;
            if grow_w || grow_h {
                if grow_w {
                    self.width = (need_w.max(0) as u16).saturating_add(inset).max(1);
                }
                if grow_h {
                    self.height = (need_h.max(0) as u16).saturating_add(inset).max(1);
                }
                self.stain.dirty(Stain::STRETCH);
            }
            let content_w = i32::from(self.width.saturating_sub(inset));
            let content_h = i32::from(self.height.saturating_sub(inset));
            let still_overflows = child.position.x + i32::from(child.processed_width()) > content_w
                || child.position.y + i32::from(child.processed_height()) > content_h;
            if still_overflows && !child.resize_to(content_w, content_h) {
                return Err(GguiError::Layout(format!(
                    "window '{}' exceeded static bounds of its parent",
                    child.name.as_deref().unwrap_or("?")
                )));
            }
        }

        child.propagate_move();
        self.childs.push(child);
        self.childs.sort_by_key(|c| c.position.z);
        self.stain.dirty(Stain::DEEP);
        Ok(())
    }

    /// Remove a child by id, transferring ownership back to the caller.
    pub fn remove(&mut self, id: u64) -> Option<Element> {
        let idx = self.childs.iter().position(|c| c.id == id)?;
        let child = self.childs.remove(idx);
        self.stain.dirty(Stain::DEEP | Stain::COLOR);
        Some(child)
    }

    /// Find a descendant by name.
    pub fn get_by_name(&self, name: &str) -> Option<&Element> {
        if self.name.as_deref() == Some(name) {
            return Some(self);
        }
        self.childs.iter().find_map(|c| c.get_by_name(name))
    }

    /// Find a descendant by name, mutably.
    pub fn get_by_name_mut(&mut self, name: &str) -> Option<&mut Element> {
        if self.name.as_deref() == Some(name) {
            return Some(self);
        }
        self.childs
            .iter_mut()
            .find_map(|c| c.get_by_name_mut(name))
    }

    /// Find a descendant (or self) by id, mutably.
    pub fn find_mut(&mut self, id: u64) -> Option<&mut Element> {
        if self.id == id {
            return Some(self);
        }
        self.childs.iter_mut().find_map(|c| c.find_mut(id))
    }

    /// The element's rectangle in screen coordinates, if the absolute
    /// position has been computed since the last move.
    pub fn absolute_rect(&self) -> Option<Rect> {
        self.absolute
            .map(|p| Rect::new(p.x, p.y, self.post_width, self.post_height))
    }

    /// Returns true if the screen point lies inside the element. False
    /// until the absolute-position cache is valid.
    pub fn collides(&self, x: u16, y: u16) -> bool {
        self.absolute_rect()
            .is_some_and(|r| r.contains(i32::from(x), i32::from(y)))
    }

    /// Width the parent clips against (logical width inflated by
    /// post-processing).
    pub fn processed_width(&self) -> u16 {
        self.width
            .saturating_add(self.style.shadow.get().length() * 2)
    }

    /// Height the parent clips against.
    pub fn processed_height(&self) -> u16 {
        self.height
            .saturating_add(self.style.shadow.get().length() * 2)
    }

    /// Whether nesting this element needs alpha compositing every frame.
    pub fn is_transparent(&self) -> bool {
        self.style.opacity.value() < 1.0 || self.style.shadow.get().enabled
    }

    // --- internals used by the style embed and render pipeline ---

    pub(crate) fn set_text_content(&mut self, text: String) -> Result<()> {
        match &mut self.content {
            Content::None => {
                self.content = Content::Text(TextContent { text });
                Ok(())
            }
            Content::Text(t) => {
                t.text = text;
                Ok(())
            }
            _ => Err(GguiError::TypeMismatch(
                "text content on a non-text element".into(),
            )),
        }
    }

    /// Copy evaluated style geometry onto the element, auto-sizing text
    /// elements that carry no explicit dimensions.
    pub(crate) fn apply_evaluated_geometry(&mut self) {
        if self.style.width.is_set() {
            self.width = self.style.width.get().evaluate(0).max(1);
        }
        if self.style.height.is_set() {
            self.height = self.style.height.get().evaluate(0).max(1);
        }

        if let Content::Text(t) = &self.content {
            let inset = self.style.border_inset() * 2;
            if !self.style.width.is_set() {
                let w = t
                    .text
                    .lines()
                    .map(UnicodeWidthStr::width)
                    .max()
                    .unwrap_or(1) as u16;
                self.width = w.saturating_add(inset).max(1);
            }
            if !self.style.height.is_set() {
                let h = t.text.lines().count().max(1) as u16;
                self.height = h.saturating_add(inset).max(1);
            }
        }

        let p = *self.style.position.get();
        if !p.is_dynamic() {
            self.position = Point3::new(p.x.value as i32, p.y.value as i32, p.z);
        }
    }

    /// Ask the element to shrink into the given content box. Elements
    /// whose dimensions were fixed by the user refuse.
    pub(crate) fn resize_to(&mut self, max_w: i32, max_h: i32) -> bool {
        use crate::style::value::ValueState;
        if self.style.width.state() == ValueState::Value
            || self.style.height.state() == ValueState::Value
        {
            return false;
        }
        let avail_w = (max_w - self.position.x).max(0) as u16;
        let avail_h = (max_h - self.position.y).max(0) as u16;
        if avail_w == 0 || avail_h == 0 {
            return false;
        }
        self.width = self.width.min(avail_w).max(1);
        self.height = self.height.min(avail_h).max(1);
        self.stain.dirty(Stain::STRETCH);
        true
    }

    /// The rectangle of this element's buffer the child may occupy,
    /// clipped to the content area. The offsets report how much of the
    /// child's top-left was clipped away (e.g. after scrolling).
    pub(crate) fn get_fitting_area(&self, child: &Element) -> FitArea {
        let inset = if self.style.allow_overflow.value() {
            0
        } else {
            i32::from(self.has_border() && !child.has_border())
        };
        let max_x = i32::from(self.width) - inset;
        let max_y = i32::from(self.height) - inset;

        let raw_x = inset + child.position.x;
        let raw_y = inset + child.position.y;

        let start_x = raw_x.max(inset);
        let start_y = raw_y.max(inset);
        let end_x = (raw_x + i32::from(child.processed_width()))
            .min(max_x)
            .max(start_x);
        let end_y = (raw_y + i32::from(child.processed_height()))
            .min(max_y)
            .max(start_y);

        FitArea {
            start_x: start_x.max(0) as u16,
            start_y: start_y.max(0) as u16,
            end_x: end_x.max(0) as u16,
            end_y: end_y.max(0) as u16,
            offset_x: (start_x - raw_x).max(0) as u16,
            offset_y: (start_y - raw_y).max(0) as u16,
        }
    }

    /// Report whether this subtree carries dirt the parent must react
    /// to. Non-consuming: STATE stains are cleared by the direct parent
    /// once it has re-nested (hidden elements never render, so they
    /// cannot clear their own).
    pub(crate) fn children_changed(&self) -> bool {
        if self.stain.is(Stain::STATE) {
            return true;
        }
        if !self.shown {
            return false;
        }
        if !self.stain.is_clean() && !self.stain_is_only_finalize() {
            return true;
        }
        self.childs.iter().any(Element::children_changed)
    }

    fn stain_is_only_finalize(&self) -> bool {
        let mut s = self.stain;
        s.clean(Stain::FINALIZE);
        s.is_clean()
    }

    /// Non-consuming probe: does anything in the subtree carry dirt the
    /// renderer should act on? Dirt below a hidden element is invisible
    /// and does not count, except the display-toggle signal itself.
    pub fn subtree_dirty(&self) -> bool {
        if self.stain.is(Stain::STATE) {
            return true;
        }
        if !self.shown {
            return false;
        }
        let mut s = self.stain;
        s.clean(Stain::FINALIZE);
        s.clean(Stain::STATE);
        if !s.is_clean() {
            return true;
        }
        self.childs.iter().any(Element::subtree_dirty)
    }

    /// Returns true when any shown child must be alpha-composited.
    pub(crate) fn has_transparent_children(&self) -> bool {
        self.childs.iter().any(|c| c.shown && c.is_transparent())
    }

    /// Grow a dynamically sized element to fit its children.
    pub(crate) fn compute_dynamic_size(&mut self) {
        if (!self.dynamic_w && !self.dynamic_h) || self.stain.is(Stain::RESET) {
            return;
        }
        let inset = self.style.border_inset() * 2;
        let mut need_w: i32 = 0;
        let mut need_h: i32 = 0;
        for c in self.childs.iter().filter(|c| c.shown) {
            need_w = need_w.max(c.position.x + i32::from(c.processed_width()));
            need_h = need_h.max(c.position.y + i32::from(c.processed_height()));
        }
        let need_w = (need_w.max(0) as u16).saturating_add(inset);
        let need_h = (need_h.max(0) as u16).saturating_add(inset);
        if self.dynamic_w && need_w > self.width {
            self.width = need_w;
            self.stain.dirty(Stain::STRETCH);
        }
        if self.dynamic_h && need_h > self.height {
            self.height = need_h;
            self.stain.dirty(Stain::STRETCH);
        }
    }

    /// Recompute the absolute-position cache for the subtree, clearing
    /// MOVE stains along the way. The runtime calls this after every
    /// render; standalone users pass the screen origin of this element.
    /// The border inset mirrors the nesting rule: bordered children
    /// overlay the parent border (so the edges can merge), borderless
    /// children sit inside it.
    pub fn update_absolute(&mut self, origin: Point) {
        let own = Point::new(origin.x + self.position.x, origin.y + self.position.y);
        self.absolute = Some(own);
        self.stain.clean(Stain::MOVE);
        let bordered = self.has_border();
        for child in &mut self.childs {
            let inset = i32::from(bordered && !child.has_border());
            child.update_absolute(Point::new(own.x + inset, own.y + inset));
        }
    }

    fn propagate_move(&mut self) {
        self.stain.dirty(Stain::MOVE);
        self.absolute = None;
        for child in &mut self.childs {
            child.propagate_move();
        }
    }

    // --- hook firing; the hook is taken out for the call so it can
    //     mutate the element without aliasing itself ---

    pub(crate) fn fire_on_init(&mut self) {
        if let Some(mut h) = self.hooks.on_init.take() {
            h(self);
            if self.hooks.on_init.is_none() {
                self.hooks.on_init = Some(h);
            }
        }
    }

    pub(crate) fn fire_on_show(&mut self) {
        if let Some(mut h) = self.hooks.on_show.take() {
            h(self);
            if self.hooks.on_show.is_none() {
                self.hooks.on_show = Some(h);
            }
        }
    }

    pub(crate) fn fire_on_hide(&mut self) {
        if let Some(mut h) = self.hooks.on_hide.take() {
            h(self);
            if self.hooks.on_hide.is_none() {
                self.hooks.on_hide = Some(h);
            }
        }
    }

    pub(crate) fn fire_on_render(&mut self) {
        if let Some(mut h) = self.hooks.on_render.take() {
            h(self);
            if self.hooks.on_render.is_none() {
                self.hooks.on_render = Some(h);
            }
        }
    }

    pub(crate) fn fire_on_draw(&mut self) {
        if let Some(mut h) = self.hooks.on_draw.take() {
            h(self);
            if self.hooks.on_draw.is_none() {
                self.hooks.on_draw = Some(h);
            }
        }
    }
}

impl Drop for Element {
    fn drop(&mut self) {
        // Depth-first teardown: children (and their own hooks) finish
        // before this element's hook fires. Subscriptions die with the
        // vector.
        self.childs.clear();
        if let Some(mut h) = self.hooks.on_destroy.take() {
            h(self);
        }
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("position", &self.position)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("shown", &self.shown)
            .field("childs", &self.childs.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::attribute::{
        allow_dynamic_size, enable_border, height, name, position, text, width,
    };

    fn sized(w: u16, h: u16) -> Element {
        Element::new(width(w) | height(h))
    }

    #[test]
    fn ids_are_unique() {
        let a = Element::plain();
        let b = Element::plain();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn finalize_applies_geometry() {
        let mut e = Element::new(width(10u16) | height(3u16) | position((2, 1)));
        e.finalize(None).ok();
        assert_eq!(e.width(), 10);
        assert_eq!(e.height(), 3);
        assert_eq!(e.position().flat(), Point::new(2, 1));
    }

    #[test]
    fn finalize_is_idempotent() {
        let mut calls = 0u32;
        // The counter lives in the element name so the hook stays 'static.
        let mut e = Element::new(
            width(4u16)
                | height(2u16)
                | crate::style::attribute::on_init(move |el| {
                    calls += 1;
                    el.name = Some(format!("init-{calls}"));
                }),
        );
        e.finalize(None).ok();
        e.finalize(None).ok();
        assert_eq!(e.name(), Some("init-1"));
    }

    #[test]
    fn add_child_sorts_by_z() {
        let mut parent = sized(20, 10);
        parent.finalize(None).ok();
        parent
            .add_child(Element::new(width(2u16) | height(1u16) | position((0, 0, 5))))
            .ok();
        parent
            .add_child(Element::new(width(2u16) | height(1u16) | position((0, 0, 1))))
            .ok();
        parent
            .add_child(Element::new(width(2u16) | height(1u16) | position((0, 0, 3))))
            .ok();
        let zs: Vec<i32> = parent.childs().iter().map(|c| c.position().z).collect();
        assert_eq!(zs, vec![1, 3, 5]);
    }

    #[test]
    fn add_child_grows_dynamic_parent() {
        let mut parent = Element::new(width(4u16) | height(2u16) | allow_dynamic_size(true));
        parent.finalize(None).ok();
        parent
            .add_child(Element::new(width(10u16) | height(5u16)))
            .ok();
        assert!(parent.width() >= 10);
        assert!(parent.height() >= 5);
    }

    #[test]
    fn add_child_overflow_refused_is_error() {
        let mut parent = sized(4, 2);
        parent.finalize(None).ok();
        // Child with user-fixed size refuses to shrink.
        let res = parent.add_child(Element::new(width(10u16) | height(5u16) | name("big")));
        assert!(res.is_err());
        assert!(parent.childs().is_empty());
    }

    #[test]
    fn add_child_shrinks_unsized_child() {
        let mut parent = sized(4, 2);
        parent.finalize(None).ok();
        let mut child = Element::plain();
        // Content auto-sizes beyond the parent; no user-fixed dims.
        child.set_text_content("abcdefghij".into()).ok();
        assert!(parent.add_child(child).is_ok());
        assert_eq!(parent.childs().len(), 1);
        assert!(parent.childs()[0].width() <= 4);
    }

    #[test]
    fn remove_returns_ownership() {
        let mut parent = sized(20, 10);
        parent.finalize(None).ok();
        let child = Element::new(width(2u16) | height(1u16) | name("x"));
        let id = child.id();
        parent.add_child(child).ok();
        let removed = parent.remove(id);
        assert!(removed.is_some_and(|c| c.name() == Some("x")));
        assert!(parent.childs().is_empty());
    }

    #[test]
    fn display_fires_hooks_and_stains_state() {
        let mut e = sized(4, 2);
        e.finalize(None).ok();
        e.stain = Stain::FINALIZE; // settle
        e.display(false);
        assert!(!e.is_displayed());
        assert!(e.stain.is(Stain::STATE));
        e.display(false); // no change, no extra dirt
    }

    #[test]
    fn fitting_area_insets_for_bordered_parent() {
        let mut parent = Element::new(width(10u16) | height(5u16) | enable_border(true));
        parent.finalize(None).ok();
        let mut child = Element::new(width(4u16) | height(2u16));
        child.finalize(Some(parent.style())).ok();
        let fit = parent.get_fitting_area(&child);
        assert_eq!((fit.start_x, fit.start_y), (1, 1));
        assert_eq!((fit.end_x, fit.end_y), (5, 3));
        assert_eq!((fit.offset_x, fit.offset_y), (0, 0));
    }

    #[test]
    fn fitting_area_reports_negative_offset() {
        let mut parent = sized(10, 5);
        parent.finalize(None).ok();
        let mut child = Element::new(width(6u16) | height(3u16) | position((-2, -1)));
        child.finalize(Some(parent.style())).ok();
        let fit = parent.get_fitting_area(&child);
        assert_eq!((fit.start_x, fit.start_y), (0, 0));
        assert_eq!((fit.offset_x, fit.offset_y), (2, 1));
        assert_eq!((fit.end_x, fit.end_y), (4, 2));
    }

    #[test]
    fn fitting_area_clips_oversized_child() {
        let mut parent = sized(10, 5);
        parent.finalize(None).ok();
        let mut child = Element::plain();
        child.width = 50;
        child.height = 50;
        let fit = parent.get_fitting_area(&child);
        assert_eq!((fit.end_x, fit.end_y), (10, 5));
    }

    #[test]
    fn text_auto_size() {
        let mut e = Element::new(text("Hello\nWorld!").into());
        e.finalize(None).ok();
        assert_eq!(e.width(), 6);
        assert_eq!(e.height(), 2);
    }

    #[test]
    fn child_state_signals_until_parent_renests() {
        let mut parent = sized(10, 5);
        parent.finalize(None).ok();
        parent.add_child(Element::new(width(2u16) | height(1u16))).ok();
        parent.render();
        parent.update_absolute(Point::new(0, 0));
        assert!(!parent.subtree_dirty());

        parent.childs[0].display(false);
        assert!(parent.childs[0].children_changed());
        assert!(parent.subtree_dirty());

        // The parent's re-nest fulfills and clears the signal.
        parent.render();
        parent.update_absolute(Point::new(0, 0));
        assert!(!parent.childs[0].stain.is(Stain::STATE));
        assert!(!parent.subtree_dirty());
    }

    #[test]
    fn hidden_grandchild_state_reaches_the_root() {
        let mut root = sized(12, 6);
        root.finalize(None).ok();
        root.add_child(Element::new(width(8u16) | height(4u16))).ok();
        root.childs_mut()[0]
            .add_child(Element::new(width(2u16) | height(1u16)))
            .ok();
        root.render();
        root.update_absolute(Point::new(0, 0));
        assert!(!root.subtree_dirty());

        root.childs_mut()[0].childs_mut()[0].display(false);
        assert!(root.children_changed(), "STATE visible from the root");
        root.render();
        root.update_absolute(Point::new(0, 0));
        assert!(!root.subtree_dirty());
    }

    #[test]
    fn set_position_invalidates_subtree_absolute() {
        let mut parent = sized(10, 5);
        parent.finalize(None).ok();
        parent.add_child(Element::new(width(2u16) | height(1u16))).ok();
        parent.update_absolute(Point::new(0, 0));
        assert!(parent.childs()[0].absolute_rect().is_some());
        parent.set_position((3, 3));
        assert!(parent.absolute_rect().is_none());
        assert!(parent.childs()[0].absolute_rect().is_none());
    }

    #[test]
    fn collides_uses_absolute_rect() {
        let mut e = sized(4, 2);
        e.finalize(None).ok();
        assert!(!e.collides(0, 0));
        e.update_absolute(Point::new(2, 1));
        assert!(e.collides(2, 1));
        assert!(e.collides(5, 2));
        assert!(!e.collides(6, 1));
        assert!(!e.collides(1, 1));
    }

    #[test]
    fn scroll_requires_allow_scrolling() {
        let mut e = sized(10, 5);
        e.finalize(None).ok();
        e.add_child(Element::new(width(2u16) | height(1u16))).ok();
        e.scroll_by(0, -1);
        assert_eq!(e.childs()[0].position().y, 0);

        let mut s = Element::new(
            width(10u16) | height(5u16) | crate::style::attribute::allow_scrolling(true),
        );
        s.finalize(None).ok();
        s.add_child(Element::new(width(2u16) | height(1u16))).ok();
        s.scroll_by(0, -1);
        assert_eq!(s.childs()[0].position().y, -1);
    }

    #[test]
    fn drop_fires_on_destroy() {
        use std::cell::Cell as StdCell;
        use std::rc::Rc;
        let fired = Rc::new(StdCell::new(false));
        let flag = Rc::clone(&fired);
        {
            let mut e = Element::new(
                crate::style::attribute::on_destroy(move |_| {
                    flag.set(true);
                })
                .into(),
            );
            e.finalize(None).ok();
        }
        assert!(fired.get());
    }

    #[test]
    fn destroy_runs_children_before_parent() {
        use std::cell::RefCell;
        use std::rc::Rc;
        let order: Rc<RefCell<Vec<&str>>> = Rc::new(RefCell::new(Vec::new()));
        let parent_log = Rc::clone(&order);
        let child_log = Rc::clone(&order);
        {
            let mut parent = Element::new(
                width(10u16)
                    | height(4u16)
                    | crate::style::attribute::on_destroy(move |_| {
                        parent_log.borrow_mut().push("parent");
                    })
                    | crate::style::attribute::node(Element::new(
                        width(2u16)
                            | height(1u16)
                            | crate::style::attribute::on_destroy(move |_| {
                                child_log.borrow_mut().push("child");
                            }),
                    )),
            );
            parent.finalize(None).ok();
        }
        assert_eq!(*order.borrow(), vec!["child", "parent"]);
    }

    #[test]
    fn transparent_children_detected() {
        let mut parent = sized(10, 5);
        parent.finalize(None).ok();
        assert!(!parent.has_transparent_children());
        parent
            .add_child(Element::new(
                width(2u16) | height(1u16) | crate::style::attribute::opacity(0.5),
            ))
            .ok();
        assert!(parent.has_transparent_children());
    }
}
