//! The multi-pass render pipeline.
//!
//! Each phase is gated by a stain bit and clears it once fulfilled:
//! STRETCH rebuilds the buffer, COLOR floods the active color pair and
//! paints the widget payload, DEEP nests post-processed children in
//! z-order, EDGE paints the border and runs border merging. A fully
//! clean subtree returns its cached buffer untouched.

pub(crate) mod border;
pub(crate) mod post;

use crate::cell::{Cell, Glyph, compose};
use crate::element::{Content, Element, FitArea, Stain};
use crate::geometry::Rect;
use crate::style::attribute::Anchor;

impl Element {
    /// Render the subtree into this element's buffer and return it.
    ///
    /// Total: oversized children are clipped, degenerate dimensions skip
    /// the element, and a clean subtree is a cache hit.
    pub fn render(&mut self) -> &[Cell] {
        if self.width == 0 || self.height == 0 {
            self.buffer.clear();
            return &self.buffer;
        }

        // Child dirt or transparent children force a re-nest; the nest
        // composes over prior content, so the buffer is rebuilt too.
        let child_dirt = self.childs.iter().any(Element::children_changed);
        if child_dirt || self.has_transparent_children() {
            self.stain.dirty(Stain::DEEP | Stain::STRETCH);
        }

        self.compute_dynamic_size();

        if !self.stain.is(Stain::COLOR)
            && !self.stain.is(Stain::EDGE)
            && !self.stain.is(Stain::DEEP)
            && !self.stain.is(Stain::STRETCH)
        {
            return &self.buffer;
        }

        if self.stain.is(Stain::STRETCH) {
            let len = usize::from(self.width) * usize::from(self.height);
            self.buffer.clear();
            self.buffer.resize(len, Cell::EMPTY);
            self.post_width = self.processed_width();
            self.post_height = self.processed_height();
            self.stain.clean(Stain::STRETCH);
            self.stain.dirty(Stain::COLOR | Stain::EDGE | Stain::DEEP | Stain::RESET);
        }

        if self.stain.is(Stain::COLOR) {
            self.apply_colors();
            if self.is_canvas() {
                self.fire_on_draw();
            }
            self.paint_content();
            self.stain.clean(Stain::COLOR);
            // The flood rewrote every cell; children and the border
            // must go back on top.
            self.stain.dirty(Stain::DEEP | Stain::EDGE);
        }

        let mut deep_ran = false;
        if self.stain.is(Stain::DEEP) {
            self.stain.clean(Stain::DEEP);
            deep_ran = true;
            self.nest_children();
        }

        let bordered: Vec<Rect> = {
            let inset = i32::from(self.style.border_inset());
            self.childs
                .iter()
                .filter(|c| c.shown && c.has_border())
                .map(|c| Rect::new(inset + c.position.x, inset + c.position.y, c.width, c.height))
                .collect()
        };

        if deep_ran && !bordered.is_empty() && self.has_border() {
            self.stain.dirty(Stain::EDGE);
        }

        let mut edge_ran = false;
        if self.stain.is(Stain::EDGE) {
            border::add_overhead(self);
            edge_ran = true;
        }

        if (deep_ran || edge_ran) && !bordered.is_empty() {
            let glyphs = self.style.border_glyphs.value();
            let own = Rect::new(0, 0, self.width, self.height);
            for (i, ra) in bordered.iter().enumerate() {
                for (j, rb) in bordered.iter().enumerate() {
                    if i != j {
                        border::merge_borders(
                            &mut self.buffer,
                            self.width,
                            self.height,
                            glyphs,
                            *ra,
                            *rb,
                        );
                    }
                }
                border::merge_borders(&mut self.buffer, self.width, self.height, glyphs, own, *ra);
            }
        }

        if self.stain.is(Stain::RESET) {
            self.stain.clean(Stain::STRETCH);
            self.stain.clean(Stain::RESET);
        }

        self.fire_on_render();
        &self.buffer
    }

    /// Flood every cell with the active color pair (focus > hover > base).
    fn apply_colors(&mut self) {
        let (fg, bg) = self.style.content_colors(self.focused, self.hovered);
        for cell in &mut self.buffer {
            *cell = Cell {
                glyph: Glyph::SPACE,
                fg,
                bg,
                flags: 0,
            };
        }
    }

    /// Render every shown child, post-process its buffer and composite
    /// it into our own with clipping.
    fn nest_children(&mut self) {
        let mut childs = std::mem::take(&mut self.childs);
        for child in &mut childs {
            // The display-toggle signal is fulfilled by this re-nest;
            // hidden children cannot clear it themselves.
            child.stain.clean(Stain::STATE);
            if !child.shown {
                continue;
            }
            child.render();
            let processed = post::postprocess(child);
            let fit = self.get_fitting_area(child);
            nest_buffer(
                &mut self.buffer,
                self.width,
                fit,
                &processed,
                child.post_width,
            );
        }
        self.childs = childs;
    }

    /// Paint the widget payload into the content area.
    fn paint_content(&mut self) {
        let (fg, bg) = self.style.content_colors(self.focused, self.hovered);
        let inset = self.style.border_inset();
        let m = *self.style.margin.get();
        let x0 = i32::from(inset) + i32::from(m.left.evaluate(0));
        let y0 = i32::from(inset) + i32::from(m.top.evaluate(0));
        let x1 = i32::from(self.width) - i32::from(inset) - i32::from(m.right.evaluate(0));
        let y1 = i32::from(self.height) - i32::from(inset) - i32::from(m.bottom.evaluate(0));
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        let cw = (x1 - x0) as usize;
        let ch = (y1 - y0) as usize;
        let width = usize::from(self.width);
        let anchor = self.style.anchor.value();
        let wrap_text = self.style.wrap.value();

        // Clipped single-glyph write into the content area.
        let clip = (x0, y0, x1, y1);
        fn put(
            buffer: &mut [Cell],
            width: usize,
            clip: (i32, i32, i32, i32),
            fg: crate::color::Rgba,
            bg: crate::color::Rgba,
            x: i32,
            y: i32,
            c: char,
        ) {
            let (x0, y0, x1, y1) = clip;
            if x < x0 || x >= x1 || y < y0 || y >= y1 {
                return;
            }
            if let Some(cell) = buffer.get_mut(y as usize * width + x as usize) {
                *cell = Cell {
                    glyph: Glyph::from_char(c),
                    fg,
                    bg,
                    flags: 0,
                };
            }
        }

        // Split borrows: payload read-only, buffer written.
        let Element {
            content, buffer, ..
        } = self;

        match content {
            Content::None => {}
            Content::Text(t) => {
                let mut lines: Vec<Vec<char>> = Vec::new();
                for line in t.text.lines() {
                    let chars: Vec<char> = line.chars().collect();
                    if wrap_text && chars.len() > cw && cw > 0 {
                        for chunk in chars.chunks(cw) {
                            lines.push(chunk.to_vec());
                        }
                    } else {
                        lines.push(chars);
                    }
                }
                let visible = lines.len().min(ch);
                let oy = match anchor {
                    Anchor::Up => 0,
                    Anchor::Down => ch - visible,
                    _ => (ch - visible) / 2,
                };
                for (row, line) in lines.iter().take(ch).enumerate() {
                    let shown = line.len().min(cw);
                    let ox = match anchor {
                        Anchor::Left => 0,
                        Anchor::Right => cw - shown,
                        _ => (cw - shown) / 2,
                    };
                    for (col, c) in line.iter().take(cw).enumerate() {
                        put(
                            buffer,
                            width,
                            clip,
                            fg,
                            bg,
                            x0 + (ox + col) as i32,
                            y0 + (oy + row) as i32,
                            *c,
                        );
                    }
                }
            }
            Content::Progress(p) => {
                let y = y0 + (ch / 2) as i32;
                let filled = (p.fraction.clamp(0.0, 1.0) * cw as f32).round() as usize;
                for col in 0..cw {
                    let c = if col + 1 == filled && filled < cw {
                        p.head
                    } else if col < filled {
                        p.filled
                    } else {
                        p.empty
                    };
                    put(buffer, width, clip, fg, bg, x0 + col as i32, y, c);
                }
            }
            Content::Switch(s) => {
                let y = y0 + (ch / 2) as i32;
                let symbol = if s.on { s.on_symbol } else { s.off_symbol };
                put(buffer, width, clip, fg, bg, x0, y, symbol);
                for (col, c) in s.label.chars().enumerate() {
                    put(buffer, width, clip, fg, bg, x0 + 2 + col as i32, y, c);
                }
            }
            Content::Canvas(canvas) => {
                for y in 0..ch.min(usize::from(canvas.height)) {
                    for x in 0..cw.min(usize::from(canvas.width)) {
                        let Some(color) = canvas.get(x as u16, y as u16) else {
                            continue;
                        };
                        if color.a == 0 {
                            continue;
                        }
                        let idx = (y0 as usize + y) * width + x0 as usize + x;
                        if let Some(cell) = buffer.get_mut(idx) {
                            let mut src = Cell::EMPTY;
                            src.bg = color;
                            src.fg.set_alpha(0);
                            compose(cell, &src);
                        }
                    }
                }
            }
        }
    }
}

/// Composite a child's post-processed buffer into the parent buffer over
/// the fitting area.
fn nest_buffer(parent: &mut [Cell], parent_w: u16, fit: FitArea, child: &[Cell], child_w: u16) {
    for y in fit.start_y..fit.end_y {
        for x in fit.start_x..fit.end_x {
            let cy = usize::from(y - fit.start_y + fit.offset_y);
            let cx = usize::from(x - fit.start_x + fit.offset_x);
            let ci = cy * usize::from(child_w) + cx;
            let pi = usize::from(y) * usize::from(parent_w) + usize::from(x);
            let (Some(src), Some(dst)) = (child.get(ci), parent.get_mut(pi)) else {
                continue;
            };
            compose(dst, src);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Rgb, Rgba};
    use crate::style::attribute::{
        background_color, enable_border, height, node, opacity, position, text, text_color, width,
    };

    fn render_to_strings(el: &mut Element) -> Vec<String> {
        let w = usize::from(el.width());
        el.render()
            .chunks(w)
            .map(|row| row.iter().map(|c| c.glyph.as_str()).collect())
            .collect()
    }

    #[test]
    fn bordered_text_frame() {
        let mut e = Element::new(
            width(10u16)
                | height(3u16)
                | enable_border(true)
                | text("Hi")
                | text_color(Rgb::WHITE)
                | background_color(Rgb::BLACK),
        );
        e.finalize(None).ok();
        let rows = render_to_strings(&mut e);
        assert_eq!(rows[0], "\u{250c}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2510}");
        assert_eq!(rows[1], "\u{2502}   Hi   \u{2502}");
        assert_eq!(rows[2], "\u{2514}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2518}");
    }

    #[test]
    fn render_clears_phase_stains() {
        let mut e = Element::new(width(4u16) | height(2u16));
        e.finalize(None).ok();
        e.render();
        assert!(!e.stain.is(Stain::COLOR));
        assert!(!e.stain.is(Stain::EDGE));
        assert!(!e.stain.is(Stain::DEEP));
        assert!(!e.stain.is(Stain::STRETCH));
    }

    #[test]
    fn clean_subtree_returns_cache() {
        let mut e = Element::new(width(4u16) | height(2u16) | text("ab"));
        e.finalize(None).ok();
        e.render();
        let before: Vec<Cell> = e.buffer.clone();
        // Second render with no dirt must not change anything.
        e.render();
        assert_eq!(e.buffer, before);
    }

    #[test]
    fn child_nests_into_parent() {
        let mut parent = Element::new(
            width(8u16)
                | height(4u16)
                | node(Element::new(
                    width(4u16) | height(1u16) | position((1, 1)) | text("abcd"),
                )),
        );
        parent.finalize(None).ok();
        let rows = render_to_strings(&mut parent);
        assert_eq!(rows[1], " abcd   ");
    }

    #[test]
    fn bordered_parent_insets_borderless_child() {
        let mut parent = Element::new(
            width(8u16)
                | height(4u16)
                | enable_border(true)
                | node(Element::new(width(2u16) | height(1u16) | text("zz"))),
        );
        parent.finalize(None).ok();
        let rows = render_to_strings(&mut parent);
        // The child lands inside the border, not on top of it.
        assert!(rows[0].starts_with('\u{250c}'));
        assert!(rows[1].contains("zz"));
    }

    #[test]
    fn higher_z_renders_on_top() {
        let mut parent = Element::new(
            width(4u16)
                | height(1u16)
                | node(Element::new(
                    width(4u16) | height(1u16) | position((0, 0, 2)) | text("high"),
                ))
                | node(Element::new(
                    width(4u16) | height(1u16) | position((0, 0, 1)) | text("low!"),
                )),
        );
        parent.finalize(None).ok();
        let rows = render_to_strings(&mut parent);
        assert_eq!(rows[0], "high");
    }

    #[test]
    fn hidden_child_not_nested() {
        let mut parent = Element::new(width(4u16) | height(1u16));
        parent.finalize(None).ok();
        let mut child = Element::new(width(4u16) | height(1u16) | text("nope"));
        child.finalize(Some(parent.style())).ok();
        child.shown = false;
        parent.childs.push(child);
        parent.stain.dirty(Stain::DEEP);
        let rows = render_to_strings(&mut parent);
        assert_eq!(rows[0], "    ");
    }

    #[test]
    fn opacity_blends_child_over_parent() {
        let mut parent = Element::new(
            width(2u16)
                | height(1u16)
                | background_color(Rgb::WHITE)
                | node(Element::new(
                    width(2u16)
                        | height(1u16)
                        | background_color(Rgb::RED)
                        | opacity(0.5),
                )),
        );
        parent.finalize(None).ok();
        parent.render();
        let cell = parent.buffer[0];
        assert_eq!(cell.bg.rgb(), Rgb::new(255, 128, 128));
    }

    #[test]
    fn focus_changes_rendered_colors() {
        let mut e = Element::new(
            width(2u16)
                | height(1u16)
                | text_color(Rgb::RED)
                | crate::style::attribute::focus_text_color(Rgb::BLUE)
                | crate::style::attribute::hover_text_color(Rgb::GREEN)
                | text("x"),
        );
        e.finalize(None).ok();
        e.focused = true;
        e.hovered = true;
        e.stain.dirty(Stain::COLOR);
        e.render();
        let cell = e
            .buffer
            .iter()
            .find(|c| c.has_glyph())
            .copied();
        assert!(cell.is_some_and(|c| c.fg == Rgba::opaque(Rgb::BLUE)));
    }

    #[test]
    fn color_only_change_keeps_border_and_children() {
        let mut parent = Element::new(
            width(8u16)
                | height(3u16)
                | enable_border(true)
                | text("a")
                | node(Element::new(
                    width(2u16) | height(1u16) | position((1, 0)) | text("zz"),
                )),
        );
        parent.finalize(None).ok();
        parent.render();

        // A text edit dirties COLOR alone; the repaint must not wipe
        // the border glyphs or the nested child.
        parent.set_text("b").ok();
        let rows = render_to_strings(&mut parent);
        assert!(rows[0].starts_with('\u{250c}'));
        assert!(rows[2].ends_with('\u{2518}'));
        assert!(rows[1].contains("zz"));
    }

    #[test]
    fn progress_paints_fraction() {
        let mut e = Element::new(width(10u16) | height(1u16));
        e.content = Content::Progress(crate::element::ProgressContent {
            fraction: 0.5,
            ..Default::default()
        });
        e.finalize(None).ok();
        let rows = render_to_strings(&mut e);
        let filled = rows[0].matches('\u{2588}').count();
        let empty = rows[0].matches('\u{2591}').count();
        assert_eq!(filled, 5);
        assert_eq!(empty, 5);
    }

    #[test]
    fn sibling_borders_merge_into_junctions() {
        let mut parent = Element::new(
            width(9u16)
                | height(3u16)
                | node(Element::new(
                    width(6u16) | height(3u16) | position((0, 0)) | enable_border(true),
                ))
                | node(Element::new(
                    width(6u16) | height(3u16) | position((3, 0)) | enable_border(true),
                )),
        );
        parent.finalize(None).ok();
        let rows = render_to_strings(&mut parent);
        // Expected junctions on the shared column x=3.
        assert_eq!(rows[0].chars().nth(3), Some('\u{252c}'));
        assert_eq!(rows[2].chars().nth(3), Some('\u{2534}'));
        assert_eq!(rows[1].chars().nth(3), Some('\u{2502}'));
    }
}
