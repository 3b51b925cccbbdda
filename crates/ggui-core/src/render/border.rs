//! Border painting and post-nesting border merging.

use crate::cell::{Cell, Glyph};
use crate::element::{Element, Stain};
use crate::geometry::Rect;
use crate::style::border::{
    BorderGlyphs, CONNECTS_DOWN, CONNECTS_LEFT, CONNECTS_RIGHT, CONNECTS_UP,
};

/// Paint the border glyphs and the centered title into the element's own
/// buffer. Clears the EDGE stain.
pub(crate) fn add_overhead(el: &mut Element) {
    el.stain.clean(Stain::EDGE);

    if !el.has_border() {
        return;
    }

    let w = usize::from(el.width);
    let h = usize::from(el.height);
    if w < 1 || h < 1 {
        return;
    }

    let (fg, bg) = el.style.border_colors(el.focused, el.hovered);
    let glyphs = el.style.border_glyphs.value();
    let cell = |c: char| Cell {
        glyph: Glyph::from_char(c),
        fg,
        bg,
        flags: 0,
    };

    for y in 0..h {
        for x in 0..w {
            let g = if y == 0 && x == 0 {
                Some(glyphs.top_left)
            } else if y == 0 && x == w - 1 {
                Some(glyphs.top_right)
            } else if y == h - 1 && x == 0 {
                Some(glyphs.bottom_left)
            } else if y == h - 1 && x == w - 1 {
                Some(glyphs.bottom_right)
            } else if y == 0 || y == h - 1 {
                Some(glyphs.horizontal)
            } else if x == 0 || x == w - 1 {
                Some(glyphs.vertical)
            } else {
                None
            };
            if let Some(g) = g
                && let Some(slot) = el.buffer.get_mut(y * w + x)
            {
                *slot = cell(g);
            }
        }
    }

    // Title overwrites the top border run, clipped to the interior.
    if let Some(title) = el.title.clone()
        && w > 2
    {
        let mut x = 1;
        for c in title.chars() {
            if x >= w - 1 {
                break;
            }
            if let Some(slot) = el.buffer.get_mut(x) {
                *slot = Cell {
                    glyph: Glyph::from_char(c),
                    fg,
                    bg,
                    flags: 0,
                };
            }
            x += 1;
        }
    }
}

/// Rewrite the crossings between two border rectangles into connector
/// glyphs, in `buffer` (parent coordinates). Candidate crossings are the
/// four pairings of the rectangles' vertical and horizontal border lines;
/// each crossing takes the connector matching its 4-bit neighbour mask,
/// or stays unchanged when no connector matches. Idempotent: connectors
/// already in place produce the same mask again.
pub(crate) fn merge_borders(
    buffer: &mut [Cell],
    width: u16,
    height: u16,
    glyphs: BorderGlyphs,
    a: Rect,
    b: Rect,
) {
    // Disjoint boxes share no border cells.
    if b.x + i32::from(b.width) < a.x
        || b.x > a.x + i32::from(a.width)
        || b.y + i32::from(b.height) < a.y
        || b.y > a.y + i32::from(a.height)
    {
        return;
    }
    // A box strictly inside the other touches no border either.
    if b.x > a.x
        && b.x + i32::from(b.width) < a.x + i32::from(a.width)
        && b.y > a.y
        && b.y + i32::from(b.height) < a.y + i32::from(a.height)
    {
        return;
    }

    let vertical_xs = [b.x, a.x, b.right() - 1, a.right() - 1];
    let horizontal_ys = [a.y, b.bottom() - 1, a.y, b.bottom() - 1];

    let w = i32::from(width);
    let h = i32::from(height);
    fn at(buffer: &[Cell], width: u16, w: i32, h: i32, x: i32, y: i32) -> Option<&Cell> {
        if x < 0 || y < 0 || x >= w || y >= h {
            None
        } else {
            buffer.get(y as usize * usize::from(width) + x as usize)
        }
    }

    let vertical = Glyph::from_char(glyphs.vertical);
    let horizontal = Glyph::from_char(glyphs.horizontal);

    for i in 0..4 {
        let cx = vertical_xs[i];
        let cy = horizontal_ys[i];
        if cx < 0 || cy < 0 || cx >= w || cy >= h {
            continue;
        }

        let mut mask = 0u8;
        if at(buffer, width, w, h, cx, cy - 1).is_some_and(|c| c.glyph == vertical) {
            mask |= CONNECTS_UP;
        }
        if at(buffer, width, w, h, cx, cy + 1).is_some_and(|c| c.glyph == vertical) {
            mask |= CONNECTS_DOWN;
        }
        if at(buffer, width, w, h, cx - 1, cy).is_some_and(|c| c.glyph == horizontal) {
            mask |= CONNECTS_LEFT;
        }
        if at(buffer, width, w, h, cx + 1, cy).is_some_and(|c| c.glyph == horizontal) {
            mask |= CONNECTS_RIGHT;
        }

        if let Some(connector) = glyphs.connector(mask)
            && let Some(cell) = buffer.get_mut(cy as usize * usize::from(width) + cx as usize)
        {
            cell.glyph = Glyph::from_char(connector);
        }
    }
}
