//! Opacity and shadow post-processing.
//!
//! Both passes run on a copy of the element's rendered buffer while the
//! parent nests it. A shadow inflates the buffer; the resulting
//! post-processed dimensions are what the parent clips against, distinct
//! from the element's logical width and height.

use crate::cell::{Cell, compose};
use crate::element::Element;

/// Run the post-process chain (`opacity(shadow(buf))`) and record the
/// processed dimensions on the element.
pub(crate) fn postprocess(el: &mut Element) -> Vec<Cell> {
    let mut buf = el.buffer.clone();
    let mut w = el.width;
    let mut h = el.height;

    if el.style.shadow.get().enabled {
        (buf, w, h) = process_shadow(el, buf);
    }

    let opacity = el.style.opacity.value();
    if opacity < 1.0 {
        process_opacity(&mut buf, opacity);
    }

    el.post_width = w;
    el.post_height = h;
    buf
}

/// Multiply every cell's foreground and background alpha by `opacity`.
pub(crate) fn process_opacity(buf: &mut [Cell], opacity: f32) {
    let opacity = opacity.clamp(0.0, 1.0);
    for cell in buf {
        let fg = cell.fg.alpha() * opacity;
        let bg = cell.bg.alpha() * opacity;
        cell.fg.set_alpha_f(fg);
        cell.bg.set_alpha_f(bg);
    }
}

/// Extend the buffer by the shadow length on every side, fill the halo
/// with the shadow color at geometrically decaying alpha and compose the
/// original buffer on top.
fn process_shadow(el: &Element, buf: Vec<Cell>) -> (Vec<Cell>, u16, u16) {
    let s = *el.style.shadow.get();
    let len = s.length();
    if len == 0 {
        return (buf, el.width, el.height);
    }

    let w = usize::from(el.width);
    let h = usize::from(el.height);
    let sw = w + usize::from(len) * 2;
    let sh = h + usize::from(len) * 2;

    let mut transparent = Cell::EMPTY;
    transparent.bg.set_alpha(0);
    transparent.fg.set_alpha(0);
    let mut out = vec![transparent; sw * sh];

    // The halo is shifted by the direction's x/y; the box stays centered.
    let dx = s.direction.0.round() as i32;
    let dy = s.direction.1.round() as i32;
    // Decay per ring, bounded so the halo always fades.
    let decay = s.direction.2.clamp(0.0, 0.9);

    let box_x = i32::from(len);
    let box_y = i32::from(len);
    let box_r = box_x + w as i32;
    let box_b = box_y + h as i32;

    for y in 0..sh as i32 {
        for x in 0..sw as i32 {
            // Ring distance from the (shifted) halo cell to the box.
            let px = x - dx;
            let py = y - dy;
            let ox = (box_x - px).max(px - (box_r - 1)).max(0);
            let oy = (box_y - py).max(py - (box_b - 1)).max(0);
            let ring = ox.max(oy);
            if ring == 0 {
                continue;
            }
            let alpha = s.opacity * decay.powi(ring - 1);
            if alpha <= 0.0 {
                continue;
            }
            let mut cell = Cell::EMPTY;
            cell.bg = s.color;
            cell.bg.set_alpha_f(alpha.min(1.0) * s.color.alpha());
            cell.fg.set_alpha(0);
            out[y as usize * sw + x as usize] = cell;
        }
    }

    for y in 0..h {
        for x in 0..w {
            let dst = (y + usize::from(len)) * sw + x + usize::from(len);
            if let (Some(d), Some(src)) = (out.get_mut(dst), buf.get(y * w + x)) {
                compose(d, src);
            }
        }
    }

    (out, sw as u16, sh as u16)
}
