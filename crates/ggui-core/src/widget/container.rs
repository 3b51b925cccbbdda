//! Flow containers: list views laying children out in row/column order
//! and scroll views offsetting them.

use crate::element::Element;
use crate::error::Result;
use crate::style::attribute::{Flow, allow_dynamic_size, allow_scrolling, flow_priority};
use crate::style::chain::StyleChain;

/// A container that flows its children and grows to fit them. The
/// user's chain overrides the defaults.
pub fn list_view(chain: StyleChain) -> Element {
    Element::new(
        (flow_priority(Flow::Column) | allow_dynamic_size(true)).as_defaults() | chain,
    )
}

/// A container whose content is offset by scroll inputs. Children
/// scrolled past the top-left are clipped via the nesting offsets.
pub fn scroll_view(chain: StyleChain) -> Element {
    Element::new(allow_scrolling(true).into_chain().as_defaults() | chain)
}

/// Add a child and re-run the flow layout.
pub fn push(parent: &mut Element, child: Element) -> Result<()> {
    parent.add_child(child)?;
    reflow(parent);
    Ok(())
}

/// Position every shown child according to the container's flow
/// priority, honoring per-child margins, wrapping at the content edge
/// when enabled.
pub fn reflow(parent: &mut Element) {
    let flow = parent.style().flow.value();
    let wrap = parent.style().wrap.value();
    let inset = parent.style().border_inset() * 2;
    let basis_w = i32::from(parent.width().saturating_sub(inset));
    let basis_h = i32::from(parent.height().saturating_sub(inset));

    let mut x: i32 = 0;
    let mut y: i32 = 0;
    let mut line_extent: i32 = 0;

    for i in 0..parent.childs().len() {
        let child = &parent.childs()[i];
        if !child.is_displayed() {
            continue;
        }
        let m = *child.style().margin.get();
        let (ml, mr) = (i32::from(m.left.evaluate(0)), i32::from(m.right.evaluate(0)));
        let (mt, mb) = (i32::from(m.top.evaluate(0)), i32::from(m.bottom.evaluate(0)));
        let w = i32::from(child.processed_width());
        let h = i32::from(child.processed_height());
        let z = child.position().z;

        match flow {
            Flow::Row => {
                if wrap && x > 0 && x + ml + w > basis_w {
                    x = 0;
                    y += line_extent;
                    line_extent = 0;
                }
                let cx = x + ml;
                let cy = y + mt;
                parent.childs_mut()[i].set_position((cx, cy, z));
                x = cx + w + mr;
                line_extent = line_extent.max(mt + h + mb);
            }
            Flow::Column => {
                if wrap && y > 0 && y + mt + h > basis_h {
                    y = 0;
                    x += line_extent;
                    line_extent = 0;
                }
                let cx = x + ml;
                let cy = y + mt;
                parent.childs_mut()[i].set_position((cx, cy, z));
                y = cy + h + mb;
                line_extent = line_extent.max(ml + w + mr);
            }
        }
    }
}
