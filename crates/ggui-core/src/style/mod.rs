//! Declarative styling: value types, the attribute set, `|`-chains and
//! the embed protocol that settles them onto an element.

pub mod attribute;
pub mod border;
pub mod chain;
pub mod styling;
pub mod value;

pub use attribute::{
    Anchor, Attribute, ColorValue, EmbedOrder, Flow, Margin, PositionValue, Shadow,
    allow_dynamic_size, allow_overflow, allow_scrolling, anchor, background_color, border_color,
    border_background_color, childs, display, enable_border, flow_priority, focus_background_color,
    focus_border_background_color, focus_border_color, focus_text_color, height,
    hover_background_color, hover_border_background_color, hover_border_color, hover_text_color,
    margin, name, node, on_click, on_destroy, on_draw, on_hide, on_init, on_input, on_render,
    on_show, opacity, position, shadow, styled_border, text, text_color, title, width, wrap,
};
pub use border::{
    BorderGlyphs, CONNECTS_DOWN, CONNECTS_LEFT, CONNECTS_RIGHT, CONNECTS_UP,
};
pub use chain::StyleChain;
pub use styling::Styling;
pub use value::{LengthValue, Prop, Unit, ValueState};
