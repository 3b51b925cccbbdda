//! ggui-core: a terminal-graphics library.
//!
//! Applications compose a tree of [`Element`]s styled through
//! `|`-chained attributes; the runtime renders the tree as
//! escape-encoded cell grids, diffing frames against the previous one,
//! while dispatching keyboard and mouse input to per-element handlers.
//!
//! ```no_run
//! use ggui_core::style::{enable_border, height, text, width};
//!
//! fn main() -> ggui_core::Result<()> {
//!     ggui_core::ggui(width(20u16) | height(5u16) | enable_border(true) | text("hello"))
//! }
//! ```

pub mod cell;
pub mod color;
pub mod element;
pub mod error;
pub mod event;
pub mod frame;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod render;
pub mod runtime;
pub mod scheduler;
pub mod style;
pub mod terminal;
pub mod widget;

pub use cell::{Cell, Glyph, compose};
pub use color::{Rgb, Rgba};
pub use element::{
    CanvasContent, Content, Element, ProgressContent, Stain, SwitchContent, TextContent,
};
pub use error::{GguiError, Result};
pub use event::{Input, criteria};
pub use frame::FrameComposer;
pub use geometry::{Point, Point3, Rect, Size};
pub use logging::{init_file, report};
pub use runtime::{ExitHandle, RenderGate, Runtime, ggui};
pub use scheduler::{Scheduler, flags as memory_flags};
pub use style::{
    Anchor, Attribute, BorderGlyphs, ColorValue, Flow, LengthValue, Margin, PositionValue, Shadow,
    StyleChain, Styling, Unit, ValueState,
};
pub use terminal::{AnsiBackend, DrmBackend, Frame, InputSource, TerminalBackend, TestBackend};
