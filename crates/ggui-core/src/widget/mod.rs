//! Reference widgets built on the element contract: containers with
//! row/column flow, text fields, canvases, progress bars and switches.

pub mod canvas;
pub mod container;
pub mod progress_bar;
pub mod switch;
pub mod text_field;

pub use canvas::{canvas, draw};
pub use container::{list_view, push, reflow, scroll_view};
pub use progress_bar::{progress, progress_bar, set_progress};
pub use switch::{is_on, radio_button, select_radio, set_on, switch, toggle};
pub use text_field::{append_char, backspace, input_field, text_field};
