//! Form rendering module
//!
//! - `field_renderer`: one presentation routine per field type
//! - `form_view`: the scrolling field list and the action panel

mod field_renderer;
mod form_view;

pub use field_renderer::{draw_field, field_height, FieldView};
pub use form_view::{draw_form, scroll_offset};
