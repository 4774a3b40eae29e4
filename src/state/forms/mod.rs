//! Form domain layer
//!
//! Runtime state for a form generated from a schema: per-field editing
//! state, focus, errors and submission.

mod field;
mod form_state;

pub use field::FieldState;
pub use form_state::{Form, FormButton, FormState};
