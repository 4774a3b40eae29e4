//! Validation: a compiler from field schemas to composable rules, and the
//! validators it produces

mod compiler;
mod errors;
mod messages;
mod rules;
mod validator;

pub use compiler::{compile, compile_field, compile_with};
pub use errors::ValidationErrors;
pub use messages::{Locale, Messages};
pub use rules::{is_multiple_of, Check, CustomCheck, Rule, Temporal};
pub use validator::{FieldValidator, FormValidator, Shape};
