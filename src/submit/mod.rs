//! Submission handlers
//!
//! Validated values leave the form through a [`SubmitHandler`].

mod handlers;
mod traits;

pub use handlers::{render, FileHandler, MemoryHandler, OutputFormat, StdoutHandler};
pub use traits::SubmitHandler;

#[cfg(test)]
pub use traits::MockSubmitHandler;
