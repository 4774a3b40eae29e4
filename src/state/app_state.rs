//! Application state definitions

use super::forms::FormState;
use std::collections::VecDeque;

/// How the form session ended
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Outcome {
    /// Still editing
    #[default]
    Editing,
    /// Values were validated and handed to the submit handler
    Submitted,
    /// The user left without submitting
    Cancelled,
}

/// Everything the UI draws from
#[derive(Debug, Clone)]
pub struct AppState {
    /// Title shown on the form border
    pub title: String,
    pub form: FormState,
    /// Transient message for the status bar
    pub status_message: Option<String>,
    /// Errors shown one at a time in a modal dialog
    pub error_queue: VecDeque<String>,
    pub outcome: Outcome,
    /// Show field descriptions under inputs
    pub show_descriptions: bool,
}

impl AppState {
    pub fn new(title: impl Into<String>, form: FormState) -> Self {
        Self {
            title: title.into(),
            form,
            status_message: None,
            error_queue: VecDeque::new(),
            outcome: Outcome::default(),
            show_descriptions: true,
        }
    }

    /// Queue an error for the modal dialog
    pub fn push_error(&mut self, message: String) {
        tracing::warn!("{message}");
        self.error_queue.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    /// The error currently shown
    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }
}
