//! Application state and core logic

use crate::platform::COMMAND_MODIFIER;
use crate::state::{AppState, Form, FormButton, Outcome};
use crate::submit::SubmitHandler;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Main application struct
pub struct App<H: SubmitHandler> {
    /// Current application state
    pub state: AppState,
    /// Receives validated values
    handler: H,
    /// Whether the app should quit
    quit: bool,
}

impl<H: SubmitHandler> App<H> {
    pub fn new(state: AppState, handler: H) -> Self {
        Self {
            state,
            handler,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn outcome(&self) -> &Outcome {
        &self.state.outcome
    }

    /// Give back the handler, with whatever it recorded
    pub fn into_handler(self) -> H {
        self.handler
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        self.state.status_message = None;

        // Shortcuts that work from anywhere
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.cancel();
                return Ok(());
            }
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.submit().await;
                return Ok(());
            }
            KeyCode::Char('r') if key.modifiers.contains(COMMAND_MODIFIER) => {
                self.reset();
                return Ok(());
            }
            KeyCode::Esc => {
                self.cancel();
                return Ok(());
            }
            KeyCode::Tab => {
                self.state.form.next_field();
                return Ok(());
            }
            KeyCode::BackTab => {
                self.state.form.prev_field();
                return Ok(());
            }
            _ => {}
        }

        if self.state.form.is_buttons_row_active() {
            self.handle_buttons_key(key).await;
        } else {
            self.handle_field_key(key);
        }
        Ok(())
    }

    /// Keys while the action row has focus
    async fn handle_buttons_key(&mut self, key: KeyEvent) {
        let form = &mut self.state.form;
        match key.code {
            KeyCode::Left | KeyCode::Up | KeyCode::Char('k') => form.prev_button(),
            KeyCode::Right | KeyCode::Down | KeyCode::Char('j') => form.next_button(),
            KeyCode::Enter | KeyCode::Char(' ') => match form.selected_button() {
                FormButton::Submit => self.submit().await,
                FormButton::Reset => self.reset(),
                FormButton::Cancel => self.cancel(),
            },
            _ => {}
        }
    }

    /// Keys while a field has focus
    fn handle_field_key(&mut self, key: KeyEvent) {
        let form = &mut self.state.form;
        let is_choice = form.is_active_field_choice();
        let is_toggle = form.is_active_field_toggle();
        match key.code {
            KeyCode::Up if is_choice => form.prev_option(),
            KeyCode::Down if is_choice => form.next_option(),
            KeyCode::Up if !form.is_active_field_multiline() => form.prev_field(),
            KeyCode::Down if !form.is_active_field_multiline() => form.next_field(),
            KeyCode::Char(' ') | KeyCode::Enter if is_toggle => form.toggle(),
            KeyCode::Enter if form.is_active_field_multiline() => form.newline(),
            KeyCode::Enter => form.next_field(),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER) =>
            {
                form.input_char(c)
            }
            KeyCode::Backspace => form.backspace(),
            _ => {}
        }
    }

    /// Validate, then hand the values to the submit handler
    async fn submit(&mut self) {
        let values = match self.state.form.submit() {
            Ok(values) => values,
            Err(errors) => {
                tracing::debug!("Submit blocked by {} invalid field(s)", errors.len());
                return;
            }
        };
        match self.handler.submit(&values).await {
            Ok(()) => {
                self.state.outcome = Outcome::Submitted;
                self.quit = true;
            }
            Err(err) => self.push_error(format!("Submit failed: {err:#}")),
        }
    }

    fn reset(&mut self) {
        self.state.form.reset();
        self.state.status_message = Some("Form reset".to_string());
        tracing::debug!("Form reset");
    }

    fn cancel(&mut self) {
        tracing::info!("Form cancelled");
        self.state.outcome = Outcome::Cancelled;
        self.quit = true;
    }
}
