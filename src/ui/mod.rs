//! UI module for rendering the TUI

pub mod components;
pub mod forms;
pub mod layout;

use crate::state::AppState;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, state: &AppState) {
    let (main_area, status_area) = layout::create_layout(frame.area());

    forms::draw_form(frame, main_area, state);
    layout::draw_status_bar(frame, status_area, state);

    // Modal on top of everything else
    if let Some(error) = state.current_error() {
        components::render_error_dialog(frame, error, state.error_queue.len() - 1);
    }
}
