//! Layout components (main area, status bar)

use crate::platform::{RESET_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::AppState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into the main area and the status bar row
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);
    (chunks[0], chunks[1])
}

/// Draw the status bar. Form status comes first so narrow terminals cut
/// the hints rather than the invalid count.
pub fn draw_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut spans = vec![Span::raw(" ")];

    let invalid = state.form.errors().len();
    if invalid > 0 {
        spans.push(Span::styled(
            format!("{invalid} invalid field(s)"),
            Style::default().fg(Color::Red),
        ));
        spans.push(Span::raw(" | "));
    }

    if let Some(msg) = &state.status_message {
        spans.push(Span::styled(msg.as_str(), Style::default().fg(Color::Green)));
        spans.push(Span::raw(" | "));
    }

    spans.push(Span::styled(get_hints(state), Style::default().fg(Color::Gray)));

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);
}

/// Keyboard hints for whatever has focus
fn get_hints(state: &AppState) -> String {
    let form = &state.form;
    let common = format!("{SUBMIT_SHORTCUT}:submit  {RESET_SHORTCUT}:reset  Esc:cancel");
    if state.has_errors() {
        "Enter/Esc:dismiss".to_string()
    } else if form.is_buttons_row_active() {
        format!("←/→:button  Enter:press  Tab:next  {common}")
    } else if form.is_active_field_choice() {
        format!("↑/↓:option  Space:select  Tab:next  {common}")
    } else if form.is_active_field_multiline() {
        format!("Enter:newline  Tab:next  {common}")
    } else {
        format!("Tab:next  Shift+Tab:prev  {common}")
    }
}
