//! Error dialog component

use super::base::{render_dialog, DialogConfig};
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

/// Render an error dialog overlay centered on the screen.
///
/// `remaining` is the number of queued errors behind this one.
pub fn render_error_dialog(frame: &mut Frame, error_message: &str, remaining: usize) {
    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut hint = vec![
        Span::raw("Press "),
        Span::styled("Enter", key),
        Span::raw(" or "),
        Span::styled("Esc", key),
        Span::raw(" to dismiss"),
    ];
    if remaining > 0 {
        hint.push(Span::styled(
            format!(" ({remaining} more)"),
            Style::default().fg(Color::DarkGray),
        ));
    }

    render_dialog(
        frame,
        DialogConfig {
            title: "Error",
            accent: Color::Red,
            message: error_message,
            hint: Some(hint),
            max_width: 60,
        },
    );
}
