//! Button component for TUI

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Render a generic button with border
pub fn render_button(frame: &mut Frame, area: Rect, content: &str, is_selected: bool) {
    let border_style = if is_selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text_style = if is_selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(format!(" {content} ")).style(text_style);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}

/// Render a form action button.
///
/// The accent colors the label while the button is not selected; the
/// selected button is drawn reversed in its accent so it stands out from
/// the field focus color.
pub fn render_action_button(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    is_selected: bool,
    accent: Option<Color>,
) {
    let accent = accent.unwrap_or(Color::White);
    let (text_style, border_style) = if is_selected {
        (
            Style::default()
                .fg(Color::Black)
                .bg(accent)
                .add_modifier(Modifier::BOLD),
            Style::default().fg(accent),
        )
    } else {
        (
            Style::default().fg(accent),
            Style::default().fg(Color::DarkGray),
        )
    };

    let paragraph = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(text_style);

    // Too short for a border: label only
    if area.height < BUTTON_HEIGHT {
        frame.render_widget(paragraph, area);
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}
