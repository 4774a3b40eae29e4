//! Whole-form rendering: fields on the left, actions on the right

use super::field_renderer::{draw_field, field_height, FieldView};
use crate::state::{AppState, FormButton};
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
    Frame,
};

/// Index of the first field to draw so that the field at `active` fits in
/// `viewport` rows
pub fn scroll_offset(heights: &[u16], active: usize, viewport: u16) -> usize {
    if heights.is_empty() {
        return 0;
    }
    let active = active.min(heights.len() - 1);
    let mut first = 0;
    while first < active && heights[first..=active].iter().map(|&h| u32::from(h)).sum::<u32>()
        > u32::from(viewport)
    {
        first += 1;
    }
    first
}

/// Draw the form with its action panel
pub fn draw_form(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Form area
            Constraint::Length(16), // Action panel
        ])
        .split(area);

    draw_fields(frame, chunks[0], state);
    draw_action_panel(frame, chunks[1], state);
}

fn draw_fields(frame: &mut Frame, area: Rect, state: &AppState) {
    let form = &state.form;
    let border_color = if form.is_buttons_row_active() {
        Color::DarkGray
    } else {
        Color::Cyan
    };

    let heights: Vec<u16> = form
        .fields()
        .enumerate()
        .map(|(i, (field, _))| {
            field_height(field, i == form.active_field_index, state.show_descriptions)
        })
        .collect();

    let block = Block::default()
        .title(format!(" {} ", state.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area).inner(ratatui::layout::Margin {
        horizontal: 1,
        vertical: 0,
    });

    let first = scroll_offset(&heights, form.active_field_index, inner.height);
    let mut y = inner.y;
    let bottom = inner.y + inner.height;
    let mut last_drawn = first;
    let mut clipped = false;
    for (i, (field, field_state)) in form.fields().enumerate().skip(first) {
        let mut height = heights[i];
        if y + height > bottom {
            // The first field is drawn cut off rather than not at all
            if i > first || y >= bottom {
                break;
            }
            height = bottom - y;
            clipped = true;
        }
        let view = FieldView {
            field,
            state: field_state,
            is_active: i == form.active_field_index,
            error: form.error_for(&field.name),
            show_description: state.show_descriptions,
        };
        draw_field(
            frame,
            Rect {
                x: inner.x,
                y,
                width: inner.width,
                height,
            },
            &view,
        );
        y += height;
        last_drawn = i + 1;
    }

    let block = match (first > 0, clipped || last_drawn < heights.len()) {
        (false, false) => block,
        (above, below) => {
            let marker = match (above, below) {
                (true, true) => " ↑↓ more ",
                (true, false) => " ↑ more ",
                _ => " ↓ more ",
            };
            block.title_bottom(Line::from(Span::styled(
                marker,
                Style::default().fg(Color::DarkGray),
            )))
        }
    };
    frame.render_widget(block, area);
}

fn draw_action_panel(frame: &mut Frame, area: Rect, state: &AppState) {
    let form = &state.form;
    let is_focused = form.is_buttons_row_active();

    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" Actions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    // One row per button when the boxed ones do not fit
    let button_height = if inner_area.height < 3 * BUTTON_HEIGHT {
        1
    } else {
        BUTTON_HEIGHT
    };
    let button_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(button_height),
            Constraint::Length(button_height),
            Constraint::Length(button_height),
            Constraint::Min(0),
        ])
        .split(inner_area);

    for (i, button) in FormButton::ALL.iter().enumerate() {
        let accent = match button {
            FormButton::Submit => Color::Green,
            FormButton::Reset => Color::Yellow,
            FormButton::Cancel => Color::Gray,
        };
        render_action_button(
            frame,
            button_chunks[i],
            button.label(),
            is_focused && form.selected_button() == *button,
            Some(accent),
        );
    }
}
