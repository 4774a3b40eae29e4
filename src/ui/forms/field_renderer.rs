//! Field rendering: one presentation routine per field type

use crate::schema::{FieldKind, FieldType, FormField};
use crate::state::FieldState;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Inner rows of a textarea box
const TEXTAREA_ROWS: u16 = 4;

const CURSOR: &str = "▌";

/// Everything needed to draw one field
#[derive(Debug, Clone, Copy)]
pub struct FieldView<'a> {
    pub field: &'a FormField,
    pub state: &'a FieldState,
    pub is_active: bool,
    /// First validation message of the field
    pub error: Option<&'a str>,
    pub show_description: bool,
}

/// Draws a field's input box
type Presenter = fn(&FieldView) -> Vec<Line<'static>>;

/// Presentation routine for each field type
fn presenter(field: &FormField) -> Presenter {
    match field.field_type() {
        FieldType::Text
        | FieldType::Email
        | FieldType::Password
        | FieldType::Number
        | FieldType::Date => single_line,
        FieldType::Textarea => multi_line,
        FieldType::Checkbox if field.is_multi_valued() => check_list,
        FieldType::Checkbox => toggle,
        FieldType::Radio => radio_list,
        FieldType::Select if field.is_multi_valued() => check_list,
        FieldType::Select => dropdown,
    }
}

/// Rows of the bordered input box
fn box_height(field: &FormField, is_active: bool) -> u16 {
    let inner = match field.field_type() {
        FieldType::Textarea => TEXTAREA_ROWS,
        FieldType::Radio => field.options().len() as u16,
        FieldType::Checkbox | FieldType::Select if field.is_multi_valued() => {
            field.options().len() as u16
        }
        FieldType::Select if is_active => field.options().len() as u16,
        _ => 1,
    };
    inner.max(1) + 2
}

/// Rows a field occupies: its box, the description line when shown, and a
/// row reserved for the error message
pub fn field_height(field: &FormField, is_active: bool, show_description: bool) -> u16 {
    let description = u16::from(show_description && field.description.is_some());
    box_height(field, is_active) + description + 1
}

/// Draw a field with its label, description and first error
pub fn draw_field(frame: &mut Frame, area: Rect, view: &FieldView) {
    let field = view.field;
    let box_rows = box_height(field, view.is_active).min(area.height);
    let box_area = Rect {
        height: box_rows,
        ..area
    };

    let border_style = if view.is_active {
        Style::default().fg(Color::Cyan)
    } else if view.error.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .title(title(field))
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines = presenter(field)(view);
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(paragraph, box_area);

    let mut y = box_area.y + box_rows;
    let bottom = area.y + area.height;
    if view.show_description {
        if let Some(description) = &field.description {
            if y < bottom {
                let line = Line::from(Span::styled(
                    format!(" {description}"),
                    Style::default().fg(Color::Gray),
                ));
                frame.render_widget(Paragraph::new(line), Rect { y, height: 1, ..area });
                y += 1;
            }
        }
    }
    if let Some(error) = view.error {
        if y < bottom {
            let line = Line::from(Span::styled(
                format!(" {error}"),
                Style::default().fg(Color::Red),
            ));
            frame.render_widget(Paragraph::new(line), Rect { y, height: 1, ..area });
        }
    }
}

fn title(field: &FormField) -> Line<'static> {
    let mut spans = vec![Span::raw(format!(" {}", field.label))];
    if field.required {
        spans.push(Span::styled(" *", Style::default().fg(Color::Red)));
    }
    if field.disabled {
        spans.push(Span::styled(
            " (disabled)",
            Style::default().fg(Color::DarkGray),
        ));
    }
    spans.push(Span::raw(" "));
    Line::from(spans)
}

fn value_style(view: &FieldView) -> Style {
    if view.field.disabled {
        Style::default().fg(Color::DarkGray)
    } else if view.is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn cursor(view: &FieldView) -> Span<'static> {
    let symbol = if view.is_active { CURSOR } else { "" };
    Span::styled(symbol, Style::default().fg(Color::Cyan))
}

/// Placeholder text for an empty typed field
fn placeholder(view: &FieldView) -> Option<String> {
    if let Some(placeholder) = &view.field.placeholder {
        return Some(placeholder.clone());
    }
    match &view.field.kind {
        FieldKind::Date(rules) => Some(rules.format.hint().to_string()),
        _ if !view.is_active => Some("(empty)".to_string()),
        _ => None,
    }
}

/// text, email, number, date and (masked) password
fn single_line(view: &FieldView) -> Vec<Line<'static>> {
    let value = view.state.display_value(view.field);
    let mut spans = Vec::new();
    if value.is_empty() {
        spans.push(cursor(view));
        if let Some(placeholder) = placeholder(view) {
            spans.push(Span::styled(placeholder, Style::default().fg(Color::DarkGray)));
        }
    } else {
        spans.push(Span::styled(value, value_style(view)));
        spans.push(cursor(view));
    }
    vec![Line::from(spans)]
}

fn multi_line(view: &FieldView) -> Vec<Line<'static>> {
    let value = view.state.as_text();
    if value.is_empty() {
        return single_line(view);
    }
    let style = value_style(view);
    let mut lines: Vec<Line> = value
        .split('\n')
        .map(|l| Line::from(Span::styled(l.to_string(), style)))
        .collect();
    // Keep the cursor line in view
    let overflow = lines.len().saturating_sub(TEXTAREA_ROWS as usize);
    lines.drain(..overflow);
    if let Some(last) = lines.last_mut() {
        last.spans.push(cursor(view));
    }
    lines
}

fn toggle(view: &FieldView) -> Vec<Line<'static>> {
    let mark = if view.state.is_checked() { "[x]" } else { "[ ]" };
    vec![Line::from(vec![
        Span::styled(mark, value_style(view)),
        Span::raw(" "),
        Span::raw(view.field.label.clone()),
    ])]
}

/// One line per option, with the cursor row highlighted when active
fn option_lines(view: &FieldView, mark: impl Fn(bool) -> &'static str) -> Vec<Line<'static>> {
    view.field
        .options()
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let selected = view.state.is_selected(&option.value);
            let under_cursor = view.is_active && i == view.state.option_cursor;
            let style = if under_cursor {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if selected {
                value_style(view)
            } else {
                Style::default().fg(Color::Gray)
            };
            let pointer = if under_cursor { "▸ " } else { "  " };
            Line::from(Span::styled(
                format!("{pointer}{} {}", mark(selected), option.label),
                style,
            ))
        })
        .collect()
}

fn radio_list(view: &FieldView) -> Vec<Line<'static>> {
    option_lines(view, |selected| if selected { "(•)" } else { "( )" })
}

/// Checkbox groups and multi selects
fn check_list(view: &FieldView) -> Vec<Line<'static>> {
    option_lines(view, |selected| if selected { "[x]" } else { "[ ]" })
}

/// Single select: collapsed to the chosen label, expanded while active
fn dropdown(view: &FieldView) -> Vec<Line<'static>> {
    if view.is_active {
        return option_lines(view, |selected| if selected { "•" } else { " " });
    }
    let chosen = view
        .field
        .options()
        .iter()
        .find(|o| view.state.is_selected(&o.value));
    let line = match chosen {
        Some(option) => Line::from(vec![
            Span::styled(option.label.clone(), value_style(view)),
            Span::styled(" ▾", Style::default().fg(Color::DarkGray)),
        ]),
        None => Line::from(Span::styled(
            view.field
                .placeholder
                .clone()
                .unwrap_or_else(|| "(none) ▾".to_string()),
            Style::default().fg(Color::DarkGray),
        )),
    };
    vec![line]
}
