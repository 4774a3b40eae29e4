//! Base dialog component

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Configuration for rendering a dialog
pub struct DialogConfig<'a> {
    pub title: &'a str,
    /// Title and border color
    pub accent: Color,
    /// Message content (can be multi-line with \n)
    pub message: &'a str,
    /// Hint text shown at the bottom (e.g., "Press Enter to dismiss")
    pub hint: Option<Vec<Span<'a>>>,
    pub max_width: u16,
}

impl Default for DialogConfig<'_> {
    fn default() -> Self {
        Self {
            title: "Dialog",
            accent: Color::White,
            message: "",
            hint: None,
            max_width: 60,
        }
    }
}

/// Render a centered dialog overlay
pub fn render_dialog(frame: &mut Frame, config: DialogConfig) {
    let area = frame.area();
    // 2 columns of padding on each side plus the borders
    let chrome = 6u16;
    let max_width = config.max_width.min(area.width);
    let wrapped_lines = wrap_text(config.message, max_width.saturating_sub(chrome) as usize);

    let hint_width = config
        .hint
        .as_ref()
        .map_or(0, |spans| spans.iter().map(Span::width).sum::<usize>());
    let content_width = wrapped_lines
        .iter()
        .map(|l| l.chars().count())
        .chain([config.title.chars().count(), hint_width])
        .max()
        .unwrap_or(0) as u16;
    let dialog_width = (content_width + chrome).min(max_width);

    // title, blank, message, then blank + hint when present, plus borders
    let hint_lines = if config.hint.is_some() { 2 } else { 0 };
    let dialog_height = (2 + wrapped_lines.len() as u16 + hint_lines + 2)
        .max(5)
        .min(area.height);

    let dialog_area = Rect {
        x: area.x + area.width.saturating_sub(dialog_width) / 2,
        y: area.y + area.height.saturating_sub(dialog_height) / 2,
        width: dialog_width,
        height: dialog_height,
    };

    frame.render_widget(Clear, dialog_area);

    let mut content = vec![
        Line::from(Span::styled(
            format!(" {}", config.title),
            Style::default()
                .fg(config.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    content.extend(wrapped_lines.into_iter().map(|l| Line::from(format!(" {l}"))));
    if let Some(mut hint_spans) = config.hint {
        hint_spans.insert(0, Span::raw(" "));
        content.push(Line::from(""));
        content.push(Line::from(hint_spans));
    }

    let dialog = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(config.accent)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(dialog, dialog_area);
}

/// Greedy word wrap by character count. Words longer than the width are
/// kept whole on their own line.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;
        for word in paragraph.split_whitespace() {
            let width = word.chars().count();
            if current_width > 0 && current_width + 1 + width > max_width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            if current_width > 0 {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += width;
        }
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_wrap_text_breaks_on_words() {
        assert_eq!(
            wrap_text("the quick brown fox", 9),
            vec!["the quick", "brown fox"]
        );
    }

    #[test]
    fn test_wrap_text_keeps_blank_lines() {
        assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
        assert_eq!(wrap_text("", 10), vec![""]);
    }

    #[test]
    fn test_wrap_text_long_word_is_not_split() {
        assert_eq!(wrap_text("abcdefghij x", 4), vec!["abcdefghij", "x"]);
    }

    #[test]
    fn test_wrap_text_counts_chars_not_bytes() {
        assert_eq!(wrap_text("이름은 필수 항목입니다.", 10).len(), 2);
    }

    #[test]
    fn test_render_dialog_is_centered() {
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal
            .draw(|f| {
                render_dialog(
                    f,
                    DialogConfig {
                        title: "Oops",
                        message: "Something failed",
                        ..Default::default()
                    },
                )
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        let text: String = (0..40)
            .map(|x| buffer[(x, 6)].symbol().to_string())
            .collect();
        assert!(text.contains("Something failed"), "got {text:?}");
    }
}
