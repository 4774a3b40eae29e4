//! Editing state of a single form field

use crate::defaults::default_value;
use crate::schema::{FieldKind, FieldValue, FormField};

/// Mask character shown instead of password input
const MASK_CHAR: char = '•';

/// Runtime state of one field: the value being edited and, for fields
/// with options, the option under the cursor
#[derive(Debug, Clone)]
pub struct FieldState {
    pub value: FieldValue,
    pub option_cursor: usize,
}

impl FieldState {
    /// Start from the field's default value.
    ///
    /// Numbers are edited as text, so a numeric default becomes its text
    /// form and a missing one becomes empty text.
    pub fn new(field: &FormField) -> Self {
        let value = match (&field.kind, default_value(field)) {
            (FieldKind::Number(_), FieldValue::Number(n)) => FieldValue::Text(n.to_string()),
            (FieldKind::Number(_), FieldValue::Null) => FieldValue::Text(String::new()),
            // Multi-valued fields always hold a list
            (_, FieldValue::Text(s)) if field.is_multi_valued() => {
                if s.trim().is_empty() {
                    FieldValue::List(Vec::new())
                } else {
                    FieldValue::List(vec![s])
                }
            }
            (_, value) => value,
        };
        let mut state = Self {
            value,
            option_cursor: 0,
        };
        state.option_cursor = field
            .options()
            .iter()
            .position(|o| state.is_selected(&o.value))
            .unwrap_or(0);
        state
    }

    /// Get the text value (empty for non-text values)
    pub fn as_text(&self) -> &str {
        self.value.as_str().unwrap_or("")
    }

    /// The value as submitted: blank number input is absent
    pub fn submitted_value(&self, field: &FormField) -> FieldValue {
        match (&field.kind, &self.value) {
            (FieldKind::Number(_), FieldValue::Text(s)) if s.trim().is_empty() => FieldValue::Null,
            (_, value) => value.clone(),
        }
    }

    /// Push a character to a typed field. Returns whether the value changed.
    pub fn push_char(&mut self, field: &FormField, c: char) -> bool {
        if !field.field_type().is_typed() {
            return false;
        }
        if matches!(field.kind, FieldKind::Number(_))
            && !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
        {
            return false;
        }
        match &mut self.value {
            FieldValue::Text(s) => s.push(c),
            other => *other = FieldValue::Text(c.to_string()),
        }
        true
    }

    /// Remove the last character from a typed field
    pub fn pop_char(&mut self, field: &FormField) -> bool {
        if !field.field_type().is_typed() {
            return false;
        }
        match &mut self.value {
            FieldValue::Text(s) => s.pop().is_some(),
            _ => false,
        }
    }

    /// Insert a line break; only textareas accept one
    pub fn push_newline(&mut self, field: &FormField) -> bool {
        if !field.is_multiline() {
            return false;
        }
        self.push_char(field, '\n')
    }

    /// Move the option cursor down, wrapping
    pub fn next_option(&mut self, field: &FormField) {
        let count = field.options().len();
        if count > 0 {
            self.option_cursor = (self.option_cursor + 1) % count;
        }
    }

    /// Move the option cursor up, wrapping
    pub fn prev_option(&mut self, field: &FormField) {
        let count = field.options().len();
        if count == 0 {
            return;
        }
        self.option_cursor = if self.option_cursor == 0 {
            count - 1
        } else {
            self.option_cursor - 1
        };
    }

    /// Toggle a checkbox, or the option under the cursor for fields with
    /// options. Radio groups and single selects select the option.
    pub fn toggle(&mut self, field: &FormField) -> bool {
        match &field.kind {
            FieldKind::Checkbox(rules) if !rules.is_group() => {
                let checked = self.value.as_bool().unwrap_or(false);
                self.value = FieldValue::Bool(!checked);
                true
            }
            _ if field.is_multi_valued() => {
                let Some(option) = field.options().get(self.option_cursor) else {
                    return false;
                };
                let mut selected: Vec<String> =
                    self.value.as_list().map(<[String]>::to_vec).unwrap_or_default();
                if let Some(pos) = selected.iter().position(|v| *v == option.value) {
                    selected.remove(pos);
                } else {
                    selected.push(option.value.clone());
                }
                // Keep the submitted list in option order
                let options = field.options();
                selected.sort_by_key(|v| options.iter().position(|o| o.value == *v));
                self.value = FieldValue::List(selected);
                true
            }
            FieldKind::Radio(_) | FieldKind::Select(_) => {
                let Some(option) = field.options().get(self.option_cursor) else {
                    return false;
                };
                self.value = FieldValue::Text(option.value.clone());
                true
            }
            _ => false,
        }
    }

    /// Whether an option value is currently selected
    pub fn is_selected(&self, option_value: &str) -> bool {
        match &self.value {
            FieldValue::Text(s) => s == option_value,
            FieldValue::List(items) => items.iter().any(|v| v == option_value),
            _ => false,
        }
    }

    pub fn is_checked(&self) -> bool {
        self.value.as_bool().unwrap_or(false)
    }

    /// Get the display value for rendering a typed field
    pub fn display_value(&self, field: &FormField) -> String {
        let text = self.as_text();
        match field.kind {
            FieldKind::Password(_) => MASK_CHAR.to_string().repeat(text.chars().count()),
            _ => text.to_string(),
        }
    }
}
