//! Form state: values, focus, errors and submission for a whole schema

use super::field::FieldState;
use crate::error::SchemaError;
use crate::schema::{FieldValue, FormField, FormSchema, FormValues};
use crate::validation::{compile, FormValidator, Messages, ValidationErrors};

/// Trait for common form navigation
pub trait Form {
    /// Number of focus stops, including the buttons row
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    /// Whether a focus stop can receive focus
    fn is_focusable(&self, _index: usize) -> bool {
        true
    }
    fn next_field(&mut self) {
        let count = self.field_count();
        let mut index = self.active_field();
        for _ in 0..count {
            index = (index + 1) % count;
            if self.is_focusable(index) {
                self.set_active_field(index);
                return;
            }
        }
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let mut index = self.active_field();
        for _ in 0..count {
            index = if index == 0 { count - 1 } else { index - 1 };
            if self.is_focusable(index) {
                self.set_active_field(index);
                return;
            }
        }
    }
}

/// Buttons on the action row, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormButton {
    Submit,
    Reset,
    Cancel,
}

impl FormButton {
    pub const ALL: [FormButton; 3] = [FormButton::Submit, FormButton::Reset, FormButton::Cancel];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Submit => "Submit",
            Self::Reset => "Reset",
            Self::Cancel => "Cancel",
        }
    }
}

/// A form generated from a schema
#[derive(Debug, Clone)]
pub struct FormState {
    schema: FormSchema,
    validator: FormValidator,
    fields: Vec<FieldState>,
    /// Index into the fields; `fields.len()` is the buttons row
    pub active_field_index: usize,
    /// Index into [`FormButton::ALL`]
    pub selected_button: usize,
    errors: ValidationErrors,
}

impl FormState {
    pub fn new(schema: FormSchema, validator: FormValidator) -> Self {
        let fields = schema.iter().map(FieldState::new).collect();
        let mut state = Self {
            schema,
            validator,
            fields,
            active_field_index: 0,
            selected_button: 0,
            errors: ValidationErrors::new(),
        };
        if !state.is_focusable(0) {
            state.next_field();
        }
        state
    }

    /// Compile the schema and build a form for it
    pub fn from_schema(schema: FormSchema, messages: &Messages) -> Result<Self, SchemaError> {
        let validator = compile(&schema, messages)?;
        Ok(Self::new(schema, validator))
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn validator(&self) -> &FormValidator {
        &self.validator
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// First error message of a field
    pub fn error_for(&self, name: &str) -> Option<&str> {
        self.errors.first(name)
    }

    /// Descriptor and state of the field at `index`
    pub fn field(&self, index: usize) -> Option<(&FormField, &FieldState)> {
        Some((self.schema.fields.get(index)?, self.fields.get(index)?))
    }

    pub fn fields(&self) -> impl Iterator<Item = (&FormField, &FieldState)> {
        self.schema.fields.iter().zip(self.fields.iter())
    }

    /// Current values, keyed by field name
    pub fn values(&self) -> FormValues {
        self.fields()
            .map(|(field, state)| (field.name.clone(), state.submitted_value(field)))
            .collect()
    }

    /// Returns true if the buttons row is currently active
    pub fn is_buttons_row_active(&self) -> bool {
        self.active_field_index == self.fields.len()
    }

    pub fn selected_button(&self) -> FormButton {
        FormButton::ALL[self.selected_button.min(FormButton::ALL.len() - 1)]
    }

    /// Move to the next button (wraps around)
    pub fn next_button(&mut self) {
        self.selected_button = (self.selected_button + 1) % FormButton::ALL.len();
    }

    /// Move to the previous button (wraps around)
    pub fn prev_button(&mut self) {
        if self.selected_button == 0 {
            self.selected_button = FormButton::ALL.len() - 1;
        } else {
            self.selected_button -= 1;
        }
    }

    /// Whether the active field is a textarea
    pub fn is_active_field_multiline(&self) -> bool {
        self.active()
            .is_some_and(|(field, _)| field.is_multiline())
    }

    /// Whether the active field has options to move through
    pub fn is_active_field_choice(&self) -> bool {
        self.active()
            .is_some_and(|(field, _)| !field.options().is_empty())
    }

    /// Whether the active field is edited by toggling rather than typing
    pub fn is_active_field_toggle(&self) -> bool {
        self.active()
            .is_some_and(|(field, _)| !field.field_type().is_typed())
    }

    fn active(&self) -> Option<(&FormField, &FieldState)> {
        self.field(self.active_field_index)
    }

    /// Apply an edit to the active field and revalidate it if it was
    /// showing an error
    fn edit_active(&mut self, edit: impl FnOnce(&FormField, &mut FieldState) -> bool) {
        let index = self.active_field_index;
        let (Some(field), Some(state)) = (self.schema.fields.get(index), self.fields.get_mut(index))
        else {
            return;
        };
        if field.disabled || !edit(field, state) {
            return;
        }
        let name = field.name.clone();
        if self.errors.get(&name).is_some() {
            self.revalidate(index);
        }
    }

    fn revalidate(&mut self, index: usize) {
        let Some((field, state)) = self.field(index) else {
            return;
        };
        let name = field.name.clone();
        let result = self
            .validator
            .validate_field(&name, Some(&state.submitted_value(field)));
        self.errors.remove(&name);
        if let Err(messages) = result {
            self.errors.insert(name, messages);
        }
    }

    pub fn input_char(&mut self, c: char) {
        self.edit_active(|field, state| state.push_char(field, c));
    }

    pub fn backspace(&mut self) {
        self.edit_active(|field, state| state.pop_char(field));
    }

    pub fn newline(&mut self) {
        self.edit_active(|field, state| state.push_newline(field));
    }

    pub fn toggle(&mut self) {
        self.edit_active(|field, state| state.toggle(field));
    }

    pub fn next_option(&mut self) {
        self.edit_active(|field, state| {
            state.next_option(field);
            false
        });
    }

    pub fn prev_option(&mut self) {
        self.edit_active(|field, state| {
            state.prev_option(field);
            false
        });
    }

    /// Validate every field.
    ///
    /// On failure the errors are kept for display and focus moves to the
    /// first invalid field.
    pub fn submit(&mut self) -> Result<FormValues, ValidationErrors> {
        match self.validator.validate(&self.values()) {
            Ok(values) => {
                self.errors = ValidationErrors::new();
                tracing::info!("Form submitted with {} value(s)", values.len());
                Ok(values)
            }
            Err(errors) => {
                let first_invalid = errors
                    .fields()
                    .filter_map(|name| self.schema.position(name))
                    .min();
                if let Some(index) = first_invalid {
                    self.active_field_index = index;
                }
                tracing::debug!("Submit rejected: {} invalid field(s)", errors.len());
                self.errors = errors.clone();
                Err(errors)
            }
        }
    }

    /// Restore defaults and clear errors
    pub fn reset(&mut self) {
        self.fields = self.schema.iter().map(FieldState::new).collect();
        self.errors = ValidationErrors::new();
        self.active_field_index = 0;
        if !self.is_focusable(0) {
            self.next_field();
        }
    }

    /// Replace a field value directly
    pub fn set_value(&mut self, name: &str, value: FieldValue) {
        if let Some(index) = self.schema.position(name) {
            self.fields[index].value = value;
            if self.errors.get(name).is_some() {
                self.revalidate(index);
            }
        }
    }
}

impl Form for FormState {
    fn field_count(&self) -> usize {
        self.fields.len() + 1 // fields, buttons
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.fields.len());
    }
    fn is_focusable(&self, index: usize) -> bool {
        match self.schema.fields.get(index) {
            Some(field) => !field.disabled,
            None => index == self.fields.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{compile_with, FieldValidator};

    fn signup() -> FormState {
        let schema = FormSchema::from_json_str(
            r#"[
                {"type": "text", "name": "username", "label": "Username", "required": true,
                 "minLength": 3},
                {"type": "text", "name": "id", "label": "ID", "disabled": true, "defaultValue": "u-1"},
                {"type": "number", "name": "age", "label": "Age", "min": 18},
                {"type": "checkbox", "name": "agree", "label": "the terms", "required": true},
                {"type": "select", "name": "plan", "label": "a plan", "required": true,
                 "options": [{"label": "Free", "value": "free"}, {"label": "Pro", "value": "pro"}]}
            ]"#,
        )
        .unwrap();
        FormState::from_schema(schema, &Messages::default()).unwrap()
    }

    fn type_text(form: &mut FormState, text: &str) {
        for c in text.chars() {
            form.input_char(c);
        }
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_field_count_includes_buttons() {
            let form = signup();
            assert_eq!(form.field_count(), 6);
        }

        #[test]
        fn test_next_field_skips_disabled() {
            let mut form = signup();
            assert_eq!(form.active_field_index, 0);
            form.next_field();
            assert_eq!(form.active_field_index, 2);
        }

        #[test]
        fn test_prev_field_skips_disabled_and_wraps() {
            let mut form = signup();
            form.prev_field();
            assert!(form.is_buttons_row_active());
            form.set_active_field(2);
            form.prev_field();
            assert_eq!(form.active_field_index, 0);
        }

        #[test]
        fn test_next_field_cycles() {
            let mut form = signup();
            for _ in 0..5 {
                form.next_field();
            }
            assert_eq!(form.active_field_index, 0);
        }

        #[test]
        fn test_set_active_field_clamps() {
            let mut form = signup();
            form.set_active_field(100);
            assert_eq!(form.active_field_index, 5);
            assert!(form.is_buttons_row_active());
        }

        #[test]
        fn test_buttons_wrap() {
            let mut form = signup();
            assert_eq!(form.selected_button(), FormButton::Submit);
            form.prev_button();
            assert_eq!(form.selected_button(), FormButton::Cancel);
            form.next_button();
            assert_eq!(form.selected_button(), FormButton::Submit);
        }

        #[test]
        fn test_first_disabled_field_is_skipped_on_start() {
            let schema = FormSchema::from_json_str(
                r#"[{"type": "text", "name": "a", "label": "A", "disabled": true},
                    {"type": "text", "name": "b", "label": "B"}]"#,
            )
            .unwrap();
            let form = FormState::from_schema(schema, &Messages::default()).unwrap();
            assert_eq!(form.active_field_index, 1);
        }
    }

    mod editing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_typing_updates_values() {
            let mut form = signup();
            type_text(&mut form, "neo");
            assert_eq!(form.values()["username"], FieldValue::text("neo"));
        }

        #[test]
        fn test_disabled_field_is_not_editable() {
            let mut form = signup();
            form.active_field_index = 1;
            form.input_char('x');
            assert_eq!(form.values()["id"], FieldValue::text("u-1"));
        }

        #[test]
        fn test_choice_helpers() {
            let mut form = signup();
            form.set_active_field(4);
            assert!(form.is_active_field_choice());
            assert!(form.is_active_field_toggle());
            assert!(!form.is_active_field_multiline());
            form.next_option();
            form.toggle();
            assert_eq!(form.values()["plan"], FieldValue::text("pro"));
        }

        #[test]
        fn test_set_value() {
            let mut form = signup();
            form.set_value("agree", FieldValue::Bool(true));
            assert_eq!(form.values()["agree"], FieldValue::Bool(true));
        }
    }

    mod submission {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_submit_failure_focuses_first_invalid_field() {
            let mut form = signup();
            form.set_active_field(4);
            let errors = form.submit().unwrap_err();

            assert_eq!(
                errors.fields().collect::<Vec<_>>(),
                vec!["username", "agree", "plan"]
            );
            assert_eq!(form.active_field_index, 0);
            assert_eq!(form.error_for("username"), Some("Username is required."));
        }

        #[test]
        fn test_errors_revalidate_on_edit() {
            let mut form = signup();
            let _ = form.submit();
            type_text(&mut form, "ne");
            assert_eq!(
                form.error_for("username"),
                Some("Username must be at least 3 characters.")
            );
            form.input_char('o');
            assert!(form.error_for("username").is_none());
            assert!(form.error_for("agree").is_some());
        }

        #[test]
        fn test_submit_success_returns_cleaned_values() {
            let mut form = signup();
            type_text(&mut form, "neo");
            form.set_active_field(2);
            type_text(&mut form, "30");
            form.set_active_field(3);
            form.toggle();
            form.set_active_field(4);
            form.toggle();

            let values = form.submit().unwrap();
            let expected: FormValues = [
                ("username", FieldValue::text("neo")),
                ("age", FieldValue::Number(30.0)),
                ("agree", FieldValue::Bool(true)),
                ("plan", FieldValue::text("free")),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
            assert_eq!(values, expected);
            assert!(form.errors().is_empty());
        }

        #[test]
        fn test_custom_validator_on_number_field_rejects_low_input() {
            let schema = FormSchema::from_json_str(
                r#"[{"type": "number", "name": "age", "label": "Age"}]"#,
            )
            .unwrap();
            let custom = FormValidator::new(vec![
                FieldValidator::new("age", "Age").min(18.0, "adults only")
            ]);
            let validator = compile_with(&schema, &Messages::default(), custom).unwrap();
            let mut form = FormState::new(schema, validator);

            form.input_char('5');
            let errors = form.submit().unwrap_err();
            assert_eq!(errors.first("age"), Some("adults only"));

            form.input_char('0');
            let values = form.submit().unwrap();
            assert_eq!(values["age"], FieldValue::Number(50.0));
        }

        #[test]
        fn test_reset_restores_defaults() {
            let mut form = signup();
            type_text(&mut form, "neo");
            let _ = form.submit();
            form.reset();
            assert_eq!(form.values()["username"], FieldValue::text(""));
            assert!(form.errors().is_empty());
            assert_eq!(form.active_field_index, 0);
        }
    }
}
