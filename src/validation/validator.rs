//! Field and form validators

use super::errors::ValidationErrors;
use super::messages::Messages;
use super::rules::{Check, Rule};
use crate::schema::{FieldValue, FormValues};
use regex::Regex;
use std::sync::Arc;

/// The value shape a validator accepts, and how raw input is coerced
/// into it before rules run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Anything, uncoerced
    Any,
    Text,
    /// Numbers, or text that parses as one. Blank text is absent.
    Number,
    /// Booleans, or `"on"` / `"true"` / `"false"` text
    Bool,
    /// Lists of strings; a single non-blank string becomes a one-item list
    List,
}

impl Shape {
    fn expected(&self) -> &'static str {
        match self {
            Shape::Any => "value",
            Shape::Text => "string",
            Shape::Number => "number",
            Shape::Bool => "boolean",
            Shape::List => "list",
        }
    }

    /// The value an absent optional field resolves to
    fn void_value(&self) -> FieldValue {
        match self {
            Shape::Any | Shape::Number => FieldValue::Null,
            Shape::Text => FieldValue::Text(String::new()),
            Shape::Bool => FieldValue::Bool(false),
            Shape::List => FieldValue::List(Vec::new()),
        }
    }
}

enum Coerced {
    Value(FieldValue),
    WrongType,
    NotANumber,
}

fn coerce(shape: Shape, value: FieldValue) -> Coerced {
    match (shape, value) {
        (Shape::Any, v) | (_, v @ FieldValue::Null) => Coerced::Value(v),

        (Shape::Text, v @ FieldValue::Text(_)) => Coerced::Value(v),

        (Shape::Number, v @ FieldValue::Number(_)) => Coerced::Value(v),
        (Shape::Number, FieldValue::Text(s)) if s.trim().is_empty() => {
            Coerced::Value(FieldValue::Null)
        }
        (Shape::Number, FieldValue::Text(s)) => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Coerced::Value(FieldValue::Number(n)),
            _ => Coerced::NotANumber,
        },

        (Shape::Bool, v @ FieldValue::Bool(_)) => Coerced::Value(v),
        (Shape::Bool, FieldValue::Text(s)) => match s.trim() {
            "on" | "true" => Coerced::Value(FieldValue::Bool(true)),
            "" | "false" => Coerced::Value(FieldValue::Bool(false)),
            _ => Coerced::WrongType,
        },

        (Shape::List, v @ FieldValue::List(_)) => Coerced::Value(v),
        (Shape::List, FieldValue::Text(s)) if s.trim().is_empty() => {
            Coerced::Value(FieldValue::List(Vec::new()))
        }
        (Shape::List, FieldValue::Text(s)) => Coerced::Value(FieldValue::List(vec![s])),

        _ => Coerced::WrongType,
    }
}

/// Validates one field: coerces the raw value into its shape, enforces
/// presence, then runs every rule.
#[derive(Debug, Clone)]
pub struct FieldValidator {
    name: String,
    label: String,
    shape: Shape,
    /// Message for a void value; `None` makes the field optional
    required: Option<String>,
    rules: Vec<Rule>,
    messages: Messages,
}

impl FieldValidator {
    /// A validator with no rules that accepts any shape.
    ///
    /// Used to hand-write validators that override or extend the ones
    /// generated from a schema.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_shape(name, label, Shape::Any, Messages::default())
    }

    pub(crate) fn with_shape(
        name: impl Into<String>,
        label: impl Into<String>,
        shape: Shape,
        messages: Messages,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            shape,
            required: None,
            rules: Vec::new(),
            messages,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn is_required(&self) -> bool {
        self.required.is_some()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Coerce text input to this shape before rules run
    pub fn as_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    pub fn required(mut self, message: impl Into<String>) -> Self {
        self.required = Some(message.into());
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn min_length(self, n: usize, message: impl Into<String>) -> Self {
        self.rule(Rule::new(Check::MinLength(n), message))
    }

    pub fn max_length(self, n: usize, message: impl Into<String>) -> Self {
        self.rule(Rule::new(Check::MaxLength(n), message))
    }

    pub fn pattern(self, regex: Regex, message: impl Into<String>) -> Self {
        self.rule(Rule::new(Check::Pattern(regex), message))
    }

    pub fn contains(self, needle: impl Into<String>, message: impl Into<String>) -> Self {
        self.rule(Rule::new(Check::Contains(needle.into()), message))
    }

    pub fn min(self, n: f64, message: impl Into<String>) -> Self {
        self.rule(Rule::new(Check::Min(n), message))
    }

    pub fn max(self, n: f64, message: impl Into<String>) -> Self {
        self.rule(Rule::new(Check::Max(n), message))
    }

    pub fn min_selected(self, n: usize, message: impl Into<String>) -> Self {
        self.rule(Rule::new(Check::MinSelected(n), message))
    }

    pub fn max_selected(self, n: usize, message: impl Into<String>) -> Self {
        self.rule(Rule::new(Check::MaxSelected(n), message))
    }

    /// Arbitrary predicate
    pub fn check<F>(self, message: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&FieldValue) -> bool + Send + Sync + 'static,
    {
        self.rule(Rule::new(Check::Custom(Arc::new(predicate)), message))
    }

    /// Validate a raw value; `None` means the field is absent.
    ///
    /// Returns the coerced value, or every failing message in rule order.
    /// A void required value reports only the required message; a void
    /// optional value skips the rules.
    pub fn validate(&self, value: Option<&FieldValue>) -> Result<FieldValue, Vec<String>> {
        let raw = value.cloned().unwrap_or_default();
        let value = match coerce(self.shape, raw) {
            Coerced::Value(v) => v,
            Coerced::NotANumber => return Err(vec![self.messages.not_a_number(&self.label)]),
            Coerced::WrongType => {
                return Err(vec![self
                    .messages
                    .invalid_type(&self.label, self.shape.expected())])
            }
        };

        if value.is_void() {
            return match &self.required {
                Some(message) => Err(vec![message.clone()]),
                None => Ok(self.shape.void_value()),
            };
        }

        let failures: Vec<String> = self
            .rules
            .iter()
            .filter_map(|rule| rule.apply(&value))
            .map(str::to_string)
            .collect();

        if failures.is_empty() {
            Ok(value)
        } else {
            Err(failures)
        }
    }
}

/// Validators for a whole form, in field order
#[derive(Debug, Clone, Default)]
pub struct FormValidator {
    fields: Vec<FieldValidator>,
}

impl FormValidator {
    pub fn new(fields: Vec<FieldValidator>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldValidator] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldValidator> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Overlay hand-written validators.
    ///
    /// A validator for an existing name replaces the generated one in
    /// place; new names are appended. A replacement of [`Shape::Any`]
    /// keeps the shape and message locale of the one it replaces.
    pub fn merge(mut self, custom: FormValidator) -> Self {
        for mut validator in custom.fields {
            match self.fields.iter_mut().find(|f| f.name == validator.name) {
                Some(slot) => {
                    if validator.shape == Shape::Any {
                        validator.shape = slot.shape;
                        validator.messages = slot.messages;
                    }
                    *slot = validator;
                }
                None => self.fields.push(validator),
            }
        }
        self
    }

    /// Validate one field by name. Unknown names pass unchanged.
    pub fn validate_field(
        &self,
        name: &str,
        value: Option<&FieldValue>,
    ) -> Result<FieldValue, Vec<String>> {
        match self.field(name) {
            Some(validator) => validator.validate(value),
            None => Ok(value.cloned().unwrap_or_default()),
        }
    }

    /// Validate every field.
    ///
    /// On success the result holds one coerced value per validator; keys
    /// without a validator are dropped.
    pub fn validate(&self, values: &FormValues) -> Result<FormValues, ValidationErrors> {
        let mut cleaned = FormValues::new();
        let mut errors = ValidationErrors::new();

        for validator in &self.fields {
            match validator.validate(values.get(&validator.name)) {
                Ok(value) => {
                    cleaned.insert(validator.name.clone(), value);
                }
                Err(messages) => errors.insert(validator.name.clone(), messages),
            }
        }

        if errors.is_empty() {
            Ok(cleaned)
        } else {
            tracing::debug!("Validation failed for {} field(s)", errors.len());
            Err(errors)
        }
    }
}
