//! Field descriptors
//!
//! A field is a set of common attributes (name, label, required, ...)
//! plus a kind tagged by `type` that carries the constraints that make
//! sense for it.

use super::value::FieldValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The tag of a field kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    Text,
    Email,
    Password,
    Number,
    Textarea,
    Checkbox,
    Radio,
    Select,
    Date,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
            Self::Number => "number",
            Self::Textarea => "textarea",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Select => "select",
            Self::Date => "date",
        }
    }

    /// Kinds whose value is typed in character by character
    pub fn is_typed(&self) -> bool {
        matches!(
            self,
            Self::Text | Self::Email | Self::Password | Self::Number | Self::Textarea | Self::Date
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a radio group, select or checkbox group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub label: String,
    pub value: String,
}

impl ChoiceOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Accepted layout of a date field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateFormat {
    /// `YYYY-MM-DD`
    #[default]
    Date,
    /// `YYYY-MM-DDTHH:MM`
    DatetimeLocal,
    /// `HH:MM`
    Time,
}

impl DateFormat {
    /// chrono format string
    pub fn pattern(&self) -> &'static str {
        match self {
            Self::Date => "%Y-%m-%d",
            Self::DatetimeLocal => "%Y-%m-%dT%H:%M",
            Self::Time => "%H:%M",
        }
    }

    /// Human-readable layout, shown as the input hint
    pub fn hint(&self) -> &'static str {
        match self {
            Self::Date => "YYYY-MM-DD",
            Self::DatetimeLocal => "YYYY-MM-DDTHH:MM",
            Self::Time => "HH:MM",
        }
    }
}

/// Constraints for text, email, password and textarea fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(default)]
    pub integer: bool,
}

/// A checkbox without options is a single boolean toggle; with options it
/// is a group whose value is the list of checked option values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckboxRules {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ChoiceOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_selected: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_selected: Option<usize>,
}

impl CheckboxRules {
    pub fn is_group(&self) -> bool {
        !self.options.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceRules {
    #[serde(default)]
    pub options: Vec<ChoiceOption>,
    /// Only meaningful for `select`
    #[serde(default)]
    pub multiple: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
    #[serde(default)]
    pub format: DateFormat,
}

/// Kind-specific part of a field, tagged by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum FieldKind {
    Text(TextRules),
    Email(TextRules),
    Password(TextRules),
    Textarea(TextRules),
    Number(NumberRules),
    Checkbox(CheckboxRules),
    Radio(ChoiceRules),
    Select(ChoiceRules),
    Date(DateRules),
}

impl FieldKind {
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Text(_) => FieldType::Text,
            Self::Email(_) => FieldType::Email,
            Self::Password(_) => FieldType::Password,
            Self::Textarea(_) => FieldType::Textarea,
            Self::Number(_) => FieldType::Number,
            Self::Checkbox(_) => FieldType::Checkbox,
            Self::Radio(_) => FieldType::Radio,
            Self::Select(_) => FieldType::Select,
            Self::Date(_) => FieldType::Date,
        }
    }
}

/// A single field descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<FieldValue>,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FormField {
    /// Create a field with no common attributes set
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            required: false,
            placeholder: None,
            description: None,
            disabled: false,
            default_value: None,
            kind,
        }
    }

    pub fn text(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Text(TextRules::default()))
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<FieldValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    pub fn field_type(&self) -> FieldType {
        self.kind.field_type()
    }

    /// Options for radio, select and checkbox groups; empty otherwise
    pub fn options(&self) -> &[ChoiceOption] {
        match &self.kind {
            FieldKind::Radio(rules) | FieldKind::Select(rules) => &rules.options,
            FieldKind::Checkbox(rules) => &rules.options,
            _ => &[],
        }
    }

    /// Whether the value of this field is a list of option values
    pub fn is_multi_valued(&self) -> bool {
        match &self.kind {
            FieldKind::Checkbox(rules) => rules.is_group(),
            FieldKind::Select(rules) => rules.multiple,
            _ => false,
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self.kind, FieldKind::Textarea(_))
    }
}
