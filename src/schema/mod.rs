//! Form schema: an ordered list of field descriptors
//!
//! Schemas are plain data. They are loaded from JSON or YAML, structurally
//! checked with [`FormSchema::check`], and then handed to the validation
//! compiler, the default value fold and the form state.

mod field;
mod value;

pub use field::{
    CheckboxRules, ChoiceOption, ChoiceRules, DateFormat, DateRules, FieldKind, FieldType,
    FormField, NumberRules, TextRules,
};
pub use value::{FieldValue, FormValues};

use crate::error::{FormgenError, SchemaError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// An ordered list of fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormSchema {
    pub fields: Vec<FormField>,
}

impl FormSchema {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self { fields }
    }

    pub fn from_json_str(s: &str) -> Result<Self, FormgenError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, FormgenError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Load a schema file. `.yaml` / `.yml` are read as YAML, everything
    /// else as JSON.
    pub fn load(path: &Path) -> Result<Self, FormgenError> {
        let content = std::fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        let schema = if is_yaml {
            Self::from_yaml_str(&content)?
        } else {
            Self::from_json_str(&content)?
        };
        tracing::debug!(
            "Loaded schema from {} ({} fields)",
            path.display(),
            schema.len()
        );
        Ok(schema)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FormField> {
        self.fields.iter()
    }

    pub fn get(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Check the schema for structural mistakes.
    ///
    /// This does not compile patterns or date bounds; the validation
    /// compiler reports those.
    pub fn check(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.trim().is_empty() {
                return Err(SchemaError::EmptyName {
                    label: field.label.clone(),
                });
            }
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateName {
                    name: field.name.clone(),
                });
            }
            check_field(field)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a FormSchema {
    type Item = &'a FormField;
    type IntoIter = std::slice::Iter<'a, FormField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl From<Vec<FormField>> for FormSchema {
    fn from(fields: Vec<FormField>) -> Self {
        Self::new(fields)
    }
}

fn check_field(field: &FormField) -> Result<(), SchemaError> {
    let name = &field.name;
    match &field.kind {
        FieldKind::Text(rules)
        | FieldKind::Email(rules)
        | FieldKind::Password(rules)
        | FieldKind::Textarea(rules) => {
            check_bounds(name, "length", rules.min_length, rules.max_length)?;
        }
        FieldKind::Number(rules) => {
            if let (Some(min), Some(max)) = (rules.min, rules.max) {
                if min > max {
                    return Err(SchemaError::InvertedBounds {
                        name: name.clone(),
                        what: "range",
                    });
                }
            }
            if let Some(step) = rules.step {
                if step.is_nan() || step <= 0.0 {
                    return Err(SchemaError::InvalidStep {
                        name: name.clone(),
                        step,
                    });
                }
            }
        }
        FieldKind::Checkbox(rules) => {
            check_bounds(name, "selection", rules.min_selected, rules.max_selected)?;
            if !rules.is_group() && (rules.min_selected.is_some() || rules.max_selected.is_some())
            {
                tracing::warn!("Field '{name}' has selection bounds but no options; ignoring");
            }
            check_options(name, &rules.options)?;
        }
        FieldKind::Radio(rules) | FieldKind::Select(rules) => {
            if rules.options.is_empty() {
                return Err(SchemaError::MissingOptions {
                    name: name.clone(),
                    field_type: field.field_type(),
                });
            }
            check_options(name, &rules.options)?;
        }
        FieldKind::Date(_) => {}
    }
    Ok(())
}

fn check_bounds(
    name: &str,
    what: &'static str,
    min: Option<usize>,
    max: Option<usize>,
) -> Result<(), SchemaError> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(SchemaError::InvertedBounds {
            name: name.to_string(),
            what,
        }),
        _ => Ok(()),
    }
}

fn check_options(name: &str, options: &[ChoiceOption]) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for option in options {
        if !seen.insert(option.value.as_str()) {
            return Err(SchemaError::DuplicateOption {
                name: name.to_string(),
                value: option.value.clone(),
            });
        }
    }
    Ok(())
}
