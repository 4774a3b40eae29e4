//! Error types

use crate::schema::FieldType;
use thiserror::Error;

/// Mistakes in a schema, found by [`crate::schema::FormSchema::check`] or
/// while compiling validators
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("field with label '{label}' has an empty name")]
    EmptyName { label: String },

    #[error("duplicate field name: {name}")]
    DuplicateName { name: String },

    #[error("{field_type} field '{name}' has no options")]
    MissingOptions { name: String, field_type: FieldType },

    #[error("field '{name}' has duplicate option value '{value}'")]
    DuplicateOption { name: String, value: String },

    #[error("field '{name}' has a minimum {what} greater than its maximum")]
    InvertedBounds { name: String, what: &'static str },

    #[error("field '{name}' has a non-positive step: {step}")]
    InvalidStep { name: String, step: f64 },

    #[error("field '{name}' has an invalid pattern: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("field '{name}' has a {bound} bound '{value}' that does not match {expected}")]
    InvalidDateBound {
        name: String,
        bound: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Errors while loading or preparing a form
#[derive(Debug, Error)]
pub enum FormgenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid schema: {0}")]
    Schema(#[from] SchemaError),
}
