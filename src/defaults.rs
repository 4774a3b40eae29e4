//! Initial values for a schema

use crate::schema::{FieldKind, FieldValue, FormField, FormSchema, FormValues};

/// Build the initial value of every field.
///
/// An explicit `defaultValue` wins; otherwise the value is the empty shape
/// of the field: `null` for numbers, `false` / `[]` for checkboxes,
/// `[]` for multi selects and `""` for everything else.
pub fn generate_default_values(schema: &FormSchema) -> FormValues {
    schema
        .iter()
        .map(|field| (field.name.clone(), default_value(field)))
        .collect()
}

/// Initial value of a single field
pub fn default_value(field: &FormField) -> FieldValue {
    if let Some(value) = &field.default_value {
        return value.clone();
    }
    empty_value(field)
}

/// Value of a field that holds nothing
pub fn empty_value(field: &FormField) -> FieldValue {
    match &field.kind {
        FieldKind::Number(_) => FieldValue::Null,
        FieldKind::Checkbox(rules) if rules.is_group() => FieldValue::List(Vec::new()),
        FieldKind::Checkbox(_) => FieldValue::Bool(false),
        FieldKind::Select(rules) if rules.multiple => FieldValue::List(Vec::new()),
        _ => FieldValue::Text(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_generates_empty_shapes_without_defaults() {
        let schema = FormSchema::from_json_str(
            r#"[
                {"type": "text", "name": "title", "label": "Title"},
                {"type": "number", "name": "price", "label": "Price"},
                {"type": "checkbox", "name": "tos", "label": "Terms"},
                {"type": "checkbox", "name": "tags", "label": "Tags",
                 "options": [{"label": "A", "value": "a"}, {"label": "B", "value": "b"}]},
                {"type": "select", "name": "country", "label": "Country",
                 "options": [{"label": "Korea", "value": "kr"}, {"label": "USA", "value": "us"}]},
                {"type": "select", "name": "langs", "label": "Languages", "multiple": true,
                 "options": [{"label": "Rust", "value": "rs"}]},
                {"type": "radio", "name": "plan", "label": "Plan",
                 "options": [{"label": "Free", "value": "free"}]},
                {"type": "date", "name": "due", "label": "Due"}
            ]"#,
        )
        .unwrap();

        let defaults = generate_default_values(&schema);

        let expected: FormValues = [
            ("title", FieldValue::text("")),
            ("price", FieldValue::Null),
            ("tos", FieldValue::Bool(false)),
            ("tags", FieldValue::List(vec![])),
            ("country", FieldValue::text("")),
            ("langs", FieldValue::List(vec![])),
            ("plan", FieldValue::text("")),
            ("due", FieldValue::text("")),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        assert_eq!(defaults, expected);
    }

    #[test]
    fn test_explicit_default_wins() {
        let schema = FormSchema::new(vec![
            FormField::text("email", "Email").with_default("test@site.com")
        ]);
        let defaults = generate_default_values(&schema);
        assert_eq!(defaults["email"], FieldValue::text("test@site.com"));
    }

    #[test]
    fn test_empty_schema_yields_no_values() {
        assert!(generate_default_values(&FormSchema::default()).is_empty());
    }
}
