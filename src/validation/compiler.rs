//! Schema to validator compiler
//!
//! Each field type maps to a fixed set of rules. Constraints that can be
//! wrong in themselves (regex patterns, date bounds) are checked here so a
//! bad schema fails before any form is shown.

use super::messages::Messages;
use super::rules::{Check, Rule, Temporal};
use super::validator::{FieldValidator, FormValidator, Shape};
use crate::error::SchemaError;
use crate::schema::{
    CheckboxRules, ChoiceRules, DateRules, FieldKind, FormField, FormSchema, NumberRules,
    TextRules,
};
use regex::Regex;

/// Compile a whole schema. Disabled fields get no validator, so they are
/// neither checked nor part of the cleaned values.
pub fn compile(schema: &FormSchema, messages: &Messages) -> Result<FormValidator, SchemaError> {
    schema.check()?;

    let fields = schema
        .iter()
        .filter(|field| !field.disabled)
        .map(|field| compile_field(field, messages))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        "Compiled {} validator(s) from {} field(s)",
        fields.len(),
        schema.len()
    );
    Ok(FormValidator::new(fields))
}

/// Compile a schema and overlay hand-written validators
pub fn compile_with(
    schema: &FormSchema,
    messages: &Messages,
    custom: FormValidator,
) -> Result<FormValidator, SchemaError> {
    Ok(compile(schema, messages)?.merge(custom))
}

/// Compile one field
pub fn compile_field(field: &FormField, messages: &Messages) -> Result<FieldValidator, SchemaError> {
    match &field.kind {
        FieldKind::Text(rules) | FieldKind::Password(rules) | FieldKind::Textarea(rules) => {
            build_text(field, rules, false, messages)
        }
        FieldKind::Email(rules) => build_text(field, rules, true, messages),
        FieldKind::Number(rules) => Ok(build_number(field, rules, messages)),
        FieldKind::Checkbox(rules) => Ok(build_checkbox(field, rules, messages)),
        FieldKind::Radio(rules) => Ok(build_choice(field, rules, false, messages)),
        FieldKind::Select(rules) => Ok(build_choice(field, rules, rules.multiple, messages)),
        FieldKind::Date(rules) => build_date(field, rules, messages),
    }
}

fn base(field: &FormField, shape: Shape, messages: &Messages) -> FieldValidator {
    FieldValidator::with_shape(&field.name, &field.label, shape, *messages)
}

fn build_text(
    field: &FormField,
    rules: &TextRules,
    email: bool,
    messages: &Messages,
) -> Result<FieldValidator, SchemaError> {
    let label = &field.label;
    let mut v = base(field, Shape::Text, messages);

    if field.required {
        v = v.required(messages.required(label));
    }
    if email {
        v = v.rule(Rule::new(Check::Email, messages.email(label)));
    }
    if let Some(n) = rules.min_length {
        v = v.min_length(n, messages.min_length(label, n));
    }
    if let Some(n) = rules.max_length {
        v = v.max_length(n, messages.max_length(label, n));
    }
    if let Some(pattern) = rules.pattern.as_deref().filter(|p| !p.is_empty()) {
        let regex = Regex::new(pattern).map_err(|source| SchemaError::InvalidPattern {
            name: field.name.clone(),
            source,
        })?;
        v = v.pattern(regex, messages.pattern(label));
    }
    Ok(v)
}

fn build_number(field: &FormField, rules: &NumberRules, messages: &Messages) -> FieldValidator {
    let label = &field.label;
    let mut v = base(field, Shape::Number, messages);

    if field.required {
        v = v.required(messages.required(label));
    }
    if rules.integer {
        v = v.rule(Rule::new(Check::Integer, messages.integer(label)));
    }
    if let Some(min) = rules.min {
        v = v.min(min, messages.min(label, min));
    }
    if let Some(max) = rules.max {
        v = v.max(max, messages.max(label, max));
    }
    if let Some(step) = rules.step.filter(|s| *s > 0.0) {
        v = v.rule(Rule::new(
            Check::MultipleOf(step),
            messages.multiple_of(label, step),
        ));
    }
    v
}

fn option_values(options: &[crate::schema::ChoiceOption]) -> Vec<String> {
    options.iter().map(|o| o.value.clone()).collect()
}

fn build_choice(
    field: &FormField,
    rules: &ChoiceRules,
    multiple: bool,
    messages: &Messages,
) -> FieldValidator {
    let label = &field.label;
    let values = option_values(&rules.options);
    let invalid = messages.invalid_option(label, multiple);

    let (shape, check) = if multiple {
        (Shape::List, Check::AllOf(values))
    } else {
        (Shape::Text, Check::OneOf(values))
    };

    let mut v = base(field, shape, messages);
    if field.required {
        v = v.required(messages.select(label));
    }
    v.rule(Rule::new(check, invalid))
}

fn build_checkbox(field: &FormField, rules: &CheckboxRules, messages: &Messages) -> FieldValidator {
    let label = &field.label;

    if !rules.is_group() {
        let v = base(field, Shape::Bool, messages);
        return if field.required {
            v.rule(Rule::new(Check::Checked, messages.check(label)))
        } else {
            v
        };
    }

    let mut v = base(field, Shape::List, messages);
    if field.required {
        v = v.required(messages.select(label));
    }
    if let Some(n) = rules.min_selected {
        v = v.min_selected(n, messages.min_selected(label, n));
    }
    if let Some(n) = rules.max_selected {
        v = v.max_selected(n, messages.max_selected(label, n));
    }
    v.rule(Rule::new(
        Check::AllOf(option_values(&rules.options)),
        messages.invalid_option(label, true),
    ))
}

fn build_date(
    field: &FormField,
    rules: &DateRules,
    messages: &Messages,
) -> Result<FieldValidator, SchemaError> {
    let label = &field.label;
    let format = rules.format;
    let mut v = base(field, Shape::Text, messages);

    if field.required {
        v = v.required(messages.date_input(label));
    }
    v = v.rule(Rule::new(
        Check::DateFormat(format),
        messages.date_format(label),
    ));

    let bound = |which: &'static str, value: &str| -> Result<String, SchemaError> {
        Temporal::parse(format, value)
            .map(|_| value.trim().to_string())
            .ok_or_else(|| SchemaError::InvalidDateBound {
                name: field.name.clone(),
                bound: which,
                value: value.to_string(),
                expected: format.hint(),
            })
    };

    if let Some(min) = rules.min.as_deref() {
        let min = bound("min", min)?;
        v = v.rule(Rule::new(
            Check::DateMin(format, min.clone()),
            messages.date_min(label, &min),
        ));
    }
    if let Some(max) = rules.max.as_deref() {
        let max = bound("max", max)?;
        v = v.rule(Rule::new(
            Check::DateMax(format, max.clone()),
            messages.date_max(label, &max),
        ));
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldValue, FormValues};
    use crate::validation::Locale;

    fn compile_json(json: &str) -> FormValidator {
        let schema = FormSchema::from_json_str(json).unwrap();
        compile(&schema, &Messages::default()).unwrap()
    }

    fn one(name: &str, value: FieldValue) -> FormValues {
        [(name.to_string(), value)].into_iter().collect()
    }

    mod text {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_length_bounds() {
            let form = compile_json(
                r#"[{"type": "text", "name": "title", "label": "Title",
                     "required": true, "minLength": 3, "maxLength": 5}]"#,
            );

            assert!(form.validate(&one("title", FieldValue::text(""))).is_err());

            let errors = form.validate(&one("title", FieldValue::text("ab"))).unwrap_err();
            assert!(errors.first("title").unwrap().contains("at least 3"));

            assert!(form.validate(&one("title", FieldValue::text("abcdef"))).is_err());
            assert!(form.validate(&one("title", FieldValue::text("test"))).is_ok());
        }

        #[test]
        fn test_email() {
            let form = compile_json(
                r#"[{"type": "email", "name": "email", "label": "Email", "required": true}]"#,
            );
            assert!(form.validate(&one("email", FieldValue::text("a@b.io"))).is_ok());
            let errors = form.validate(&one("email", FieldValue::text("nope"))).unwrap_err();
            assert_eq!(errors.first("email"), Some("Email must be a valid email address."));
        }

        #[test]
        fn test_pattern() {
            let form = compile_json(
                r#"[{"type": "text", "name": "zip", "label": "Zip", "pattern": "^[0-9]{5}$"}]"#,
            );
            assert!(form.validate(&one("zip", FieldValue::text("12345"))).is_ok());
            assert!(form.validate(&one("zip", FieldValue::text("1234a"))).is_err());
        }

        #[test]
        fn test_invalid_pattern_is_schema_error() {
            let schema = FormSchema::from_json_str(
                r#"[{"type": "text", "name": "zip", "label": "Zip", "pattern": "([0-9"}]"#,
            )
            .unwrap();
            assert!(matches!(
                compile(&schema, &Messages::default()),
                Err(SchemaError::InvalidPattern { .. })
            ));
        }

        #[test]
        fn test_optional_empty_text_passes_constraints() {
            let form = compile_json(
                r#"[{"type": "textarea", "name": "bio", "label": "Bio", "minLength": 10}]"#,
            );
            assert!(form.validate(&one("bio", FieldValue::text(""))).is_ok());
            assert!(form.validate(&FormValues::new()).is_ok());
        }
    }

    mod number {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_range_integer_and_step() {
            let form = compile_json(
                r#"[{"type": "number", "name": "age", "label": "Age",
                     "min": 10, "max": 20, "integer": true, "step": 2}]"#,
            );

            assert!(form.validate(&one("age", FieldValue::Number(9.0))).is_err());
            assert!(form.validate(&one("age", FieldValue::Number(21.0))).is_err());
            assert!(form.validate(&one("age", FieldValue::Number(11.0))).is_err());
            assert!(form.validate(&one("age", FieldValue::Number(14.0))).is_ok());
        }

        #[test]
        fn test_text_input_is_coerced() {
            let form = compile_json(r#"[{"type": "number", "name": "price", "label": "Price"}]"#);
            let cleaned = form.validate(&one("price", FieldValue::text("12.5"))).unwrap();
            assert_eq!(cleaned["price"], FieldValue::Number(12.5));

            let cleaned = form.validate(&one("price", FieldValue::text(""))).unwrap();
            assert_eq!(cleaned["price"], FieldValue::Null);
        }

        #[test]
        fn test_required_number() {
            let form = compile_json(
                r#"[{"type": "number", "name": "qty", "label": "Quantity", "required": true, "min": 1}]"#,
            );
            let errors = form.validate(&one("qty", FieldValue::Null)).unwrap_err();
            assert_eq!(errors.get("qty").unwrap(), ["Quantity is required."]);
        }

        #[test]
        fn test_multiple_failures_are_ordered() {
            let form = compile_json(
                r#"[{"type": "number", "name": "n", "label": "N",
                     "integer": true, "min": 10, "step": 2}]"#,
            );
            let errors = form.validate(&one("n", FieldValue::Number(3.5))).unwrap_err();
            assert_eq!(
                errors.get("n").unwrap(),
                [
                    "N must be a whole number.",
                    "N must be at least 10.",
                    "N must be a multiple of 2."
                ]
            );
        }
    }

    mod checkbox {
        use super::*;
        use pretty_assertions::assert_eq;

        const GROUP: &str = r#"[{"type": "checkbox", "name": "agree", "label": "Topics",
            "required": true, "minSelected": 2,
            "options": [{"label": "A", "value": "a"}, {"label": "B", "value": "b"},
                        {"label": "C", "value": "c"}]}]"#;

        #[test]
        fn test_group_selection_bounds() {
            let form = compile_json(GROUP);
            assert!(form.validate(&one("agree", FieldValue::list(Vec::<String>::new()))).is_err());
            assert!(form.validate(&one("agree", FieldValue::list(["a"]))).is_err());
            assert!(form.validate(&one("agree", FieldValue::list(["a", "b"]))).is_ok());
        }

        #[test]
        fn test_group_rejects_unknown_values() {
            let form = compile_json(GROUP);
            let errors = form
                .validate(&one("agree", FieldValue::list(["a", "z"])))
                .unwrap_err();
            assert_eq!(errors.first("agree"), Some("Topics contains an invalid value."));
        }

        #[test]
        fn test_single_required_must_be_checked() {
            let form = compile_json(
                r#"[{"type": "checkbox", "name": "tos", "label": "the terms", "required": true}]"#,
            );
            let errors = form.validate(&one("tos", FieldValue::Bool(false))).unwrap_err();
            assert_eq!(errors.first("tos"), Some("Please check the terms."));
            assert!(form.validate(&one("tos", FieldValue::Bool(true))).is_ok());
        }

        #[test]
        fn test_single_optional_defaults_to_false() {
            let form = compile_json(r#"[{"type": "checkbox", "name": "news", "label": "News"}]"#);
            let cleaned = form.validate(&FormValues::new()).unwrap();
            assert_eq!(cleaned["news"], FieldValue::Bool(false));
        }
    }

    mod choice {
        use super::*;
        use pretty_assertions::assert_eq;

        const COUNTRY: &str = r#"[{"type": "select", "name": "country", "label": "a country",
            "required": true,
            "options": [{"label": "Korea", "value": "kr"}, {"label": "USA", "value": "us"}]}]"#;

        #[test]
        fn test_single_select() {
            let form = compile_json(COUNTRY);
            let errors = form.validate(&one("country", FieldValue::text(""))).unwrap_err();
            assert_eq!(errors.first("country"), Some("Please select a country."));
            assert!(form.validate(&one("country", FieldValue::text("jp"))).is_err());
            assert!(form.validate(&one("country", FieldValue::text("kr"))).is_ok());
        }

        #[test]
        fn test_multi_select() {
            let form = compile_json(
                r#"[{"type": "select", "name": "langs", "label": "Languages", "multiple": true,
                     "options": [{"label": "Rust", "value": "rs"}, {"label": "Go", "value": "go"}]}]"#,
            );
            assert!(form.validate(&one("langs", FieldValue::list(["rs", "go"]))).is_ok());
            let errors = form
                .validate(&one("langs", FieldValue::list(["rs", "js"])))
                .unwrap_err();
            assert_eq!(errors.first("langs"), Some("Languages contains an invalid value."));
        }

        #[test]
        fn test_radio() {
            let form = compile_json(
                r#"[{"type": "radio", "name": "plan", "label": "Plan",
                     "options": [{"label": "Free", "value": "free"}]}]"#,
            );
            assert!(form.validate(&one("plan", FieldValue::text("free"))).is_ok());
            assert!(form.validate(&one("plan", FieldValue::text(""))).is_ok());
            let errors = form.validate(&one("plan", FieldValue::text("gold"))).unwrap_err();
            assert_eq!(errors.first("plan"), Some("Plan has an invalid value."));
        }
    }

    mod date {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_format_and_bounds() {
            let form = compile_json(
                r#"[{"type": "date", "name": "due", "label": "Due", "required": true,
                     "min": "2024-01-01", "max": "2024-12-31"}]"#,
            );
            let errors = form.validate(&one("due", FieldValue::text(""))).unwrap_err();
            assert_eq!(errors.first("due"), Some("Please enter Due."));

            let errors = form
                .validate(&one("due", FieldValue::text("01/02/2024")))
                .unwrap_err();
            assert_eq!(errors.first("due"), Some("Due has an invalid format."));

            let errors = form
                .validate(&one("due", FieldValue::text("2023-06-01")))
                .unwrap_err();
            assert_eq!(errors.first("due"), Some("Due must be on or after 2024-01-01."));

            assert!(form.validate(&one("due", FieldValue::text("2024-06-01"))).is_ok());
        }

        #[test]
        fn test_optional_empty_date_passes() {
            let form = compile_json(
                r#"[{"type": "date", "name": "due", "label": "Due", "min": "2024-01-01"}]"#,
            );
            assert!(form.validate(&one("due", FieldValue::text(""))).is_ok());
        }

        #[test]
        fn test_time_format() {
            let form = compile_json(
                r#"[{"type": "date", "name": "at", "label": "At", "format": "time", "max": "18:00"}]"#,
            );
            assert!(form.validate(&one("at", FieldValue::text("09:15"))).is_ok());
            assert!(form.validate(&one("at", FieldValue::text("19:00"))).is_err());
        }

        #[test]
        fn test_bad_bound_is_schema_error() {
            let schema = FormSchema::from_json_str(
                r#"[{"type": "date", "name": "due", "label": "Due", "min": "tomorrow"}]"#,
            )
            .unwrap();
            match compile(&schema, &Messages::default()) {
                Err(SchemaError::InvalidDateBound { bound, expected, .. }) => {
                    assert_eq!(bound, "min");
                    assert_eq!(expected, "YYYY-MM-DD");
                }
                other => panic!("unexpected result {other:?}"),
            }
        }
    }

    #[test]
    fn test_disabled_fields_are_not_compiled() {
        let form = compile_json(
            r#"[{"type": "text", "name": "id", "label": "ID", "required": true, "disabled": true},
                {"type": "text", "name": "name", "label": "Name"}]"#,
        );
        assert!(form.field("id").is_none());
        let cleaned = form.validate(&FormValues::new()).unwrap();
        assert!(!cleaned.contains_key("id"));
    }

    #[test]
    fn test_schema_check_runs_first() {
        let schema = FormSchema::from_json_str(
            r#"[{"type": "text", "name": "a", "label": "A"},
                {"type": "text", "name": "a", "label": "A again"}]"#,
        )
        .unwrap();
        assert!(matches!(
            compile(&schema, &Messages::default()),
            Err(SchemaError::DuplicateName { .. })
        ));
    }

    #[test]
    fn test_custom_validators_override_generated() {
        let schema = FormSchema::from_json_str(
            r#"[{"type": "text", "name": "nickname", "label": "Nickname"}]"#,
        )
        .unwrap();
        let custom = FormValidator::new(vec![FieldValidator::new("nickname", "Nickname")
            .min_length(5, "5 characters or more")]);
        let form = compile_with(&schema, &Messages::default(), custom).unwrap();

        assert!(form.validate(&one("nickname", FieldValue::text("foo"))).is_err());
        assert!(form.validate(&one("nickname", FieldValue::text("foobar"))).is_ok());
    }

    #[test]
    fn test_custom_validator_keeps_number_coercion() {
        let schema = FormSchema::from_json_str(
            r#"[{"type": "number", "name": "age", "label": "Age"}]"#,
        )
        .unwrap();
        let custom =
            FormValidator::new(vec![FieldValidator::new("age", "Age").min(18.0, "adults only")]);
        let form = compile_with(&schema, &Messages::new(Locale::Ko), custom).unwrap();

        assert_eq!(form.field("age").unwrap().shape(), Shape::Number);
        let errors = form.validate(&one("age", FieldValue::text("5"))).unwrap_err();
        assert_eq!(errors.first("age"), Some("adults only"));
        let errors = form.validate(&one("age", FieldValue::text("old"))).unwrap_err();
        assert!(errors.first("age").unwrap().contains("숫자"));
        assert_eq!(
            form.validate(&one("age", FieldValue::text("30"))).unwrap(),
            one("age", FieldValue::Number(30.0))
        );
    }

    #[test]
    fn test_korean_messages() {
        let schema = FormSchema::from_json_str(
            r#"[{"type": "text", "name": "title", "label": "제목", "minLength": 3}]"#,
        )
        .unwrap();
        let form = compile(&schema, &Messages::new(Locale::Ko)).unwrap();
        let errors = form.validate(&one("title", FieldValue::text("ab"))).unwrap_err();
        assert!(errors.first("title").unwrap().contains("최소 3자"));
    }
}
