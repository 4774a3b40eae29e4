//! Composable validation rules
//!
//! A [`Rule`] pairs one [`Check`] with the message reported when the check
//! fails. Checks only judge values of the shape they understand; a value of
//! another shape passes, because shape errors are reported once by the
//! field validator before any rule runs.

use crate::schema::{DateFormat, FieldValue};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::fmt;
use std::sync::{Arc, LazyLock};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email regex is valid")
});

/// Predicate used by [`Check::Custom`]
pub type CustomCheck = Arc<dyn Fn(&FieldValue) -> bool + Send + Sync>;

/// A single condition on a field value
#[derive(Clone)]
pub enum Check {
    /// Value is not void
    Required,
    MinLength(usize),
    MaxLength(usize),
    /// Unanchored regex search on text
    Pattern(Regex),
    Email,
    /// Text contains the given substring
    Contains(String),
    Integer,
    Min(f64),
    Max(f64),
    MultipleOf(f64),
    MinSelected(usize),
    MaxSelected(usize),
    /// Text is one of the given values
    OneOf(Vec<String>),
    /// Every list item is one of the given values
    AllOf(Vec<String>),
    /// Boolean is `true`
    Checked,
    /// Text parses in the given layout
    DateFormat(DateFormat),
    DateMin(DateFormat, String),
    DateMax(DateFormat, String),
    Custom(CustomCheck),
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "Required"),
            Self::MinLength(n) => write!(f, "MinLength({n})"),
            Self::MaxLength(n) => write!(f, "MaxLength({n})"),
            Self::Pattern(re) => write!(f, "Pattern({})", re.as_str()),
            Self::Email => write!(f, "Email"),
            Self::Contains(s) => write!(f, "Contains({s:?})"),
            Self::Integer => write!(f, "Integer"),
            Self::Min(n) => write!(f, "Min({n})"),
            Self::Max(n) => write!(f, "Max({n})"),
            Self::MultipleOf(n) => write!(f, "MultipleOf({n})"),
            Self::MinSelected(n) => write!(f, "MinSelected({n})"),
            Self::MaxSelected(n) => write!(f, "MaxSelected({n})"),
            Self::OneOf(values) => write!(f, "OneOf({values:?})"),
            Self::AllOf(values) => write!(f, "AllOf({values:?})"),
            Self::Checked => write!(f, "Checked"),
            Self::DateFormat(format) => write!(f, "DateFormat({})", format.hint()),
            Self::DateMin(_, bound) => write!(f, "DateMin({bound})"),
            Self::DateMax(_, bound) => write!(f, "DateMax({bound})"),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl Check {
    /// Whether the value satisfies this check
    pub fn passes(&self, value: &FieldValue) -> bool {
        match (self, value) {
            (Self::Required, v) => !v.is_void(),

            (Self::MinLength(n), FieldValue::Text(s)) => s.chars().count() >= *n,
            (Self::MaxLength(n), FieldValue::Text(s)) => s.chars().count() <= *n,
            (Self::Pattern(re), FieldValue::Text(s)) => re.is_match(s),
            (Self::Email, FieldValue::Text(s)) => is_email(s),
            (Self::Contains(needle), FieldValue::Text(s)) => s.contains(needle.as_str()),

            (Self::Integer, FieldValue::Number(n)) => n.fract() == 0.0,
            (Self::Min(min), FieldValue::Number(n)) => n >= min,
            (Self::Max(max), FieldValue::Number(n)) => n <= max,
            (Self::MultipleOf(step), FieldValue::Number(n)) => is_multiple_of(*n, *step),

            (Self::MinSelected(n), FieldValue::List(items)) => items.len() >= *n,
            (Self::MaxSelected(n), FieldValue::List(items)) => items.len() <= *n,
            (Self::OneOf(values), FieldValue::Text(s)) => values.iter().any(|v| v == s),
            (Self::AllOf(values), FieldValue::List(items)) => {
                items.iter().all(|item| values.contains(item))
            }

            (Self::Checked, FieldValue::Bool(b)) => *b,

            (Self::DateFormat(format), FieldValue::Text(s)) => Temporal::parse(*format, s).is_some(),
            (Self::DateMin(format, bound), FieldValue::Text(s)) => {
                compare_temporal(*format, s, bound, |value, bound| value >= bound)
            }
            (Self::DateMax(format, bound), FieldValue::Text(s)) => {
                compare_temporal(*format, s, bound, |value, bound| value <= bound)
            }

            (Self::Custom(check), v) => check(v),

            _ => true,
        }
    }
}

/// A check and the message reported when it fails
#[derive(Debug, Clone)]
pub struct Rule {
    pub check: Check,
    pub message: String,
}

impl Rule {
    pub fn new(check: Check, message: impl Into<String>) -> Self {
        Self {
            check,
            message: message.into(),
        }
    }

    /// `None` when the value passes, the message otherwise
    pub fn apply(&self, value: &FieldValue) -> Option<&str> {
        if self.check.passes(value) {
            None
        } else {
            Some(&self.message)
        }
    }
}

/// A parsed date, date-time or time, ordered within its own layout
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Temporal {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Time(NaiveTime),
}

impl Temporal {
    pub fn parse(format: DateFormat, s: &str) -> Option<Self> {
        let s = s.trim();
        match format {
            DateFormat::Date => NaiveDate::parse_from_str(s, format.pattern())
                .ok()
                .filter(|_| s.len() == 10)
                .map(Self::Date),
            DateFormat::DatetimeLocal => NaiveDateTime::parse_from_str(s, format.pattern())
                .ok()
                .filter(|_| s.len() == 16)
                .map(Self::DateTime),
            DateFormat::Time => NaiveTime::parse_from_str(s, format.pattern())
                .ok()
                .filter(|_| s.len() == 5)
                .map(Self::Time),
        }
    }
}

fn compare_temporal(
    format: DateFormat,
    value: &str,
    bound: &str,
    ok: impl Fn(Temporal, Temporal) -> bool,
) -> bool {
    match (Temporal::parse(format, value), Temporal::parse(format, bound)) {
        (Some(value), Some(bound)) => ok(value, bound),
        // An unparsable value is reported by the format rule
        _ => true,
    }
}

fn is_email(s: &str) -> bool {
    !s.starts_with('.') && !s.contains("..") && EMAIL_REGEX.is_match(s)
}

/// `value` is an integral multiple of `step`, allowing for binary rounding
pub fn is_multiple_of(value: f64, step: f64) -> bool {
    if step <= 0.0 || !value.is_finite() {
        return false;
    }
    let quotient = value / step;
    (quotient - quotient.round()).abs() < 1e-9
}
