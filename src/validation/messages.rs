//! Error message catalogs

use serde::{Deserialize, Serialize};

/// Language of generated error messages
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ko,
}

/// Produces the message for each kind of validation failure.
///
/// Every message is built from the field label so the same text works in
/// an inline error slot and in a summary dialog.
#[derive(Debug, Clone, Copy, Default)]
pub struct Messages {
    locale: Locale,
}

impl Messages {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn required(&self, label: &str) -> String {
        match self.locale {
            Locale::En => format!("{label} is required."),
            Locale::Ko => format!("{label}은(는) 필수 입력 항목입니다."),
        }
    }

    pub fn min_length(&self, label: &str, n: usize) -> String {
        match self.locale {
            Locale::En => format!("{label} must be at least {n} characters."),
            Locale::Ko => format!("{label}은(는) 최소 {n}자 이상입니다."),
        }
    }

    pub fn max_length(&self, label: &str, n: usize) -> String {
        match self.locale {
            Locale::En => format!("{label} must be at most {n} characters."),
            Locale::Ko => format!("{label}은(는) 최대 {n}자 이하입니다."),
        }
    }

    pub fn pattern(&self, label: &str) -> String {
        match self.locale {
            Locale::En => format!("{label} has an invalid format."),
            Locale::Ko => format!("{label} 형식이 올바르지 않습니다."),
        }
    }

    pub fn email(&self, label: &str) -> String {
        match self.locale {
            Locale::En => format!("{label} must be a valid email address."),
            Locale::Ko => format!("{label} 형식이 올바르지 않습니다."),
        }
    }

    pub fn min(&self, label: &str, n: f64) -> String {
        match self.locale {
            Locale::En => format!("{label} must be at least {n}."),
            Locale::Ko => format!("{label}은(는) {n} 이상이어야 합니다."),
        }
    }

    pub fn max(&self, label: &str, n: f64) -> String {
        match self.locale {
            Locale::En => format!("{label} must be at most {n}."),
            Locale::Ko => format!("{label}은(는) {n} 이하이어야 합니다."),
        }
    }

    pub fn min_selected(&self, label: &str, n: usize) -> String {
        match self.locale {
            Locale::En => format!("Select at least {n} {label}."),
            Locale::Ko => format!("{label}을(를) 최소 {n}개 선택하셔야 합니다."),
        }
    }

    pub fn max_selected(&self, label: &str, n: usize) -> String {
        match self.locale {
            Locale::En => format!("Select at most {n} {label}."),
            Locale::Ko => format!("{label}을(를) 최대 {n}개 선택하셔야 합니다."),
        }
    }

    pub fn select(&self, label: &str) -> String {
        match self.locale {
            Locale::En => format!("Please select {label}."),
            Locale::Ko => format!("{label}을(를) 선택하세요."),
        }
    }

    pub fn check(&self, label: &str) -> String {
        match self.locale {
            Locale::En => format!("Please check {label}."),
            Locale::Ko => format!("{label}을(를) 체크하세요."),
        }
    }

    pub fn date_input(&self, label: &str) -> String {
        match self.locale {
            Locale::En => format!("Please enter {label}."),
            Locale::Ko => format!("{label}을(를) 입력하세요."),
        }
    }

    pub fn date_format(&self, label: &str) -> String {
        self.pattern(label)
    }

    pub fn date_min(&self, label: &str, min: &str) -> String {
        match self.locale {
            Locale::En => format!("{label} must be on or after {min}."),
            Locale::Ko => format!("{label}은(는) {min} 이후여야 합니다."),
        }
    }

    pub fn date_max(&self, label: &str, max: &str) -> String {
        match self.locale {
            Locale::En => format!("{label} must be on or before {max}."),
            Locale::Ko => format!("{label}은(는) {max} 이전이어야 합니다."),
        }
    }

    pub fn integer(&self, label: &str) -> String {
        match self.locale {
            Locale::En => format!("{label} must be a whole number."),
            Locale::Ko => format!("{label}은(는) 정수여야 합니다."),
        }
    }

    pub fn multiple_of(&self, label: &str, step: f64) -> String {
        match self.locale {
            Locale::En => format!("{label} must be a multiple of {step}."),
            Locale::Ko => format!("{label}은(는) {step}의 배수여야 합니다."),
        }
    }

    pub fn not_a_number(&self, label: &str) -> String {
        match self.locale {
            Locale::En => format!("{label} must be a number."),
            Locale::Ko => format!("{label}은(는) 숫자여야 합니다."),
        }
    }

    pub fn invalid_type(&self, label: &str, expected: &str) -> String {
        match self.locale {
            Locale::En => format!("{label} must be a {expected}."),
            Locale::Ko => format!("{label}의 값 형식이 올바르지 않습니다. ({expected})"),
        }
    }

    pub fn invalid_option(&self, label: &str, multiple: bool) -> String {
        match (self.locale, multiple) {
            (Locale::En, false) => format!("{label} has an invalid value."),
            (Locale::En, true) => format!("{label} contains an invalid value."),
            (Locale::Ko, false) => format!("{label}에 유효하지 않은 값입니다."),
            (Locale::Ko, true) => format!("{label}에 유효하지 않은 값이 포함되어 있습니다."),
        }
    }
}
