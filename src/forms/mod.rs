//! Site forms: tutor application and contact enquiry.
//!
//! Validation mirrors what the pages show inline next to each field. Delivery
//! of a valid tutor application goes through [`ApplicationSink`]; the actual
//! email service sits behind that trait and is not part of this crate.

mod chips;
pub mod contact;
pub mod tutor;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

pub use chips::ChipSet;
pub use contact::{ContactForm, Enquiry};
pub use tutor::{Application, ApplicationSink, ApplyForm, TeachingMode, TutorApplication};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{10}$").expect("phone pattern is valid"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Exactly ten ASCII digits.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE.is_match(phone) && phone.is_ascii()
}

/// Inline error messages keyed by field name. `"form"` holds form-level errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<&'static str, &'static str>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: &'static str, message: &'static str) {
        self.errors.insert(field, message);
    }

    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.errors.get(field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.errors.keys().copied()
    }

    /// One line listing every error, `field: message` pairs in field order.
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("hello@groundzero.edu"));
        assert!(is_valid_email("a.b@c.co.in"));
        assert!(!is_valid_email("hello@groundzero"));
        assert!(!is_valid_email("hello groundzero@x.edu"));
        assert!(!is_valid_email("@x.edu"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_summary_lists_fields_in_order() {
        let mut errors = FieldErrors::new();
        assert_eq!(errors.summary(), "");

        errors.set("name", "Required");
        errors.set("email", "Enter a valid email");
        assert_eq!(errors.summary(), "email: Enter a valid email; name: Required");
    }

    #[test]
    fn test_phone_pattern() {
        assert!(is_valid_phone("9876543210"));
        assert!(!is_valid_phone("98765 43210"));
        assert!(!is_valid_phone("987654321"));
        assert!(!is_valid_phone("98765432100"));
        assert!(!is_valid_phone("98765432१०"));
    }
}
