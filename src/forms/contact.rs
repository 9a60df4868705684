//! Contact enquiry form and the quick-link helpers on the contact page.

use tracing::info;

use super::{FieldErrors, is_valid_email};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub board: String,
    pub interest: String,
    pub preferred_contact: String,
    pub time: String,
    pub notes: String,
    pub consent: bool,
}

impl Default for Enquiry {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            board: "CBSE".to_string(),
            interest: "Tutoring".to_string(),
            preferred_contact: "Email".to_string(),
            time: "Evening".to_string(),
            notes: String::new(),
            consent: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub model: Enquiry,
    pub errors: FieldErrors,
    submitted: bool,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.model.name.trim().is_empty() {
            errors.set("name", "Required");
        }
        if !is_valid_email(&self.model.email) {
            errors.set("email", "Enter a valid email");
        }
        if !self.model.consent {
            errors.set("consent", "You must accept to proceed");
        }
        errors
    }

    /// Validate and accept the enquiry. Returns it for hand-off when valid.
    pub fn submit(&mut self) -> Option<Enquiry> {
        self.errors = self.validate();
        if !self.errors.is_empty() {
            return None;
        }
        self.submitted = true;
        info!(
            name = %self.model.name,
            interest = %self.model.interest,
            "contact enquiry submitted"
        );
        Some(self.model.clone())
    }
}

/// `tel:` link with whitespace removed.
pub fn tel_href(number: &str) -> String {
    let digits: String = number.chars().filter(|c| !c.is_whitespace()).collect();
    format!("tel:{digits}")
}

pub fn mail_href(address: &str) -> String {
    format!("mailto:{address}")
}
