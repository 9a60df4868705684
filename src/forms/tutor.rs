//! Tutor application - the "Apply to teach" modal on the tutor page.

use std::fmt;

use tracing::{info, warn};

use crate::error::Result;

use super::{ChipSet, FieldErrors, is_valid_email, is_valid_phone};

pub const SUBJECTS: [&str; 5] = ["Maths", "Science", "Physics", "Chemistry", "English"];
pub const BOARDS: [&str; 5] = ["CBSE", "ICSE", "IGCSE", "IB", "State"];

pub const SEND_FAILED: &str = "Error sending application. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeachingMode {
    Online,
    Home,
    Both,
}

impl TeachingMode {
    pub const ALL: [TeachingMode; 3] = [Self::Online, Self::Home, Self::Both];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Home => "Home",
            Self::Both => "Both",
        }
    }
}

impl fmt::Display for TeachingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field values of one application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub city: String,
    pub subjects: ChipSet,
    pub boards: ChipSet,
    pub mode: Option<TeachingMode>,
    pub years: Option<i32>,
    pub resume: Option<String>,
    pub consent: bool,
}

impl ApplyForm {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if self.name.trim().is_empty() {
            errors.set("name", "Required");
        }
        if !is_valid_phone(&self.phone) {
            errors.set("phone", "Enter a 10-digit number");
        }
        if !is_valid_email(&self.email) {
            errors.set("email", "Enter a valid email");
        }
        if self.city.trim().is_empty() {
            errors.set("city", "Required");
        }
        if self.subjects.is_empty() {
            errors.set("subjects", "Select at least one subject");
        }
        if self.boards.is_empty() {
            errors.set("boards", "Select at least one board");
        }
        if self.mode.is_none() {
            errors.set("mode", "Choose a mode");
        }
        match self.years {
            None => errors.set("years", "Enter total experience"),
            Some(years) if years < 0 => errors.set("years", "Must be 0 or more"),
            Some(_) => {}
        }
        if !self.consent {
            errors.set("consent", "You must accept to proceed");
        }

        errors
    }
}

/// A validated application, flattened for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub city: String,
    pub subjects: String,
    pub boards: String,
    pub mode: TeachingMode,
    pub years: u32,
    pub consent: bool,
    pub resume_name: String,
}

impl Application {
    fn from_form(form: &ApplyForm) -> Option<Self> {
        Some(Self {
            name: form.name.trim().to_string(),
            phone: form.phone.clone(),
            email: form.email.clone(),
            city: form.city.trim().to_string(),
            subjects: form.subjects.joined(", "),
            boards: form.boards.joined(", "),
            mode: form.mode?,
            years: u32::try_from(form.years?).ok()?,
            consent: form.consent,
            resume_name: form
                .resume
                .clone()
                .unwrap_or_else(|| "Not attached".to_string()),
        })
    }
}

/// Delivers applications (the email service in production).
pub trait ApplicationSink {
    fn send(&mut self, application: &Application) -> Result<()>;
}

/// The application modal: open state, form model and inline errors.
#[derive(Debug, Clone, Default)]
pub struct TutorApplication {
    pub form: ApplyForm,
    pub errors: FieldErrors,
    open: bool,
}

impl TutorApplication {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Open the modal from a "subjects we need" card, preselecting the
    /// subject when it is one we offer.
    pub fn quick_apply(&mut self, subject: &str) {
        self.open();
        if SUBJECTS.contains(&subject) {
            self.form.subjects.insert(subject);
        }
    }

    pub fn toggle_subject(&mut self, subject: &str) -> bool {
        self.form.subjects.toggle(subject)
    }

    pub fn toggle_board(&mut self, board: &str) -> bool {
        self.form.boards.toggle(board)
    }

    /// Validate without sending, keeping the errors for display.
    pub fn check(&mut self) -> bool {
        self.errors = self.form.validate();
        self.errors.is_empty()
    }

    /// Validate and hand the application to `sink`.
    ///
    /// On success the form resets and the modal closes. On delivery failure
    /// the form is kept and a form-level error is set. Returns whether the
    /// application was delivered.
    pub fn submit<S>(&mut self, sink: &mut S) -> bool
    where
        S: ApplicationSink + ?Sized,
    {
        self.errors = self.form.validate();
        if !self.errors.is_empty() {
            return false;
        }
        let Some(application) = Application::from_form(&self.form) else {
            return false;
        };

        match sink.send(&application) {
            Ok(()) => {
                info!(
                    name = %application.name,
                    subjects = %application.subjects,
                    "tutor application sent"
                );
                self.form = ApplyForm::default();
                self.errors = FieldErrors::new();
                self.close();
                true
            }
            Err(err) => {
                warn!(error = %err, "tutor application delivery failed");
                self.errors.set("form", SEND_FAILED);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[derive(Default)]
    struct Outbox {
        sent: Vec<Application>,
        fail: bool,
    }

    impl ApplicationSink for Outbox {
        fn send(&mut self, application: &Application) -> Result<()> {
            if self.fail {
                return Err(Error::Delivery("service unavailable".to_string()));
            }
            self.sent.push(application.clone());
            Ok(())
        }
    }

    fn filled() -> TutorApplication {
        let mut modal = TutorApplication::new();
        modal.open();
        modal.form.name = "Asha".to_string();
        modal.form.phone = "9876543210".to_string();
        modal.form.email = "asha@example.com".to_string();
        modal.form.city = "Hyderabad".to_string();
        modal.toggle_subject("Maths");
        modal.toggle_board("CBSE");
        modal.form.mode = Some(TeachingMode::Both);
        modal.form.years = Some(10);
        modal.form.consent = true;
        modal
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = ApplyForm::default().validate();
        assert_eq!(errors.get("name"), Some("Required"));
        assert_eq!(errors.get("phone"), Some("Enter a 10-digit number"));
        assert_eq!(errors.get("email"), Some("Enter a valid email"));
        assert_eq!(errors.get("city"), Some("Required"));
        assert_eq!(errors.get("subjects"), Some("Select at least one subject"));
        assert_eq!(errors.get("boards"), Some("Select at least one board"));
        assert_eq!(errors.get("mode"), Some("Choose a mode"));
        assert_eq!(errors.get("years"), Some("Enter total experience"));
        assert_eq!(errors.get("consent"), Some("You must accept to proceed"));
        assert_eq!(errors.len(), 9);
    }

    #[test]
    fn test_negative_years() {
        let mut modal = filled();
        modal.form.years = Some(-1);
        assert_eq!(modal.form.validate().get("years"), Some("Must be 0 or more"));
    }

    #[test]
    fn test_whitespace_name_is_required() {
        let mut modal = filled();
        modal.form.name = "   ".to_string();
        assert_eq!(modal.form.validate().get("name"), Some("Required"));
    }

    #[test]
    fn test_quick_apply_preselects_known_subject() {
        let mut modal = TutorApplication::new();
        modal.quick_apply("Physics");
        assert!(modal.is_open());
        assert!(modal.form.subjects.contains("Physics"));

        modal.quick_apply("Astrology");
        assert!(!modal.form.subjects.contains("Astrology"));
    }

    #[test]
    fn test_check_validates_without_sending() {
        let mut modal = TutorApplication::new();
        assert!(!modal.check());
        assert_eq!(modal.errors.len(), 9);

        let mut modal = filled();
        assert!(modal.check());
        assert!(modal.is_open());
    }

    #[test]
    fn test_invalid_submit_never_reaches_sink() {
        let mut modal = TutorApplication::new();
        let mut outbox = Outbox::default();

        assert!(!modal.submit(&mut outbox));
        assert!(outbox.sent.is_empty());
        assert!(!modal.errors.is_empty());
    }

    #[test]
    fn test_successful_submit_resets_and_closes() {
        let mut modal = filled();
        modal.toggle_subject("Physics");
        let mut outbox = Outbox::default();

        assert!(modal.submit(&mut outbox));

        let sent = &outbox.sent[0];
        assert_eq!(sent.subjects, "Maths, Physics");
        assert_eq!(sent.boards, "CBSE");
        assert_eq!(sent.mode, TeachingMode::Both);
        assert_eq!(sent.years, 10);
        assert_eq!(sent.resume_name, "Not attached");

        assert!(!modal.is_open());
        assert!(modal.form.subjects.is_empty());
        assert!(modal.form.boards.is_empty());
        assert_eq!(modal.form, ApplyForm::default());
        assert!(modal.errors.is_empty());
    }

    #[test]
    fn test_failed_delivery_keeps_form() {
        let mut modal = filled();
        let mut outbox = Outbox {
            fail: true,
            ..Default::default()
        };

        assert!(!modal.submit(&mut outbox));

        assert_eq!(modal.errors.get("form"), Some(SEND_FAILED));
        assert!(modal.is_open());
        assert!(modal.form.subjects.contains("Maths"));
    }
}
