//! Contact page: location card, quick links and the enquiry form.
//!
//! The enquiry fields show the form model; a status line under them reports
//! validation errors or the confirmation after sending.

use crate::dom::{Document, Element, Selector};
use crate::forms::contact::{ContactForm, Enquiry, mail_href, tel_href};
use crate::types::NodeId;

use super::{ROW_CLASS, heading, paragraph};

pub const STATUS_CLASS: &str = "enquiry-status";

pub const HOTLINE: &str = "+91 98 765 43210";
pub const MAILTO: &str = "hello@groundzero.edu";
pub const WHATSAPP: &str = "https://wa.me/919876543210";

pub(super) fn build() -> Document {
    let mut doc = Document::new();
    let root = doc.root();

    let hero = doc.append(root, Element::new("header").class("hero"));
    doc.append(hero, Element::new("h1").text("Talk to us"));
    paragraph(&mut doc, hero, "A counsellor replies within one working day.");

    let cards = doc.append(root, Element::new("section").class(ROW_CLASS));

    let location = doc.append(cards, Element::new("article").class("card").reveal());
    doc.append(location, Element::new("h3").text("Hyderabad"));
    paragraph(&mut doc, location, "Gachibowli, Financial District");
    paragraph(&mut doc, location, "500032");

    let links = doc.append(cards, Element::new("article").class("card").reveal());
    doc.append(links, Element::new("h3").text("Quick links"));
    doc.append(
        links,
        Element::new("a")
            .attr("href", tel_href(HOTLINE))
            .text(format!("Call {HOTLINE}")),
    );
    doc.append(
        links,
        Element::new("a")
            .attr("href", mail_href(MAILTO))
            .text(format!("Email {MAILTO}")),
    );
    doc.append(
        links,
        Element::new("a").attr("href", WHATSAPP).text("WhatsApp us"),
    );

    let enquiry = doc.append(
        root,
        Element::new("section")
            .class("enquiry")
            .attr("id", "enquiry")
            .reveal(),
    );
    heading(&mut doc, enquiry, "Send an enquiry");
    let model = Enquiry::default();
    for (field, value) in [
        ("Name", &model.name),
        ("Email", &model.email),
        ("Phone", &model.phone),
        ("Board", &model.board),
        ("Interested in", &model.interest),
        ("Contact by", &model.preferred_contact),
        ("Best time", &model.time),
    ] {
        let value = if value.is_empty() { "______" } else { value.as_str() };
        doc.append(enquiry, Element::new("label").text(format!("{field}: {value}")));
    }
    doc.append(
        enquiry,
        Element::new("p")
            .class(STATUS_CLASS)
            .text(enquiry_status(&ContactForm::default())),
    );

    doc
}

/// Status line under the enquiry fields.
pub fn enquiry_status(form: &ContactForm) -> String {
    if form.is_submitted() {
        "Thanks! A counsellor will reach out soon.".to_string()
    } else if form.errors.is_empty() {
        "Press s to send the enquiry.".to_string()
    } else {
        format!("Please fix {}", form.errors.summary())
    }
}

/// The enquiry form bound to a built contact page.
#[derive(Debug, Clone, Default)]
pub struct ContactPage {
    pub form: ContactForm,
    status: Option<NodeId>,
}

impl ContactPage {
    pub fn find(doc: &Document) -> Self {
        Self {
            form: ContactForm::new(),
            status: doc.query_first(doc.root(), Selector::Class(STATUS_CLASS)),
        }
    }

    /// Submit the form and show the outcome. Returns the enquiry when valid.
    pub fn submit(&mut self, doc: &Document) -> Option<Enquiry> {
        let enquiry = self.form.submit();
        if let Some(status) = self.status {
            doc.set_text(status, enquiry_status(&self.form));
        }
        enquiry
    }
}
