//! Tutor page: the subjects we are hiring for and the application modal.
//!
//! Each need card opens the application with its subject preselected. The
//! modal is rendered as a status line under the cards and rewritten in place
//! whenever the application changes.

use crate::dom::{Document, Element, Selector};
use crate::forms::tutor::{BOARDS, TeachingMode, TutorApplication};
use crate::types::NodeId;

use super::{heading, paragraph};

pub const NEED_CLASS: &str = "need";
pub const STATUS_CLASS: &str = "apply-status";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeedCard {
    pub subject: &'static str,
    pub grades: &'static str,
    pub mode: TeachingMode,
}

pub const NEED_CARDS: [NeedCard; 5] = [
    NeedCard {
        subject: "Maths",
        grades: "Grades 6-12",
        mode: TeachingMode::Both,
    },
    NeedCard {
        subject: "Science",
        grades: "Grades 6-10",
        mode: TeachingMode::Both,
    },
    NeedCard {
        subject: "Physics",
        grades: "Grades 11-12",
        mode: TeachingMode::Online,
    },
    NeedCard {
        subject: "Chemistry",
        grades: "Grades 11-12",
        mode: TeachingMode::Home,
    },
    NeedCard {
        subject: "English",
        grades: "Grades 6-10",
        mode: TeachingMode::Both,
    },
];

/// Status line describing the modal.
pub fn apply_status(application: &TutorApplication) -> String {
    if !application.is_open() {
        return format!("Press 1-{} on a card to apply.", NEED_CARDS.len());
    }
    let form = &application.form;
    let or_none = |joined: String| if joined.is_empty() { "none".to_string() } else { joined };
    let mut status = format!(
        "Applying · subjects: {} · boards: {} · mode: {}",
        or_none(form.subjects.joined(", ")),
        or_none(form.boards.joined(", ")),
        form.mode.map_or("not chosen", TeachingMode::as_str),
    );
    if !application.errors.is_empty() {
        status.push_str(" · fix ");
        status.push_str(&application.errors.summary());
    }
    status
}

pub(super) fn build() -> Document {
    let mut doc = Document::new();
    let root = doc.root();

    let hero = doc.append(root, Element::new("header").class("hero"));
    doc.append(hero, Element::new("h1").text("Teach with Ground Zero"));
    paragraph(
        &mut doc,
        hero,
        "Flexible hours, online or at home, with learners on the boards you know.",
    );

    let needs = doc.append(root, Element::new("section").class("needs"));
    heading(&mut doc, needs, "Subjects & modes we need");
    for (i, card) in NEED_CARDS.iter().enumerate() {
        let article = doc.append(
            needs,
            Element::new("article")
                .class(NEED_CLASS)
                .attr("data-subject", card.subject)
                .reveal(),
        );
        doc.append(
            article,
            Element::new("h3").text(format!("{} · {}", card.subject, card.grades)),
        );
        paragraph(&mut doc, article, &format!("Mode: {}", card.mode));
        doc.append(
            article,
            Element::new("small").text(format!("[{}] Quick apply", i + 1)),
        );
    }

    let apply = doc.append(
        root,
        Element::new("section").class("apply").attr("id", "apply"),
    );
    heading(&mut doc, apply, "Apply to teach");
    paragraph(&mut doc, apply, &format!("Boards we serve: {}", BOARDS.join(", ")));
    doc.append(
        apply,
        Element::new("p")
            .class(STATUS_CLASS)
            .text(apply_status(&TutorApplication::default())),
    );

    doc
}

/// The application modal bound to a built tutor page.
#[derive(Debug, Clone, Default)]
pub struct TutorPage {
    pub application: TutorApplication,
    status: Option<NodeId>,
}

impl TutorPage {
    pub fn find(doc: &Document) -> Self {
        Self {
            application: TutorApplication::new(),
            status: doc.query_first(doc.root(), Selector::Class(STATUS_CLASS)),
        }
    }

    /// Quick apply from the card at `index`. Out-of-range indices do nothing.
    pub fn quick_apply(&mut self, doc: &Document, index: usize) -> bool {
        let Some(card) = NEED_CARDS.get(index) else {
            return false;
        };
        self.application.quick_apply(card.subject);
        self.render(doc);
        true
    }

    pub fn close(&mut self, doc: &Document) -> bool {
        if !self.application.is_open() {
            return false;
        }
        self.application.close();
        self.render(doc);
        true
    }

    /// Validate the open application and show what is missing.
    pub fn check(&mut self, doc: &Document) -> bool {
        if !self.application.is_open() {
            return false;
        }
        self.application.check();
        self.render(doc);
        true
    }

    fn render(&self, doc: &Document) {
        if let Some(status) = self.status {
            doc.set_text(status, apply_status(&self.application));
        }
    }
}
