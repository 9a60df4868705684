//! Home page: hero, programs, impact block with counters, tabbed FAQ.

use crate::dom::{CounterFormat, Document, Element};
use crate::forms::tutor::BOARDS;

use super::faq::{self, FaqTab};
use super::{ROW_CLASS, heading, paragraph, stat};

pub(super) fn build() -> Document {
    let mut doc = Document::new();
    let root = doc.root();

    let hero = doc.append(root, Element::new("header").class("hero"));
    doc.append(hero, Element::new("h1").text("Ground Zero Tutoring"));
    paragraph(
        &mut doc,
        hero,
        "Personal tutors for Classes 6-12, matched to your board and your pace.",
    );
    let boards = doc.append(hero, Element::new("div").class(ROW_CLASS).class("boards"));
    for board in BOARDS {
        doc.append(boards, Element::new("span").class("chip").text(board));
    }

    let programs = doc.append(root, Element::new("section").class("programs").reveal());
    heading(&mut doc, programs, "Programs");
    let cards = doc.append(programs, Element::new("div").class(ROW_CLASS));
    for (title, body) in [
        ("1-to-1 Tutoring", "Focused lessons built around one learner."),
        ("Small Groups", "Pods of 2-6 with board-wise batches."),
        ("Exam Prep", "Timed mocks for boards, JEE, NEET and SAT."),
    ] {
        let card = doc.append(cards, Element::new("article").class("card").reveal());
        doc.append(card, Element::new("h3").text(title));
        paragraph(&mut doc, card, body);
    }

    let impact = doc.append(root, Element::new("section").class("impact").reveal());
    heading(&mut doc, impact, "Our impact");
    let stats = doc.append(impact, Element::new("div").class(ROW_CLASS));
    stat(&mut doc, stats, 12000, "+", CounterFormat::Comma, "Sessions delivered");
    stat(&mut doc, stats, 5600, "+", CounterFormat::Comma, "Learners coached");
    stat(&mut doc, stats, 280, "+", CounterFormat::Plain, "Subject experts");
    stat(&mut doc, stats, 98, "%", CounterFormat::Plain, "Parent satisfaction");

    let how = doc.append(root, Element::new("section").class("how").reveal());
    heading(&mut doc, how, "How it works");
    for step in [
        "01  Learning audit",
        "02  Personalized pathway",
        "03  Mentor pairing",
        "04  Review loops",
    ] {
        doc.append(how, Element::new("p").reveal().text(step));
    }

    let faq = doc.append(root, Element::new("section").class("faq").reveal());
    heading(&mut doc, faq, "FAQ");
    faq::build_into(&mut doc, faq, FaqTab::default());

    doc.append(
        root,
        Element::new("footer").text("Ground Zero · hello@groundzero.edu · +91 98 765 43210"),
    );

    doc
}
