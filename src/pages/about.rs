//! About page: story, educators and the always-animated metrics strip.

use crate::dom::{CounterFormat, Document, Element, FORCE_ANIMATE_ATTR};

use super::{ROW_CLASS, heading, paragraph, stat, timed_stat};

struct Educator {
    name: &'static str,
    subject: &'static str,
    years: u32,
    boards: &'static [&'static str],
}

const EDUCATORS: [Educator; 3] = [
    Educator {
        name: "Ms. Asha",
        subject: "Mathematics · Grades 8-12",
        years: 10,
        boards: &["CBSE", "ICSE", "IB"],
    },
    Educator {
        name: "Mr. Rohan",
        subject: "Physics · Grades 9-12",
        years: 12,
        boards: &["CBSE", "IGCSE"],
    },
    Educator {
        name: "Ms. Nisha",
        subject: "Chemistry · Grades 9-12",
        years: 11,
        boards: &["ICSE", "State"],
    },
];

pub(super) fn build() -> Document {
    let mut doc = Document::new();
    let root = doc.root();

    let hero = doc.append(root, Element::new("header").class("hero"));
    doc.append(hero, Element::new("h1").text("About Ground Zero"));
    paragraph(
        &mut doc,
        hero,
        "Started by teachers who wanted every student to have a mentor, not just a syllabus.",
    );

    let story = doc.append(root, Element::new("section").class("story").reveal());
    heading(&mut doc, story, "Our story");
    paragraph(
        &mut doc,
        story,
        "We began with five learners in Hyderabad and grew one referral at a time.",
    );

    let metrics = doc.append(
        root,
        Element::new("section")
            .class("metrics")
            .attr(FORCE_ANIMATE_ATTR, ""),
    );
    let row = doc.append(metrics, Element::new("div").class(ROW_CLASS));
    timed_stat(&mut doc, row, 15, "+", 1200, "Years teaching");
    stat(&mut doc, row, 5600, "+", CounterFormat::Comma, "Learners");
    stat(&mut doc, row, 280, "+", CounterFormat::Plain, "Educators");

    let team = doc.append(root, Element::new("section").class("team"));
    heading(&mut doc, team, "Meet our educators");
    let cards = doc.append(team, Element::new("div").class(ROW_CLASS));
    for educator in &EDUCATORS {
        let card = doc.append(cards, Element::new("article").class("educator").reveal());
        doc.append(card, Element::new("h3").text(educator.name));
        paragraph(&mut doc, card, educator.subject);
        paragraph(
            &mut doc,
            card,
            &format!("{} yrs · {}", educator.years, educator.boards.join(", ")),
        );
    }

    let values = doc.append(root, Element::new("section").class("values").reveal());
    heading(&mut doc, values, "What we value");
    for value in ["Clarity over speed", "Feedback every week", "Parents in the loop"] {
        doc.append(values, Element::new("p").reveal().text(value));
    }

    doc
}
