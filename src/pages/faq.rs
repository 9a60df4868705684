//! FAQ tabs on the home page.
//!
//! The block keeps one tab row and a fixed set of answer slots. Switching
//! tabs rewrites slot texts in place, so the engine's node ids stay valid.

use std::fmt;

use tracing::debug;

use crate::dom::{Document, Element, Selector};
use crate::types::NodeId;

use super::ROW_CLASS;

pub const TAB_CLASS: &str = "faq-tab";
pub const ITEM_CLASS: &str = "faq-item";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FaqTab {
    #[default]
    General,
    Programs,
    Pricing,
    Support,
}

impl FaqTab {
    pub const ALL: [FaqTab; 4] = [Self::General, Self::Programs, Self::Pricing, Self::Support];

    pub fn label(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Programs => "Programs",
            Self::Pricing => "Pricing",
            Self::Support => "Support",
        }
    }

    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|&t| t == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for FaqTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub struct Faq {
    pub tab: FaqTab,
    pub question: &'static str,
    pub answer: &'static str,
}

pub static FAQS: [Faq; 8] = [
    Faq {
        tab: FaqTab::General,
        question: "Do you match the school syllabus?",
        answer: "Yes. Every pathway follows the learner's board, textbooks and upcoming tests.",
    },
    Faq {
        tab: FaqTab::General,
        question: "Which classes do you teach?",
        answer: "Classes 6-12 across CBSE, ICSE, IGCSE, IB and State boards.",
    },
    Faq {
        tab: FaqTab::Programs,
        question: "Can we switch between 1:1 and pods?",
        answer: "Families can change modes every cycle based on comfort and outcomes.",
    },
    Faq {
        tab: FaqTab::Programs,
        question: "Do you prepare for entrance exams?",
        answer: "The competitive add-on covers JEE, NEET and SAT with timed mocks.",
    },
    Faq {
        tab: FaqTab::Pricing,
        question: "How is the fee calculated?",
        answer: "A monthly fee per track; 6 and 12 month plans are discounted.",
    },
    Faq {
        tab: FaqTab::Pricing,
        question: "Is there a trial session?",
        answer: "The first learning audit is free and takes about 45 minutes.",
    },
    Faq {
        tab: FaqTab::Support,
        question: "How soon can we start?",
        answer: "Onboarding takes 3-5 business days after the audit and mentor pairing.",
    },
    Faq {
        tab: FaqTab::Support,
        question: "How do we track progress?",
        answer: "Biweekly reports plus a parent review every four weeks.",
    },
];

pub fn faqs_for(tab: FaqTab) -> impl Iterator<Item = &'static Faq> {
    FAQS.iter().filter(move |faq| faq.tab == tab)
}

fn slot_count() -> usize {
    FaqTab::ALL
        .iter()
        .map(|&tab| faqs_for(tab).count())
        .max()
        .unwrap_or(0)
}

/// Append the tab row and answer slots under `parent`, showing `tab`.
pub(super) fn build_into(doc: &mut Document, parent: NodeId, tab: FaqTab) {
    let row = doc.append(parent, Element::new("div").class(ROW_CLASS).class("faq-tabs"));
    for each in FaqTab::ALL {
        doc.append(row, Element::new("span").class(TAB_CLASS).attr("data-tab", each.label()));
    }
    for _ in 0..slot_count() {
        doc.append(parent, Element::new("p").class(ITEM_CLASS));
    }
    if let Some(mut tabs) = FaqTabs::find(doc) {
        tabs.render(doc, tab);
    }
}

/// Selected tab plus the nodes that show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqTabs {
    selected: FaqTab,
    tabs: Vec<NodeId>,
    items: Vec<NodeId>,
}

impl FaqTabs {
    /// Locate the FAQ block in `doc`. `None` when the page has none.
    pub fn find(doc: &Document) -> Option<Self> {
        let tabs = doc.query_all(doc.root(), Selector::Class(TAB_CLASS));
        if tabs.is_empty() {
            return None;
        }
        Some(Self {
            selected: FaqTab::default(),
            tabs,
            items: doc.query_all(doc.root(), Selector::Class(ITEM_CLASS)),
        })
    }

    pub fn selected(&self) -> FaqTab {
        self.selected
    }

    /// Switch tabs. Returns whether the selection changed.
    pub fn select(&mut self, doc: &Document, tab: FaqTab) -> bool {
        if tab == self.selected {
            return false;
        }
        self.render(doc, tab);
        debug!(%tab, "faq tab selected");
        true
    }

    pub fn next(&mut self, doc: &Document) -> bool {
        self.select(doc, self.selected.next())
    }

    fn render(&mut self, doc: &Document, tab: FaqTab) {
        self.selected = tab;
        for (&node, candidate) in self.tabs.iter().zip(FaqTab::ALL) {
            let label = if candidate == tab {
                format!("[{candidate}]")
            } else {
                format!(" {candidate} ")
            };
            doc.set_text(node, label);
        }
        let mut entries = faqs_for(tab);
        for &node in &self.items {
            let text = entries
                .next()
                .map(|faq| format!("{} {}", faq.question, faq.answer))
                .unwrap_or_default();
            doc.set_text(node, text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Document, FaqTabs) {
        let mut doc = Document::new();
        let root = doc.root();
        build_into(&mut doc, root, FaqTab::General);
        let tabs = FaqTabs::find(&doc).unwrap();
        (doc, tabs)
    }

    fn item_texts(doc: &Document) -> Vec<String> {
        doc.query_all(doc.root(), Selector::Class(ITEM_CLASS))
            .into_iter()
            .map(|n| doc.text(n))
            .collect()
    }

    #[test]
    fn test_every_tab_has_answers() {
        for tab in FaqTab::ALL {
            assert!(faqs_for(tab).count() > 0, "{tab} is empty");
        }
    }

    #[test]
    fn test_general_tab_shown_first() {
        let (doc, tabs) = setup();
        assert_eq!(tabs.selected(), FaqTab::General);
        assert!(item_texts(&doc)[0].starts_with("Do you match the school syllabus?"));
        assert_eq!(doc.text(tabs.tabs[0]), "[General]");
        assert_eq!(doc.text(tabs.tabs[1]), " Programs ");
    }

    #[test]
    fn test_select_rewrites_slots() {
        let (doc, mut tabs) = setup();

        assert!(tabs.select(&doc, FaqTab::Pricing));

        let texts = item_texts(&doc);
        assert!(texts[0].starts_with("How is the fee calculated?"));
        assert!(texts[1].starts_with("Is there a trial session?"));
        assert_eq!(doc.text(tabs.tabs[0]), " General ");
        assert_eq!(doc.text(tabs.tabs[2]), "[Pricing]");
    }

    #[test]
    fn test_reselecting_is_noop() {
        let (doc, mut tabs) = setup();
        assert!(!tabs.select(&doc, FaqTab::General));
    }

    #[test]
    fn test_next_wraps_around() {
        let (doc, mut tabs) = setup();
        for _ in 0..FaqTab::ALL.len() {
            assert!(tabs.next(&doc));
        }
        assert_eq!(tabs.selected(), FaqTab::General);
    }
}
