//! Site pages as documents.
//!
//! Each builder returns a fresh [`Document`] whose body is the page root.
//! Pages share one engine ([`crate::engine::PageView`]); what differs is only
//! which nodes carry `data-reveal` and whether a metrics block exists.
//!
//! Layout hints for the terminal host are plain classes: `.row` lays its
//! children side by side, everything else stacks.

mod about;
pub mod contact;
pub mod faq;
mod home;
pub mod services;
pub mod tutor;

use std::fmt;
use std::str::FromStr;

use crate::dom::{
    COUNT_ATTR, COUNTER_CLASS, CounterFormat, DURATION_ATTR, Document, Element, FORMAT_ATTR,
    SUFFIX_ATTR,
};
use crate::error::Error;
use crate::types::NodeId;

pub use contact::ContactPage;
pub use faq::{FaqTab, FaqTabs};
pub use services::{DurationOption, Pricing, TrackPlan};
pub use tutor::{NEED_CARDS, NeedCard, TutorPage};

pub const ROW_CLASS: &str = "row";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageKind {
    #[default]
    Home,
    About,
    Contact,
    Services,
    Tutor,
}

impl PageKind {
    pub const ALL: [PageKind; 5] = [
        Self::Home,
        Self::About,
        Self::Contact,
        Self::Services,
        Self::Tutor,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Contact => "contact",
            Self::Services => "services",
            Self::Tutor => "tutor",
        }
    }

    pub fn build(self) -> Document {
        match self {
            Self::Home => home::build(),
            Self::About => about::build(),
            Self::Contact => contact::build(),
            Self::Services => services::build(&Pricing::default()),
            Self::Tutor => tutor::build(),
        }
    }

    /// Keys the page reacts to beyond scrolling.
    pub fn hint(self) -> &'static str {
        match self {
            Self::Home => "tab faq",
            Self::Contact => "s send",
            Self::Tutor => "1-5 apply  s check  x close",
            Self::About | Self::Services => "",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" | "" => Ok(Self::Home),
            "about" | "aboutus" => Ok(Self::About),
            "contact" => Ok(Self::Contact),
            "services" => Ok(Self::Services),
            "tutor" => Ok(Self::Tutor),
            other => Err(Error::Config(format!("unknown page `{other}`"))),
        }
    }
}

// =============================================================================
// Page state
// =============================================================================

/// Input a page handles beyond scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageInput {
    /// A numbered choice, zero-based.
    Choose(usize),
    NextTab,
    Submit,
    Close,
}

/// Interactive state kept next to a built page.
///
/// Handlers only rewrite node texts, so a mounted [`crate::engine::PageView`]
/// stays valid; the host relayouts when a handler reports a change.
#[derive(Debug, Clone, Default)]
pub enum PageState {
    #[default]
    Static,
    Home(FaqTabs),
    Contact(ContactPage),
    Tutor(TutorPage),
}

impl PageState {
    pub fn new(kind: PageKind, doc: &Document) -> Self {
        match kind {
            PageKind::Home => FaqTabs::find(doc).map_or(Self::Static, Self::Home),
            PageKind::Contact => Self::Contact(ContactPage::find(doc)),
            PageKind::Tutor => Self::Tutor(TutorPage::find(doc)),
            PageKind::About | PageKind::Services => Self::Static,
        }
    }

    /// Apply one input. Returns whether any page text changed.
    pub fn handle(&mut self, doc: &Document, input: PageInput) -> bool {
        match (self, input) {
            (Self::Home(tabs), PageInput::NextTab) => tabs.next(doc),
            (Self::Home(tabs), PageInput::Choose(i)) => match FaqTab::ALL.get(i) {
                Some(&tab) => tabs.select(doc, tab),
                None => false,
            },
            (Self::Contact(page), PageInput::Submit) => {
                page.submit(doc);
                true
            }
            (Self::Tutor(page), PageInput::Choose(i)) => page.quick_apply(doc, i),
            (Self::Tutor(page), PageInput::Submit) => page.check(doc),
            (Self::Tutor(page), PageInput::Close) => page.close(doc),
            _ => false,
        }
    }
}

// =============================================================================
// Builder helpers
// =============================================================================

pub(crate) fn heading(doc: &mut Document, parent: NodeId, text: &str) -> NodeId {
    doc.append(parent, Element::new("h2").text(text))
}

pub(crate) fn paragraph(doc: &mut Document, parent: NodeId, text: &str) -> NodeId {
    doc.append(parent, Element::new("p").text(text))
}

/// A `.num` counter with its label underneath.
pub(crate) fn stat(
    doc: &mut Document,
    parent: NodeId,
    target: u64,
    suffix: &str,
    format: CounterFormat,
    label: &str,
) -> NodeId {
    let cell = doc.append(parent, Element::new("div").class("stat"));
    let mut num = Element::new("span")
        .class(COUNTER_CLASS)
        .attr(COUNT_ATTR, target.to_string())
        .attr(SUFFIX_ATTR, suffix)
        .text("0");
    if format == CounterFormat::Comma {
        num = num.attr(FORMAT_ATTR, "comma");
    }
    let node = doc.append(cell, num);
    doc.append(cell, Element::new("small").text(label));
    node
}

/// Like [`stat`] with an explicit animation length.
pub(crate) fn timed_stat(
    doc: &mut Document,
    parent: NodeId,
    target: u64,
    suffix: &str,
    duration_ms: u64,
    label: &str,
) -> NodeId {
    let node = stat(doc, parent, target, suffix, CounterFormat::Plain, label);
    doc.set_attr(node, DURATION_ATTR, duration_ms.to_string());
    node
}
