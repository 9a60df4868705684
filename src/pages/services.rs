//! Services page: programs and the duration-based pricing table.
//!
//! Prices are quoted per month against a 3-month reference. Longer plans
//! apply a discount multiplier, and the total is the rounded monthly price
//! times the number of months.

use tracing::debug;

use crate::dom::{Document, Element};

use super::{ROW_CLASS, heading, paragraph};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationOption {
    pub id: &'static str,
    pub label: &'static str,
    pub months: u32,
    pub note: &'static str,
    pub multiplier: f64,
}

pub const DURATIONS: [DurationOption; 3] = [
    DurationOption {
        id: "3",
        label: "3 months",
        months: 3,
        note: "Quick repair, short sprint",
        multiplier: 1.0,
    },
    DurationOption {
        id: "6",
        label: "6 months",
        months: 6,
        note: "Save ~8% vs 3 months",
        multiplier: 0.92,
    },
    DurationOption {
        id: "12",
        label: "12 months",
        months: 12,
        note: "Save ~15% vs 3 months",
        multiplier: 0.85,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackPlan {
    pub id: &'static str,
    pub name: &'static str,
    pub tag: &'static str,
    pub badge: Option<&'static str>,
    /// Monthly price on the 3-month reference plan, in rupees.
    pub base_monthly: u32,
}

pub const TRACK_PLANS: [TrackPlan; 5] = [
    TrackPlan {
        id: "cbse",
        name: "CBSE Track",
        tag: "Classes 6-12",
        badge: Some("Most chosen"),
        base_monthly: 3800,
    },
    TrackPlan {
        id: "icse",
        name: "ICSE Track",
        tag: "Classes 6-12",
        badge: None,
        base_monthly: 4000,
    },
    TrackPlan {
        id: "ib",
        name: "IB / IGCSE Track",
        tag: "Classes 6-12",
        badge: Some("Intensive"),
        base_monthly: 5500,
    },
    TrackPlan {
        id: "state",
        name: "State Board Track",
        tag: "All States",
        badge: None,
        base_monthly: 3200,
    },
    TrackPlan {
        id: "competitive",
        name: "Competitive Prep Add-on",
        tag: "JEE · NEET · SAT",
        badge: None,
        base_monthly: 4800,
    },
];

/// Selected duration plus price arithmetic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pricing {
    selected: usize,
}

impl Default for Pricing {
    /// Six months is preselected.
    fn default() -> Self {
        Self { selected: 1 }
    }
}

impl Pricing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn durations(&self) -> &'static [DurationOption] {
        &DURATIONS
    }

    pub fn plans(&self) -> &'static [TrackPlan] {
        &TRACK_PLANS
    }

    pub fn current(&self) -> &'static DurationOption {
        &DURATIONS[self.selected]
    }

    /// Select a duration by id. Unknown ids keep the current selection.
    pub fn select_duration(&mut self, id: &str) -> bool {
        match DURATIONS.iter().position(|d| d.id == id) {
            Some(index) => {
                self.selected = index;
                debug!(duration = id, "pricing duration selected");
                true
            }
            None => false,
        }
    }

    pub fn monthly_price(&self, plan: &TrackPlan) -> u64 {
        (f64::from(plan.base_monthly) * self.current().multiplier).round() as u64
    }

    pub fn total_price(&self, plan: &TrackPlan) -> u64 {
        self.monthly_price(plan) * u64::from(self.current().months)
    }
}

/// Rupee amount with Indian digit grouping: `45600 -> "₹45,600"`,
/// `123456 -> "₹1,23,456"`.
pub fn format_rupees(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return format!("₹{digits}");
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (left, right) = rest.split_at(rest.len() - 2);
        groups.push(right);
        rest = left;
    }
    groups.push(rest);
    groups.reverse();
    format!("₹{},{tail}", groups.join(","))
}

pub(super) fn build(pricing: &Pricing) -> Document {
    let mut doc = Document::new();
    let root = doc.root();

    let hero = doc.append(root, Element::new("header").class("hero"));
    doc.append(hero, Element::new("h1").text("Programs & pricing"));
    paragraph(
        &mut doc,
        hero,
        "Board-aligned tutoring for Classes 6-12 and entrance prep.",
    );

    let durations = doc.append(root, Element::new("section").class("durations"));
    heading(&mut doc, durations, "Plan length");
    let row = doc.append(durations, Element::new("div").class(ROW_CLASS));
    let current = pricing.current();
    for option in pricing.durations() {
        let marker = if option.id == current.id { "(•)" } else { "( )" };
        doc.append(
            row,
            Element::new("span")
                .class("duration")
                .attr("data-duration-id", option.id)
                .text(format!("{marker} {}  {}", option.label, option.note)),
        );
    }

    let table = doc.append(root, Element::new("section").class("pricing"));
    heading(&mut doc, table, "Tracks");
    for plan in pricing.plans() {
        let card = doc.append(
            table,
            Element::new("article")
                .class("plan")
                .attr("data-plan", plan.id),
        );
        let title = match plan.badge {
            Some(badge) => format!("{} [{badge}]", plan.name),
            None => plan.name.to_string(),
        };
        doc.append(card, Element::new("h3").text(title));
        paragraph(
            &mut doc,
            card,
            &format!(
                "{} · {}/month · {} for {}",
                plan.tag,
                format_rupees(pricing.monthly_price(plan)),
                format_rupees(pricing.total_price(plan)),
                current.label,
            ),
        );
    }

    doc
}
