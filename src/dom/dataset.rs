//! Counter configuration read from data attributes.
//!
//! `data-count`, `data-suffix`, `data-format` and `data-duration` on a `.num`
//! node. Parsing never fails: bad counts become 0 and bad durations fall back
//! to the target-based heuristic.

use crate::types::NodeId;

use super::Document;

pub const COUNT_ATTR: &str = "data-count";
pub const SUFFIX_ATTR: &str = "data-suffix";
pub const FORMAT_ATTR: &str = "data-format";
pub const DURATION_ATTR: &str = "data-duration";

/// How a counter value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CounterFormat {
    /// `12345`
    #[default]
    Plain,
    /// `12,345`
    Comma,
}

impl CounterFormat {
    /// `"comma"` selects thousands grouping; anything else is plain.
    pub fn from_attr(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("comma") => Self::Comma,
            _ => Self::Plain,
        }
    }
}

/// Per-node counter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CounterSpec {
    pub target: u64,
    pub suffix: String,
    pub format: CounterFormat,
    /// Positive animation length in milliseconds, if configured.
    pub explicit_duration: Option<u64>,
}

impl CounterSpec {
    pub fn new(target: u64) -> Self {
        Self {
            target,
            ..Default::default()
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn with_format(mut self, format: CounterFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_duration(mut self, millis: u64) -> Self {
        self.explicit_duration = (millis > 0).then_some(millis);
        self
    }

    /// Read a node's data attributes.
    pub fn from_node(doc: &Document, node: NodeId) -> Self {
        Self {
            target: parse_count(doc.attr(node, COUNT_ATTR)),
            suffix: doc.attr(node, SUFFIX_ATTR).unwrap_or_default().to_string(),
            format: CounterFormat::from_attr(doc.attr(node, FORMAT_ATTR)),
            explicit_duration: parse_duration(doc.attr(node, DURATION_ATTR)),
        }
    }
}

fn parse_number(raw: Option<&str>) -> Option<f64> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return Some(0.0);
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Missing, empty, non-numeric or negative counts are 0; fractions round.
pub fn parse_count(raw: Option<&str>) -> u64 {
    match parse_number(raw) {
        Some(v) if v > 0.0 => v.round() as u64,
        _ => 0,
    }
}

/// Only finite, positive durations are accepted.
pub fn parse_duration(raw: Option<&str>) -> Option<u64> {
    match parse_number(raw) {
        Some(v) if v > 0.0 => Some((v.round() as u64).max(1)),
        _ => None,
    }
}
