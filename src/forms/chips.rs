//! Chip sets - multi-select toggles for form options.

use std::collections::BTreeSet;

/// Selected values of one chip group. A set: no duplicates, order irrelevant
/// (iteration is sorted so rendering is stable).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChipSet {
    selected: BTreeSet<String>,
}

impl ChipSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership. Returns whether `value` is selected afterwards.
    pub fn toggle(&mut self, value: &str) -> bool {
        if self.selected.remove(value) {
            false
        } else {
            self.selected.insert(value.to_string());
            true
        }
    }

    pub fn insert(&mut self, value: &str) {
        self.selected.insert(value.to_string());
    }

    pub fn contains(&self, value: &str) -> bool {
        self.selected.contains(value)
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    pub fn joined(&self, separator: &str) -> String {
        self.iter().collect::<Vec<_>>().join(separator)
    }
}
