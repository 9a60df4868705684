//! Page document - a small DOM-like tree the engine queries.
//!
//! Nodes live in one arena and are addressed by [`NodeId`]. Each node has a
//! tag, classes, data attributes and a reactive text signal, so anything that
//! renders a node's text (the terminal host) sees counter updates as they land.
//!
//! The engine only needs three queries:
//! - every descendant carrying an attribute (`[data-reveal]`)
//! - the first descendant carrying one of some classes (`.impact, .metrics`)
//! - every descendant carrying a class (`.num`)

mod dataset;

use std::collections::{BTreeMap, BTreeSet};

use spark_signals::{Signal, signal};

use crate::types::{Markers, NodeId};

pub use dataset::{
    COUNT_ATTR, CounterFormat, CounterSpec, DURATION_ATTR, FORMAT_ATTR, SUFFIX_ATTR,
};

// =============================================================================
// Well-known names
// =============================================================================

pub const REVEAL_ATTR: &str = "data-reveal";
pub const REVEALED_CLASS: &str = "is-in";
pub const COUNTER_CLASS: &str = "num";
pub const METRICS_CLASSES: [&str; 2] = ["impact", "metrics"];
pub const FORCE_ANIMATE_ATTR: &str = "data-force-animate";

// =============================================================================
// Element builder
// =============================================================================

/// Description of a node to append.
#[derive(Debug, Clone, Default)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
    text: Option<String>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Shorthand for `.attr("data-reveal", "")`.
    pub fn reveal(self) -> Self {
        self.attr(REVEAL_ATTR, "")
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

// =============================================================================
// Selector
// =============================================================================

#[derive(Debug, Clone, Copy)]
pub enum Selector<'a> {
    /// `[name]`
    Attr(&'a str),
    /// `.name`
    Class(&'a str),
    /// `.a, .b, ...`
    AnyClass(&'a [&'a str]),
}

// =============================================================================
// Document
// =============================================================================

struct Node {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    classes: BTreeSet<String>,
    attrs: BTreeMap<String, String>,
    text: Signal<String>,
}

pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// New document holding a single `body` root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                tag: "body".to_string(),
                parent: None,
                children: Vec::new(),
                classes: BTreeSet::new(),
                attrs: BTreeMap::new(),
                text: signal(String::new()),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.nodes.len()
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    // -------------------------------------------------------------------------
    // Building
    // -------------------------------------------------------------------------

    /// Append `element` as the last child of `parent`.
    ///
    /// An unknown parent attaches the element to the root.
    pub fn append(&mut self, parent: NodeId, element: Element) -> NodeId {
        let parent = if self.contains(parent) { parent } else { self.root() };
        let id = NodeId(self.nodes.len());

        self.nodes.push(Node {
            tag: element.tag,
            parent: Some(parent),
            children: Vec::new(),
            classes: element.classes.into_iter().collect(),
            attrs: element.attrs.into_iter().collect(),
            text: signal(element.text.unwrap_or_default()),
        });
        self.nodes[parent.index()].children.push(id);

        id
    }

    // -------------------------------------------------------------------------
    // Structure
    // -------------------------------------------------------------------------

    pub fn tag(&self, node: NodeId) -> &str {
        self.node(node).map(|n| n.tag.as_str()).unwrap_or("")
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.node(node).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Ancestors of `node`, nearest first.
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(node), move |&n| self.parent(n))
    }

    /// `root` and everything below it, in document order.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.contains(root) {
            return out;
        }

        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            // Reverse so the first child is visited first.
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    // -------------------------------------------------------------------------
    // Classes & attributes
    // -------------------------------------------------------------------------

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node).is_some_and(|n| n.classes.contains(class))
    }

    /// Add a class. Returns `false` if it was already present.
    pub fn add_class(&mut self, node: NodeId, class: &str) -> bool {
        self.node_mut(node)
            .is_some_and(|n| n.classes.insert(class.to_string()))
    }

    pub fn classes(&self, node: NodeId) -> impl Iterator<Item = &str> {
        self.node(node)
            .into_iter()
            .flat_map(|n| n.classes.iter().map(String::as_str))
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node)
            .and_then(|n| n.attrs.get(name))
            .map(String::as_str)
    }

    pub fn has_attr(&self, node: NodeId, name: &str) -> bool {
        self.attr(node, name).is_some()
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: impl Into<String>) {
        if let Some(n) = self.node_mut(node) {
            n.attrs.insert(name.to_string(), value.into());
        }
    }

    /// Engine-relevant markers of a node.
    pub fn markers(&self, node: NodeId) -> Markers {
        let mut markers = Markers::NONE;
        if self.has_attr(node, REVEAL_ATTR) {
            markers |= Markers::REVEAL;
        }
        if self.has_class(node, REVEALED_CLASS) {
            markers |= Markers::REVEALED;
        }
        if self.has_class(node, COUNTER_CLASS) {
            markers |= Markers::COUNTER;
        }
        if METRICS_CLASSES.iter().any(|c| self.has_class(node, c)) {
            markers |= Markers::METRICS;
        }
        if self.has_attr(node, FORCE_ANIMATE_ATTR) {
            markers |= Markers::FORCE_ANIMATE;
        }
        markers
    }

    // -------------------------------------------------------------------------
    // Text
    // -------------------------------------------------------------------------

    pub fn text(&self, node: NodeId) -> String {
        self.node(node).map(|n| n.text.get()).unwrap_or_default()
    }

    pub fn set_text(&self, node: NodeId, text: impl Into<String>) {
        if let Some(n) = self.node(node) {
            n.text.set(text.into());
        }
    }

    /// The reactive text signal of a node.
    pub fn text_signal(&self, node: NodeId) -> Option<Signal<String>> {
        self.node(node).map(|n| n.text.clone())
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn matches(&self, node: NodeId, selector: Selector<'_>) -> bool {
        match selector {
            Selector::Attr(name) => self.has_attr(node, name),
            Selector::Class(class) => self.has_class(node, class),
            Selector::AnyClass(classes) => classes.iter().any(|c| self.has_class(node, c)),
        }
    }

    /// Every node under `root` (inclusive) matching `selector`.
    pub fn query_all(&self, root: NodeId, selector: Selector<'_>) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|&n| self.matches(n, selector))
            .collect()
    }

    /// First node under `root` (inclusive) matching `selector`.
    pub fn query_first(&self, root: NodeId, selector: Selector<'_>) -> Option<NodeId> {
        self.descendants(root)
            .into_iter()
            .find(|&n| self.matches(n, selector))
    }
}
