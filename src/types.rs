//! Core types for groundzero.
//!
//! These types are shared by the document, the engine and the terminal host.
//! Nodes are plain indices into the document arena, the same way a parallel
//! arrays UI engine addresses its components.

use std::fmt;

// =============================================================================
// Node identity
// =============================================================================

/// Index of a node inside a [`Document`](crate::dom::Document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Raw arena index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

// =============================================================================
// Rect - page geometry
// =============================================================================

/// Axis-aligned rectangle in page coordinates (terminal cells).
///
/// `y` grows downwards from the top of the page, not the top of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Overlapping region of two rects, `None` when they are disjoint.
    ///
    /// Edge-adjacent rects produce a zero-area intersection, not `None`.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right < left || bottom < top {
            return None;
        }

        Some(Rect::new(left, top, right - left, bottom - top))
    }
}

// =============================================================================
// Cell Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes used by the terminal renderer.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::UNDERLINE`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const REVERSE = 1 << 4;
    }
}

// =============================================================================
// Node markers (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// What a node means to the reveal/counter engine.
    ///
    /// Derived from the node's classes and data attributes, see
    /// [`Document::markers`](crate::dom::Document::markers).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Markers: u8 {
        const NONE = 0;
        /// Carries `data-reveal`.
        const REVEAL = 1 << 0;
        /// Carries the `is-in` class.
        const REVEALED = 1 << 1;
        /// A `.num` counter display.
        const COUNTER = 1 << 2;
        /// An `.impact` / `.metrics` container.
        const METRICS = 1 << 3;
        /// Carries `data-force-animate`.
        const FORCE_ANIMATE = 1 << 4;
    }
}
