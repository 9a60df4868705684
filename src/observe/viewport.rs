//! Scroll Viewport - host-side intersection observation for a scrolled page.
//!
//! Holds the laid-out rect of every node, the viewport size and the vertical
//! scroll offset. Observers registered through [`ViewportObserver`] are
//! evaluated on [`ScrollViewport::take_records`], which reports every observed
//! node whose intersecting state changed since the last report. Newly observed
//! nodes always get one initial entry.
//!
//! Scroll operations clamp to `0..=max_scroll` and report whether anything
//! moved, like the per-component scroll state of the terminal UI.

use std::collections::{BTreeMap, HashMap};

use crate::types::{NodeId, Rect};

use super::{IntersectionEntry, ObserverId, ObserverOptions, ViewportObserver};

struct ObserverSlot {
    options: ObserverOptions,
    /// Last reported state per target, `None` until the first report.
    targets: BTreeMap<NodeId, Option<bool>>,
}

pub struct ScrollViewport {
    width: f32,
    height: f32,
    scroll_y: f32,
    rects: HashMap<NodeId, Rect>,
    observers: BTreeMap<ObserverId, ObserverSlot>,
    next_observer: u32,
    available: bool,
}

impl ScrollViewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
            scroll_y: 0.0,
            rects: HashMap::new(),
            observers: BTreeMap::new(),
            next_observer: 0,
            available: true,
        }
    }

    /// A viewport that cannot create observers (capability missing).
    pub fn unavailable(width: u16, height: u16) -> Self {
        Self {
            available: false,
            ..Self::new(width, height)
        }
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    pub fn set_size(&mut self, width: u16, height: u16) {
        self.width = width as f32;
        self.height = height as f32;
        self.scroll_y = self.scroll_y.min(self.max_scroll());
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width as u16, self.height as u16)
    }

    /// Replace every node rect (after a relayout).
    pub fn set_rects(&mut self, rects: HashMap<NodeId, Rect>) {
        self.rects = rects;
        self.scroll_y = self.scroll_y.min(self.max_scroll());
    }

    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        self.rects.insert(node, rect);
    }

    pub fn rect(&self, node: NodeId) -> Option<Rect> {
        self.rects.get(&node).copied()
    }

    /// Bottom edge of the lowest node.
    pub fn content_height(&self) -> f32 {
        self.rects.values().map(Rect::bottom).fold(0.0, f32::max)
    }

    pub fn max_scroll(&self) -> f32 {
        (self.content_height() - self.height).max(0.0)
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    /// The visible part of the page.
    pub fn visible_rect(&self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.width, self.height)
    }

    // -------------------------------------------------------------------------
    // Scrolling
    // -------------------------------------------------------------------------

    /// Set the scroll offset (clamped to the valid range).
    pub fn scroll_to(&mut self, y: f32) {
        self.scroll_y = y.clamp(0.0, self.max_scroll());
    }

    /// Scroll by a delta.
    ///
    /// Returns `true` if scrolling occurred, `false` if already at a boundary.
    pub fn scroll_by(&mut self, delta: f32) -> bool {
        let before = self.scroll_y;
        self.scroll_to(before + delta);
        self.scroll_y != before
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_to(0.0);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_to(self.max_scroll());
    }

    // -------------------------------------------------------------------------
    // Intersection
    // -------------------------------------------------------------------------

    /// Visible fraction of `node` inside the margin-adjusted viewport.
    ///
    /// Returns `None` when the node does not touch the root at all.
    pub fn intersection_ratio(&self, node: NodeId, options: &ObserverOptions) -> Option<f32> {
        let rect = self.rects.get(&node)?;
        let root = options.root_margin.apply(self.visible_rect());
        let hit = rect.intersection(&root)?;

        let area = rect.area();
        if area == 0.0 {
            // Zero-area targets count as fully visible once they touch the root.
            return Some(1.0);
        }
        Some((hit.area() / area).min(1.0))
    }

    /// Collect entries for every observed node whose state changed.
    ///
    /// Batches are grouped per observer, in observer creation order.
    pub fn take_records(&mut self) -> Vec<(ObserverId, Vec<IntersectionEntry>)> {
        let mut batches = Vec::new();

        let ids: Vec<ObserverId> = self.observers.keys().copied().collect();
        for id in ids {
            let mut entries = Vec::new();

            let Some(slot) = self.observers.get(&id) else { continue };
            let measured: Vec<(NodeId, Option<bool>, f32, bool)> = slot
                .targets
                .iter()
                .map(|(&node, &last)| {
                    let ratio = self.intersection_ratio(node, &slot.options);
                    let is_intersecting =
                        matches!(ratio, Some(r) if r >= slot.options.threshold);
                    (node, last, ratio.unwrap_or(0.0), is_intersecting)
                })
                .collect();

            let Some(slot) = self.observers.get_mut(&id) else { continue };
            for (node, last, ratio, is_intersecting) in measured {
                if last == Some(is_intersecting) {
                    continue;
                }
                slot.targets.insert(node, Some(is_intersecting));
                entries.push(IntersectionEntry {
                    node,
                    is_intersecting,
                    ratio,
                });
            }

            if !entries.is_empty() {
                batches.push((id, entries));
            }
        }

        batches
    }

    pub fn is_observing(&self, observer: ObserverId, node: NodeId) -> bool {
        self.observers
            .get(&observer)
            .is_some_and(|slot| slot.targets.contains_key(&node))
    }

    /// Number of live observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Number of nodes observed across all observers.
    pub fn target_count(&self) -> usize {
        self.observers.values().map(|slot| slot.targets.len()).sum()
    }
}

impl ViewportObserver for ScrollViewport {
    fn create_observer(&mut self, options: ObserverOptions) -> Option<ObserverId> {
        if !self.available {
            return None;
        }
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.insert(
            id,
            ObserverSlot {
                options,
                targets: BTreeMap::new(),
            },
        );
        Some(id)
    }

    fn observe(&mut self, observer: ObserverId, node: NodeId) {
        if let Some(slot) = self.observers.get_mut(&observer) {
            slot.targets.entry(node).or_insert(None);
        }
    }

    fn unobserve(&mut self, observer: ObserverId, node: NodeId) {
        if let Some(slot) = self.observers.get_mut(&observer) {
            slot.targets.remove(&node);
        }
    }

    fn disconnect(&mut self, observer: ObserverId) {
        self.observers.remove(&observer);
    }
}
