//! Reveal Controller - one-shot reveal of `[data-reveal]` nodes.
//!
//! Every marked node under the page root is observed once. The first
//! intersecting entry for a node marks it revealed (adds `is-in`) and releases
//! its observation. Later entries for that node, and non-intersecting entries,
//! change nothing.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::dom::{Document, REVEAL_ATTR, REVEALED_CLASS, Selector};
use crate::observe::{IntersectionEntry, ObserverId, ObserverOptions, ViewportObserver, Watch};
use crate::types::NodeId;

#[derive(Debug, Default)]
pub struct RevealController {
    watch: Option<Watch>,
    revealed: BTreeSet<NodeId>,
}

impl RevealController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe every revealable node under `root`.
    ///
    /// Without a viewport observer every node is revealed immediately.
    pub fn arm<V>(
        &mut self,
        doc: &mut Document,
        root: NodeId,
        host: &mut V,
        options: ObserverOptions,
    ) where
        V: ViewportObserver + ?Sized,
    {
        let targets = doc.query_all(root, Selector::Attr(REVEAL_ATTR));

        match Watch::create(host, options) {
            Some(mut watch) => {
                watch.arm(host, targets.iter().copied());
                debug!(observer = %watch.observer(), targets = targets.len(), "reveal armed");
                self.watch = Some(watch);
            }
            None => {
                warn!(targets = targets.len(), "viewport observation unavailable, revealing all");
                for node in targets {
                    self.mark_revealed(doc, node);
                }
            }
        }
    }

    pub fn observer(&self) -> Option<ObserverId> {
        self.watch.as_ref().map(Watch::observer)
    }

    /// Handle a batch of entries from this controller's observer.
    pub fn on_entries<V>(&mut self, doc: &mut Document, entries: &[IntersectionEntry], host: &mut V)
    where
        V: ViewportObserver + ?Sized,
    {
        let Some(watch) = self.watch.as_mut() else { return };

        for entry in entries {
            if !entry.is_intersecting || !watch.accepts(entry) {
                continue;
            }
            watch.release(host, entry.node);
            if self.revealed.insert(entry.node) {
                doc.add_class(entry.node, REVEALED_CLASS);
                debug!(node = %entry.node, ratio = entry.ratio, "revealed");
            }
        }
    }

    fn mark_revealed(&mut self, doc: &mut Document, node: NodeId) {
        if self.revealed.insert(node) {
            doc.add_class(node, REVEALED_CLASS);
        }
    }

    pub fn is_revealed(&self, node: NodeId) -> bool {
        self.revealed.contains(&node)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }

    /// Nodes still waiting for their first intersection.
    pub fn watched_count(&self) -> usize {
        self.watch.as_ref().map_or(0, Watch::observed_count)
    }

    /// Release every remaining observation (page unmount).
    pub fn disarm<V>(&mut self, host: &mut V)
    where
        V: ViewportObserver + ?Sized,
    {
        if let Some(watch) = self.watch.as_mut() {
            watch.disconnect(host);
        }
    }
}
