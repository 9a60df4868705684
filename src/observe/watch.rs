//! Watch - engine-side handle over one host observer.
//!
//! Tracks which nodes are still observed so that events arriving after a
//! release (already queued by the host) can be recognised and dropped.

use std::collections::BTreeSet;

use crate::types::NodeId;

use super::{IntersectionEntry, ObserverId, ObserverOptions, ViewportObserver};

#[derive(Debug)]
pub struct Watch {
    observer: ObserverId,
    observed: BTreeSet<NodeId>,
    connected: bool,
}

impl Watch {
    /// Create a host observer with `options`.
    ///
    /// Returns `None` when the host cannot observe the viewport.
    pub fn create<V>(host: &mut V, options: ObserverOptions) -> Option<Self>
    where
        V: ViewportObserver + ?Sized,
    {
        let observer = host.create_observer(options)?;
        Some(Self {
            observer,
            observed: BTreeSet::new(),
            connected: true,
        })
    }

    pub fn observer(&self) -> ObserverId {
        self.observer
    }

    /// Begin observing every node in `nodes`.
    pub fn arm<V, I>(&mut self, host: &mut V, nodes: I)
    where
        V: ViewportObserver + ?Sized,
        I: IntoIterator<Item = NodeId>,
    {
        if !self.connected {
            return;
        }
        for node in nodes {
            if self.observed.insert(node) {
                host.observe(self.observer, node);
            }
        }
    }

    /// Stop observing one node. Returns `false` if it was not observed.
    pub fn release<V>(&mut self, host: &mut V, node: NodeId) -> bool
    where
        V: ViewportObserver + ?Sized,
    {
        if !self.observed.remove(&node) {
            return false;
        }
        host.unobserve(self.observer, node);
        true
    }

    /// Drop the observer entirely. Safe to call more than once.
    pub fn disconnect<V>(&mut self, host: &mut V)
    where
        V: ViewportObserver + ?Sized,
    {
        if !self.connected {
            return;
        }
        self.connected = false;
        self.observed.clear();
        host.disconnect(self.observer);
    }

    /// Whether an entry from the host still concerns this watch.
    #[inline]
    pub fn accepts(&self, entry: &IntersectionEntry) -> bool {
        self.connected && self.observed.contains(&entry.node)
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }
}
