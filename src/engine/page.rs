//! Page View - one mounted page with its reveal and counter controllers.
//!
//! Every page (home, about, contact, ...) goes through the same engine:
//!
//! ```ignore
//! let mut view = PageView::mount(&mut doc, root, &mut host, &config);
//!
//! // host event loop
//! for (observer, entries) in host.viewport.take_records() {
//!     view.on_intersections(&mut doc, observer, &entries, &mut host);
//! }
//! while let Some(timer) = host.timers.pop_due() {
//!     view.on_tick(&doc, timer, &mut host);
//! }
//!
//! view.unmount(&mut host);
//! ```

use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::dom::Document;
use crate::observe::{Host, IntersectionEntry, ObserverId, TimerId};
use crate::types::NodeId;

use super::counter::CounterController;
use super::reveal::RevealController;

pub struct PageView {
    root: NodeId,
    reveal: RevealController,
    counters: CounterController,
}

impl PageView {
    /// Arm both controllers on `root`.
    pub fn mount<H>(doc: &mut Document, root: NodeId, host: &mut H, config: &EngineConfig) -> Self
    where
        H: Host + ?Sized,
    {
        let mut reveal = RevealController::new();
        reveal.arm(doc, root, host, config.reveal.clone());

        let mut counters = CounterController::new(config.counter.clone());
        counters.arm(doc, root, host, config.metrics.clone());

        debug!(
            %root,
            reveal_targets = reveal.watched_count(),
            container = ?counters.container(),
            "page mounted"
        );

        Self {
            root,
            reveal,
            counters,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Route one observer's batch to the controller that owns it.
    pub fn on_intersections<H>(
        &mut self,
        doc: &mut Document,
        observer: ObserverId,
        entries: &[IntersectionEntry],
        host: &mut H,
    ) where
        H: Host + ?Sized,
    {
        if self.reveal.observer() == Some(observer) {
            self.reveal.on_entries(doc, entries, host);
        } else if self.counters.observer() == Some(observer) {
            self.counters.on_entries(doc, entries, host);
        } else {
            trace!(%observer, entries = entries.len(), "entries for unknown observer dropped");
        }
    }

    /// Route a timer firing. Returns `false` if no counter owns `timer`.
    pub fn on_tick<H>(&mut self, doc: &Document, timer: TimerId, host: &mut H) -> bool
    where
        H: Host + ?Sized,
    {
        self.counters.on_tick(doc, timer, host)
    }

    pub fn reveal(&self) -> &RevealController {
        &self.reveal
    }

    pub fn counters(&self) -> &CounterController {
        &self.counters
    }

    /// Nothing left to wait for: every reveal done, counters finished.
    pub fn is_settled(&self) -> bool {
        self.reveal.watched_count() == 0
            && !self.counters.is_watching()
            && self.counters.active_timers() == 0
    }

    /// Release all observation and stop every running animation.
    pub fn unmount<H>(mut self, host: &mut H)
    where
        H: Host + ?Sized,
    {
        self.reveal.disarm(host);
        self.counters.disarm(host);
        debug!(root = %self.root, "page unmounted");
    }
}
