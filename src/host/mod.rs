//! Page hosts.
//!
//! [`PageHost`] is the environment a [`PageView`] runs in: a scrolled
//! viewport that answers intersection queries, a timer queue on a virtual
//! clock, and the reduced-motion preference. It has no I/O of its own, so the
//! same host drives the terminal app ([`terminal`]) and the integration tests.
//!
//! Events reach the engine through [`PageHost::pump`]: pending intersection
//! records first, then every timer firing that is due.

pub mod frame;
pub mod layout;
pub mod terminal;

use std::time::Duration;

use tracing::trace;

use crate::dom::Document;
use crate::engine::PageView;
use crate::observe::{
    Host, IntervalTimer, ObserverId, ObserverOptions, ScrollViewport, TimerId, TimerQueue,
    ViewportObserver,
};
use crate::types::NodeId;

pub use frame::{Frame, RowDiff};
pub use layout::{layout_document, wrap_text};
pub use terminal::TerminalApp;

/// What one [`PageHost::pump`] delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pumped {
    pub batches: usize,
    pub ticks: usize,
}

impl Pumped {
    pub fn is_idle(&self) -> bool {
        self.batches == 0 && self.ticks == 0
    }
}

pub struct PageHost {
    pub viewport: ScrollViewport,
    pub timers: TimerQueue,
    reduced_motion: bool,
}

impl PageHost {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            viewport: ScrollViewport::new(width, height),
            timers: TimerQueue::new(),
            reduced_motion: false,
        }
    }

    /// A host without intersection observation.
    pub fn without_observer(width: u16, height: u16) -> Self {
        Self {
            viewport: ScrollViewport::unavailable(width, height),
            ..Self::new(width, height)
        }
    }

    pub fn with_reduced_motion(mut self, reduced_motion: bool) -> Self {
        self.reduced_motion = reduced_motion;
        self
    }

    pub fn set_reduced_motion(&mut self, reduced_motion: bool) {
        self.reduced_motion = reduced_motion;
    }

    /// Deliver pending intersection records, then every due timer firing.
    ///
    /// Records are taken again after the ticks so reveals caused by the
    /// current scroll position are never held back by a busy timer queue.
    pub fn pump(&mut self, doc: &mut Document, view: &mut PageView) -> Pumped {
        let mut pumped = Pumped::default();

        pumped.batches += self.deliver_records(doc, view);
        while let Some(timer) = self.timers.pop_due() {
            if !view.on_tick(doc, timer, self) {
                trace!(%timer, "tick for unknown timer");
            }
            pumped.ticks += 1;
        }
        pumped.batches += self.deliver_records(doc, view);

        pumped
    }

    /// Move the clock forward by `elapsed` and pump.
    pub fn advance(
        &mut self,
        doc: &mut Document,
        view: &mut PageView,
        elapsed: Duration,
    ) -> Pumped {
        self.timers.advance(elapsed);
        self.pump(doc, view)
    }

    /// Advance in `step` increments until nothing is left to animate, or
    /// `limit` has elapsed. Returns the total virtual time spent.
    pub fn settle(
        &mut self,
        doc: &mut Document,
        view: &mut PageView,
        step: Duration,
        limit: Duration,
    ) -> Duration {
        let start = self.timers.now();
        self.pump(doc, view);
        while self.timers.active_count() > 0 && self.timers.now() - start < limit {
            self.advance(doc, view, step);
        }
        self.timers.now() - start
    }

    fn deliver_records(&mut self, doc: &mut Document, view: &mut PageView) -> usize {
        let records = self.viewport.take_records();
        let count = records.len();
        for (observer, entries) in records {
            view.on_intersections(doc, observer, &entries, self);
        }
        count
    }
}

impl ViewportObserver for PageHost {
    fn create_observer(&mut self, options: ObserverOptions) -> Option<ObserverId> {
        self.viewport.create_observer(options)
    }

    fn observe(&mut self, observer: ObserverId, node: NodeId) {
        self.viewport.observe(observer, node);
    }

    fn unobserve(&mut self, observer: ObserverId, node: NodeId) {
        self.viewport.unobserve(observer, node);
    }

    fn disconnect(&mut self, observer: ObserverId) {
        self.viewport.disconnect(observer);
    }
}

impl IntervalTimer for PageHost {
    fn set_interval(&mut self, period: Duration) -> TimerId {
        self.timers.set_interval(period)
    }

    fn clear_interval(&mut self, timer: TimerId) {
        self.timers.clear_interval(timer);
    }
}

impl Host for PageHost {
    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::dom::{COUNT_ATTR, COUNTER_CLASS, Element};
    use crate::types::Rect;

    const TICK: Duration = Duration::from_millis(33);

    fn setup() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let root = doc.root();
        let card = doc.append(root, Element::new("div").reveal());
        let impact = doc.append(root, Element::new("section").class("impact"));
        let num = doc.append(
            impact,
            Element::new("span").class(COUNTER_CLASS).attr(COUNT_ATTR, "100"),
        );
        (doc, card, impact, num)
    }

    fn place(host: &mut PageHost, card: NodeId, impact: NodeId, num: NodeId) {
        host.viewport.set_rect(card, Rect::new(0.0, 5.0, 40.0, 4.0));
        host.viewport.set_rect(impact, Rect::new(0.0, 60.0, 40.0, 4.0));
        host.viewport.set_rect(num, Rect::new(0.0, 61.0, 10.0, 1.0));
    }

    #[test]
    fn test_pump_reveals_visible_nodes_only() {
        let (mut doc, card, impact, num) = setup();
        let mut host = PageHost::new(80, 20);
        place(&mut host, card, impact, num);

        let mut view = PageView::mount(&mut doc, NodeId(0), &mut host, &EngineConfig::default());
        let pumped = host.pump(&mut doc, &mut view);

        assert!(pumped.batches > 0);
        assert!(view.reveal().is_revealed(card));
        assert_eq!(view.counters().active_timers(), 0);
        assert_eq!(doc.text(num), "");
    }

    #[test]
    fn test_scroll_then_settle_finishes_counter() {
        let (mut doc, card, impact, num) = setup();
        let mut host = PageHost::new(80, 20);
        place(&mut host, card, impact, num);
        let mut view = PageView::mount(&mut doc, NodeId(0), &mut host, &EngineConfig::default());
        host.pump(&mut doc, &mut view);

        host.viewport.scroll_to(50.0);
        host.pump(&mut doc, &mut view);
        assert_eq!(host.timers.active_count(), 1);

        let spent = host.settle(&mut doc, &mut view, TICK, Duration::from_secs(10));
        assert!(spent <= Duration::from_secs(2));
        assert_eq!(doc.text(num), "100");
        assert_eq!(host.timers.active_count(), 0);
        assert!(view.is_settled());
    }

    #[test]
    fn test_reduced_motion_host() {
        let (mut doc, card, impact, num) = setup();
        let mut host = PageHost::new(80, 20).with_reduced_motion(true);
        place(&mut host, card, impact, num);
        let mut view = PageView::mount(&mut doc, NodeId(0), &mut host, &EngineConfig::default());

        host.viewport.scroll_to(50.0);
        let pumped = host.pump(&mut doc, &mut view);

        assert_eq!(pumped.ticks, 0);
        assert_eq!(doc.text(num), "100");
        assert_eq!(host.timers.active_count(), 0);
    }

    #[test]
    fn test_unmount_releases_host_resources() {
        let (mut doc, card, impact, num) = setup();
        let mut host = PageHost::new(80, 20);
        place(&mut host, card, impact, num);
        let mut view = PageView::mount(&mut doc, NodeId(0), &mut host, &EngineConfig::default());
        host.viewport.scroll_to(50.0);
        host.pump(&mut doc, &mut view);
        host.advance(&mut doc, &mut view, TICK);

        view.unmount(&mut host);

        assert_eq!(host.timers.active_count(), 0);
        assert_eq!(host.viewport.observer_count(), 0);
    }
}
