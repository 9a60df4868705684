//! Counter Controller - impact statistics that count up once.
//!
//! The controller watches the page's single metrics container. On its first
//! qualifying intersection the container's observation is dropped and every
//! `.num` node inside starts its own count-up animation:
//!
//! ```text
//! Idle ──start──▶ Animating { timer, current, step } ──current >= target──▶ Done
//!   └──reduced motion / target 0──────────────────────────────────────────▶ Done
//! ```
//!
//! The tick timer is cleared as part of the `Animating → Done` transition, so
//! no periodic work outlives an animation.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, warn};

use crate::config::{CounterConfig, DurationTiers};
use crate::dom::{
    COUNTER_CLASS, CounterFormat, CounterSpec, Document, FORCE_ANIMATE_ATTR, METRICS_CLASSES,
    Selector,
};
use crate::observe::{Host, IntersectionEntry, ObserverId, ObserverOptions, TimerId, Watch};
use crate::types::NodeId;

// =============================================================================
// Formatting & planning
// =============================================================================

/// Default animation length for a target with no explicit duration.
pub fn pick_duration(target: u64) -> u64 {
    DurationTiers::default().pick(target)
}

/// Render a counter value.
///
/// ```
/// use groundzero::dom::CounterFormat;
/// use groundzero::engine::format_count;
///
/// assert_eq!(format_count(1234567, CounterFormat::Comma), "1,234,567");
/// assert_eq!(format_count(42, CounterFormat::Plain), "42");
/// ```
pub fn format_count(value: u64, format: CounterFormat) -> String {
    let digits = value.to_string();
    match format {
        CounterFormat::Plain => digits,
        CounterFormat::Comma => {
            let mut out = String::with_capacity(digits.len() + digits.len() / 3);
            for (i, ch) in digits.chars().enumerate() {
                if i > 0 && (digits.len() - i) % 3 == 0 {
                    out.push(',');
                }
                out.push(ch);
            }
            out
        }
    }
}

/// Number of ticks and per-tick increment for one animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickPlan {
    pub duration_ms: u64,
    pub ticks: u64,
    pub step: u64,
}

impl TickPlan {
    /// `ticks = max(1, round(duration / tick))`, `step = max(1, round(target / ticks))`.
    pub fn new(target: u64, duration_ms: u64, tick_ms: u64) -> Self {
        let ticks = ((duration_ms as f64 / tick_ms.max(1) as f64).round() as u64).max(1);
        let step = ((target as f64 / ticks as f64).round() as u64).max(1);
        Self {
            duration_ms,
            ticks,
            step,
        }
    }

    /// Ticks until the displayed value reaches `target`.
    pub fn ticks_to_reach(&self, target: u64) -> u64 {
        target.div_ceil(self.step).max(1)
    }
}

fn render(spec: &CounterSpec, value: u64) -> String {
    let mut text = format_count(value, spec.format);
    text.push_str(&spec.suffix);
    text
}

// =============================================================================
// Counter node state
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterPhase {
    Idle,
    Animating {
        timer: TimerId,
        current: u64,
        step: u64,
    },
    Done,
}

#[derive(Debug, Clone)]
pub struct CounterNode {
    pub node: NodeId,
    pub spec: CounterSpec,
    phase: CounterPhase,
}

impl CounterNode {
    pub fn phase(&self) -> CounterPhase {
        self.phase
    }

    /// Value currently on display, `None` before the animation starts.
    pub fn current(&self) -> Option<u64> {
        match self.phase {
            CounterPhase::Idle => None,
            CounterPhase::Animating { current, .. } => Some(current),
            CounterPhase::Done => Some(self.spec.target),
        }
    }
}

// =============================================================================
// Controller
// =============================================================================

#[derive(Debug)]
pub struct CounterController {
    config: CounterConfig,
    container: Option<NodeId>,
    force_animate: bool,
    watch: Option<Watch>,
    counters: BTreeMap<NodeId, CounterNode>,
    timers: HashMap<TimerId, NodeId>,
}

impl CounterController {
    pub fn new(config: CounterConfig) -> Self {
        Self {
            config,
            container: None,
            force_animate: false,
            watch: None,
            counters: BTreeMap::new(),
            timers: HashMap::new(),
        }
    }

    /// Find the metrics container under `root` and observe it.
    ///
    /// A page without a container is a no-op. Without a viewport observer
    /// every counter shows its final value at once.
    pub fn arm<H>(&mut self, doc: &Document, root: NodeId, host: &mut H, options: ObserverOptions)
    where
        H: Host + ?Sized,
    {
        let Some(container) = doc.query_first(root, Selector::AnyClass(&METRICS_CLASSES)) else {
            return;
        };

        self.container = Some(container);
        self.force_animate = doc.has_attr(container, FORCE_ANIMATE_ATTR);
        self.counters = doc
            .query_all(container, Selector::Class(COUNTER_CLASS))
            .into_iter()
            .map(|node| {
                let counter = CounterNode {
                    node,
                    spec: CounterSpec::from_node(doc, node),
                    phase: CounterPhase::Idle,
                };
                (node, counter)
            })
            .collect();

        match Watch::create(host, options) {
            Some(mut watch) => {
                watch.arm(host, [container]);
                debug!(
                    observer = %watch.observer(),
                    %container,
                    counters = self.counters.len(),
                    "counters armed"
                );
                self.watch = Some(watch);
            }
            None => {
                warn!(%container, "viewport observation unavailable, showing final counts");
                for counter in self.counters.values_mut() {
                    doc.set_text(counter.node, render(&counter.spec, counter.spec.target));
                    counter.phase = CounterPhase::Done;
                }
            }
        }
    }

    pub fn observer(&self) -> Option<ObserverId> {
        self.watch.as_ref().map(Watch::observer)
    }

    pub fn container(&self) -> Option<NodeId> {
        self.container
    }

    /// Whether the container is still waiting for its first intersection.
    pub fn is_watching(&self) -> bool {
        self.watch.as_ref().is_some_and(Watch::is_connected)
    }

    /// Handle a batch of entries from this controller's observer.
    pub fn on_entries<H>(&mut self, doc: &Document, entries: &[IntersectionEntry], host: &mut H)
    where
        H: Host + ?Sized,
    {
        let Some(watch) = self.watch.as_mut() else { return };

        let triggered = entries
            .iter()
            .any(|entry| entry.is_intersecting && watch.accepts(entry));
        if !triggered {
            return;
        }

        watch.disconnect(host);
        self.start_counters(doc, host);
    }

    /// Start every counter that has not started yet.
    ///
    /// Safe to call repeatedly: a counter leaves `Idle` exactly once.
    pub fn start_counters<H>(&mut self, doc: &Document, host: &mut H)
    where
        H: Host + ?Sized,
    {
        let reduced = host.prefers_reduced_motion() && !self.force_animate;
        let tick = self.config.tick_interval();

        for counter in self.counters.values_mut() {
            if counter.phase != CounterPhase::Idle {
                continue;
            }

            let target = counter.spec.target;
            let duration = counter
                .spec
                .explicit_duration
                .unwrap_or_else(|| self.config.tiers.pick(target));

            if reduced || target == 0 {
                doc.set_text(counter.node, render(&counter.spec, target));
                counter.phase = CounterPhase::Done;
                debug!(node = %counter.node, target, reduced, "counter shown without animation");
                continue;
            }

            let plan = TickPlan::new(target, duration, self.config.tick_interval_ms);
            doc.set_text(counter.node, render(&counter.spec, 0));

            let timer = host.set_interval(tick);
            self.timers.insert(timer, counter.node);
            counter.phase = CounterPhase::Animating {
                timer,
                current: 0,
                step: plan.step,
            };
            debug!(
                node = %counter.node,
                %timer,
                target,
                duration_ms = duration,
                ticks = plan.ticks,
                step = plan.step,
                "counter started"
            );
        }
    }

    /// Advance the counter driven by `timer`.
    ///
    /// Returns `false` for timers this controller does not own (already
    /// cleared, or someone else's).
    pub fn on_tick<H>(&mut self, doc: &Document, timer: TimerId, host: &mut H) -> bool
    where
        H: Host + ?Sized,
    {
        let Some(&node) = self.timers.get(&timer) else {
            return false;
        };
        let Some(counter) = self.counters.get_mut(&node) else {
            return false;
        };
        let CounterPhase::Animating { current, step, .. } = counter.phase else {
            return false;
        };

        let target = counter.spec.target;
        let next = current.saturating_add(step);

        if next >= target {
            host.clear_interval(timer);
            self.timers.remove(&timer);
            counter.phase = CounterPhase::Done;
            doc.set_text(node, render(&counter.spec, target));
            debug!(%node, %timer, target, "counter finished");
        } else {
            counter.phase = CounterPhase::Animating {
                timer,
                current: next,
                step,
            };
            doc.set_text(node, render(&counter.spec, next));
        }

        true
    }

    pub fn counter(&self, node: NodeId) -> Option<&CounterNode> {
        self.counters.get(&node)
    }

    pub fn counters(&self) -> impl Iterator<Item = &CounterNode> {
        self.counters.values()
    }

    /// Timers currently driving an animation.
    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }

    /// Drop the container watch and stop every running animation (page unmount).
    pub fn disarm<H>(&mut self, host: &mut H)
    where
        H: Host + ?Sized,
    {
        if let Some(watch) = self.watch.as_mut() {
            watch.disconnect(host);
        }
        for (timer, node) in self.timers.drain() {
            host.clear_interval(timer);
            if let Some(counter) = self.counters.get_mut(&node) {
                counter.phase = CounterPhase::Done;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;
    use crate::engine::test_host::{Call, RecordingHost};
    use spark_signals::effect;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    fn counter_el(count: &str) -> Element {
        Element::new("span").class(COUNTER_CLASS).attr("data-count", count)
    }

    /// Page with one `.impact` container holding the given counters.
    fn page(counters: Vec<Element>, force: bool) -> (Document, NodeId, Vec<NodeId>) {
        let mut doc = Document::new();
        let root = doc.root();
        let mut container = Element::new("section").class("impact");
        if force {
            container = container.attr(FORCE_ANIMATE_ATTR, "");
        }
        let container = doc.append(root, container);
        let nodes = counters
            .into_iter()
            .map(|el| doc.append(container, el))
            .collect();
        (doc, container, nodes)
    }

    fn armed(doc: &Document, host: &mut RecordingHost) -> CounterController {
        let mut counters = CounterController::new(CounterConfig::default());
        counters.arm(doc, doc.root(), host, ObserverOptions::metrics());
        counters
    }

    /// Tick `timer` until the controller stops owning it, recording every text.
    fn run(
        counters: &mut CounterController,
        doc: &Document,
        node: NodeId,
        timer: TimerId,
        host: &mut RecordingHost,
    ) -> Vec<String> {
        let mut seen = Vec::new();
        while counters.on_tick(doc, timer, host) {
            seen.push(doc.text(node));
            assert!(seen.len() <= 10_000, "animation never terminated");
        }
        seen
    }

    #[test]
    fn test_pick_duration_boundaries() {
        assert_eq!(pick_duration(999), 1800);
        assert_eq!(pick_duration(1000), 2400);
        assert_eq!(pick_duration(9999), 2400);
        assert_eq!(pick_duration(10_000), 3500);
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(1_234_567, CounterFormat::Comma), "1,234,567");
        assert_eq!(format_count(12_345, CounterFormat::Comma), "12,345");
        assert_eq!(format_count(999, CounterFormat::Comma), "999");
        assert_eq!(format_count(1000, CounterFormat::Comma), "1,000");
        assert_eq!(format_count(0, CounterFormat::Comma), "0");
        assert_eq!(format_count(42, CounterFormat::Plain), "42");
        assert_eq!(format_count(1_234_567, CounterFormat::Plain), "1234567");
    }

    #[test]
    fn test_tick_plan_for_12000() {
        let plan = TickPlan::new(12_000, pick_duration(12_000), 33);
        assert_eq!(plan.duration_ms, 3500);
        assert_eq!(plan.ticks, 106);
        assert_eq!(plan.step, 113);
        assert_eq!(plan.ticks_to_reach(12_000), 107);
    }

    #[test]
    fn test_tick_plan_minimums() {
        let plan = TickPlan::new(2, 10, 33);
        assert_eq!(plan.ticks, 1);
        assert_eq!(plan.step, 2);

        let plan = TickPlan::new(3, 1800, 33);
        assert_eq!(plan.ticks, 55);
        assert_eq!(plan.step, 1);
    }

    #[test]
    fn test_arm_without_container_is_noop() {
        let mut doc = Document::new();
        let root = doc.root();
        doc.append(root, Element::new("section").reveal());
        let mut host = RecordingHost::new();

        let counters = armed(&doc, &mut host);

        assert!(counters.container().is_none());
        assert!(counters.observer().is_none());
        assert!(host.calls.is_empty());
    }

    #[test]
    fn test_arm_observes_container_with_metrics_options() {
        let (doc, container, _) = page(vec![counter_el("10")], false);
        let mut host = RecordingHost::new();

        let counters = armed(&doc, &mut host);

        let observer = counters.observer().unwrap();
        assert_eq!(host.observe_calls(), vec![Call::Observe(observer, container)]);
        assert_eq!(host.options_of(observer), Some(ObserverOptions::metrics()));
        assert!(counters.is_watching());
    }

    #[test]
    fn test_animation_reaches_exact_target_and_stops_once() {
        let (doc, _, nodes) = page(
            vec![counter_el("12000").attr("data-format", "comma").attr("data-suffix", "+")],
            false,
        );
        let mut host = RecordingHost::new();
        let mut counters = armed(&doc, &mut host);
        let observer = counters.observer().unwrap();
        let container = counters.container().unwrap();

        counters.on_entries(&doc, &[IntersectionEntry::entering(container)], &mut host);
        assert_eq!(host.disconnect_calls(), vec![Call::Disconnect(observer)]);
        assert_eq!(doc.text(nodes[0]), "0+");

        let timers = host.timers_started();
        assert_eq!(timers.len(), 1);
        assert!(host.calls.contains(&Call::SetInterval(timers[0], Duration::from_millis(33))));

        let seen = run(&mut counters, &doc, nodes[0], timers[0], &mut host);

        assert_eq!(seen.len(), 107);
        assert_eq!(seen[0], "113+");
        assert_eq!(seen[105], "11,978+");
        assert_eq!(seen.last().unwrap(), "12,000+");
        assert_eq!(host.timers_cleared(), vec![timers[0]]);
        assert_eq!(counters.counter(nodes[0]).unwrap().phase(), CounterPhase::Done);
        assert_eq!(counters.active_timers(), 0);
    }

    #[test]
    fn test_exact_termination_for_assorted_targets() {
        for target in [1u64, 2, 7, 33, 54, 55, 999, 1000, 4321, 99_999] {
            let (doc, _, nodes) = page(vec![counter_el(&target.to_string())], false);
            let mut host = RecordingHost::new();
            let mut counters = armed(&doc, &mut host);
            counters.start_counters(&doc, &mut host);

            let timer = host.timers_started()[0];
            let seen = run(&mut counters, &doc, nodes[0], timer, &mut host);

            assert_eq!(seen.last().unwrap(), &target.to_string(), "target {target}");
            assert_eq!(host.timers_cleared(), vec![timer], "target {target}");
        }
    }

    #[test]
    fn test_explicit_duration_overrides_heuristic() {
        let (doc, _, nodes) = page(vec![counter_el("100").attr("data-duration", "330")], false);
        let mut host = RecordingHost::new();
        let mut counters = armed(&doc, &mut host);
        counters.start_counters(&doc, &mut host);

        let timer = host.timers_started()[0];
        let seen = run(&mut counters, &doc, nodes[0], timer, &mut host);

        // 10 ticks of 10.
        assert_eq!(seen.len(), 10);
        assert_eq!(seen[0], "10");
    }

    #[test]
    fn test_start_twice_never_doubles_timers() {
        let (doc, _, _) = page(vec![counter_el("500"), counter_el("80")], false);
        let mut host = RecordingHost::new();
        let mut counters = armed(&doc, &mut host);

        counters.start_counters(&doc, &mut host);
        counters.start_counters(&doc, &mut host);

        assert_eq!(host.timers_started().len(), 2);
        assert_eq!(counters.active_timers(), 2);
    }

    #[test]
    fn test_repeated_container_entries_fire_once() {
        let (doc, container, _) = page(vec![counter_el("500")], false);
        let mut host = RecordingHost::new();
        let mut counters = armed(&doc, &mut host);

        let entry = IntersectionEntry::entering(container);
        counters.on_entries(&doc, &[entry, entry], &mut host);
        counters.on_entries(&doc, &[entry], &mut host);

        assert_eq!(host.disconnect_calls().len(), 1);
        assert_eq!(host.timers_started().len(), 1);
    }

    #[test]
    fn test_non_intersecting_entry_does_not_trigger() {
        let (doc, container, _) = page(vec![counter_el("500")], false);
        let mut host = RecordingHost::new();
        let mut counters = armed(&doc, &mut host);

        counters.on_entries(&doc, &[IntersectionEntry::leaving(container)], &mut host);

        assert!(counters.is_watching());
        assert!(host.timers_started().is_empty());
    }

    #[test]
    fn test_reduced_motion_renders_final_value_immediately() {
        let (doc, container, nodes) = page(
            vec![counter_el("5600").attr("data-format", "comma").attr("data-suffix", "+")],
            false,
        );
        let mut host = RecordingHost::reduced_motion();
        let mut counters = armed(&doc, &mut host);

        let writes = Rc::new(RefCell::new(Vec::new()));
        let seen = writes.clone();
        let signal = doc.text_signal(nodes[0]).unwrap();
        let _stop = effect(move || seen.borrow_mut().push(signal.get()));
        writes.borrow_mut().clear();

        counters.on_entries(&doc, &[IntersectionEntry::entering(container)], &mut host);

        assert_eq!(*writes.borrow(), ["5,600+"]);
        assert!(host.timers_started().is_empty());
        assert_eq!(counters.counter(nodes[0]).unwrap().phase(), CounterPhase::Done);
    }

    #[test]
    fn test_force_animate_overrides_reduced_motion() {
        let (doc, _, nodes) = page(vec![counter_el("40")], true);
        let mut host = RecordingHost::reduced_motion();
        let mut counters = armed(&doc, &mut host);

        counters.start_counters(&doc, &mut host);

        assert_eq!(host.timers_started().len(), 1);
        assert_eq!(doc.text(nodes[0]), "0");
    }

    #[test]
    fn test_zero_target_renders_without_timer() {
        let (doc, _, nodes) = page(vec![counter_el("0").attr("data-suffix", "%")], false);
        let mut host = RecordingHost::new();
        let mut counters = armed(&doc, &mut host);

        counters.start_counters(&doc, &mut host);

        assert_eq!(doc.text(nodes[0]), "0%");
        assert!(host.timers_started().is_empty());
    }

    #[test]
    fn test_malformed_count_does_not_block_siblings() {
        let (doc, _, nodes) = page(vec![counter_el("lots"), counter_el("25")], false);
        let mut host = RecordingHost::new();
        let mut counters = armed(&doc, &mut host);

        counters.start_counters(&doc, &mut host);

        assert_eq!(doc.text(nodes[0]), "0");
        assert_eq!(counters.counter(nodes[0]).unwrap().phase(), CounterPhase::Done);
        assert_eq!(host.timers_started().len(), 1);
    }

    #[test]
    fn test_counters_animate_independently() {
        let (doc, _, nodes) = page(vec![counter_el("3"), counter_el("3000")], false);
        let mut host = RecordingHost::new();
        let mut counters = armed(&doc, &mut host);
        counters.start_counters(&doc, &mut host);
        let timers = host.timers_started();

        // Small target: 55 ticks of 1 -> finishes on tick 3.
        for _ in 0..3 {
            assert!(counters.on_tick(&doc, timers[0], &mut host));
        }
        assert_eq!(doc.text(nodes[0]), "3");
        assert!(!counters.on_tick(&doc, timers[0], &mut host));

        // The large one keeps going.
        assert!(counters.on_tick(&doc, timers[1], &mut host));
        assert!(matches!(
            counters.counter(nodes[1]).unwrap().phase(),
            CounterPhase::Animating { .. }
        ));
        assert_eq!(host.timers_cleared(), vec![timers[0]]);
    }

    #[test]
    fn test_container_released_with_zero_counters() {
        let (doc, container, _) = page(Vec::new(), false);
        let mut host = RecordingHost::new();
        let mut counters = armed(&doc, &mut host);

        counters.on_entries(&doc, &[IntersectionEntry::entering(container)], &mut host);

        assert_eq!(host.disconnect_calls().len(), 1);
        assert!(!counters.is_watching());
    }

    #[test]
    fn test_fallback_without_observer_shows_final_counts() {
        let (doc, _, nodes) = page(
            vec![
                counter_el("12000").attr("data-format", "comma"),
                counter_el("98").attr("data-suffix", "%"),
            ],
            false,
        );
        let mut host = RecordingHost::without_observer();
        let counters = armed(&doc, &mut host);

        assert_eq!(doc.text(nodes[0]), "12,000");
        assert_eq!(doc.text(nodes[1]), "98%");
        assert!(counters.counters().all(|c| c.phase() == CounterPhase::Done));
        assert!(host.timers_started().is_empty());
    }

    #[test]
    fn test_disarm_clears_running_timers() {
        let (doc, _, _) = page(vec![counter_el("500"), counter_el("900")], false);
        let mut host = RecordingHost::new();
        let mut counters = armed(&doc, &mut host);
        counters.start_counters(&doc, &mut host);
        let started = host.timers_started();

        counters.disarm(&mut host);

        let mut cleared = host.timers_cleared();
        cleared.sort();
        assert_eq!(cleared, started);
        assert_eq!(counters.active_timers(), 0);
        assert!(!counters.on_tick(&doc, started[0], &mut host));
    }
}
