//! Timer Queue - host-side repeating timers on a virtual clock.
//!
//! The host moves the clock with [`TimerQueue::advance`] (real elapsed time in
//! the terminal host, fixed steps in tests) and drains firings one at a time
//! with [`TimerQueue::pop_due`], handing each to the engine before asking for
//! the next. A timer cleared while firings are being drained never fires again.

use std::collections::BTreeMap;
use std::time::Duration;

use super::{IntervalTimer, TimerId};

#[derive(Debug, Clone, Copy)]
struct Interval {
    period: Duration,
    due: Duration,
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    intervals: BTreeMap<TimerId, Interval>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the virtual clock forward.
    pub fn advance(&mut self, elapsed: Duration) {
        self.now += elapsed;
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Next timer due at or before `now`, earliest first (ties by id).
    ///
    /// The returned timer is rescheduled one period later.
    pub fn pop_due(&mut self) -> Option<TimerId> {
        let (&id, _) = self
            .intervals
            .iter()
            .filter(|(_, interval)| interval.due <= self.now)
            .min_by_key(|(id, interval)| (interval.due, **id))?;

        if let Some(interval) = self.intervals.get_mut(&id) {
            interval.due += interval.period;
        }
        Some(id)
    }

    /// Time until the earliest timer is due, `None` when idle.
    pub fn next_due_in(&self) -> Option<Duration> {
        self.intervals
            .values()
            .map(|interval| interval.due.saturating_sub(self.now))
            .min()
    }

    pub fn is_active(&self, timer: TimerId) -> bool {
        self.intervals.contains_key(&timer)
    }

    pub fn active_count(&self) -> usize {
        self.intervals.len()
    }
}

impl IntervalTimer for TimerQueue {
    fn set_interval(&mut self, period: Duration) -> TimerId {
        // A zero period would fire forever within one drain.
        let period = period.max(Duration::from_millis(1));

        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.intervals.insert(
            id,
            Interval {
                period,
                due: self.now + period,
            },
        );
        id
    }

    fn clear_interval(&mut self, timer: TimerId) {
        self.intervals.remove(&timer);
    }
}
