//! Recording host for engine unit tests.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::observe::{Host, IntervalTimer, ObserverId, ObserverOptions, TimerId, ViewportObserver};
use crate::types::NodeId;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(ObserverId),
    Observe(ObserverId, NodeId),
    Unobserve(ObserverId, NodeId),
    Disconnect(ObserverId),
    SetInterval(TimerId, Duration),
    ClearInterval(TimerId),
}

pub struct RecordingHost {
    pub calls: Vec<Call>,
    pub reduced_motion: bool,
    observers_available: bool,
    options: BTreeMap<ObserverId, ObserverOptions>,
    next_observer: u32,
    next_timer: u64,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            reduced_motion: false,
            observers_available: true,
            options: BTreeMap::new(),
            next_observer: 0,
            next_timer: 0,
        }
    }

    pub fn without_observer() -> Self {
        Self {
            observers_available: false,
            ..Self::new()
        }
    }

    pub fn reduced_motion() -> Self {
        Self {
            reduced_motion: true,
            ..Self::new()
        }
    }

    pub fn options_of(&self, observer: ObserverId) -> Option<ObserverOptions> {
        self.options.get(&observer).cloned()
    }

    fn filtered(&self, keep: impl Fn(&Call) -> bool) -> Vec<Call> {
        self.calls.iter().filter(|c| keep(c)).cloned().collect()
    }

    pub fn observe_calls(&self) -> Vec<Call> {
        self.filtered(|c| matches!(c, Call::Observe(..)))
    }

    pub fn unobserve_calls(&self) -> Vec<Call> {
        self.filtered(|c| matches!(c, Call::Unobserve(..)))
    }

    pub fn disconnect_calls(&self) -> Vec<Call> {
        self.filtered(|c| matches!(c, Call::Disconnect(..)))
    }

    pub fn timers_started(&self) -> Vec<TimerId> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::SetInterval(id, _) => Some(*id),
                _ => None,
            })
            .collect()
    }

    pub fn timers_cleared(&self) -> Vec<TimerId> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::ClearInterval(id) => Some(*id),
                _ => None,
            })
            .collect()
    }
}

impl ViewportObserver for RecordingHost {
    fn create_observer(&mut self, options: ObserverOptions) -> Option<ObserverId> {
        if !self.observers_available {
            return None;
        }
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.options.insert(id, options);
        self.calls.push(Call::Create(id));
        Some(id)
    }

    fn observe(&mut self, observer: ObserverId, node: NodeId) {
        self.calls.push(Call::Observe(observer, node));
    }

    fn unobserve(&mut self, observer: ObserverId, node: NodeId) {
        self.calls.push(Call::Unobserve(observer, node));
    }

    fn disconnect(&mut self, observer: ObserverId) {
        self.calls.push(Call::Disconnect(observer));
    }
}

impl IntervalTimer for RecordingHost {
    fn set_interval(&mut self, period: Duration) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        self.calls.push(Call::SetInterval(id, period));
        id
    }

    fn clear_interval(&mut self, timer: TimerId) {
        self.calls.push(Call::ClearInterval(timer));
    }
}

impl Host for RecordingHost {
    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }
}
