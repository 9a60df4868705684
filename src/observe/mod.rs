//! Viewport observation - the host capabilities the engine runs on.
//!
//! The engine never measures geometry itself. A host supplies:
//! - [`ViewportObserver`] - reports when observed nodes cross a visibility threshold
//! - [`IntervalTimer`] - a repeating timer for counter ticks
//! - [`Host::prefers_reduced_motion`] - the accessibility preference
//!
//! The engine side of observation is [`Watch`]. Host side implementations for
//! a scrolled page live in [`viewport`] and [`timers`].

mod margin;
pub mod timers;
pub mod viewport;
mod watch;

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::NodeId;

pub use margin::{MarginValue, RootMargin};
pub use timers::TimerQueue;
pub use viewport::ScrollViewport;
pub use watch::Watch;

// =============================================================================
// Identifiers
// =============================================================================

/// Handle to one observer created by a [`ViewportObserver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObserverId(pub u32);

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "observer#{}", self.0)
    }
}

/// Handle to one repeating timer created by an [`IntervalTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

// =============================================================================
// Observer options
// =============================================================================

/// Margin and threshold an observer is created with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObserverOptions {
    /// Inset applied to the viewport before testing (negative contracts it).
    pub root_margin: RootMargin,
    /// Fraction of the node's area that must be visible, `0.0..=1.0`.
    pub threshold: f32,
}

impl ObserverOptions {
    pub fn new(root_margin: RootMargin, threshold: f32) -> Self {
        Self {
            root_margin,
            threshold,
        }
    }

    /// Reveal defaults: `0px 0px -15% 0px`, threshold 0.15.
    pub fn reveal() -> Self {
        Self::new(RootMargin::bottom_percent(-15.0), 0.15)
    }

    /// Metrics container defaults: `0px 0px -10% 0px`, threshold 0.25.
    pub fn metrics() -> Self {
        Self::new(RootMargin::bottom_percent(-10.0), 0.25)
    }
}

// =============================================================================
// Intersection entries
// =============================================================================

/// One observed node's visibility, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub node: NodeId,
    /// Visible fraction is at or above the observer's threshold.
    pub is_intersecting: bool,
    /// Visible fraction of the node, `0.0..=1.0`.
    pub ratio: f32,
}

impl IntersectionEntry {
    pub fn entering(node: NodeId) -> Self {
        Self {
            node,
            is_intersecting: true,
            ratio: 1.0,
        }
    }

    pub fn leaving(node: NodeId) -> Self {
        Self {
            node,
            is_intersecting: false,
            ratio: 0.0,
        }
    }
}

// =============================================================================
// Host capabilities
// =============================================================================

/// Viewport intersection observation.
pub trait ViewportObserver {
    /// Create an observer. `None` means the capability is unavailable and the
    /// engine falls back to rendering everything immediately.
    fn create_observer(&mut self, options: ObserverOptions) -> Option<ObserverId>;

    fn observe(&mut self, observer: ObserverId, node: NodeId);

    fn unobserve(&mut self, observer: ObserverId, node: NodeId);

    /// Stop observing every node and forget the observer.
    fn disconnect(&mut self, observer: ObserverId);
}

/// Repeating timer.
pub trait IntervalTimer {
    fn set_interval(&mut self, period: Duration) -> TimerId;

    fn clear_interval(&mut self, timer: TimerId);
}

/// Everything the engine needs from its environment.
pub trait Host: ViewportObserver + IntervalTimer {
    fn prefers_reduced_motion(&self) -> bool;
}
