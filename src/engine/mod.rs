//! Reveal & counter engine.
//!
//! - [`reveal`] - one-shot reveal of `[data-reveal]` nodes
//! - [`counter`] - count-up animation of `.num` nodes in the metrics container
//! - [`page`] - mounts both on a page and routes host events to them

pub mod counter;
pub mod page;
pub mod reveal;

#[cfg(test)]
pub(crate) mod test_host;

pub use counter::{
    CounterController, CounterNode, CounterPhase, TickPlan, format_count, pick_duration,
};
pub use page::PageView;
pub use reveal::RevealController;
