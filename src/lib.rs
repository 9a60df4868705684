//! # groundzero
//!
//! Scroll-reveal and impact-counter engine for the Ground Zero tutoring site,
//! with a terminal host that renders the site's pages.
//!
//! ## Architecture
//!
//! The engine never touches a screen. It talks to its environment through the
//! [`observe::Host`] traits (viewport observation, repeating timers, the
//! reduced-motion preference) and to the page through a small [`dom::Document`].
//! Everything runs on one thread; the host pushes events in:
//!
//! ```text
//! Host (viewport + timers) → PageView → RevealController / CounterController
//!                                    → Document text/classes
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Node ids, rects, text attributes and node markers
//! - [`observe`] - Host capability traits, root margins, viewport and timer queue
//! - [`dom`] - Page document arena and counter data attributes
//! - [`engine`] - Reveal and counter controllers, page lifecycle
//! - [`config`] - TOML engine configuration
//! - [`forms`] - Tutor application and contact enquiry forms
//! - [`pages`] - The site's pages as documents, their interactive state, pricing
//! - [`host`] - Headless page host, Taffy layout and the crossterm app

pub mod config;
pub mod dom;
pub mod engine;
pub mod error;
pub mod forms;
pub mod host;
pub mod observe;
pub mod pages;
pub mod types;

pub use types::*;

pub use config::{CounterConfig, DurationTiers, EngineConfig, MotionConfig};
pub use dom::{CounterFormat, CounterSpec, Document, Element, Selector};
pub use engine::{CounterController, CounterPhase, PageView, RevealController};
pub use error::{Error, Result};
pub use host::{PageHost, TerminalApp};
pub use observe::{
    Host, IntersectionEntry, IntervalTimer, ObserverId, ObserverOptions, RootMargin, TimerId,
    ViewportObserver,
};
pub use pages::{PageInput, PageKind, PageState};
