//! Engine configuration.
//!
//! Every field has a default matching the site's behavior, so an empty TOML
//! document is a valid configuration:
//!
//! ```toml
//! [reveal]
//! root_margin = "0px 0px -15% 0px"
//! threshold = 0.15
//!
//! [metrics]
//! root_margin = "0px 0px -10% 0px"
//! threshold = 0.25
//!
//! [counter]
//! tick_interval_ms = 33
//!
//! [counter.tiers]
//! large_from = 10000
//! large_ms = 3500
//! medium_from = 1000
//! medium_ms = 2400
//! small_ms = 1800
//!
//! [motion]
//! reduced_motion = false
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::observe::ObserverOptions;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub reveal: ObserverOptions,
    pub metrics: ObserverOptions,
    pub counter: CounterConfig,
    pub motion: MotionConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reveal: ObserverOptions::reveal(),
            metrics: ObserverOptions::metrics(),
            counter: CounterConfig::default(),
            motion: MotionConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CounterConfig {
    /// Period of the counter tick timer (~30 fps).
    pub tick_interval_ms: u64,
    pub tiers: DurationTiers,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 33,
            tiers: DurationTiers::default(),
        }
    }
}

impl CounterConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Animation length picked from the target when a node has no explicit duration.
///
/// Larger numbers get more wall-clock time so they stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DurationTiers {
    pub large_from: u64,
    pub large_ms: u64,
    pub medium_from: u64,
    pub medium_ms: u64,
    pub small_ms: u64,
}

impl Default for DurationTiers {
    fn default() -> Self {
        Self {
            large_from: 10_000,
            large_ms: 3500,
            medium_from: 1000,
            medium_ms: 2400,
            small_ms: 1800,
        }
    }
}

impl DurationTiers {
    pub fn pick(&self, target: u64) -> u64 {
        if target >= self.large_from {
            self.large_ms
        } else if target >= self.medium_from {
            self.medium_ms
        } else {
            self.small_ms
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotionConfig {
    /// Treat the user as preferring reduced motion.
    pub reduced_motion: bool,
}

impl EngineConfig {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let input = std::fs::read_to_string(path)?;
        Self::from_toml_str(&input)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, options) in [("reveal", &self.reveal), ("metrics", &self.metrics)] {
            if !(0.0..=1.0).contains(&options.threshold) {
                return Err(Error::Config(format!(
                    "{name}.threshold must be within 0..=1, got {}",
                    options.threshold
                )));
            }
        }

        if self.counter.tick_interval_ms == 0 {
            return Err(Error::Config(
                "counter.tick_interval_ms must be positive".to_string(),
            ));
        }

        let tiers = &self.counter.tiers;
        if tiers.medium_from > tiers.large_from {
            return Err(Error::Config(format!(
                "counter.tiers.medium_from ({}) must not exceed large_from ({})",
                tiers.medium_from, tiers.large_from
            )));
        }
        if tiers.large_ms == 0 || tiers.medium_ms == 0 || tiers.small_ms == 0 {
            return Err(Error::Config(
                "counter.tiers durations must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
