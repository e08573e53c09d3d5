//! Tunables for the activity driver.

use crate::activity_log::DEFAULT_LOG_CAPACITY;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub const MIN_INTERVAL: Duration = Duration::from_secs(2);
pub const MAX_INTERVAL: Duration = Duration::from_secs(10);
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Tick interval {0:?} is outside 2s..=10s")]
    IntervalOutOfRange(Duration),

    #[error("{name} must be within [0, 1], got {value}")]
    ChanceOutOfRange { name: &'static str, value: f64 },

    #[error("max_items_per_order must be at least 1")]
    NoItemsPerOrder,

    #[error("Activity log capacity must be at least 1")]
    ZeroLogCapacity,

    #[error("Mailbox size must be at least 1")]
    ZeroMailbox,
}

/// Driver settings.
///
/// | field | default |
/// |---|---|
/// | `interval_ms` | 5000 (allowed 2000..=10000) |
/// | `auto_settle` | true |
/// | `spawn_chance` | 0.6 |
/// | `advance_chance` | 0.7 |
/// | `settle_chance` | 0.6 |
/// | `max_items_per_order` | 3 |
/// | `log_capacity` | 20 |
/// | `seed` | none (entropy) |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomationConfig {
    pub interval_ms: u64,
    pub auto_settle: bool,
    pub spawn_chance: f64,
    /// Applied separately to each kitchen stage.
    pub advance_chance: f64,
    pub settle_chance: f64,
    pub max_items_per_order: u32,
    pub log_capacity: usize,
    pub seed: Option<u64>,
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL.as_millis() as u64,
            auto_settle: true,
            spawn_chance: 0.6,
            advance_chance: 0.7,
            settle_chance: 0.6,
            max_items_per_order: 3,
            log_capacity: DEFAULT_LOG_CAPACITY,
            seed: None,
        }
    }
}

impl AutomationConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval_ms = interval.as_millis() as u64;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_auto_settle(mut self, on: bool) -> Self {
        self.auto_settle = on;
        self
    }

    /// Sets the spawn, advance and settle probabilities at once.
    pub fn with_chances(mut self, spawn: f64, advance: f64, settle: f64) -> Self {
        self.spawn_chance = spawn;
        self.advance_chance = advance;
        self.settle_chance = settle;
        self
    }

    pub fn with_max_items_per_order(mut self, max: u32) -> Self {
        self.max_items_per_order = max;
        self
    }

    pub fn with_log_capacity(mut self, capacity: usize) -> Self {
        self.log_capacity = capacity;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_interval(self.interval())?;
        for (name, value) in [
            ("spawn_chance", self.spawn_chance),
            ("advance_chance", self.advance_chance),
            ("settle_chance", self.settle_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ChanceOutOfRange { name, value });
            }
        }
        if self.max_items_per_order == 0 {
            return Err(ConfigError::NoItemsPerOrder);
        }
        if self.log_capacity == 0 {
            return Err(ConfigError::ZeroLogCapacity);
        }
        Ok(())
    }
}

pub fn validate_interval(interval: Duration) -> Result<(), ConfigError> {
    if (MIN_INTERVAL..=MAX_INTERVAL).contains(&interval) {
        Ok(())
    } else {
        Err(ConfigError::IntervalOutOfRange(interval))
    }
}
