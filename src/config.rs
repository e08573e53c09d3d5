//! System configuration.
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `POS_TICK_INTERVAL_MS` | 5000 | driver tick interval (2000..=10000) |
//! | `POS_AUTO_SETTLE` | true | settle served orders automatically |
//! | `POS_SEED` | unset | seed for the driver's random source |
//! | `POS_LOG_CAPACITY` | 20 | activity log size |
//! | `POS_SAMPLE_DATA` | true | start with the demo menu and tables |
//! | `POS_RUN_SECS` | 30 | how long the demo binary runs |
//!
//! ```ignore
//! POS_SEED=42 POS_TICK_INTERVAL_MS=2000 RUST_LOG=debug cargo run
//! ```

use crate::automation::{AutomationConfig, ConfigError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_MAILBOX_SIZE: usize = 32;
pub const DEFAULT_RUN_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub automation: AutomationConfig,
    /// Seed the floor with [`Floor::sample`](crate::floor::Floor::sample).
    pub seed_sample_data: bool,
    pub mailbox_size: usize,
    /// Demo run length; the library itself ignores it.
    pub run_for_secs: u64,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            automation: AutomationConfig::default(),
            seed_sample_data: true,
            mailbox_size: DEFAULT_MAILBOX_SIZE,
            run_for_secs: DEFAULT_RUN_SECS,
        }
    }
}

impl SystemConfig {
    /// Defaults overridden by any `POS_*` variables that are set and parse.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let automation = AutomationConfig {
            interval_ms: env_or("POS_TICK_INTERVAL_MS", defaults.automation.interval_ms),
            auto_settle: env_or("POS_AUTO_SETTLE", defaults.automation.auto_settle),
            log_capacity: env_or("POS_LOG_CAPACITY", defaults.automation.log_capacity),
            seed: std::env::var("POS_SEED").ok().and_then(|v| v.parse().ok()),
            ..defaults.automation
        };
        Self {
            automation,
            seed_sample_data: env_or("POS_SAMPLE_DATA", defaults.seed_sample_data),
            mailbox_size: defaults.mailbox_size,
            run_for_secs: env_or("POS_RUN_SECS", defaults.run_for_secs),
        }
    }

    pub fn with_automation(mut self, automation: AutomationConfig) -> Self {
        self.automation = automation;
        self
    }

    pub fn with_sample_data(mut self, on: bool) -> Self {
        self.seed_sample_data = on;
        self
    }

    pub fn with_mailbox_size(mut self, size: usize) -> Self {
        self.mailbox_size = size;
        self
    }

    pub fn run_for(&self) -> Duration {
        Duration::from_secs(self.run_for_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.automation.validate()?;
        if self.mailbox_size == 0 {
            return Err(ConfigError::ZeroMailbox);
        }
        Ok(())
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
