//! Gauge configuration and builder.
//!
//! A [`ListGaugeConfig`] carries the two eviction bounds. It deserializes from
//! any serde format, with missing fields falling back to the defaults
//! (1000 items, 60 minutes). Staleness travels as whole milliseconds under the
//! key `max_staleness_ms`.
//!
//! | Field | Type | Default | Description |
//! |-------|------|---------|-------------|
//! | `max_items` | `usize` | 1000 | Maximum retained values; `0` retains nothing |
//! | `max_staleness` | `Duration` | 60 min | Maximum value age; `Duration::MAX` disables age eviction |
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use listgauge::config::{ListGaugeBuilder, ListGaugeConfig};
//!
//! let config = ListGaugeConfig::default();
//! assert_eq!(config.max_items, 1000);
//! assert_eq!(config.max_staleness, Duration::from_secs(3600));
//!
//! let gauge = ListGaugeBuilder::new("recent-errors")
//!     .max_items(50)
//!     .max_staleness(Duration::from_secs(300))
//!     .build::<String>();
//! assert_eq!(gauge.name(), "recent-errors");
//! assert_eq!(gauge.max_items(), 50);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::error::ConfigError;
use crate::gauge::ListGauge;

/// Default maximum number of retained values.
pub const DEFAULT_MAX_ITEMS: usize = 1000;

/// Default maximum age of a retained value.
pub const DEFAULT_MAX_STALENESS: Duration = Duration::from_secs(60 * 60);

fn default_max_items() -> usize {
    DEFAULT_MAX_ITEMS
}

fn default_max_staleness() -> Duration {
    DEFAULT_MAX_STALENESS
}

/// Eviction bounds for a list gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListGaugeConfig {
    /// Maximum number of retained values.
    #[serde(default = "default_max_items")]
    pub max_items: usize,

    /// Maximum age of a retained value.
    #[serde(
        default = "default_max_staleness",
        rename = "max_staleness_ms",
        with = "duration_millis"
    )]
    pub max_staleness: Duration,
}

impl ListGaugeConfig {
    pub fn new(max_items: usize, max_staleness: Duration) -> Self {
        Self {
            max_items,
            max_staleness,
        }
    }
}

impl Default for ListGaugeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ITEMS, DEFAULT_MAX_STALENESS)
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    use crate::ds::timed_buffer::duration_to_millis;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration_to_millis(*duration))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// Fluent constructor for [`ListGauge`].
///
/// [`build`](Self::build) accepts every configuration, including the
/// degenerate ones. [`try_build`](Self::try_build) is for user-supplied
/// settings and rejects a blank name or `max_items == 0`.
#[derive(Debug, Clone)]
pub struct ListGaugeBuilder {
    name: String,
    config: ListGaugeConfig,
}

impl ListGaugeBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: ListGaugeConfig::default(),
        }
    }

    /// Replaces both bounds with `config`.
    pub fn config(mut self, config: ListGaugeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn max_items(mut self, max_items: usize) -> Self {
        self.config.max_items = max_items;
        self
    }

    pub fn max_staleness(mut self, max_staleness: Duration) -> Self {
        self.config.max_staleness = max_staleness;
        self
    }

    /// Builds a gauge timestamped by the system clock.
    pub fn build<T>(self) -> ListGauge<T> {
        self.build_with_clock(SystemClock)
    }

    /// Builds a gauge timestamped by `clock`.
    pub fn build_with_clock<T, C: Clock>(self, clock: C) -> ListGauge<T, C> {
        ListGauge::from_config_with_clock(self.name, self.config, clock)
    }

    /// Validates the settings, then builds a system-clock gauge.
    pub fn try_build<T>(self) -> Result<ListGauge<T>, ConfigError> {
        self.validate()?;
        Ok(self.build())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if self.config.max_items == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}
