pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::config::{
    DEFAULT_MAX_ITEMS, DEFAULT_MAX_STALENESS, ListGaugeBuilder, ListGaugeConfig,
};
pub use crate::ds::{EvictionOutcome, TimedBuffer, TimestampedValue};
pub use crate::error::{ConfigError, InvariantError};
pub use crate::exporter::TextExporter;
pub use crate::gauge::ListGauge;
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::ListGaugeMetricsSnapshot;
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::{MetricsReset, MetricsSnapshotProvider};
pub use crate::snapshot::ListGaugeSnapshot;
pub use crate::traits::{ListGaugeView, MetricsExporter};
