//! Self-instrumentation for list gauges (feature `metrics`).
//!
//! Recording, snapshotting, and exporting are kept apart the same way as for
//! any other metric: the gauge records into [`ListGaugeMetrics`] through the
//! [`ListGaugeMetricsRecorder`](traits::ListGaugeMetricsRecorder) trait,
//! readers take a plain-data [`ListGaugeMetricsSnapshot`], and exporters
//! publish that snapshot.

pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use metrics_impl::ListGaugeMetrics;
pub use snapshot::ListGaugeMetricsSnapshot;
