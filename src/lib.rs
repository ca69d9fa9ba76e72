//! listgauge: bounded, self-evicting, thread-safe list gauges.
//!
//! A list gauge retains a rolling window of recent values under two
//! independent bounds (maximum count, maximum age) and hands immutable
//! snapshots of that window to reporting code.
//!
//! - [`gauge::ListGauge`]: the thread-safe gauge.
//! - [`ds::TimedBuffer`]: the single-threaded size/age-bounded core.
//! - [`traits`]: the reporting seam (`ListGaugeView`, `MetricsExporter`).

pub mod clock;
pub mod config;
pub mod ds;
pub mod error;
pub mod exporter;
pub mod gauge;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod snapshot;
pub mod traits;
