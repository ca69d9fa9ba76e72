//! # Metrics Traits
//!
//! ```text
//!   ┌──────────────────────────────┐
//!   │   ListGaugeMetricsRecorder   │   written on every add / snapshot
//!   │  add/snapshot/evict calls    │
//!   │  size/age evictions          │
//!   └──────────────┬───────────────┘
//!                  │
//!   Consumption (decoupled from recording):
//!   ┌──────────────┴───────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (crate::traits)              │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```
//!
//! Recorders take `&self`: the gauge is shared across threads, so counters
//! use interior mutability (atomics).

/// Counters recorded by a list gauge.
pub trait ListGaugeMetricsRecorder {
    fn record_add_call(&self);
    fn record_snapshot_call(&self);
    fn record_evict_call(&self);
    fn record_size_evictions(&self, count: u64);
    fn record_age_evictions(&self, count: u64);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn metrics_snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&self);
}
