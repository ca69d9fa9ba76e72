//! # Reporting Traits
//!
//! The gauge is read by an external reporting pipeline. Instead of a visitor
//! that the gauge dispatches into, the pipeline depends on two small
//! capabilities:
//!
//! ```text
//!   ┌──────────────────────────────┐          ┌──────────────────────────────┐
//!   │      ListGaugeView<T>        │          │      MetricsExporter<S>      │
//!   │                              │          │                              │
//!   │  name(&) → &str              │ snapshot │  export(&, &S)               │
//!   │  snapshot(&) → Snapshot<T>   │ ───────► │                              │
//!   └──────────────┬───────────────┘          └──────────────┬───────────────┘
//!                  │                                         │
//!                  ▼                                         ▼
//!          ListGauge<T, C>                          TextExporter<W>
//! ```
//!
//! - [`ListGaugeView`] is object-safe, so a registry can hold
//!   `Arc<dyn ListGaugeView<T>>` without knowing the gauge's clock type.
//! - [`MetricsExporter`] takes the snapshot by reference and owns the
//!   serialization and destination concerns.
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::Arc;
//! use listgauge::gauge::ListGauge;
//! use listgauge::traits::ListGaugeView;
//!
//! let gauges: Vec<Arc<dyn ListGaugeView<String>>> = vec![
//!     Arc::new(ListGauge::<String>::with_defaults("errors")),
//!     Arc::new(ListGauge::<String>::with_defaults("warnings")),
//! ];
//!
//! for gauge in &gauges {
//!     let snapshot = gauge.snapshot();
//!     assert_eq!(snapshot.name(), gauge.name());
//!     assert!(snapshot.is_empty());
//! }
//! ```

use crate::snapshot::ListGaugeSnapshot;

/// Read-side capability of a list gauge, consumed by reporting code.
pub trait ListGaugeView<T>: Send + Sync {
    /// The gauge's immutable name.
    fn name(&self) -> &str;

    /// Evicts stale entries, then returns a copy of the retained values.
    fn snapshot(&self) -> ListGaugeSnapshot<T>;
}

/// Export/publish a snapshot to a monitoring sink.
///
/// Implementations decide format and destination. Export is best-effort:
/// sink failures are not surfaced to the caller.
pub trait MetricsExporter<S: ?Sized> {
    fn export(&self, snapshot: &S);
}

impl<S: ?Sized, E: MetricsExporter<S> + ?Sized> MetricsExporter<S> for &E {
    fn export(&self, snapshot: &S) {
        (**self).export(snapshot);
    }
}
