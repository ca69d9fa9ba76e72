use std::sync::atomic::{AtomicU64, Ordering};

use crate::metrics::snapshot::ListGaugeMetricsSnapshot;
use crate::metrics::traits::{ListGaugeMetricsRecorder, MetricsReset};

/// Atomic counters for one list gauge.
///
/// Counters are observational only and use relaxed ordering; a snapshot taken
/// while writers are active may mix values from slightly different instants.
#[derive(Debug, Default)]
pub struct ListGaugeMetrics {
    add_calls: AtomicU64,
    snapshot_calls: AtomicU64,
    evict_calls: AtomicU64,
    size_evictions: AtomicU64,
    age_evictions: AtomicU64,
}

impl ListGaugeMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads every counter and pairs them with the caller-supplied gauges.
    pub fn snapshot_with(&self, len: usize, max_items: usize) -> ListGaugeMetricsSnapshot {
        ListGaugeMetricsSnapshot {
            add_calls: self.add_calls.load(Ordering::Relaxed),
            snapshot_calls: self.snapshot_calls.load(Ordering::Relaxed),
            evict_calls: self.evict_calls.load(Ordering::Relaxed),
            size_evictions: self.size_evictions.load(Ordering::Relaxed),
            age_evictions: self.age_evictions.load(Ordering::Relaxed),
            len,
            max_items,
        }
    }
}

impl ListGaugeMetricsRecorder for ListGaugeMetrics {
    #[inline]
    fn record_add_call(&self) {
        self.add_calls.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    fn record_snapshot_call(&self) {
        self.snapshot_calls.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    fn record_evict_call(&self) {
        self.evict_calls.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    fn record_size_evictions(&self, count: u64) {
        if count > 0 {
            self.size_evictions.fetch_add(count, Ordering::Relaxed);
        }
    }

    #[inline]
    fn record_age_evictions(&self, count: u64) {
        if count > 0 {
            self.age_evictions.fetch_add(count, Ordering::Relaxed);
        }
    }
}

impl MetricsReset for ListGaugeMetrics {
    fn reset_metrics(&self) {
        self.add_calls.store(0, Ordering::Relaxed);
        self.snapshot_calls.store(0, Ordering::Relaxed);
        self.evict_calls.store(0, Ordering::Relaxed);
        self.size_evictions.store(0, Ordering::Relaxed);
        self.age_evictions.store(0, Ordering::Relaxed);
    }
}
