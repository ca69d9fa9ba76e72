//! Thread-safe list gauge.
//!
//! [`ListGauge`] records a rolling window of recent values (recent errors,
//! recent latencies, ...) from any number of threads and hands an immutable
//! copy of that window to reporting code on demand.
//!
//! ## Architecture
//!
//! ```text
//!   producers (any thread)                       reporter (any thread)
//!   ──────────────────────                       ─────────────────────
//!        add(v)                                       snapshot()
//!          │                                              │
//!          ▼                                              ▼
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │ ListGauge<T, C>                                                  │
//!   │                                                                  │
//!   │   name: Arc<str>            clock: C (now_millis)                │
//!   │                                                                  │
//!   │   inner: parking_lot::Mutex<TimedBuffer<T>>                      │
//!   │   ┌────────────────────────────────────────────────────────────┐ │
//!   │   │ add:      lock → now → push(v, now) → evict(now) → unlock  │ │
//!   │   │ snapshot: lock → now → evict(now) → clone values → unlock  │ │
//!   │   └────────────────────────────────────────────────────────────┘ │
//!   └──────────────────────────────────────────────────────────────────┘
//!                                                         │
//!                                                         ▼
//!                                             ListGaugeSnapshot<T> (Arc<[T]>)
//! ```
//!
//! "Now" is read inside the critical section, so timestamps are assigned in
//! the same order entries are appended. Every critical section is bounded by
//! the number of entries it evicts (at most `max_items` plus one) plus, for
//! `snapshot`, the copy of at most `max_items` values. No I/O happens under
//! the lock; logging and metrics recording run after it is released.
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//! use std::time::Duration;
//! use listgauge::gauge::ListGauge;
//!
//! let gauge = Arc::new(ListGauge::new("recent-latencies", 20, Duration::from_secs(60)));
//!
//! let handles: Vec<_> = (0..2)
//!     .map(|_| {
//!         let gauge = Arc::clone(&gauge);
//!         thread::spawn(move || {
//!             for i in 1..=100u32 {
//!                 gauge.add(i);
//!             }
//!         })
//!     })
//!     .collect();
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! let snapshot = gauge.snapshot();
//! assert_eq!(snapshot.len(), 20);
//! assert!(snapshot.iter().all(|&v| v > 80 && v <= 100));
//! ```

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::clock::{Clock, SystemClock};
use crate::config::ListGaugeConfig;
use crate::ds::timed_buffer::{EvictionOutcome, TimedBuffer, duration_to_millis};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::ListGaugeMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::ListGaugeMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{ListGaugeMetricsRecorder, MetricsReset, MetricsSnapshotProvider};
use crate::snapshot::ListGaugeSnapshot;
use crate::traits::{ListGaugeView, MetricsExporter};

/// Bounded, self-evicting, thread-safe buffer of recent values.
///
/// Retains at most `max_items` values, none older than `max_staleness`, in
/// insertion order. Both bounds are enforced on every [`add`](Self::add) and
/// every [`snapshot`](Self::snapshot). All methods take `&self`; share the
/// gauge across threads with an `Arc`.
///
/// # Type Parameters
///
/// - `T`: recorded value type. `snapshot` additionally needs `T: Clone`.
/// - `C`: time source, [`SystemClock`] unless given via
///   [`with_clock`](Self::with_clock).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use listgauge::gauge::ListGauge;
///
/// let gauge = ListGauge::new("listGauge", 10, Duration::from_secs(60));
/// for i in 1..=15 {
///     gauge.add(format!("v{i}"));
/// }
///
/// let snapshot = gauge.snapshot();
/// assert_eq!(snapshot.len(), 10);
/// assert_eq!(snapshot.first().map(String::as_str), Some("v6"));
/// assert_eq!(snapshot.last().map(String::as_str), Some("v15"));
/// ```
#[derive(Debug)]
pub struct ListGauge<T, C = SystemClock> {
    name: Arc<str>,
    inner: Mutex<TimedBuffer<T>>,
    clock: C,
    #[cfg(feature = "metrics")]
    metrics: ListGaugeMetrics,
}

impl<T> ListGauge<T> {
    /// Creates an empty gauge timestamped by the system clock.
    ///
    /// Never fails: `max_items == 0` yields a gauge that retains nothing, and
    /// `Duration::MAX` disables age eviction.
    pub fn new(name: impl Into<String>, max_items: usize, max_staleness: Duration) -> Self {
        Self::with_clock(name, max_items, max_staleness, SystemClock)
    }

    /// Creates an empty gauge with the default bounds (1000 items, 60 minutes).
    pub fn with_defaults(name: impl Into<String>) -> Self {
        Self::from_config(name, ListGaugeConfig::default())
    }

    /// Creates an empty gauge from a deserialized configuration.
    pub fn from_config(name: impl Into<String>, config: ListGaugeConfig) -> Self {
        Self::from_config_with_clock(name, config, SystemClock)
    }
}

impl<T, C: Clock> ListGauge<T, C> {
    /// Creates an empty gauge timestamped by `clock`.
    pub fn with_clock(
        name: impl Into<String>,
        max_items: usize,
        max_staleness: Duration,
        clock: C,
    ) -> Self {
        Self::from_config_with_clock(name, ListGaugeConfig::new(max_items, max_staleness), clock)
    }

    /// Creates an empty gauge from `config`, timestamped by `clock`.
    pub fn from_config_with_clock(
        name: impl Into<String>,
        config: ListGaugeConfig,
        clock: C,
    ) -> Self {
        let name: Arc<str> = Arc::from(name.into());
        debug!(
            gauge = %name,
            max_items = config.max_items,
            max_staleness_ms = duration_to_millis(config.max_staleness),
            "created list gauge"
        );
        if config.max_items == 0 {
            debug!(gauge = %name, "max_items is 0; gauge will retain no values");
        }

        Self {
            name,
            inner: Mutex::new(TimedBuffer::new(config.max_items, config.max_staleness)),
            clock,
            #[cfg(feature = "metrics")]
            metrics: ListGaugeMetrics::new(),
        }
    }

    /// Returns the name assigned at construction.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the configured maximum number of retained values.
    pub fn max_items(&self) -> usize {
        self.inner.lock().max_items()
    }

    /// Returns the configured maximum value age.
    pub fn max_staleness(&self) -> Duration {
        self.inner.lock().max_staleness()
    }

    /// Returns the gauge's time source.
    #[inline]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Number of values currently held.
    ///
    /// Does not evict, so the count may include values that have gone stale
    /// since the last `add` or `snapshot`.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if no values are currently held (see [`len`](Self::len)).
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Records `value` with the current timestamp, then evicts.
    ///
    /// Older values may be dropped as a consequence.
    pub fn add(&self, value: T) {
        let outcome = {
            let mut buffer = self.inner.lock();
            let now_ms = self.clock.now_millis();
            buffer.push(value, now_ms)
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_add_call();
        self.after_evict("add", outcome);
    }

    /// Evicts stale values, then returns a copy of the rest, oldest first.
    ///
    /// The snapshot never observes later `add` calls or evictions.
    pub fn snapshot(&self) -> ListGaugeSnapshot<T>
    where
        T: Clone,
    {
        let (values, now_ms, outcome) = {
            let mut buffer = self.inner.lock();
            let now_ms = self.clock.now_millis();
            let outcome = buffer.evict(now_ms);
            let values: Arc<[T]> = buffer.iter().cloned().collect();
            (values, now_ms, outcome)
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_snapshot_call();
        self.after_evict("snapshot", outcome);

        ListGaugeSnapshot::new(Arc::clone(&self.name), values, now_ms)
    }

    /// Takes a snapshot and hands it to `exporter`.
    pub fn report<E>(&self, exporter: &E)
    where
        T: Clone,
        E: MetricsExporter<ListGaugeSnapshot<T>> + ?Sized,
    {
        exporter.export(&self.snapshot());
    }

    fn after_evict(&self, op: &'static str, outcome: EvictionOutcome) {
        #[cfg(feature = "metrics")]
        {
            self.metrics.record_evict_call();
            self.metrics.record_size_evictions(outcome.by_size as u64);
            self.metrics.record_age_evictions(outcome.by_age as u64);
        }

        if !outcome.is_empty() {
            trace!(
                gauge = %self.name,
                op,
                by_size = outcome.by_size,
                by_age = outcome.by_age,
                "evicted list gauge entries"
            );
        }
    }
}

#[cfg(feature = "metrics")]
impl<T, C: Clock> ListGauge<T, C> {
    /// Reads the gauge's self-instrumentation counters.
    pub fn metrics_snapshot(&self) -> ListGaugeMetricsSnapshot {
        let (len, max_items) = {
            let buffer = self.inner.lock();
            (buffer.len(), buffer.max_items())
        };
        self.metrics.snapshot_with(len, max_items)
    }
}

#[cfg(feature = "metrics")]
impl<T, C: Clock> MetricsSnapshotProvider<ListGaugeMetricsSnapshot> for ListGauge<T, C> {
    fn metrics_snapshot(&self) -> ListGaugeMetricsSnapshot {
        ListGauge::metrics_snapshot(self)
    }
}

#[cfg(feature = "metrics")]
impl<T, C: Clock> MetricsReset for ListGauge<T, C> {
    fn reset_metrics(&self) {
        self.metrics.reset_metrics();
    }
}

impl<T: Clone + Send, C: Clock> ListGaugeView<T> for ListGauge<T, C> {
    fn name(&self) -> &str {
        ListGauge::name(self)
    }

    fn snapshot(&self) -> ListGaugeSnapshot<T> {
        ListGauge::snapshot(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    const HOUR: Duration = Duration::from_secs(3600);

    fn manual_gauge<T>(
        max_items: usize,
        max_staleness: Duration,
    ) -> (ListGauge<T, Arc<ManualClock>>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(1_000));
        let gauge = ListGauge::with_clock("listGauge", max_items, max_staleness, Arc::clone(&clock));
        (gauge, clock)
    }

    #[test]
    fn basic_add_and_snapshot() {
        let gauge = ListGauge::new("listGauge", 10, HOUR);
        gauge.add(("key", "value"));

        assert_eq!(gauge.name(), "listGauge");
        let snapshot = gauge.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.contains(&("key", "value")));
    }

    #[test]
    fn defaults_are_1000_items_and_one_hour() {
        let gauge: ListGauge<u8> = ListGauge::with_defaults("g");
        assert_eq!(gauge.max_items(), 1000);
        assert_eq!(gauge.max_staleness(), HOUR);
    }

    #[test]
    fn size_enforcement_keeps_latest_in_order() {
        let gauge = ListGauge::new("listGauge", 10, HOUR);
        for i in (1..=15).rev() {
            gauge.add(format!("v{i}"));
        }

        let snapshot = gauge.snapshot();
        assert_eq!(snapshot.len(), 10);
        let expected: Vec<String> = (1..=10).rev().map(|i| format!("v{i}")).collect();
        assert_eq!(snapshot.to_vec(), expected);
    }

    #[test]
    fn snapshot_drops_values_that_aged_out() {
        let (gauge, clock) = manual_gauge(10, Duration::from_millis(500));
        gauge.add("a");
        clock.advance(Duration::from_millis(300));
        gauge.add("b");

        clock.advance(Duration::from_millis(201));
        assert_eq!(gauge.snapshot().as_slice(), &["b"]);

        clock.advance(Duration::from_millis(300));
        assert!(gauge.snapshot().is_empty());
    }

    #[test]
    fn snapshot_is_not_affected_by_later_adds() {
        let (gauge, clock) = manual_gauge(2, HOUR);
        gauge.add(1);
        gauge.add(2);
        let before = gauge.snapshot();

        clock.advance(Duration::from_millis(1));
        gauge.add(3);
        let after = gauge.snapshot();

        assert_eq!(before.as_slice(), &[1, 2]);
        assert_eq!(after.as_slice(), &[2, 3]);
        assert_eq!(before.taken_at_ms(), 1_000);
        assert_eq!(after.taken_at_ms(), 1_001);
    }

    #[test]
    fn repeated_snapshots_are_equal() {
        let (gauge, clock) = manual_gauge(5, Duration::from_secs(1));
        for i in 0..3 {
            gauge.add(i);
        }
        let first = gauge.snapshot();
        clock.advance(Duration::from_millis(10));
        let second = gauge.snapshot();
        assert_eq!(first.as_slice(), second.as_slice());
    }

    #[test]
    fn zero_capacity_is_always_empty() {
        let gauge = ListGauge::new("empty", 0, HOUR);
        for i in 0..100 {
            gauge.add(i);
        }
        assert!(gauge.snapshot().is_empty());
        assert!(gauge.is_empty());
    }

    #[test]
    fn zero_staleness_empties_after_a_millisecond() {
        let (gauge, clock) = manual_gauge(10, Duration::ZERO);
        gauge.add('x');
        assert_eq!(gauge.snapshot().len(), 1);
        clock.advance(Duration::from_millis(1));
        assert!(gauge.snapshot().is_empty());
    }

    #[test]
    fn backwards_clock_does_not_lose_new_values() {
        let (gauge, clock) = manual_gauge(10, Duration::from_millis(100));
        gauge.add("first");
        clock.set(200);
        gauge.add("second");

        assert_eq!(gauge.snapshot().as_slice(), &["first", "second"]);
    }

    #[test]
    fn with_clock_exposes_its_clock() {
        let (gauge, clock) = manual_gauge::<u8>(4, HOUR);
        assert_eq!(gauge.clock().now_millis(), 1_000);

        clock.advance(Duration::from_millis(25));
        assert_eq!(gauge.clock().now_millis(), 1_025);
        assert!(Arc::ptr_eq(gauge.clock(), &clock));
    }

    #[test]
    fn bounds_reflect_construction_arguments() {
        let gauge: ListGauge<u8> = ListGauge::new("g", 7, Duration::from_millis(250));
        assert_eq!(gauge.max_items(), 7);
        assert_eq!(gauge.max_staleness(), Duration::from_millis(250));
    }

    #[test]
    fn len_does_not_evict() {
        let (gauge, clock) = manual_gauge(10, Duration::from_millis(10));
        gauge.add(1);
        clock.advance(Duration::from_secs(1));
        assert_eq!(gauge.len(), 1);
        assert!(gauge.snapshot().is_empty());
        assert_eq!(gauge.len(), 0);
    }

    #[test]
    fn view_trait_object_reads_name_and_values() {
        let gauge: Arc<dyn ListGaugeView<u32>> = Arc::new(ListGauge::<u32>::new("view", 3, HOUR));
        assert_eq!(gauge.name(), "view");
        assert!(gauge.snapshot().is_empty());
    }

    #[test]
    fn report_passes_snapshot_to_exporter() {
        struct Capture(Mutex<Vec<(String, Vec<u32>)>>);

        impl MetricsExporter<ListGaugeSnapshot<u32>> for Capture {
            fn export(&self, snapshot: &ListGaugeSnapshot<u32>) {
                self.0
                    .lock()
                    .push((snapshot.name().to_string(), snapshot.to_vec()));
            }
        }

        let gauge = ListGauge::new("reported", 3, HOUR);
        gauge.add(7);
        gauge.add(8);

        let capture = Capture(Mutex::new(Vec::new()));
        gauge.report(&capture);
        assert_eq!(
            capture.0.lock().as_slice(),
            &[("reported".to_string(), vec![7, 8])]
        );
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn metrics_count_calls_and_evictions() {
        let (gauge, clock) = manual_gauge(3, Duration::from_millis(50));
        for i in 0..5 {
            gauge.add(i);
        }
        clock.advance(Duration::from_millis(51));
        let _ = gauge.snapshot();

        let metrics = gauge.metrics_snapshot();
        assert_eq!(metrics.add_calls, 5);
        assert_eq!(metrics.snapshot_calls, 1);
        assert_eq!(metrics.evict_calls, 6);
        assert_eq!(metrics.size_evictions, 2);
        assert_eq!(metrics.age_evictions, 3);
        assert_eq!(metrics.len, 0);
        assert_eq!(metrics.max_items, 3);

        gauge.reset_metrics();
        assert_eq!(gauge.metrics_snapshot().add_calls, 0);
    }
}
