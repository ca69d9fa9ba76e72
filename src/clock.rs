//! Millisecond time sources for timestamping and staleness checks.
//!
//! [`ListGauge`](crate::gauge::ListGauge) reads "now" through the [`Clock`]
//! trait on every `add` and `snapshot`. [`SystemClock`] is the production
//! default (wall-clock epoch milliseconds); [`ManualClock`] is driven
//! explicitly and makes age eviction testable without sleeping.
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use listgauge::clock::ManualClock;
//! use listgauge::gauge::ListGauge;
//!
//! let clock = Arc::new(ManualClock::new(0));
//! let gauge = ListGauge::with_clock("latency", 10, Duration::from_secs(1), Arc::clone(&clock));
//!
//! gauge.add(42u64);
//! clock.advance(Duration::from_millis(1_001));
//! assert!(gauge.snapshot().is_empty());
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::ds::timed_buffer::duration_to_millis;

/// Source of the current time in milliseconds.
pub trait Clock: Send + Sync {
    /// Returns the current instant in milliseconds.
    fn now_millis(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    #[inline]
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }
}

/// Wall clock reporting milliseconds since the Unix epoch.
///
/// A system time before the epoch reads as `0`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(duration_to_millis)
            .unwrap_or(0)
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: AtomicU64,
}

impl ManualClock {
    /// Creates a clock reading `start_ms`.
    pub fn new(start_ms: u64) -> Self {
        Self {
            now_ms: AtomicU64::new(start_ms),
        }
    }

    /// Sets the current reading. Moving backwards is allowed.
    pub fn set(&self, now_ms: u64) {
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }

    /// Moves the clock forward by `by`, saturating at `u64::MAX`.
    pub fn advance(&self, by: Duration) {
        let by_ms = duration_to_millis(by);
        let _ = self
            .now_ms
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |now| {
                Some(now.saturating_add(by_ms))
            });
    }
}

impl Clock for ManualClock {
    #[inline]
    fn now_millis(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}
