//! Size- and age-bounded FIFO buffer of timestamped values.
//!
//! `TimedBuffer` is the single-threaded core behind
//! [`ListGauge`](crate::gauge::ListGauge). It owns an insertion-ordered queue
//! of [`TimestampedValue`]s and trims it from the head under two independent
//! bounds: a maximum entry count and a maximum entry age. The buffer never
//! reads a clock; every time-dependent call takes `now_ms` from the caller.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                 TimedBuffer<T> (max_items = 4, max_staleness = 100ms)       │
//! │                                                                             │
//! │   entries: VecDeque<TimestampedValue<T>>                                    │
//! │                                                                             │
//! │     head (oldest)                                       tail (newest)       │
//! │       ┌─────────┬─────────┬─────────┬─────────┬─────────┐                   │
//! │       │ a @ 880 │ b @ 910 │ c @ 950 │ d @ 990 │ e @ 1000│  ◄── push(e,1000) │
//! │       └─────────┴─────────┴─────────┴─────────┴─────────┘                   │
//! │                                                                             │
//! │   evict(now = 1000)                                                         │
//! │   ─────────────────                                                         │
//! │     1. size:  len 5 > 4        → pop a                                      │
//! │     2. age:   1000 - 910 = 90  → b is fresh, stop scanning                  │
//! │                                                                             │
//! │       ┌─────────┬─────────┬─────────┬─────────┐                             │
//! │       │ b @ 910 │ c @ 950 │ d @ 990 │ e @ 1000│                             │
//! │       └─────────┴─────────┴─────────┴─────────┘                             │
//! │                                                                             │
//! │   evict(now = 1060)                                                         │
//! │     1. size:  len 4 ≤ 4        → nothing                                    │
//! │     2. age:   1060 - 910 = 150 → pop b                                      │
//! │               1060 - 950 = 110 → pop c                                      │
//! │               1060 - 990 = 70  → stop                                       │
//! │                                                                             │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Timestamps are non-decreasing from head to tail, so the age pass only ever
//! inspects the head and stops at the first fresh entry.
//!
//! ## Operations
//!
//! | Operation          | Description                              | Complexity        |
//! |--------------------|------------------------------------------|-------------------|
//! | [`push`]           | Append at tail, then evict               | O(1) amortized    |
//! | [`evict`]          | Size pass, then age pass                 | O(evicted)        |
//! | [`values`]         | Clone values, oldest first               | O(n)              |
//! | [`iter`]           | Borrow values, oldest first              | O(n)              |
//! | [`check_invariants`] | Verify count, age, and order bounds    | O(n)              |
//!
//! [`push`]: TimedBuffer::push
//! [`evict`]: TimedBuffer::evict
//! [`values`]: TimedBuffer::values
//! [`iter`]: TimedBuffer::iter
//! [`check_invariants`]: TimedBuffer::check_invariants
//!
//! ## Degenerate bounds
//!
//! - `max_items == 0`: every push is evicted by the size pass before it returns.
//! - `max_staleness == Duration::ZERO`: an entry survives only while `now_ms`
//!   equals its insertion millisecond.
//! - `max_staleness` beyond `u64::MAX` milliseconds (e.g. `Duration::MAX`)
//!   saturates and disables age eviction.
//!
//! ## Example Usage
//!
//! ```
//! use std::time::Duration;
//! use listgauge::ds::TimedBuffer;
//!
//! let mut buffer = TimedBuffer::new(3, Duration::from_millis(100));
//! for (i, now) in [(1, 0), (2, 10), (3, 20), (4, 30)] {
//!     buffer.push(i, now);
//! }
//! assert_eq!(buffer.values(), vec![2, 3, 4]);
//!
//! // 115ms later the first two are stale.
//! let outcome = buffer.evict(125);
//! assert_eq!(outcome.by_age, 2);
//! assert_eq!(buffer.values(), vec![4]);
//! ```
//!
//! ## Thread Safety
//!
//! `TimedBuffer` is not thread-safe. `ListGauge` wraps it in a
//! `parking_lot::Mutex` and supplies timestamps from a [`Clock`](crate::clock::Clock).

use std::collections::VecDeque;
use std::time::Duration;

use crate::ds::timestamped::TimestampedValue;
use crate::error::InvariantError;

/// Number of entries removed by one eviction pass, split by stage.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EvictionOutcome {
    /// Entries dropped because the buffer held more than `max_items`.
    pub by_size: usize,
    /// Entries dropped because they were older than `max_staleness`.
    pub by_age: usize,
}

impl EvictionOutcome {
    /// Total entries removed.
    #[inline]
    pub fn total(&self) -> usize {
        self.by_size + self.by_age
    }

    /// Returns `true` if nothing was removed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Insertion-ordered buffer bounded by entry count and entry age.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use listgauge::ds::TimedBuffer;
///
/// let mut buffer = TimedBuffer::new(10, Duration::from_secs(60));
/// for i in 1..=15 {
///     buffer.push(format!("v{i}"), 1_000);
/// }
/// let expected: Vec<String> = (6..=15).map(|i| format!("v{i}")).collect();
/// assert_eq!(buffer.values(), expected);
/// ```
#[derive(Debug, Clone)]
pub struct TimedBuffer<T> {
    entries: VecDeque<TimestampedValue<T>>,
    max_items: usize,
    max_staleness: Duration,
    max_staleness_ms: u64,
}

/// Converts a staleness bound to whole milliseconds, saturating at `u64::MAX`.
#[inline]
pub(crate) fn duration_to_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl<T> TimedBuffer<T> {
    /// Creates an empty buffer with the given bounds.
    ///
    /// No allocation happens until the first push.
    pub fn new(max_items: usize, max_staleness: Duration) -> Self {
        Self {
            entries: VecDeque::new(),
            max_items,
            max_staleness,
            max_staleness_ms: duration_to_millis(max_staleness),
        }
    }

    /// Returns the configured maximum entry count.
    #[inline]
    pub fn max_items(&self) -> usize {
        self.max_items
    }

    /// Returns the configured maximum entry age.
    #[inline]
    pub fn max_staleness(&self) -> Duration {
        self.max_staleness
    }

    /// Returns the number of retained entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entries are retained.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Timestamp of the head (oldest) entry.
    pub fn oldest_timestamp(&self) -> Option<u64> {
        self.entries.front().map(TimestampedValue::timestamp_ms)
    }

    /// Timestamp of the tail (newest) entry.
    pub fn newest_timestamp(&self) -> Option<u64> {
        self.entries.back().map(TimestampedValue::timestamp_ms)
    }

    /// Appends `value` at the tail stamped with `now_ms`, then evicts.
    ///
    /// The stamp is raised to the current tail's timestamp if `now_ms` is
    /// earlier, so entries stay sorted even when the caller's clock steps
    /// backwards.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use listgauge::ds::TimedBuffer;
    ///
    /// let mut buffer = TimedBuffer::new(2, Duration::from_secs(1));
    /// buffer.push('a', 10);
    /// buffer.push('b', 20);
    /// let outcome = buffer.push('c', 30);
    /// assert_eq!(outcome.by_size, 1);
    /// assert_eq!(buffer.values(), vec!['b', 'c']);
    /// ```
    pub fn push(&mut self, value: T, now_ms: u64) -> EvictionOutcome {
        let timestamp_ms = self
            .newest_timestamp()
            .map_or(now_ms, |newest| newest.max(now_ms));
        self.entries
            .push_back(TimestampedValue::new(value, timestamp_ms));
        self.evict(now_ms)
    }

    /// Runs the size pass followed by the age pass.
    pub fn evict(&mut self, now_ms: u64) -> EvictionOutcome {
        let by_size = self.evict_by_size();
        let by_age = self.evict_by_age(now_ms);
        EvictionOutcome { by_size, by_age }
    }

    /// Drops head entries until at most `max_items` remain.
    ///
    /// Returns the number of entries removed.
    pub fn evict_by_size(&mut self) -> usize {
        let excess = self.entries.len().saturating_sub(self.max_items);
        self.entries.drain(..excess);
        excess
    }

    /// Drops head entries older than `max_staleness` relative to `now_ms`.
    ///
    /// Stops at the first entry that is still fresh. Returns the number of
    /// entries removed.
    pub fn evict_by_age(&mut self, now_ms: u64) -> usize {
        let mut evicted = 0;
        while let Some(head) = self.entries.front() {
            if head.age_ms(now_ms) <= self.max_staleness_ms {
                break;
            }
            self.entries.pop_front();
            evicted += 1;
        }
        evicted
    }

    /// Iterates retained values from oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator + '_ {
        self.entries.iter().map(TimestampedValue::value)
    }

    /// Iterates retained entries (value plus timestamp) from oldest to newest.
    pub fn entries(
        &self,
    ) -> impl DoubleEndedIterator<Item = &TimestampedValue<T>> + ExactSizeIterator + '_ {
        self.entries.iter()
    }

    /// Clones retained values into a `Vec`, oldest first.
    pub fn values(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Verifies the quiescent invariants relative to `now_ms`.
    ///
    /// Holds after any `push` or `evict` evaluated at the same `now_ms`:
    /// at most `max_items` entries, none older than `max_staleness`, and
    /// timestamps non-decreasing from head to tail.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use listgauge::ds::TimedBuffer;
    /// use listgauge::error::InvariantError;
    ///
    /// let mut buffer = TimedBuffer::new(4, Duration::from_millis(50));
    /// buffer.push(1, 100);
    /// assert!(buffer.check_invariants(100).is_ok());
    ///
    /// // Time passed without an evicting call.
    /// assert!(matches!(
    ///     buffer.check_invariants(200),
    ///     Err(InvariantError::StaleEntry { index: 0, .. })
    /// ));
    /// ```
    pub fn check_invariants(&self, now_ms: u64) -> Result<(), InvariantError> {
        if self.entries.len() > self.max_items {
            return Err(InvariantError::CountExceeded {
                len: self.entries.len(),
                max_items: self.max_items,
            });
        }

        let mut previous_ms: Option<u64> = None;
        for (index, entry) in self.entries.iter().enumerate() {
            let timestamp_ms = entry.timestamp_ms();
            match previous_ms {
                Some(previous_ms) if timestamp_ms < previous_ms => {
                    return Err(InvariantError::OutOfOrder {
                        index,
                        timestamp_ms,
                        previous_ms,
                    });
                },
                _ => {},
            }

            let age_ms = entry.age_ms(now_ms);
            if age_ms > self.max_staleness_ms {
                return Err(InvariantError::StaleEntry {
                    index,
                    age_ms,
                    max_staleness_ms: self.max_staleness_ms,
                });
            }
            previous_ms = Some(timestamp_ms);
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self, now_ms: u64) {
        if let Err(err) = self.check_invariants(now_ms) {
            panic!("TimedBuffer invariant violated: {err}");
        }
    }
}
