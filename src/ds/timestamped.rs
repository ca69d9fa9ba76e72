//! A value paired with the millisecond instant it entered a buffer.

/// Immutable `(value, timestamp_ms)` pair stored by
/// [`TimedBuffer`](crate::ds::TimedBuffer).
///
/// Timestamps are milliseconds on whatever timeline the owning buffer's
/// caller uses (epoch millis for [`SystemClock`](crate::clock::SystemClock)).
///
/// # Example
///
/// ```
/// use listgauge::ds::TimestampedValue;
///
/// let entry = TimestampedValue::new("timeout", 1_700_000_000_000);
/// assert_eq!(entry.value(), &"timeout");
/// assert_eq!(entry.timestamp_ms(), 1_700_000_000_000);
/// assert_eq!(entry.into_value(), "timeout");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimestampedValue<T> {
    value: T,
    timestamp_ms: u64,
}

impl<T> TimestampedValue<T> {
    /// Pairs `value` with `timestamp_ms`.
    #[inline]
    pub fn new(value: T, timestamp_ms: u64) -> Self {
        Self {
            value,
            timestamp_ms,
        }
    }

    /// Returns the stored value.
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Returns the insertion timestamp in milliseconds.
    #[inline]
    pub fn timestamp_ms(&self) -> u64 {
        self.timestamp_ms
    }

    /// Milliseconds elapsed between insertion and `now_ms`.
    ///
    /// Saturates at zero when `now_ms` precedes the insertion timestamp.
    #[inline]
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.timestamp_ms)
    }

    /// Consumes the entry, returning the value.
    #[inline]
    pub fn into_value(self) -> T {
        self.value
    }
}
