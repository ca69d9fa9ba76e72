//! Error types for the listgauge library.
//!
//! ## Key Components
//!
//! - [`InvariantError`]: Returned by
//!   [`TimedBuffer::check_invariants`](crate::ds::TimedBuffer::check_invariants)
//!   when the buffer's size, age, or ordering guarantees do not hold.
//! - [`ConfigError`]: Returned by the fallible builder path
//!   ([`ListGaugeBuilder::try_build`](crate::config::ListGaugeBuilder::try_build))
//!   when a configuration could never produce a useful gauge.
//!
//! Gauge operations themselves (`add`, `snapshot`, `name`) are total and never
//! return either of these.
//!
//! ## Example Usage
//!
//! ```
//! use listgauge::config::ListGaugeBuilder;
//! use listgauge::error::ConfigError;
//!
//! let bad = ListGaugeBuilder::new("errors").max_items(0).try_build::<String>();
//! assert_eq!(bad.unwrap_err(), ConfigError::ZeroCapacity);
//!
//! // The infallible path honors the degenerate configuration instead.
//! let gauge = ListGaugeBuilder::new("errors").max_items(0).build::<String>();
//! gauge.add("dropped".to_string());
//! assert!(gauge.snapshot().is_empty());
//! ```

use thiserror::Error;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when a buffer's quiescent invariants are violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    /// More entries are retained than `max_items` allows.
    #[error("buffer holds {len} entries, exceeding max_items {max_items}")]
    CountExceeded { len: usize, max_items: usize },

    /// An entry is older than the configured staleness bound.
    #[error(
        "entry at index {index} is {age_ms}ms old, exceeding max staleness {max_staleness_ms}ms"
    )]
    StaleEntry {
        index: usize,
        age_ms: u64,
        max_staleness_ms: u64,
    },

    /// Entries are not sorted by insertion timestamp.
    #[error(
        "entry at index {index} has timestamp {timestamp_ms}, earlier than predecessor {previous_ms}"
    )]
    OutOfOrder {
        index: usize,
        timestamp_ms: u64,
        previous_ms: u64,
    },
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when gauge configuration parameters are rejected.
///
/// Only the fallible builder path produces this; `ListGauge::new` accepts
/// every configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The gauge name is empty or whitespace.
    #[error("gauge name must not be blank")]
    EmptyName,

    /// `max_items` is zero, so the gauge would never retain a value.
    #[error("max_items must be > 0 for a gauge that retains values")]
    ZeroCapacity,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invariant_display_names_the_bound() {
        let err = InvariantError::CountExceeded {
            len: 11,
            max_items: 10,
        };
        assert_eq!(
            err.to_string(),
            "buffer holds 11 entries, exceeding max_items 10"
        );

        let err = InvariantError::StaleEntry {
            index: 0,
            age_ms: 1500,
            max_staleness_ms: 1000,
        };
        assert!(err.to_string().contains("1500ms"));
        assert!(err.to_string().contains("1000ms"));
    }

    #[test]
    fn out_of_order_mentions_both_timestamps() {
        let err = InvariantError::OutOfOrder {
            index: 3,
            timestamp_ms: 40,
            previous_ms: 50,
        };
        let msg = err.to_string();
        assert!(msg.contains("index 3"));
        assert!(msg.contains("40"));
        assert!(msg.contains("50"));
    }

    #[test]
    fn config_display_shows_message() {
        assert_eq!(
            ConfigError::EmptyName.to_string(),
            "gauge name must not be blank"
        );
        assert!(ConfigError::ZeroCapacity.to_string().contains("max_items"));
    }

    #[test]
    fn errors_implement_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<InvariantError>();
        assert_error::<ConfigError>();
    }
}
