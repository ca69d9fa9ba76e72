pub mod timed_buffer;
pub mod timestamped;

pub use timed_buffer::{EvictionOutcome, TimedBuffer};
pub use timestamped::TimestampedValue;
