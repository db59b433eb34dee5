//! Time-stamped measurement readings
//!
//! A [`Reading`] is a value, the time it was acquired and a soft-delete flag.
//! The flag lets a transfer buffer mark readings as consumed inside the
//! source without reallocating or shifting the source storage.

use crate::time::{ReadingTime, Timestamp};
use crate::traits::TimeSource;

/// A single measurement
///
/// Readings are `Copy`; a transfer buffer stores its own copies and only
/// ever writes the delete flag of the source's originals.
///
/// `PartialEq` compares every field, the delete flag included. Duplicate
/// suppression looks at [`value`](Reading::value) alone.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reading {
    value: f64,
    time: ReadingTime,
    #[cfg_attr(feature = "serde", serde(skip))]
    deleted: bool,
}

impl Reading {
    /// Create a reading acquired at `time`
    pub const fn new(value: f64, time: ReadingTime) -> Self {
        Self {
            value,
            time,
            deleted: false,
        }
    }

    /// Create a reading from a millisecond timestamp
    pub const fn at_millis(value: f64, ms: Timestamp) -> Self {
        Self::new(value, ReadingTime::from_millis(ms))
    }

    /// Create a reading stamped with the current time of `clock`
    pub fn stamped<T: TimeSource + ?Sized>(value: f64, clock: &T) -> Self {
        Self::new(value, clock.now())
    }

    /// Measured value
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Acquisition time
    pub fn time(&self) -> ReadingTime {
        self.time
    }

    /// Acquisition time in milliseconds (sub-millisecond part truncated)
    pub fn time_ms(&self) -> Timestamp {
        self.time.as_millis()
    }

    /// Whether the reading has been consumed
    pub fn deleted(&self) -> bool {
        self.deleted
    }

    /// Mark the reading as consumed
    pub fn mark_delete(&mut self) {
        self.deleted = true;
    }

    /// Clear the consumed mark
    pub fn undelete(&mut self) {
        self.deleted = false;
    }
}
