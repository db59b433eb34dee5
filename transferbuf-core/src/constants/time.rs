//! Time-Related Constants
//!
//! Conversion factors between the second/microsecond representation of
//! reading timestamps and the millisecond view used for comparisons.

// ===== TIME UNIT CONVERSIONS =====

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

/// Microseconds per millisecond.
pub const US_PER_MS: u64 = 1000;

/// Microseconds per second.
pub const US_PER_SECOND: u64 = 1_000_000;
