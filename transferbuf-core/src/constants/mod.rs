//! Constants for Transferbuf Core
//!
//! Centralized numeric values used by the transfer buffer and its
//! configuration layer. Units are part of every name.
//!
//! ## Organization
//!
//! - **Buffers**: Capacity targets, shrink policy and history retention
//! - **Time**: Time unit conversions used by reading timestamps

/// Buffer capacities, shrink policy and history retention defaults.
pub mod buffers;

/// Time unit conversions for reading timestamps.
pub mod time;

pub use buffers::{
    DEFAULT_TARGET_CAPACITY, SHRINK_FACTOR, DEFAULT_HISTORY_KEEP,
    MAX_CHANNEL_LABEL_LEN,
};

pub use time::{MS_PER_SECOND, US_PER_MS, US_PER_SECOND};
