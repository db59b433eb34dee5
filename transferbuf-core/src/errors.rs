//! Error Types for Transfer Configuration
//!
//! The transfer path itself is infallible: out-of-order and duplicate
//! readings are dropped and counted, never surfaced as errors. The only
//! fallible surface is turning a [`TransferConfig`](crate::config::TransferConfig)
//! into a buffer, which is where these errors come from.
//!
//! Errors are `Copy` and carry no heap data, so they can be returned from
//! embedded setup code without an allocator.
//!
//! ```rust
//! use transferbuf_core::{ConfigError, TransferBuffer, TransferConfig};
//!
//! let config = TransferConfig::default().with_target_capacity(0);
//! match TransferBuffer::from_config(&config) {
//!     Ok(_) => unreachable!(),
//!     Err(ConfigError::ZeroTargetCapacity) => {
//!         // fall back to defaults
//!     }
//!     Err(e) => panic!("unexpected: {}", e),
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A transfer buffer needs room for at least one reading
    #[error("Target capacity must be greater than zero")]
    ZeroTargetCapacity,

    /// Channel label does not fit the fixed label storage
    #[error("Channel label is {len} bytes, limit is {max}")]
    LabelTooLong {
        /// Length of the rejected label in bytes
        len: usize,
        /// Maximum label length in bytes
        max: usize,
    },

    /// Retained history would not fit the target capacity
    #[error("History keep {keep} exceeds target capacity {target_capacity}")]
    HistoryExceedsCapacity {
        /// Requested number of history readings
        keep: usize,
        /// Configured target capacity
        target_capacity: usize,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::ZeroTargetCapacity =>
                defmt::write!(fmt, "Zero target capacity"),
            Self::LabelTooLong { len, max } =>
                defmt::write!(fmt, "Label {} bytes, limit {}", len, max),
            Self::HistoryExceedsCapacity { keep, target_capacity } =>
                defmt::write!(fmt, "History {} exceeds capacity {}", keep, target_capacity),
        }
    }
}
