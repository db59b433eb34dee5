//! Per-channel transfer configuration
//!
//! Groups the parameters a transmitter passes to its transfer buffer on
//! every cycle: the channel label used in diagnostics, the capacity target,
//! the minimum spacing between identical readings and the history depth.
//!
//! ```rust
//! use transferbuf_core::{TransferBuffer, TransferConfig};
//!
//! let config = TransferConfig::default()
//!     .with_channel("boiler/temp")?
//!     .with_target_capacity(256)
//!     .with_min_ms_between_duplicates(30_000);
//!
//! let buffer = TransferBuffer::from_config(&config)?;
//! assert_eq!(buffer.target_capacity(), 256);
//! # Ok::<(), transferbuf_core::ConfigError>(())
//! ```

use heapless::String;

use crate::constants::{DEFAULT_HISTORY_KEEP, DEFAULT_TARGET_CAPACITY, MAX_CHANNEL_LABEL_LEN};
use crate::errors::{ConfigError, ConfigResult};

/// Channel label storage
pub type ChannelLabel = String<MAX_CHANNEL_LABEL_LEN>;

/// Transfer parameters for one channel
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TransferConfig {
    /// Label attached to diagnostics
    channel: ChannelLabel,

    /// Soft ceiling on reserved storage (readings)
    target_capacity: usize,

    /// Identical consecutive values closer than this are dropped (ms)
    min_ms_between_duplicates: u64,

    /// Readings kept as history on discard
    history_keep: usize,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            channel: ChannelLabel::new(),
            target_capacity: DEFAULT_TARGET_CAPACITY,
            // Only strictly older or simultaneous readings are dropped
            min_ms_between_duplicates: 0,
            history_keep: DEFAULT_HISTORY_KEEP,
        }
    }
}

impl TransferConfig {
    /// Set the channel label
    ///
    /// Fails if the label is longer than [`MAX_CHANNEL_LABEL_LEN`] bytes.
    pub fn with_channel(mut self, label: &str) -> ConfigResult<Self> {
        let mut channel = ChannelLabel::new();
        channel.push_str(label).map_err(|_| ConfigError::LabelTooLong {
            len: label.len(),
            max: MAX_CHANNEL_LABEL_LEN,
        })?;
        self.channel = channel;
        Ok(self)
    }

    /// Set the target capacity
    pub fn with_target_capacity(mut self, target_capacity: usize) -> Self {
        self.target_capacity = target_capacity;
        self
    }

    /// Set the minimum spacing between identical consecutive readings
    pub fn with_min_ms_between_duplicates(mut self, ms: u64) -> Self {
        self.min_ms_between_duplicates = ms;
        self
    }

    /// Set how many transmitted readings stay behind as history
    pub fn with_history_keep(mut self, keep: usize) -> Self {
        self.history_keep = keep;
        self
    }

    /// Channel label
    pub fn channel(&self) -> &str {
        self.channel.as_str()
    }

    /// Target capacity in readings
    pub fn target_capacity(&self) -> usize {
        self.target_capacity
    }

    /// Minimum spacing between identical consecutive readings (ms)
    pub fn min_ms_between_duplicates(&self) -> u64 {
        self.min_ms_between_duplicates
    }

    /// History depth kept on discard
    pub fn history_keep(&self) -> usize {
        self.history_keep
    }

    /// Check the parameters are usable
    pub fn validate(&self) -> ConfigResult<()> {
        if self.target_capacity == 0 {
            return Err(ConfigError::ZeroTargetCapacity);
        }

        if self.history_keep > self.target_capacity {
            return Err(ConfigError::HistoryExceedsCapacity {
                keep: self.history_keep,
                target_capacity: self.target_capacity,
            });
        }

        Ok(())
    }
}
