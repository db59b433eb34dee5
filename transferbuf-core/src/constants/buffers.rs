//! Buffer Sizes and Memory Constraints
//!
//! Capacity targets and retention defaults for the transfer buffer.

// ===== CAPACITY =====

/// Default target capacity of a transfer buffer (readings).
///
/// Sized for one channel on a gateway class device:
/// - 4096 readings × 24 bytes/reading = ~96KB reserved up front
/// - Covers more than an hour of 1Hz data if the uplink is down
pub const DEFAULT_TARGET_CAPACITY: usize = 4096;

/// Growth factor above the target capacity that triggers compaction.
///
/// After a discard, storage whose capacity exceeds
/// `SHRINK_FACTOR * target_capacity` is reallocated back down to the target.
/// Steady-state appends never shrink.
pub const SHRINK_FACTOR: usize = 4;

// ===== HISTORY =====

/// Number of transmitted readings retained as history on discard.
///
/// One reading is enough to keep the timestamp and duplicate baseline for
/// the next append.
pub const DEFAULT_HISTORY_KEEP: usize = 1;

// ===== LABELS =====

/// Maximum length of a channel label in bytes.
///
/// Labels live in a `heapless::String` so configuration stays allocation free.
pub const MAX_CHANNEL_LABEL_LEN: usize = 32;
