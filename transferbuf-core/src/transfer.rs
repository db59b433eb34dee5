//! History-Retaining Transfer Buffer
//!
//! ## Overview
//!
//! A [`TransferBuffer`] stages readings between a producer-side
//! [`ReadingSource`] and a transmitter. Each cycle the transmitter:
//!
//! 1. pulls everything new out of the source with [`TransferBuffer::append`],
//! 2. sends the live readings (`iter()`),
//! 3. calls [`TransferBuffer::discard`] with the number actually sent.
//!
//! ## Memory Layout
//!
//! One growable vector holds two contiguous regions:
//!
//! ```text
//! storage:  ┌─────┬─────┬─────┬─────┬─────┬─────┐
//!           │ h0  │ h1  │ r0  │ r1  │ r2  │ r3  │
//!           └─────┴─────┴─────┴─────┴─────┴─────┘
//!           └ history ┘ └────────── live ───────┘
//!                       ↑
//!                  history_len
//! ```
//!
//! The history region holds readings that were already transmitted. It is
//! invisible through iteration and exists only so that the next append can
//! compare incoming readings against the last transmitted one. A discard
//! moves the boundary forward and erases what falls out of the history
//! window, without copying the remaining elements into a second container.
//!
//! ## Admission Rule
//!
//! Readings are admitted in source order against the last stored element
//! `prev` (history or live). With `dt = r.time_ms() - prev.time_ms()`:
//!
//! ```text
//! accept  ⇔  dt > 0  ∧  (dt ≥ min_ms_between_duplicates  ∨  r.value ≠ prev.value)
//! ```
//!
//! A changed value is always accepted once time advanced; an unchanged value
//! only after the minimum spacing. Every inspected reading is marked deleted
//! in the source whether it was admitted or not, so rejected readings are
//! never re-examined.
//!
//! The monotonicity baseline lives in memory only. A restarted process
//! starts with an empty buffer and accepts its first reading unconditionally.
//!
//! ## Usage Example
//!
//! ```rust
//! use transferbuf_core::{Reading, SourceBuffer, TransferBuffer};
//!
//! let source = SourceBuffer::new();
//! source.push(Reading::at_millis(1.0, 1000));
//! source.push(Reading::at_millis(1.0, 1500)); // duplicate, too close
//! source.push(Reading::at_millis(2.0, 1600)); // changed value
//!
//! let mut buffer = TransferBuffer::with_target_capacity(64);
//! assert_eq!(buffer.append(&source, "meter", 1000), 2);
//!
//! // transmit buffer.iter() ... then drop what was sent
//! assert_eq!(buffer.discard(2, 1), 2);
//! assert!(buffer.is_empty());
//! assert_eq!(buffer.history().len(), 1);
//! ```

use core::convert::Infallible;
use core::slice;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::config::TransferConfig;
use crate::constants::{DEFAULT_HISTORY_KEEP, DEFAULT_TARGET_CAPACITY, SHRINK_FACTOR};
use crate::errors::ConfigResult;
use crate::reading::Reading;
use crate::traits::ReadingSource;

/// Transfer counters
///
/// Monotonic since creation or the last [`TransferBuffer::reset_stats`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TransferStats {
    /// Readings admitted by append
    pub appended: u64,
    /// Readings dropped because their timestamp did not advance
    pub rejected_stale: u64,
    /// Unchanged readings dropped before the minimum spacing elapsed
    pub rejected_duplicate: u64,
    /// Readings removed from the live region by discard
    pub discarded: u64,
    /// Storage compactions
    pub shrinks: u64,
}

/// Outcome of comparing a candidate against the last stored reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Admission {
    Accept,
    Stale,
    Duplicate,
}

impl Admission {
    fn judge(prev: &Reading, candidate: &Reading, min_ms_between_duplicates: u64) -> Self {
        let prev_ms = prev.time_ms();
        let t = candidate.time_ms();

        // dt == 0 happens for readings less than a millisecond apart
        if t <= prev_ms {
            return Self::Stale;
        }

        if t - prev_ms < min_ms_between_duplicates && candidate.value() == prev.value() {
            Self::Duplicate
        } else {
            Self::Accept
        }
    }
}

/// Bounded staging buffer with a retained history tail
///
/// ## Internal Invariants
///
/// - `history_len <= storage.len()`
/// - the live region is exactly `storage[history_len..]`
/// - timestamps across the whole storage are strictly increasing
///
/// ## Thread Safety
///
/// Driven by one consumer. Only [`append`](Self::append) touches shared
/// state, and it does so under the source's lock.
#[derive(Debug, Clone)]
pub struct TransferBuffer {
    storage: Vec<Reading>,
    history_len: usize,
    target_capacity: usize,
    stats: TransferStats,
}

impl Default for TransferBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TransferBuffer {
    /// Create a buffer with [`DEFAULT_TARGET_CAPACITY`]
    pub fn new() -> Self {
        Self::with_target_capacity(DEFAULT_TARGET_CAPACITY)
    }

    /// Create a buffer and reserve `target_capacity` readings up front
    pub fn with_target_capacity(target_capacity: usize) -> Self {
        Self {
            storage: Vec::with_capacity(target_capacity),
            history_len: 0,
            target_capacity,
            stats: TransferStats::default(),
        }
    }

    /// Create a buffer from a validated channel configuration
    pub fn from_config(config: &TransferConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::with_target_capacity(config.target_capacity()))
    }

    // ===== LIVE VIEW =====

    /// Number of live readings
    pub fn len(&self) -> usize {
        self.storage.len() - self.history_len
    }

    /// Check if no readings are pending
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live readings, oldest first
    pub fn as_slice(&self) -> &[Reading] {
        &self.storage[self.history_len..]
    }

    /// Iterate over live readings, oldest first
    pub fn iter(&self) -> slice::Iter<'_, Reading> {
        self.as_slice().iter()
    }

    /// Live reading at `index`
    pub fn get(&self, index: usize) -> Option<&Reading> {
        self.as_slice().get(index)
    }

    /// Oldest live reading
    ///
    /// # Panics
    ///
    /// Panics if the buffer is empty.
    pub fn front(&self) -> &Reading {
        assert!(!self.is_empty(), "front() on empty TransferBuffer");
        &self.storage[self.history_len]
    }

    /// Newest live reading
    ///
    /// # Panics
    ///
    /// Panics if the buffer is empty.
    pub fn back(&self) -> &Reading {
        assert!(!self.is_empty(), "back() on empty TransferBuffer");
        &self.storage[self.storage.len() - 1]
    }

    // ===== HISTORY =====

    /// Already transmitted readings kept for comparison
    pub fn history(&self) -> &[Reading] {
        &self.storage[..self.history_len]
    }

    /// Number of history readings
    pub fn history_len(&self) -> usize {
        self.history_len
    }

    /// Last stored reading, history included
    ///
    /// This is the baseline the next append compares against.
    pub fn last_stored(&self) -> Option<&Reading> {
        self.storage.last()
    }

    // ===== CAPACITY =====

    /// Room in the live region before reallocation
    pub fn capacity(&self) -> usize {
        self.storage.capacity() - self.history_len
    }

    /// Soft ceiling on reserved storage
    pub fn target_capacity(&self) -> usize {
        self.target_capacity
    }

    /// Make room for at least `n` live readings
    pub fn reserve(&mut self, n: usize) {
        let wanted = n.saturating_add(self.history_len);
        self.storage.reserve(wanted.saturating_sub(self.storage.len()));
    }

    /// Reallocate storage down to the target capacity
    ///
    /// No-op unless `capacity()` exceeds the target. Stored readings (history
    /// and live) are kept; if they outnumber the target the new storage is
    /// sized to hold exactly them.
    pub fn shrink_to_target_capacity(&mut self) {
        if self.capacity() <= self.target_capacity {
            return;
        }

        let wanted = self.target_capacity.max(self.storage.len());
        if wanted >= self.storage.capacity() {
            return;
        }

        let before = self.storage.capacity();
        self.storage.shrink_to(wanted);
        self.stats.shrinks += 1;
        log_trace!("shrink: capacity {} -> {}", before, self.storage.capacity());
    }

    // ===== TRANSFER =====

    /// Copy unconsumed readings from `source` and mark them deleted
    ///
    /// Holds the source lock for the whole scan. Every reading that was not
    /// deleted when the scan reached it is deleted afterwards, admitted or
    /// not. Consecutive readings with the same value closer than
    /// `min_ms_between_duplicates` are dropped; pass 0 to only drop readings
    /// whose timestamp does not advance.
    ///
    /// Returns the number of readings added to the live region.
    pub fn append<S>(&mut self, source: &S, channel: &str, min_ms_between_duplicates: u64) -> usize
    where
        S: ReadingSource + ?Sized,
    {
        let mut readings = source.lock();
        self.scan(&mut readings, channel, min_ms_between_duplicates)
    }

    /// Like [`append`](Self::append), without waiting for the source lock
    ///
    /// Returns `WouldBlock` if the producer currently holds the lock.
    pub fn try_append<S>(
        &mut self,
        source: &S,
        channel: &str,
        min_ms_between_duplicates: u64,
    ) -> nb::Result<usize, Infallible>
    where
        S: ReadingSource + ?Sized,
    {
        let mut readings = source.try_lock().ok_or(nb::Error::WouldBlock)?;
        Ok(self.scan(&mut readings, channel, min_ms_between_duplicates))
    }

    /// [`append`](Self::append) with the channel label and spacing from `config`
    pub fn append_configured<S>(&mut self, source: &S, config: &TransferConfig) -> usize
    where
        S: ReadingSource + ?Sized,
    {
        self.append(source, config.channel(), config.min_ms_between_duplicates())
    }

    fn scan(&mut self, readings: &mut [Reading], channel: &str, min_ms_between_duplicates: u64) -> usize {
        let old_len = self.storage.len();
        let mut scanned = 0usize;

        for reading in readings.iter_mut().filter(|r| !r.deleted()) {
            scanned += 1;

            // An empty buffer has no baseline; the first reading becomes it
            let admission = match self.storage.last() {
                None => Admission::Accept,
                Some(prev) => {
                    log_debug!("[{}] compare: {} {}", channel, prev.time_ms(), reading.time_ms());
                    Admission::judge(prev, reading, min_ms_between_duplicates)
                }
            };

            match admission {
                Admission::Accept => {
                    self.storage.push(*reading);
                    self.stats.appended += 1;
                }
                Admission::Stale => self.stats.rejected_stale += 1,
                Admission::Duplicate => self.stats.rejected_duplicate += 1,
            }

            reading.mark_delete();
        }

        let added = self.storage.len() - old_len;
        if scanned > 0 {
            log_debug!("[{}] appended {} of {} readings", channel, added, scanned);
        }
        added
    }

    /// Drop up to `n` readings from the front of the live region
    ///
    /// The last `keep` stored readings up to the cut (fewer if fewer exist)
    /// stay behind as history, so earlier history can survive alongside the
    /// newly dropped readings; everything older is erased. Readings beyond
    /// the first `n` stay live and never become history. Compacts storage when its capacity grew past
    /// [`SHRINK_FACTOR`] times the target.
    ///
    /// Returns the number of readings removed from the live region.
    pub fn discard(&mut self, n: usize, keep: usize) -> usize {
        let removed = n.min(self.len());
        let cut = self.history_len + removed;
        let history_len = keep.min(cut);

        self.storage.drain(..cut - history_len);
        self.history_len = history_len;
        self.stats.discarded += removed as u64;
        log_trace!("discard: {} removed, {} kept as history", removed, history_len);

        // avoid permanent large memory footprint
        if self.capacity() > self.target_capacity.saturating_mul(SHRINK_FACTOR) {
            self.shrink_to_target_capacity();
        }
        removed
    }

    /// Drop every live reading, keeping [`DEFAULT_HISTORY_KEEP`] as history
    pub fn discard_all(&mut self) -> usize {
        self.discard(usize::MAX, DEFAULT_HISTORY_KEEP)
    }

    /// [`discard`](Self::discard) keeping the history depth from `config`
    pub fn discard_configured(&mut self, n: usize, config: &TransferConfig) -> usize {
        self.discard(n, config.history_keep())
    }

    /// Remove all readings, history included
    ///
    /// The next append starts from an empty baseline.
    pub fn clear(&mut self) {
        self.storage.clear();
        self.history_len = 0;
    }

    // ===== STATISTICS =====

    /// Transfer counters
    pub fn stats(&self) -> &TransferStats {
        &self.stats
    }

    /// Zero the transfer counters
    pub fn reset_stats(&mut self) {
        self.stats = TransferStats::default();
    }
}

impl<'a> IntoIterator for &'a TransferBuffer {
    type Item = &'a Reading;
    type IntoIter = slice::Iter<'a, Reading>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod admission_tests {
    use super::*;

    #[test]
    fn non_advancing_time_is_stale() {
        let prev = Reading::at_millis(1.0, 2000);
        assert_eq!(Admission::judge(&prev, &Reading::at_millis(5.0, 2000), 0), Admission::Stale);
        assert_eq!(Admission::judge(&prev, &Reading::at_millis(5.0, 1999), 0), Admission::Stale);
    }

    #[test]
    fn changed_value_beats_spacing() {
        let prev = Reading::at_millis(2.0, 5000);
        let next = Reading::at_millis(2.1, 5001);
        assert_eq!(Admission::judge(&prev, &next, 3000), Admission::Accept);
    }

    #[test]
    fn unchanged_value_needs_spacing() {
        let prev = Reading::at_millis(2.0, 2000);
        assert_eq!(Admission::judge(&prev, &Reading::at_millis(2.0, 4999), 3000), Admission::Duplicate);
        assert_eq!(Admission::judge(&prev, &Reading::at_millis(2.0, 5000), 3000), Admission::Accept);
    }
}
