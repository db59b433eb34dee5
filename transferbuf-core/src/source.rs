//! Mutex-backed reading source for hosted targets
//!
//! [`SourceBuffer`] is the producer-side buffer an acquisition task pushes
//! into. It is shared between threads by reference (typically inside an
//! `Arc`); every access goes through a `std::sync::Mutex`.
//!
//! ```rust
//! use transferbuf_core::{Reading, ReadingSource, SourceBuffer, TransferBuffer};
//!
//! let source = SourceBuffer::new();
//! source.push(Reading::at_millis(21.5, 1000));
//! source.push(Reading::at_millis(21.7, 2000));
//!
//! let mut transfer = TransferBuffer::new();
//! assert_eq!(transfer.append(&source, "room", 0), 2);
//! assert_eq!(source.pending(), 0);
//! ```

use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard, PoisonError, TryLockError};

use crate::reading::Reading;
use crate::traits::ReadingSource;

/// Append-only, lockable sequence of readings
#[derive(Debug, Default)]
pub struct SourceBuffer {
    readings: Mutex<Vec<Reading>>,
}

/// Exclusive access to a [`SourceBuffer`], released on drop
pub struct SourceGuard<'a> {
    inner: MutexGuard<'a, Vec<Reading>>,
}

impl<'a> SourceGuard<'a> {
    /// Physically remove consumed readings
    pub fn clean(&mut self) {
        self.inner.retain(|r| !r.deleted());
    }
}

impl<'a> Deref for SourceGuard<'a> {
    type Target = [Reading];

    fn deref(&self) -> &[Reading] {
        self.inner.as_slice()
    }
}

impl<'a> DerefMut for SourceGuard<'a> {
    fn deref_mut(&mut self) -> &mut [Reading] {
        self.inner.as_mut_slice()
    }
}

impl SourceBuffer {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty source with room for `capacity` readings
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            readings: Mutex::new(Vec::with_capacity(capacity)),
        }
    }

    /// Append a reading
    pub fn push(&self, reading: Reading) {
        self.lock_inner().push(reading);
    }

    /// Physically remove consumed readings
    ///
    /// Producers call this between transfer cycles to keep the source from
    /// growing without bound.
    pub fn clean(&self) -> usize {
        let mut readings = self.lock_inner();
        let before = readings.len();
        readings.retain(|r| !r.deleted());
        before - readings.len()
    }

    /// Number of stored readings, consumed ones included
    pub fn len(&self) -> usize {
        self.lock_inner().len()
    }

    /// Check if no readings are stored
    pub fn is_empty(&self) -> bool {
        self.lock_inner().is_empty()
    }

    /// Copy the stored readings out
    pub fn snapshot(&self) -> Vec<Reading> {
        self.lock_inner().clone()
    }

    // A panicking producer leaves the readings intact; keep using them.
    fn lock_inner(&self) -> MutexGuard<'_, Vec<Reading>> {
        self.readings.lock().unwrap_or_else(|poisoned| {
            log_warn!("Source buffer lock poisoned, recovering");
            PoisonError::into_inner(poisoned)
        })
    }
}

impl ReadingSource for SourceBuffer {
    type Guard<'a> = SourceGuard<'a> where Self: 'a;

    fn lock(&self) -> Self::Guard<'_> {
        SourceGuard {
            inner: self.lock_inner(),
        }
    }

    fn try_lock(&self) -> Option<Self::Guard<'_>> {
        let inner = match self.readings.try_lock() {
            Ok(inner) => inner,
            Err(TryLockError::Poisoned(poisoned)) => {
                log_warn!("Source buffer lock poisoned, recovering");
                poisoned.into_inner()
            }
            Err(TryLockError::WouldBlock) => return None,
        };
        Some(SourceGuard { inner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(values: &[(f64, u64)]) -> SourceBuffer {
        let source = SourceBuffer::new();
        for &(value, ms) in values {
            source.push(Reading::at_millis(value, ms));
        }
        source
    }

    #[test]
    fn push_and_len() {
        let source = SourceBuffer::with_capacity(4);
        assert!(source.is_empty());

        source.push(Reading::at_millis(1.0, 1000));
        source.push(Reading::at_millis(2.0, 2000));
        assert_eq!(source.len(), 2);
        assert_eq!(source.pending(), 2);
    }

    #[test]
    fn undelete_resets_all_flags() {
        let source = filled(&[(1.0, 1000), (2.0, 2000), (3.0, 3000)]);
        for r in source.lock().iter_mut() {
            r.mark_delete();
        }
        assert_eq!(source.pending(), 0);

        source.undelete();
        assert_eq!(source.pending(), 3);
    }

    #[test]
    fn clean_drops_consumed() {
        let source = filled(&[(1.0, 1000), (2.0, 2000), (3.0, 3000)]);
        source.lock()[1].mark_delete();

        assert_eq!(source.clean(), 1);
        let left: Vec<u64> = source.snapshot().iter().map(|r| r.time_ms()).collect();
        assert_eq!(left, vec![1000, 3000]);
    }

    #[test]
    fn guard_clean_drops_consumed() {
        let source = filled(&[(1.0, 1000), (2.0, 2000)]);
        {
            let mut guard = source.lock();
            guard[0].mark_delete();
            guard.clean();
            assert_eq!(guard.len(), 1);
        }
        assert_eq!(source.len(), 1);
    }

    #[test]
    fn try_lock_fails_while_held() {
        let source = filled(&[(1.0, 1000)]);
        let guard = source.lock();
        assert!(source.try_lock().is_none());
        drop(guard);
        assert!(source.try_lock().is_some());
    }

    #[test]
    fn poisoned_lock_recovers() {
        use std::sync::Arc;
        use std::thread;

        let source = Arc::new(filled(&[(1.0, 1000)]));
        let worker = Arc::clone(&source);
        let result = thread::spawn(move || {
            let _guard = worker.lock();
            panic!("producer died");
        })
        .join();
        assert!(result.is_err());

        source.push(Reading::at_millis(2.0, 2000));
        assert_eq!(source.len(), 2);
        assert!(source.try_lock().is_some());
    }
}
