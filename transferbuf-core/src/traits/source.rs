//! Reading Source Abstraction
//!
//! A reading source is the producer side of a transfer: an append-only
//! sequence of readings that an acquisition task fills while a transmitter
//! drains it through a [`TransferBuffer`](crate::transfer::TransferBuffer).
//!
//! ## Locking Model
//!
//! The transfer buffer holds the source lock for a whole scan. The guard
//! returned by [`ReadingSource::lock`] is an RAII handle, so the lock is
//! released on every exit path of the scan, early returns included.
//!
//! ```text
//! Producer task                      Consumer task
//!      ↓                                  ↓
//!  lock → push → unlock        lock ──── scan + mark_delete ──── unlock
//!                                   (producer blocked meanwhile)
//! ```

use core::ops::DerefMut;

use crate::reading::Reading;

/// Lockable, forward-iterable sequence of readings
///
/// Implementations decide how exclusive access is obtained: a
/// `std::sync::Mutex` on hosted targets (see
/// [`SourceBuffer`](crate::source::SourceBuffer)), a critical section or an
/// RTOS mutex on embedded targets.
///
/// ## Example Implementation
///
/// ```rust
/// use core::cell::{RefCell, RefMut};
/// use transferbuf_core::reading::Reading;
/// use transferbuf_core::traits::ReadingSource;
///
/// struct CellSource {
///     readings: RefCell<Vec<Reading>>,
/// }
///
/// impl ReadingSource for CellSource {
///     type Guard<'a> = RefMut<'a, [Reading]> where Self: 'a;
///
///     fn lock(&self) -> Self::Guard<'_> {
///         RefMut::map(self.readings.borrow_mut(), |v| v.as_mut_slice())
///     }
///
///     fn try_lock(&self) -> Option<Self::Guard<'_>> {
///         self.readings
///             .try_borrow_mut()
///             .ok()
///             .map(|v| RefMut::map(v, |v| v.as_mut_slice()))
///     }
/// }
/// ```
pub trait ReadingSource {
    /// Scoped exclusive access to the stored readings
    type Guard<'a>: DerefMut<Target = [Reading]>
    where
        Self: 'a;

    /// Block until exclusive access is available
    fn lock(&self) -> Self::Guard<'_>;

    /// Take exclusive access only if nobody else holds it
    fn try_lock(&self) -> Option<Self::Guard<'_>>;

    /// Clear the delete flag of every stored reading
    ///
    /// Lets a caller re-run a scan, e.g. after a failed send.
    fn undelete(&self) {
        for reading in self.lock().iter_mut() {
            reading.undelete();
        }
    }

    /// Count readings that have not been consumed yet
    fn pending(&self) -> usize {
        self.lock().iter().filter(|r| !r.deleted()).count()
    }
}
