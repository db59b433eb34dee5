//! Time Source Abstraction
//!
//! The `TimeSource` trait decouples reading timestamps from the clock that
//! produces them, so acquisition code can stamp readings from a hardware
//! timer, the system clock or a fixed test clock.
//!
//! ## Common Implementations
//!
//! - `SystemTime`: Wall clock time (may jump due to NTP)
//! - `FixedTime`: Controllable time for testing and replay

use crate::time::ReadingTime;

/// Source of acquisition time for readings
///
/// ## Example Implementation
///
/// ```rust
/// use transferbuf_core::traits::TimeSource;
/// use transferbuf_core::time::ReadingTime;
///
/// struct TickCounter {
///     ticks: u64,
///     ticks_per_us: u64,
/// }
///
/// impl TimeSource for TickCounter {
///     fn now(&self) -> ReadingTime {
///         ReadingTime::from_micros(self.ticks / self.ticks_per_us)
///     }
/// }
///
/// let clock = TickCounter { ticks: 3_000_400 * 8, ticks_per_us: 8 };
/// assert_eq!(clock.now(), ReadingTime::new(3, 400));
/// ```
///
/// ## Resolution
///
/// Sources report microseconds, but a transfer buffer compares readings in
/// whole milliseconds. Two readings stamped within the same millisecond
/// compare as simultaneous and the later one is rejected as stale. Wall clock
/// sources can also step backwards after an NTP adjustment; readings stamped
/// during the regression are rejected until the clock passes the last
/// accepted timestamp again.
pub trait TimeSource: Send {
    /// Current acquisition time
    fn now(&self) -> ReadingTime;
}
