//! Time management for reading timestamps
//!
//! Readings carry their acquisition time as whole seconds plus microseconds.
//! Every comparison the transfer buffer makes uses the truncated millisecond
//! view of that time, so two readings less than a millisecond apart compare
//! as simultaneous.

use crate::constants::{MS_PER_SECOND, US_PER_MS, US_PER_SECOND};
use crate::traits::TimeSource;

/// Timestamp in milliseconds since epoch (or device boot for monotonic)
pub type Timestamp = u64;

/// Acquisition time of a reading with microsecond resolution
///
/// Constructors normalize the microsecond part, so `ReadingTime::new(3, 1_500_000)`
/// is the same instant as `ReadingTime::new(4, 500_000)`. Deserialized values
/// go through the same normalization. Arithmetic saturates at `u64::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RawReadingTime"))]
pub struct ReadingTime {
    secs: u64,
    micros: u32,
}

impl ReadingTime {
    /// Create from seconds and microseconds
    pub const fn new(secs: u64, micros: u64) -> Self {
        Self {
            secs: secs.saturating_add(micros / US_PER_SECOND),
            micros: (micros % US_PER_SECOND) as u32,
        }
    }

    /// Create from a millisecond timestamp
    pub const fn from_millis(ms: Timestamp) -> Self {
        Self::new(ms / MS_PER_SECOND, (ms % MS_PER_SECOND) * US_PER_MS)
    }

    /// Create from a count of microseconds
    pub const fn from_micros(us: u64) -> Self {
        Self::new(0, us)
    }

    /// Whole seconds
    pub const fn secs(&self) -> u64 {
        self.secs
    }

    /// Sub-second part in microseconds
    pub const fn subsec_micros(&self) -> u32 {
        self.micros
    }

    /// Milliseconds, truncating the sub-millisecond part
    pub const fn as_millis(&self) -> Timestamp {
        self.secs
            .saturating_mul(MS_PER_SECOND)
            .saturating_add(self.micros as u64 / US_PER_MS)
    }

    /// Total microseconds
    pub const fn as_micros(&self) -> u64 {
        self.secs
            .saturating_mul(US_PER_SECOND)
            .saturating_add(self.micros as u64)
    }
}

impl From<core::time::Duration> for ReadingTime {
    fn from(d: core::time::Duration) -> Self {
        Self::new(d.as_secs(), d.subsec_micros() as u64)
    }
}

/// Wire form of [`ReadingTime`] before normalization
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawReadingTime {
    secs: u64,
    micros: u64,
}

#[cfg(feature = "serde")]
impl From<RawReadingTime> for ReadingTime {
    fn from(raw: RawReadingTime) -> Self {
        Self::new(raw.secs, raw.micros)
    }
}

/// Wall clock with microsecond resolution (requires std)
///
/// Steps backwards whenever the host clock is corrected; readings stamped
/// during such a regression are rejected as stale by a transfer buffer.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Default)]
pub struct SystemTime;

#[cfg(feature = "std")]
impl TimeSource for SystemTime {
    fn now(&self) -> ReadingTime {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(ReadingTime::from)
            .unwrap_or_default()
    }
}

/// Manually driven clock for tests and replay
///
/// Stores a microsecond counter so sub-millisecond acquisition jitter can be
/// reproduced exactly.
#[derive(Debug, Clone, Default)]
pub struct FixedTime {
    micros: u64,
}

impl FixedTime {
    /// Start the clock at `start`
    pub const fn new(start: ReadingTime) -> Self {
        Self {
            micros: start.as_micros(),
        }
    }

    /// Start the clock at a millisecond timestamp
    pub const fn from_millis(ms: Timestamp) -> Self {
        Self::new(ReadingTime::from_millis(ms))
    }

    /// Jump to `time`, backwards included
    pub fn set(&mut self, time: ReadingTime) {
        self.micros = time.as_micros();
    }

    /// Move the clock forward by `ms` milliseconds
    pub fn advance_millis(&mut self, ms: u64) {
        self.advance_micros(ms.saturating_mul(US_PER_MS));
    }

    /// Move the clock forward by `us` microseconds
    pub fn advance_micros(&mut self, us: u64) {
        self.micros = self.micros.saturating_add(us);
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> ReadingTime {
        ReadingTime::from_micros(self.micros)
    }
}
