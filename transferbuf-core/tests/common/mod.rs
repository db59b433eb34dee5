//! Common test utilities for transfer integration tests
//!
//! Provides:
//! - Deterministic reading generators (steady, noisy, jittery clocks)
//! - Source builders from literal data
//! - Assertion helpers for transfer invariants

#![allow(dead_code)]

use transferbuf_core::{
    time::{FixedTime, ReadingTime},
    Reading, SourceBuffer, TimeSource,
};

/// Test data generator for sensor reading sequences
pub struct ReadingGenerator {
    clock: FixedTime,
    seed: u32,
}

impl ReadingGenerator {
    /// Create generator starting at `start_ms`
    pub fn new(start_ms: u64) -> Self {
        Self {
            clock: FixedTime::from_millis(start_ms),
            seed: 42,
        }
    }

    /// Readings at a fixed interval whose value only changes every `hold` samples
    ///
    /// Models a slowly changing sensor that reports the same value many times.
    pub fn stepped(&mut self, count: usize, interval_ms: u64, hold: usize) -> Vec<Reading> {
        let mut readings = Vec::with_capacity(count);
        let mut value = 20.0;

        for i in 0..count {
            if i > 0 && i % hold == 0 {
                value += 0.5;
            }
            readings.push(Reading::stamped(value, &self.clock));
            self.clock.advance_millis(interval_ms);
        }

        readings
    }

    /// Readings whose clock occasionally steps backwards
    ///
    /// Every `every`-th sample is stamped `back_ms` before the previous one,
    /// like a wall clock corrected by NTP.
    pub fn with_regressions(
        &mut self,
        count: usize,
        interval_ms: u64,
        every: usize,
        back_ms: u64,
    ) -> Vec<Reading> {
        let mut readings = Vec::with_capacity(count);

        for i in 0..count {
            let now = self.clock.now().as_millis();
            let stamp = if i > 0 && i % every == 0 {
                now.saturating_sub(interval_ms + back_ms)
            } else {
                now
            };
            let value = 20.0 + self.random_noise(1.0) as f64;
            readings.push(Reading::at_millis(value, stamp));
            self.clock.advance_millis(interval_ms);
        }

        readings
    }

    /// Current generator time
    pub fn now(&self) -> u64 {
        self.clock.now().as_millis()
    }

    fn random_noise(&mut self, amplitude: f32) -> f32 {
        // Simple pseudo-random noise
        self.seed = self.seed.wrapping_mul(1664525).wrapping_add(1013904223);
        let uniform = (self.seed as f32) / (u32::MAX as f32);
        (uniform - 0.5) * 2.0 * amplitude
    }
}

/// Build a source from `(value, seconds, microseconds)` triples
pub fn source_from_timevals(data: &[(f64, u64, u64)]) -> SourceBuffer {
    let source = SourceBuffer::with_capacity(data.len());
    for &(value, secs, micros) in data {
        source.push(Reading::new(value, ReadingTime::new(secs, micros)));
    }
    source
}

/// Build a source from readings
pub fn source_from(readings: &[Reading]) -> SourceBuffer {
    let source = SourceBuffer::with_capacity(readings.len());
    for &r in readings {
        source.push(r);
    }
    source
}

/// Millisecond timestamps of a reading sequence
pub fn times_ms<'a>(readings: impl IntoIterator<Item = &'a Reading>) -> Vec<u64> {
    readings.into_iter().map(|r| r.time_ms()).collect()
}

/// Assert timestamps strictly increase
pub fn assert_strictly_increasing(times: &[u64]) {
    for pair in times.windows(2) {
        assert!(
            pair[1] > pair[0],
            "timestamps not strictly increasing: {} then {}", pair[0], pair[1]
        );
    }
}
