//! Clock implementations
//!
//! - `SystemClock` reads the wall clock but never returns a time earlier than
//!   one it already handed out, so a clock step backwards cannot shrink a
//!   parked duration below zero.
//! - `ManualClock` is set and advanced explicitly.

use crate::core::traits::Clock;
use chrono::{DateTime, TimeDelta, Utc};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

/// Wall clock clamped to be non-decreasing
#[derive(Debug)]
pub struct SystemClock {
    /// Latest reading handed out, in microseconds since the epoch
    last_micros: AtomicI64,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            last_micros: AtomicI64::new(i64::MIN),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    /// Current time truncated to whole microseconds
    fn now(&self) -> DateTime<Utc> {
        let read = Utc::now();
        let micros = read.timestamp_micros();
        let previous = self.last_micros.fetch_max(micros, Ordering::AcqRel);
        from_micros(previous.max(micros)).unwrap_or(read)
    }
}

fn from_micros(micros: i64) -> Option<DateTime<Utc>> {
    let secs = micros.div_euclid(1_000_000);
    let nanos = (micros.rem_euclid(1_000_000) * 1_000) as u32;
    DateTime::from_timestamp(secs, nanos)
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        ManualClock {
            now: Mutex::new(start),
        }
    }

    /// Move the clock forward (or backward, for negative deltas)
    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += delta;
    }

    /// Jump to an absolute time
    pub fn set(&self, time: DateTime<Utc>) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now = time;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_system_clock_is_non_decreasing() {
        let clock = SystemClock::new();
        let mut previous = clock.now();
        for _ in 0..1000 {
            let next = clock.now();
            assert!(next >= previous);
            previous = next;
        }
    }

    #[test]
    fn test_system_clock_holds_after_backward_step() {
        let clock = SystemClock::new();
        let future = Utc::now() + TimeDelta::hours(1);
        clock
            .last_micros
            .store(future.timestamp_micros(), Ordering::SeqCst);

        assert_eq!(clock.now().timestamp_micros(), future.timestamp_micros());
    }

    #[test]
    fn test_system_clock_readings_are_whole_microseconds() {
        let clock = SystemClock::new();
        for _ in 0..100 {
            assert_eq!(clock.now().timestamp_subsec_nanos() % 1_000, 0);
        }
    }

    #[test]
    fn test_system_clock_holds_within_the_same_microsecond() {
        let clock = SystemClock::new();
        let first = clock.now();
        // A later reading truncated to the same microsecond compares equal,
        // never below.
        clock
            .last_micros
            .store(first.timestamp_micros(), Ordering::SeqCst);
        assert!(clock.now() >= first);
    }

    #[test]
    fn test_manual_clock_advances() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let clock = ManualClock::new(start);
        assert_eq!(clock.now(), start);

        clock.advance(TimeDelta::minutes(16));
        assert_eq!(clock.now(), start + TimeDelta::minutes(16));

        clock.set(start);
        assert_eq!(clock.now(), start);
    }
}
