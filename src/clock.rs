//! Clock sources feeding `Tick` events.
//!
//! The watch delivers a tick whenever the wall-clock second changes. The
//! simulator has two ways to produce those readings: the local time of the
//! machine, or a virtual clock that starts at a chosen reading and advances
//! with the simulation timeline (used for headless runs and tests).

use std::time::Duration;

use chrono::{Local, NaiveTime, Timelike};
use sprinkles_common::TimeReading;

use crate::timing::TICK_INTERVAL;

/// Source of wall-clock readings.
pub trait ClockSource {
    /// Latest reading handed out.
    fn reading(&self) -> TimeReading;

    /// Check the clock at `elapsed` since the simulation started.
    ///
    /// Returns a reading when the second changed since the previous poll.
    fn poll(
        &mut self,
        elapsed: Duration,
    ) -> Option<TimeReading>;
}

/// Convert a chrono time to a reading (leap seconds fold into :59).
pub fn reading_from(time: &impl Timelike) -> TimeReading {
    TimeReading::new(time.hour() as u8, time.minute() as u8, time.second().min(59) as u8)
}

/// Parse `HH:MM:SS` as given on the command line.
pub fn parse_reading(text: &str) -> Result<TimeReading, chrono::ParseError> {
    NaiveTime::parse_from_str(text, "%H:%M:%S").map(|time| reading_from(&time))
}

/// Machine local time.
pub struct LocalClock {
    last: TimeReading,
}

impl LocalClock {
    pub fn new() -> Self {
        Self {
            last: reading_from(&Local::now()),
        }
    }
}

impl Default for LocalClock {
    fn default() -> Self { Self::new() }
}

impl ClockSource for LocalClock {
    fn reading(&self) -> TimeReading { self.last }

    fn poll(
        &mut self,
        _elapsed: Duration,
    ) -> Option<TimeReading> {
        let now = reading_from(&Local::now());
        (now != self.last).then(|| {
            self.last = now;
            now
        })
    }
}

/// Virtual clock advancing one [`TICK_INTERVAL`] at a time with the simulation timeline.
pub struct SimulatedClock {
    start: TimeReading,
    ticks: u64,
}

impl SimulatedClock {
    pub const fn new(start: TimeReading) -> Self { Self { start, ticks: 0 } }
}

impl ClockSource for SimulatedClock {
    fn reading(&self) -> TimeReading {
        let seconds = self.ticks * TICK_INTERVAL.as_secs();
        self.start.advanced_by((seconds % 86_400) as u32)
    }

    fn poll(
        &mut self,
        elapsed: Duration,
    ) -> Option<TimeReading> {
        let ticks = u64::try_from(elapsed.as_nanos() / TICK_INTERVAL.as_nanos()).unwrap_or(u64::MAX);
        if ticks == self.ticks {
            return None;
        }
        self.ticks = ticks;
        Some(self.reading())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reading() {
        assert_eq!(parse_reading("10:09:15").ok(), Some(TimeReading::new(10, 9, 15)));
        assert!(parse_reading("25:00:00").is_err());
        assert!(parse_reading("noon").is_err());
    }

    #[test]
    fn test_simulated_clock_ticks_on_whole_seconds() {
        let mut clock = SimulatedClock::new(TimeReading::new(23, 59, 58));
        assert_eq!(clock.poll(Duration::from_millis(0)), None);
        assert_eq!(clock.poll(Duration::from_millis(999)), None);
        assert_eq!(clock.poll(Duration::from_millis(1000)), Some(TimeReading::new(23, 59, 59)));
        assert_eq!(clock.poll(Duration::from_millis(1500)), None);
        assert_eq!(clock.poll(Duration::from_millis(2000)), Some(TimeReading::MIDNIGHT));
        assert_eq!(clock.reading(), TimeReading::MIDNIGHT);
    }

    #[test]
    fn test_simulated_clock_skips_ahead() {
        let mut clock = SimulatedClock::new(TimeReading::new(10, 0, 0));
        assert_eq!(clock.poll(Duration::from_secs(90)), Some(TimeReading::new(10, 1, 30)));
    }
}
