//! Live clock shown in the page chrome.

use chrono::{Local, NaiveTime, Timelike};

/// Source of the local wall-clock time.
pub trait Clock {
    fn now(&self) -> NaiveTime;
}

/// Reads the browser's (or host's) local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// Zero-padded 24-hour `HH:MM`.
pub fn format_clock<T: Timelike>(time: &T) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// Produces the clock text on every tick.
pub struct ClockTicker<C> {
    clock: C,
}

impl<C: Clock> ClockTicker<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Text to write to the clock display right now.
    pub fn tick(&self) -> String {
        format_clock(&self.clock.now())
    }
}
