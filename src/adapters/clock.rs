//! System clock adapter.
//!
//! Provides wall-clock time for hold deadlines and the time label, plus a
//! monotonic millisecond counter for button gesture timing.
//!
//! - [`SystemClock::now`] is local wall time and may jump (NTP, DST).
//! - [`SystemClock::uptime_ms`] is monotonic since construction.

use std::time::Instant;

use chrono::Local;

use crate::app::ports::{Clock, Timestamp};

pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Milliseconds since this clock was created (monotonic).
    pub fn uptime_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Local::now()
    }
}
