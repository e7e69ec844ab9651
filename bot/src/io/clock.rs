//! Wall-clock source for artifact folders and journal timestamps.

use chrono::{Local, NaiveDateTime};

/// Current local date and time.
///
/// Production uses [`SystemClock`]; tests pin time with a fixed clock.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
