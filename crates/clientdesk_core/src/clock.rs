//! Wall-clock seam used for relative date resolution and upcoming checks.

use chrono::{Local, NaiveDateTime};
use std::fmt::Debug;

/// Source of the current local date-time.
pub trait Clock: Debug + Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Reads the operating-system local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always returns the same instant. Used by tests and replays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
