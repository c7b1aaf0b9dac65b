//! Source of "now" for timestamp stamping and time-only input.

use chrono::{NaiveDateTime, Utc};

pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in UTC, matching how epoch timestamps are interpreted.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().naive_utc()
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
