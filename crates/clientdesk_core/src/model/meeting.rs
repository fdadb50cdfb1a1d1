//! Scheduled meeting value object.
//!
//! # Invariants
//! - `duration_minutes` is non-negative by type.
//! - Ordering helpers compare by `start()` only.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Default look-ahead used by `Meeting::is_coming_up`.
pub const UPCOMING_WINDOW_DAYS: u32 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Meeting {
    date: NaiveDate,
    time: NaiveTime,
    duration_minutes: u32,
    agenda: String,
    notes: String,
}

impl Meeting {
    pub fn new(
        date: NaiveDate,
        time: NaiveTime,
        duration_minutes: u32,
        agenda: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            date,
            time,
            duration_minutes,
            agenda: agenda.into().trim().to_string(),
            notes: notes.into().trim().to_string(),
        }
    }

    pub fn at(start: NaiveDateTime, duration_minutes: u32) -> Self {
        Self::new(start.date(), start.time(), duration_minutes, "", "")
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.duration_minutes))
    }

    pub fn agenda(&self) -> &str {
        &self.agenda
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn start(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    pub fn end(&self) -> NaiveDateTime {
        self.start() + self.duration()
    }

    /// True when the meeting starts within the next `UPCOMING_WINDOW_DAYS`.
    pub fn is_coming_up(&self, now: NaiveDateTime) -> bool {
        self.is_coming_up_within(now, Duration::days(i64::from(UPCOMING_WINDOW_DAYS)))
    }

    /// A window reaching past the last representable instant is unbounded.
    pub fn is_coming_up_within(&self, now: NaiveDateTime, window: Duration) -> bool {
        let start = self.start();
        start >= now
            && now
                .checked_add_signed(window)
                .map_or(true, |horizon| start <= horizon)
    }

    /// Returns a copy with the given fields replaced.
    pub fn with_changes(
        &self,
        start: Option<NaiveDateTime>,
        duration_minutes: Option<u32>,
        agenda: Option<&str>,
        notes: Option<&str>,
    ) -> Self {
        let start = start.unwrap_or_else(|| self.start());
        Self::new(
            start.date(),
            start.time(),
            duration_minutes.unwrap_or(self.duration_minutes),
            agenda.unwrap_or(&self.agenda),
            notes.unwrap_or(&self.notes),
        )
    }
}

impl Display for Meeting {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} ({} min)",
            self.date,
            self.time.format("%H:%M"),
            self.duration_minutes
        )?;
        if !self.agenda.is_empty() {
            write!(f, " {}", self.agenda)?;
        }
        Ok(())
    }
}
