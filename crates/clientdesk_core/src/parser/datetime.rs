//! Calendar and clock token resolution.
//!
//! # Invariants
//! - Input is trimmed before any parsing; blank input is always an error.
//! - Dates are strictly `YYYY-MM-DD`, times strictly 24-hour `HH:MM`.
//! - A weekday resolves to the next occurrence on or after today; when that
//!   is today and the time is already past, it moves forward seven days.

use super::ParseError;
use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));
static TIME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{2}:\d{2}$").expect("valid time regex"));

const WEEKDAY_NAMES: &[(&str, &str, Weekday)] = &[
    ("monday", "mon", Weekday::Mon),
    ("tuesday", "tue", Weekday::Tue),
    ("wednesday", "wed", Weekday::Wed),
    ("thursday", "thu", Weekday::Thu),
    ("friday", "fri", Weekday::Fri),
    ("saturday", "sat", Weekday::Sat),
    ("sunday", "sun", Weekday::Sun),
];

pub fn parse_date(value: &str) -> Result<NaiveDate, ParseError> {
    let trimmed = value.trim();
    if !DATE_RE.is_match(trimmed) {
        return Err(ParseError::InvalidDate(trimmed.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| ParseError::InvalidDate(trimmed.to_string()))
}

pub fn parse_time(value: &str) -> Result<NaiveTime, ParseError> {
    let trimmed = value.trim();
    if !TIME_RE.is_match(trimmed) {
        return Err(ParseError::InvalidTime(trimmed.to_string()));
    }
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .map_err(|_| ParseError::InvalidTime(trimmed.to_string()))
}

/// Parses a non-negative whole number of minutes.
pub fn parse_duration(value: &str) -> Result<u32, ParseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(ParseError::InvalidDuration(trimmed.to_string()));
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| ParseError::InvalidDuration(trimmed.to_string()))
}

/// Accepts full or three-letter English day names, case-insensitive.
pub fn parse_weekday(value: &str) -> Result<Weekday, ParseError> {
    let lowered = value.trim().to_ascii_lowercase();
    WEEKDAY_NAMES
        .iter()
        .find(|(long, short, _)| lowered == *long || lowered == *short)
        .map(|(_, _, weekday)| *weekday)
        .ok_or_else(|| ParseError::InvalidDay(value.trim().to_string()))
}

/// Next date falling on `weekday` for a meeting at `time`, seen from `now`.
pub fn resolve_weekday(weekday: Weekday, time: NaiveTime, now: NaiveDateTime) -> NaiveDate {
    let today = now.date();
    let days_ahead = (7 + weekday.num_days_from_monday() - today.weekday().num_days_from_monday()) % 7;
    let nearest = today + Duration::days(i64::from(days_ahead));
    if nearest == today && time < now.time() {
        nearest + Duration::days(7)
    } else {
        nearest
    }
}

/// Combines a date or weekday token with a time token, relative to `now`.
pub fn resolve_local_date_time(
    date_or_day: &str,
    time: &str,
    now: NaiveDateTime,
) -> Result<NaiveDateTime, ParseError> {
    let time = parse_time(time)?;
    let token = date_or_day.trim();
    let date = if token.starts_with(|c: char| c.is_ascii_digit()) {
        parse_date(token)?
    } else if token.is_empty() {
        return Err(ParseError::InvalidDate(String::new()));
    } else {
        resolve_weekday(parse_weekday(token)?, time, now)
    };
    Ok(date.and_time(time))
}

/// `resolve_local_date_time` against the system clock.
pub fn parse_local_date_time(date_or_day: &str, time: &str) -> Result<NaiveDateTime, ParseError> {
    resolve_local_date_time(date_or_day, time, Local::now().naive_local())
}
