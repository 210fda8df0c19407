//! Date arguments on the command line.

use anyhow::{Context, Result};
use calboard_core::CalboardError;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

/// A parsed `--start`/`--end` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct When {
    pub at: DateTime<Utc>,
    /// True when only a date was given.
    pub all_day: bool,
}

/// Parse "YYYY-MM-DD" (all-day) or "YYYY-MM-DDTHH:MM" (timed, UTC).
pub fn parse_when(s: &str) -> Result<When, CalboardError> {
    let s = s.trim();

    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
        return Ok(When {
            at: dt.and_utc(),
            all_day: false,
        });
    }

    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| CalboardError::InvalidDate(s.to_string()))?;
    Ok(When {
        at: start_of_day(date),
        all_day: true,
    })
}

/// Parse a date as the first instant of that day.
pub fn parse_date_start(s: &str) -> Result<DateTime<Utc>, CalboardError> {
    Ok(parse_when(s)?.at)
}

/// Parse a date as the last second of that day. Times are kept as given.
pub fn parse_date_end(s: &str) -> Result<DateTime<Utc>, CalboardError> {
    let when = parse_when(s)?;
    if when.all_day {
        Ok(when.at + Duration::days(1) - Duration::seconds(1))
    } else {
        Ok(when.at)
    }
}

/// Apply a duration string ("90m", "1h 30m", "2days") to a start time.
pub fn apply_duration(start: DateTime<Utc>, input: &str) -> Result<DateTime<Utc>> {
    let std_dur = humantime::parse_duration(input)
        .with_context(|| format!("Could not parse duration: \"{input}\""))?;
    let chrono_dur = Duration::from_std(std_dur).context("Duration too large")?;
    Ok(start + chrono_dur)
}

/// Default end: +1 hour for timed events, +1 day for all-day events.
pub fn default_end(start: When) -> DateTime<Utc> {
    if start.all_day {
        start.at + Duration::days(1)
    } else {
        start.at + Duration::hours(1)
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}
