//! Date and time token resolution.
//!
//! Talk exports write dates as `YYYY/M/D` and times as `H:MM`, with one- or
//! two-digit month, day and hour fields. These functions turn the tokens into
//! naive chrono values at minute resolution. There is no timezone concept.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{Result, TalkError};

/// Resolves a `YYYY/M/D` date token.
///
/// # Errors
///
/// Returns [`TalkError::MalformedTimestamp`] if the token doesn't have the
/// expected shape or names an impossible calendar day.
///
/// # Example
///
/// ```rust
/// use talklog::parsing::timestamp::resolve_date;
///
/// let d = resolve_date("2025/1/5")?;
/// assert_eq!(d.to_string(), "2025-01-05");
/// assert!(resolve_date("2025/2/30").is_err());
/// # Ok::<(), talklog::TalkError>(())
/// ```
pub fn resolve_date(date: &str) -> Result<NaiveDate> {
    parse_date(date).ok_or_else(|| TalkError::malformed_timestamp(date, ""))
}

/// Resolves a date token and an `H:MM` time token into one instant.
///
/// # Errors
///
/// Returns [`TalkError::MalformedTimestamp`] if either token is malformed or
/// out of range (month 13, hour 24, minute 60, ...).
///
/// # Example
///
/// ```rust
/// use talklog::parsing::timestamp::resolve_timestamp;
///
/// let ts = resolve_timestamp("2025/1/15", "9:05")?;
/// assert_eq!(ts.to_string(), "2025-01-15 09:05:00");
/// # Ok::<(), talklog::TalkError>(())
/// ```
pub fn resolve_timestamp(date: &str, time: &str) -> Result<NaiveDateTime> {
    let day = parse_date(date);
    let clock = parse_time(time);

    match (day, clock) {
        (Some(day), Some(clock)) => Ok(day.and_time(clock)),
        _ => Err(TalkError::malformed_timestamp(date, time)),
    }
}

/// Combines an already-resolved date with an `H:MM` time token.
///
/// Used for bare-time lines that inherit the date of the last header.
pub fn resolve_time_on(date: NaiveDate, time: &str) -> Result<NaiveDateTime> {
    parse_time(time)
        .map(|clock| date.and_time(clock))
        .ok_or_else(|| TalkError::malformed_timestamp(date.format("%Y/%-m/%-d").to_string(), time))
}

fn parse_date(token: &str) -> Option<NaiveDate> {
    let mut parts = token.split('/');
    let year = numeric_field(parts.next()?, 4, 4)?;
    let month = numeric_field(parts.next()?, 1, 2)?;
    let day = numeric_field(parts.next()?, 1, 2)?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year as i32, month, day)
}

fn parse_time(token: &str) -> Option<NaiveTime> {
    let (hour, minute) = token.split_once(':')?;
    let hour = numeric_field(hour, 1, 2)?;
    let minute = numeric_field(minute, 2, 2)?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Parses an all-ASCII-digit field whose width lies in `min..=max`.
fn numeric_field(field: &str, min: usize, max: usize) -> Option<u32> {
    if field.len() < min || field.len() > max || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}
