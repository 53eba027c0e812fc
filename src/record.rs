//! Parsed talk-log record type.
//!
//! This module provides [`Record`], one parsed event from a talk export, and the
//! two orderings a record sequence can be viewed in.
//!
//! # Overview
//!
//! A record consists of:
//! - `line_number`: 1-based physical line in the source document
//! - `timestamp`: naive date and time at minute resolution
//! - `date` / `time_of_day`: derived from `timestamp` at construction
//! - `sender` and `body`
//! - `kind`: [`RecordKind::Message`] or [`RecordKind::System`]
//!
//! Records are immutable once built. Fields are private and exposed through
//! accessors, so `date` can never disagree with `timestamp`.
//!
//! # Orderings
//!
//! The canonical order of a record sequence is **physical order**: ascending
//! `line_number`, which is simply the order the parser emitted them in.
//! Timestamps inside real exports are frequently non-monotonic (clock skew,
//! multi-device sync), so the **chronological order** is a separate, derived
//! view produced by [`chronological_order`]. Only latency and tempo statistics
//! use it.
//!
//! # Example
//!
//! ```
//! use talklog::record::{Record, RecordKind, chronological_order};
//! use chrono::NaiveDate;
//!
//! let day = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
//! let records = vec![
//!     Record::message(1, day.and_hms_opt(9, 0, 0).unwrap(), "Alice", "hello"),
//!     Record::message(2, day.and_hms_opt(8, 30, 0).unwrap(), "Bob", "hi"),
//! ];
//!
//! assert_eq!(records[0].kind(), RecordKind::Message);
//! let chrono_view = chronological_order(&records);
//! assert_eq!(chrono_view[0].sender(), "Bob");
//! ```

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Sender recorded for system-generated events (joins, leaves, renames).
pub const SYSTEM_SENDER: &str = "システム";

/// Literal token LINE writes in place of a sticker.
pub const STICKER_MARKER: &str = "[スタンプ]";

/// Kind of a parsed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// A message written by a participant.
    Message,
    /// A notification generated by the application.
    System,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Message => write!(f, "message"),
            RecordKind::System => write!(f, "system"),
        }
    }
}

/// One parsed talk-log event.
///
/// # Serialization
///
/// Serializes with all derived fields so front ends can render without
/// recomputing:
///
/// ```
/// use talklog::Record;
/// use chrono::NaiveDate;
///
/// let ts = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap().and_hms_opt(9, 5, 0).unwrap();
/// let json = serde_json::to_string(&Record::message(3, ts, "Bob", "hi"))?;
///
/// assert!(json.contains(r#""date":"2025-01-15""#));
/// assert!(json.contains(r#""time_of_day":"09:05""#));
/// assert!(json.contains(r#""kind":"message""#));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawRecord")]
pub struct Record {
    line_number: usize,
    timestamp: NaiveDateTime,
    date: NaiveDate,
    time_of_day: String,
    sender: String,
    body: String,
    kind: RecordKind,
}

/// Wire shape accepted when deserializing; derived fields are recomputed.
#[derive(Deserialize)]
struct RawRecord {
    line_number: usize,
    timestamp: NaiveDateTime,
    sender: String,
    body: String,
    kind: RecordKind,
}

impl From<RawRecord> for Record {
    fn from(raw: RawRecord) -> Self {
        match raw.kind {
            RecordKind::Message => {
                Record::message(raw.line_number, raw.timestamp, raw.sender, raw.body)
            }
            RecordKind::System => Record::system(raw.line_number, raw.timestamp, raw.body),
        }
    }
}

impl Record {
    /// Creates a participant message.
    pub fn message(
        line_number: usize,
        timestamp: NaiveDateTime,
        sender: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self::build(line_number, timestamp, sender.into(), body.into(), RecordKind::Message)
    }

    /// Creates a system notification. The sender is always [`SYSTEM_SENDER`].
    pub fn system(line_number: usize, timestamp: NaiveDateTime, body: impl Into<String>) -> Self {
        Self::build(
            line_number,
            timestamp,
            SYSTEM_SENDER.to_string(),
            body.into(),
            RecordKind::System,
        )
    }

    fn build(
        line_number: usize,
        timestamp: NaiveDateTime,
        sender: String,
        body: String,
        kind: RecordKind,
    ) -> Self {
        Self {
            line_number,
            timestamp,
            date: timestamp.date(),
            time_of_day: timestamp.format("%H:%M").to_string(),
            sender,
            body,
            kind,
        }
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the 1-based physical line this record was parsed from.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Returns the timestamp.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns the calendar date of the timestamp.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the time of day formatted as `HH:MM`.
    pub fn time_of_day(&self) -> &str {
        &self.time_of_day
    }

    /// Returns the hour of day (0-23).
    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the record kind.
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    // =========================================================================
    // Utility methods
    // =========================================================================

    /// Returns `true` for participant messages.
    pub fn is_message(&self) -> bool {
        self.kind == RecordKind::Message
    }

    /// Returns `true` for system notifications.
    pub fn is_system(&self) -> bool {
        self.kind == RecordKind::System
    }

    /// Returns the body length in characters (not bytes).
    pub fn char_len(&self) -> usize {
        self.body.chars().count()
    }

    /// Returns `true` if the body contains the sticker marker.
    pub fn has_sticker(&self) -> bool {
        self.body.contains(STICKER_MARKER)
    }
}

// =========================================================================
// Orderings
// =========================================================================

/// Returns a view of `records` sorted by timestamp.
///
/// The sort is stable, so records sharing a timestamp keep their physical
/// (line) order. The input slice is never reordered.
pub fn chronological_order(records: &[Record]) -> Vec<&Record> {
    let mut view: Vec<&Record> = records.iter().collect();
    view.sort_by_key(|r| r.timestamp);
    view
}

/// Returns `true` if `records` is in strictly increasing line order.
pub fn is_physical_order(records: &[Record]) -> bool {
    records
        .windows(2)
        .all(|pair| pair[0].line_number < pair[1].line_number)
}
