//! Filter records by date, speaker, type, length, keyword, time of day and emoji.
//!
//! This module provides [`FilterConfig`] for defining filter criteria and
//! [`apply_filters`] for filtering record collections.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Records on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Records on or before date |
//! | Sender | [`with_sender`](FilterConfig::with_sender) | Records from any listed sender |
//! | Type | [`with_message_type`](FilterConfig::with_message_type) | text, sticker, image or system |
//! | Length | [`with_length_range`](FilterConfig::with_length_range) | Body length in characters |
//! | Keyword | [`with_keyword`](FilterConfig::with_keyword) | Body contains any keyword |
//! | Time | [`with_time_range`](FilterConfig::with_time_range) | Time of day, may wrap midnight |
//! | Emoji | [`with_emoji`](FilterConfig::with_emoji) | Body does or doesn't contain emoji |
//!
//! # Examples
//!
//! ```
//! use talklog::core::filter::{FilterConfig, apply_filters};
//! use talklog::parser::TalkParser;
//!
//! # fn main() -> talklog::Result<()> {
//! let log = TalkParser::new().parse_str(
//!     "[2025/1/14 9:00] Alice: Old\n\
//!      [2025/1/15 23:30] Alice: Late\n\
//!      [2025/1/15 12:00] Bob: [スタンプ]",
//! )?;
//!
//! let config = FilterConfig::new()
//!     .with_date_from("2025-01-15")?
//!     .with_sender("alice")
//!     .with_time_range("22:00", "05:00")?;
//!
//! let filtered = apply_filters(log.records, &config);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].body(), "Late");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Sender matching is case-insensitive for ASCII characters
//! - Date bounds accept `YYYY-MM-DD` and `YYYY/M/D`
//! - Multiple filters are combined with AND logic; values inside one filter
//!   (senders, types, keywords) are combined with OR

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::analysis::emoji::contains_emoji;
use crate::error::{Result, TalkError};
use crate::parsing::resolve_date;
use crate::record::{Record, STICKER_MARKER};

/// Words that mark a message as an image placeholder.
const IMAGE_MARKERS: &[&str] = &["画像", "写真", "image"];

/// Coarse content type of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    /// Plain text message
    Text,
    /// Message containing the sticker marker
    Sticker,
    /// Image or photo placeholder
    Image,
    /// System notification
    System,
}

impl MessageType {
    /// Classifies a record. System beats sticker beats image beats text.
    pub fn of(record: &Record) -> Self {
        if record.is_system() {
            return MessageType::System;
        }
        let body = record.body();
        if body.contains(STICKER_MARKER) {
            return MessageType::Sticker;
        }
        let lower = body.to_lowercase();
        if IMAGE_MARKERS.iter().any(|m| lower.contains(m)) {
            return MessageType::Image;
        }
        MessageType::Text
    }
}

impl std::str::FromStr for MessageType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(MessageType::Text),
            "sticker" | "stamp" => Ok(MessageType::Sticker),
            "image" => Ok(MessageType::Image),
            "system" => Ok(MessageType::System),
            _ => Err(format!(
                "Unknown message type: '{s}'. Expected one of: text, sticker, image, system"
            )),
        }
    }
}

/// Configuration for filtering records.
///
/// Filters are combined with AND logic: a record must match all active
/// filters to be included in the result.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Include only records on or after this date.
    pub after: Option<NaiveDate>,

    /// Include only records on or before this date.
    pub before: Option<NaiveDate>,

    /// Include only records from one of these senders (case-insensitive).
    pub senders: Vec<String>,

    /// Include only records of one of these types.
    pub message_types: Vec<MessageType>,

    /// Minimum body length in characters (inclusive).
    pub min_length: Option<usize>,

    /// Maximum body length in characters (inclusive).
    pub max_length: Option<usize>,

    /// Include only records whose body contains one of these.
    pub keywords: Vec<String>,

    /// Whether keyword matching respects case (default: false).
    pub case_sensitive: bool,

    /// Inclusive time-of-day range; `start > end` wraps past midnight.
    pub time_range: Option<(NaiveTime, NaiveTime)>,

    /// `Some(true)` keeps only records with emoji, `Some(false)` only without.
    pub has_emoji: Option<bool>,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    ///
    /// No filters are active by default; all records pass through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date filter (inclusive).
    ///
    /// # Errors
    ///
    /// Returns [`TalkError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self> {
        self.after = Some(parse_filter_date(date_str)?);
        Ok(self)
    }

    /// Sets the end date filter (inclusive).
    ///
    /// # Errors
    ///
    /// Returns [`TalkError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self> {
        self.before = Some(parse_filter_date(date_str)?);
        Ok(self)
    }

    /// Adds a sender. Records from any added sender pass.
    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.senders.push(sender.into());
        self
    }

    /// Adds a message type. Records of any added type pass.
    #[must_use]
    pub fn with_message_type(mut self, message_type: MessageType) -> Self {
        self.message_types.push(message_type);
        self
    }

    /// Sets the body length bounds in characters (both inclusive).
    #[must_use]
    pub fn with_length_range(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    /// Adds a keyword. Records containing any added keyword pass.
    #[must_use]
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.push(keyword.into());
        self
    }

    /// Sets whether keyword matching respects case.
    #[must_use]
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Sets an inclusive `HH:MM` time-of-day range.
    ///
    /// `("23:00", "05:00")` keeps late-night records on either side of midnight.
    ///
    /// # Errors
    ///
    /// Returns [`TalkError::InvalidDate`] if either bound isn't `HH:MM`.
    pub fn with_time_range(mut self, start: &str, end: &str) -> Result<Self> {
        let parse = |s: &str| {
            NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| TalkError::invalid_time(s))
        };
        self.time_range = Some((parse(start)?, parse(end)?));
        Ok(self)
    }

    /// Keeps only records with (`true`) or without (`false`) emoji.
    #[must_use]
    pub fn with_emoji(mut self, has_emoji: bool) -> Self {
        self.has_emoji = Some(has_emoji);
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.has_date_filter()
            || self.has_user_filter()
            || !self.message_types.is_empty()
            || self.min_length.is_some()
            || self.max_length.is_some()
            || !self.keywords.is_empty()
            || self.time_range.is_some()
            || self.has_emoji.is_some()
    }

    /// Returns `true` if date filters are active.
    pub fn has_date_filter(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Returns `true` if sender filter is active.
    pub fn has_user_filter(&self) -> bool {
        !self.senders.is_empty()
    }

    /// Returns `true` if `record` passes every active filter.
    pub fn matches(&self, record: &Record) -> bool {
        if self.after.is_some_and(|after| record.date() < after)
            || self.before.is_some_and(|before| record.date() > before)
        {
            return false;
        }

        if !self.senders.is_empty()
            && !self
                .senders
                .iter()
                .any(|s| record.sender().eq_ignore_ascii_case(s))
        {
            return false;
        }

        if !self.message_types.is_empty() && !self.message_types.contains(&MessageType::of(record))
        {
            return false;
        }

        if self.min_length.is_some() || self.max_length.is_some() {
            let len = record.char_len();
            if self.min_length.is_some_and(|min| len < min)
                || self.max_length.is_some_and(|max| len > max)
            {
                return false;
            }
        }

        if !self.keywords.is_empty() && !self.matches_keyword(record.body()) {
            return false;
        }

        if let Some((start, end)) = self.time_range {
            let t = record.timestamp().time();
            let inside = if start <= end {
                start <= t && t <= end
            } else {
                t >= start || t <= end
            };
            if !inside {
                return false;
            }
        }

        if let Some(wanted) = self.has_emoji {
            if contains_emoji(record.body()) != wanted {
                return false;
            }
        }

        true
    }

    fn matches_keyword(&self, body: &str) -> bool {
        if self.case_sensitive {
            self.keywords.iter().any(|k| body.contains(k.as_str()))
        } else {
            let body = body.to_lowercase();
            self.keywords
                .iter()
                .any(|k| body.contains(&k.to_lowercase()))
        }
    }
}

/// Parses `YYYY-MM-DD` or the export's own `YYYY/M/D`.
pub fn parse_filter_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .or_else(|_| resolve_date(date_str))
        .map_err(|_| TalkError::invalid_date(date_str))
}

/// Filters a collection of records based on the provided configuration.
///
/// Returns a new vector containing only records that match all active filters,
/// in their original order. If no filters are active, returns the input
/// unchanged.
pub fn apply_filters(records: Vec<Record>, config: &FilterConfig) -> Vec<Record> {
    if !config.is_active() {
        return records;
    }

    records.into_iter().filter(|r| config.matches(r)).collect()
}
