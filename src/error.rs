//! Unified error types for talklog.
//!
//! This module provides a single [`TalkError`] enum that covers every failure
//! the library can surface.
//!
//! # Error Handling Philosophy
//!
//! - **Structural failures** of a parse (unreadable bytes, no recognizable
//!   messages) are returned to the caller as hard errors.
//! - **Line-level anomalies** such as [`TalkError::MalformedTimestamp`] are
//!   produced by the timestamp resolver but absorbed by the parser, which logs
//!   them and skips the offending line.
//! - **Statistics** never fail: aggregators degrade to empty results.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for talklog operations.
///
/// # Example
///
/// ```rust
/// use talklog::error::Result;
/// use talklog::Record;
///
/// fn my_function() -> Result<Vec<Record>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, TalkError>;

/// The error type for all talklog operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TalkError {
    /// An I/O error occurred while reading the export or writing output.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The document could not be decoded as UTF-8 nor as Shift_JIS.
    #[error("Cannot decode talk export{}: not valid UTF-8 or Shift_JIS text", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    UnreadableSource {
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// The document decoded but no line matched a known talk-log shape.
    #[error("No messages found in {lines} line(s). Expected lines like '[2025/1/15 09:05] Name: text' or a '2025/1/15(水)' date header followed by '09:05<TAB>Name<TAB>text'")]
    NoMessagesFound {
        /// Number of physical lines that were examined
        lines: usize,
    },

    /// A date or time token on a single line does not resolve to a real instant.
    #[error("Malformed timestamp '{date} {time}'")]
    MalformedTimestamp {
        /// The date token as written in the export
        date: String,
        /// The time token as written in the export (empty for date headers)
        time: String,
    },

    /// Invalid date in a filter or on the command line.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// An analysis configuration could not be loaded.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong
        message: String,
    },

    /// Unknown output format, or one whose writer is compiled out.
    #[error("Invalid output format: {message}")]
    InvalidFormat {
        /// Description of what's wrong
        message: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl TalkError {
    /// Creates an unreadable-source error.
    pub fn unreadable(path: Option<PathBuf>) -> Self {
        TalkError::UnreadableSource { path }
    }

    /// Creates a no-messages error for a document of `lines` physical lines.
    pub fn no_messages(lines: usize) -> Self {
        TalkError::NoMessagesFound { lines }
    }

    /// Creates a malformed-timestamp error.
    pub fn malformed_timestamp(date: impl Into<String>, time: impl Into<String>) -> Self {
        TalkError::MalformedTimestamp {
            date: date.into(),
            time: time.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        TalkError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD or YYYY/M/D",
        }
    }

    /// Creates an invalid date error for a clock time such as a filter bound.
    pub fn invalid_time(input: impl Into<String>) -> Self {
        TalkError::InvalidDate {
            input: input.into(),
            expected: "HH:MM",
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        TalkError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Creates an invalid output format error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        TalkError::InvalidFormat {
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, TalkError::Io(_))
    }

    /// Returns `true` if the source bytes could not be decoded.
    pub fn is_unreadable(&self) -> bool {
        matches!(self, TalkError::UnreadableSource { .. })
    }

    /// Returns `true` if the document contained no recognizable messages.
    pub fn is_no_messages(&self) -> bool {
        matches!(self, TalkError::NoMessagesFound { .. })
    }

    /// Returns `true` if this is a line-level timestamp error.
    pub fn is_malformed_timestamp(&self) -> bool {
        matches!(self, TalkError::MalformedTimestamp { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, TalkError::InvalidDate { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = TalkError::from(io_err);
        let display = err.to_string();
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_unreadable_with_path() {
        let err = TalkError::unreadable(Some(PathBuf::from("/tmp/talk.txt")));
        let display = err.to_string();
        assert!(display.contains("UTF-8"));
        assert!(display.contains("Shift_JIS"));
        assert!(display.contains("/tmp/talk.txt"));
    }

    #[test]
    fn test_unreadable_without_path() {
        let err = TalkError::unreadable(None);
        assert!(!err.to_string().contains("file:"));
    }

    #[test]
    fn test_no_messages_is_actionable() {
        let err = TalkError::no_messages(12);
        let display = err.to_string();
        assert!(display.contains("12 line(s)"));
        assert!(display.contains("date header"));
    }

    #[test]
    fn test_malformed_timestamp_display() {
        let err = TalkError::malformed_timestamp("2025/13/1", "09:00");
        assert_eq!(err.to_string(), "Malformed timestamp '2025/13/1 09:00'");
    }

    #[test]
    fn test_invalid_date_display() {
        let err = TalkError::invalid_date("not-a-date");
        let display = err.to_string();
        assert!(display.contains("not-a-date"));
        assert!(display.contains("YYYY-MM-DD"));

        let err = TalkError::invalid_time("25:99");
        assert!(err.to_string().contains("HH:MM"));
        assert!(err.is_invalid_date());
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err = TalkError::from(io_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_is_methods() {
        let io_err = TalkError::Io(io::Error::new(io::ErrorKind::NotFound, ""));
        assert!(io_err.is_io());
        assert!(!io_err.is_unreadable());
        assert!(!io_err.is_no_messages());

        assert!(TalkError::unreadable(None).is_unreadable());
        assert!(TalkError::no_messages(0).is_no_messages());
        assert!(TalkError::malformed_timestamp("x", "y").is_malformed_timestamp());
        assert!(TalkError::invalid_date("bad").is_invalid_date());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = TalkError::from(json_err);
        assert!(err.to_string().starts_with("JSON error"));
    }
}
