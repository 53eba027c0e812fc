//! Per-line classification for LINE talk exports.
//!
//! Real exports interleave several line shapes:
//!
//! | Shape | Example |
//! |-------|---------|
//! | Date header | `2025/1/15(水)` |
//! | Bracketed message (format A) | `[2025/1/15 09:05] Bob: hi` |
//! | Bare-time message (format B) | `09:00<TAB>Alice<TAB>hello` |
//! | System line | `[2025/1/15 09:06] Alice joined the group.` |
//!
//! Classification looks at one trimmed line and a single carried value, the
//! date of the most recent header. Rules are tried in the order of [`RULES`];
//! the first rule whose shape matches decides the line, even if its timestamp
//! then fails to resolve. There is no look-ahead.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use super::timestamp::{resolve_date, resolve_time_on, resolve_timestamp};
use crate::error::TalkError;

// `YYYY/M/D(曜)` and nothing else on the line.
static DATE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}/\d{1,2}/\d{1,2})\([月火水木金土日]\)$").expect("date header pattern")
});

// `[YYYY/M/D H:MM] sender: body`; the body may be empty.
static BRACKETED_MESSAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(\d{4}/\d{1,2}/\d{1,2})\s+(\d{1,2}:\d{2})\]\s+([^:]+):\s*(.*)$")
        .expect("bracketed message pattern")
});

// `H:MM<TAB>sender<TAB>body`, or `H:MM sender body` split on whitespace runs.
static BARE_TIME_MESSAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}:\d{2})(?:\t+([^\t]+?)\t+|\s+(\S+)\s+)(.+)$")
        .expect("bare time message pattern")
});

// `[YYYY/M/D H:MM] free text`
static SYSTEM_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(\d{4}/\d{1,2}/\d{1,2})\s+(\d{1,2}:\d{2})\]\s+(.+)$")
        .expect("system line pattern")
});

/// Which message shape produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageFormat {
    /// `[YYYY/M/D H:MM] sender: body`; the body may be empty.
    Bracketed,
    /// `H:MM sender body` under a date header
    BareTime,
}

/// Outcome of classifying one line.
#[derive(Debug)]
pub enum LineClass {
    /// A date header; carries the new date context.
    DateHeader(NaiveDate),
    /// A participant message.
    Message {
        timestamp: NaiveDateTime,
        sender: String,
        body: String,
        format: MessageFormat,
    },
    /// A system notification.
    System { timestamp: NaiveDateTime, body: String },
    /// The line had a recognized shape but its date/time did not resolve.
    Malformed {
        /// Name of the rule whose shape matched
        rule: &'static str,
        error: TalkError,
    },
    /// No rule matched.
    Unparsable,
}

/// A classification rule: `None` means "shape not recognized, try the next rule".
type Rule = fn(&str, Option<NaiveDate>) -> Option<LineClass>;

/// Classification rules in evaluation order. The order is load-bearing.
pub const RULES: [(&str, Rule); 4] = [
    ("date_header", date_header),
    ("bracketed_message", bracketed_message),
    ("bare_time_message", bare_time_message),
    ("system_line", system_line),
];

/// Classifies a single trimmed, non-empty line.
///
/// `current_date` is the date of the most recent header, if any. This function
/// is pure; use [`LineClassifier`] to carry the date between lines.
///
/// # Example
///
/// ```rust
/// use talklog::parsing::classifier::{LineClass, classify_line};
///
/// let class = classify_line("[2025/1/15 09:05] Bob: hi", None);
/// assert!(matches!(class, LineClass::Message { ref sender, .. } if sender == "Bob"));
///
/// // Bare-time lines need a date context.
/// assert!(matches!(classify_line("09:00\tAlice\thello", None), LineClass::Unparsable));
/// ```
pub fn classify_line(line: &str, current_date: Option<NaiveDate>) -> LineClass {
    RULES
        .iter()
        .find_map(|(_, rule)| rule(line, current_date))
        .unwrap_or(LineClass::Unparsable)
}

/// Stateful classifier carrying the current date context between lines.
#[derive(Debug, Clone, Default)]
pub struct LineClassifier {
    current_date: Option<NaiveDate>,
}

impl LineClassifier {
    /// Creates a classifier with no date context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the date of the most recent valid header.
    pub fn current_date(&self) -> Option<NaiveDate> {
        self.current_date
    }

    /// Classifies `line` and updates the carried date context.
    ///
    /// A header with an impossible date clears the context so that following
    /// bare-time lines are not attributed to a stale day.
    pub fn classify(&mut self, line: &str) -> LineClass {
        let class = classify_line(line, self.current_date);
        match &class {
            LineClass::DateHeader(date) => self.current_date = Some(*date),
            LineClass::Malformed {
                rule: "date_header",
                ..
            } => self.current_date = None,
            _ => {}
        }
        class
    }
}

fn date_header(line: &str, _current_date: Option<NaiveDate>) -> Option<LineClass> {
    let caps = DATE_HEADER.captures(line)?;
    Some(match resolve_date(&caps[1]) {
        Ok(date) => LineClass::DateHeader(date),
        Err(error) => LineClass::Malformed {
            rule: "date_header",
            error,
        },
    })
}

fn bracketed_message(line: &str, _current_date: Option<NaiveDate>) -> Option<LineClass> {
    let caps = BRACKETED_MESSAGE.captures(line)?;
    let sender = caps[3].trim();
    if sender.is_empty() {
        return None;
    }

    Some(match resolve_timestamp(&caps[1], &caps[2]) {
        Ok(timestamp) => LineClass::Message {
            timestamp,
            sender: sender.to_string(),
            body: caps[4].trim().to_string(),
            format: MessageFormat::Bracketed,
        },
        Err(error) => LineClass::Malformed {
            rule: "bracketed_message",
            error,
        },
    })
}

fn bare_time_message(line: &str, current_date: Option<NaiveDate>) -> Option<LineClass> {
    let date = current_date?;
    let caps = BARE_TIME_MESSAGE.captures(line)?;
    let sender = caps.get(2).or_else(|| caps.get(3))?.as_str().trim();
    if sender.is_empty() {
        return None;
    }

    Some(match resolve_time_on(date, &caps[1]) {
        Ok(timestamp) => LineClass::Message {
            timestamp,
            sender: sender.to_string(),
            body: caps[4].trim().to_string(),
            format: MessageFormat::BareTime,
        },
        Err(error) => LineClass::Malformed {
            rule: "bare_time_message",
            error,
        },
    })
}

fn system_line(line: &str, _current_date: Option<NaiveDate>) -> Option<LineClass> {
    let caps = SYSTEM_LINE.captures(line)?;
    Some(match resolve_timestamp(&caps[1], &caps[2]) {
        Ok(timestamp) => LineClass::System {
            timestamp,
            body: caps[3].trim().to_string(),
        },
        Err(error) => LineClass::Malformed {
            rule: "system_line",
            error,
        },
    })
}
