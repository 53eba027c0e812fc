//! Whole-document parser for LINE talk exports.
//!
//! [`TalkParser`] decodes the source bytes, walks the document one physical
//! line at a time through a [`LineClassifier`], and returns a [`ParsedLog`]:
//! the records in physical order, an [`OrderingIntegrityReport`], the detected
//! encoding and some [`ParseStats`].
//!
//! # Example
//!
//! ```rust
//! use talklog::parser::TalkParser;
//!
//! let text = "2025/1/15(水)\n09:00\tAlice\thello\n[2025/1/15 09:05] Bob: hi";
//! let log = TalkParser::new().parse_str(text)?;
//!
//! assert_eq!(log.records.len(), 2);
//! assert_eq!(log.records[0].sender(), "Alice");
//! assert_eq!(log.records[0].line_number(), 2);
//! assert!(log.integrity.is_monotonic());
//! # Ok::<(), talklog::TalkError>(())
//! ```
//!
//! # Line handling
//!
//! | Line | Outcome |
//! |------|---------|
//! | blank | counted, skipped |
//! | date header | updates the date context |
//! | message / system | emitted as a [`Record`] |
//! | recognized shape, bad timestamp | logged at `warn`, skipped |
//! | anything else | logged at `trace`, skipped |

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::config::ParserConfig;
use crate::error::{Result, TalkError};
use crate::integrity::OrderingIntegrityReport;
use crate::parsing::{LineClass, LineClassifier, SourceEncoding, decode_source};
use crate::record::Record;

/// Counters gathered during one parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    /// Every physical line, blanks included
    pub physical_lines: usize,
    /// Lines that were empty after trimming
    pub blank_lines: usize,
    /// Valid date headers seen
    pub date_headers: usize,
    /// Lines that matched no rule
    pub skipped_lines: usize,
    /// Lines with a recognized shape whose date or time did not resolve
    pub malformed_timestamps: usize,
    /// System notifications dropped because of [`ParserConfig::skip_system_messages`]
    pub skipped_system: usize,
}

/// Everything a parse produces.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedLog {
    /// Records in physical order (strictly ascending `line_number`)
    pub records: Vec<Record>,
    /// Timestamp monotonicity over `records`
    pub integrity: OrderingIntegrityReport,
    /// Encoding the document was decoded with
    pub encoding: SourceEncoding,
    /// Line counters
    pub stats: ParseStats,
}

/// Parser for LINE talk history exports.
///
/// # Example
///
/// ```rust,no_run
/// use talklog::parser::TalkParser;
///
/// let log = TalkParser::new().parse_file("talk.txt")?;
/// for record in &log.records {
///     println!("{} {}: {}", record.time_of_day(), record.sender(), record.body());
/// }
/// # Ok::<(), talklog::TalkError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TalkParser {
    config: ParserConfig,
}

impl TalkParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses an export file.
    ///
    /// # Errors
    ///
    /// Returns [`TalkError`] if:
    /// - the file cannot be read ([`TalkError::Io`])
    /// - the bytes are neither UTF-8 nor Shift_JIS ([`TalkError::UnreadableSource`])
    /// - no line yields a record ([`TalkError::NoMessagesFound`])
    pub fn parse(&self, path: &Path) -> Result<ParsedLog> {
        let bytes = fs::read(path)?;
        let (text, encoding) = self
            .decode(&bytes)
            .ok_or_else(|| TalkError::unreadable(Some(path.to_path_buf())))?;
        self.parse_text(&text, encoding)
    }

    /// Parses an export file (convenience method accepting a `&str` path).
    pub fn parse_file(&self, path: &str) -> Result<ParsedLog> {
        self.parse(Path::new(path))
    }

    /// Parses raw export bytes already in memory.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<ParsedLog> {
        let (text, encoding) = self
            .decode(bytes)
            .ok_or_else(|| TalkError::unreadable(None))?;
        self.parse_text(&text, encoding)
    }

    /// Parses export text already decoded to a string.
    pub fn parse_str(&self, content: &str) -> Result<ParsedLog> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        self.parse_text(content, SourceEncoding::Utf8)
    }

    fn decode<'a>(&self, bytes: &'a [u8]) -> Option<(std::borrow::Cow<'a, str>, SourceEncoding)> {
        decode_source(bytes)
            .filter(|(_, encoding)| self.config.legacy_encoding || *encoding == SourceEncoding::Utf8)
    }

    fn parse_text(&self, text: &str, encoding: SourceEncoding) -> Result<ParsedLog> {
        let mut classifier = LineClassifier::new();
        let mut stats = ParseStats::default();
        let mut records = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line_number = index + 1;
            stats.physical_lines = line_number;

            let line = raw.trim();
            if line.is_empty() {
                stats.blank_lines += 1;
                continue;
            }

            match classifier.classify(line) {
                LineClass::DateHeader(_) => stats.date_headers += 1,
                LineClass::Message {
                    timestamp,
                    sender,
                    body,
                    ..
                } => records.push(Record::message(line_number, timestamp, sender, body)),
                LineClass::System { timestamp, body } => {
                    if self.config.skip_system_messages {
                        stats.skipped_system += 1;
                    } else {
                        records.push(Record::system(line_number, timestamp, body));
                    }
                }
                LineClass::Malformed { rule, error } => {
                    stats.malformed_timestamps += 1;
                    tracing::warn!(line = line_number, rule, "{error}, skipping line");
                }
                LineClass::Unparsable => {
                    stats.skipped_lines += 1;
                    tracing::trace!(line = line_number, "unrecognized line skipped");
                }
            }
        }

        if records.is_empty() {
            return Err(TalkError::no_messages(stats.physical_lines));
        }

        // Emission order already equals line order.
        records.sort_by_key(Record::line_number);

        let integrity = OrderingIntegrityReport::from_records(&records);
        tracing::debug!(
            records = records.len(),
            lines = stats.physical_lines,
            skipped = stats.skipped_lines,
            malformed = stats.malformed_timestamps,
            violations = integrity.violation_count(),
            %encoding,
            "parsed talk export"
        );

        Ok(ParsedLog {
            records,
            integrity,
            encoding,
            stats,
        })
    }
}
