//! Output format writers.
//!
//! This module provides writers for different output formats:
//! - [`write_csv`] / [`to_csv`] - CSV with semicolon delimiter - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - JSON array of records - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines, one record per line - requires `json-output` feature
//!
//! Every writer emits records in the order given, which for parser output is
//! physical order. Each record always carries its date, time, sender and
//! body; [`OutputConfig`] adds the line number and kind columns.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> talklog::Result<()> {
//! use talklog::core::output::{OutputConfig, to_csv, write_json, write_jsonl};
//! use talklog::parser::TalkParser;
//!
//! let log = TalkParser::new().parse_file("talk.txt")?;
//! let config = OutputConfig::new().with_line_numbers();
//!
//! write_json(&log.records, "talk.json", &config)?;
//! write_jsonl(&log.records, "talk.jsonl", &config)?;
//! let csv_string = to_csv(&log.records, &config)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};

#[cfg(feature = "json-output")]
use serde::Serialize;

#[cfg(feature = "json-output")]
use crate::record::{Record, RecordKind};

/// Controls which optional columns are written.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Include the physical line number
    pub include_line_numbers: bool,
    /// Include the record kind (`message` / `system`)
    pub include_kind: bool,
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every optional column.
    pub fn all() -> Self {
        Self {
            include_line_numbers: true,
            include_kind: true,
        }
    }

    #[must_use]
    pub fn with_line_numbers(mut self) -> Self {
        self.include_line_numbers = true;
        self
    }

    #[must_use]
    pub fn with_kind(mut self) -> Self {
        self.include_kind = true;
        self
    }
}

/// Record shape shared by the JSON and JSONL writers.
#[cfg(feature = "json-output")]
#[derive(Serialize)]
struct OutputRecord<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    line_number: Option<usize>,
    date: String,
    time: &'a str,
    sender: &'a str,
    body: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<RecordKind>,
}

#[cfg(feature = "json-output")]
impl<'a> OutputRecord<'a> {
    fn new(record: &'a Record, config: &OutputConfig) -> Self {
        Self {
            line_number: config.include_line_numbers.then(|| record.line_number()),
            date: record.date().format("%Y-%m-%d").to_string(),
            time: record.time_of_day(),
            sender: record.sender(),
            body: record.body(),
            kind: config.include_kind.then(|| record.kind()),
        }
    }
}
