//! Command-line interface definition using clap.
//!
//! [`Args`] is the whole surface of the `talklog` binary. The helper
//! methods turn flags into the library's own configuration types so the
//! binary stays a thin driver.

use std::path::PathBuf;

use clap::Parser;

use crate::config::ParserConfig;
use crate::core::{FilterConfig, MessageType, OutputConfig};
use crate::error::Result;
use crate::format::OutputFormat;

/// Output path used when `-o` is not given (extension follows `--format`).
pub const DEFAULT_OUTPUT: &str = "talk_export.csv";

/// Output path used in `--stats` mode when `-o` is not given.
pub const DEFAULT_STATS_OUTPUT: &str = "talk_stats.json";

/// Parse LINE talk-history exports into records and conversation statistics.
#[derive(Parser, Debug, Clone)]
#[command(name = "talklog")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    talklog talk.txt
    talklog talk.txt -o talk.jsonl -f jsonl
    talklog talk.txt --after 2025-01-01 --from Alice
    talklog talk.txt --search 寿司 --type text
    talklog talk.txt --stats --config analysis.json")]
pub struct Args {
    /// Path to the exported talk history (.txt, UTF-8 or Shift_JIS)
    pub input: String,

    /// Path to output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Output format for records (csv, json, jsonl)
    #[arg(short, long, default_value = "csv")]
    pub format: OutputFormat,

    /// Keep records on or after this date (YYYY-MM-DD or YYYY/M/D)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Keep records on or before this date (YYYY-MM-DD or YYYY/M/D)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Keep records from this sender
    #[arg(long, value_name = "USER")]
    pub from: Option<String>,

    /// Keep records whose body contains this keyword (case-insensitive)
    #[arg(long, value_name = "KEYWORD")]
    pub search: Option<String>,

    /// Keep records of this type (text, sticker, image, system); repeatable
    #[arg(long = "type", value_name = "TYPE")]
    pub types: Vec<MessageType>,

    /// Drop system notifications while parsing
    #[arg(long)]
    pub no_system: bool,

    /// Include physical line numbers in output
    #[arg(short = 'n', long)]
    pub line_numbers: bool,

    /// Include the record kind (message/system) in output
    #[arg(short = 'k', long)]
    pub kind: bool,

    /// Write conversation statistics as JSON instead of records
    #[arg(long)]
    pub stats: bool,

    /// Analysis configuration file (JSON)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log parser diagnostics at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Resolves the output path, adjusting the default to the chosen mode.
    pub fn output_path(&self) -> String {
        if self.output != DEFAULT_OUTPUT {
            return self.output.clone();
        }
        if self.stats {
            return DEFAULT_STATS_OUTPUT.to_string();
        }
        format!("talk_export.{}", self.format.extension())
    }

    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig::new().with_skip_system_messages(self.no_system)
    }

    /// Builds the record filter from the filter flags.
    ///
    /// # Errors
    ///
    /// Returns [`TalkError::InvalidDate`](crate::TalkError::InvalidDate) for
    /// unparseable `--after` / `--before` values.
    pub fn filter_config(&self) -> Result<FilterConfig> {
        let mut filter = FilterConfig::new();
        if let Some(ref after) = self.after {
            filter = filter.with_date_from(after)?;
        }
        if let Some(ref before) = self.before {
            filter = filter.with_date_to(before)?;
        }
        if let Some(ref from) = self.from {
            filter = filter.with_sender(from.clone());
        }
        if let Some(ref keyword) = self.search {
            filter = filter.with_keyword(keyword.clone());
        }
        for message_type in &self.types {
            filter = filter.with_message_type(*message_type);
        }
        Ok(filter)
    }

    pub fn output_config(&self) -> OutputConfig {
        let mut config = OutputConfig::new();
        if self.line_numbers {
            config = config.with_line_numbers();
        }
        if self.kind {
            config = config.with_kind();
        }
        config
    }
}
