//! # talklog
//!
//! A Rust library for parsing LINE talk-history exports into ordered records
//! and computing conversation statistics over them.
//!
//! ## Overview
//!
//! A LINE export is a plain-text document mixing two message layouts:
//! - **Bracketed lines** carrying their own date: `[2025/1/15 09:05] Bob: hi`
//! - **Tab lines** under a date header: `2025/1/15(水)` then `09:00<TAB>Alice<TAB>hello`
//!
//! plus system notifications such as `09:01 Carol joined the group`. The
//! parser keeps records in **physical order** (the order the lines appear)
//! and reports, without correcting, places where timestamps go backwards.
//! Statistics that depend on time gaps work on the separately derived
//! chronological order.
//!
//! ## Quick Start
//!
//! ```rust
//! use talklog::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let log = TalkParser::new().parse_str(
//!         "2025/1/15(水)\n09:00\tAlice\thello\n[2025/1/15 09:05] Bob: hi",
//!     )?;
//!
//!     assert_eq!(log.records.len(), 2);
//!     assert!(log.integrity.is_monotonic());
//!
//!     let latency = response_latency(&log.records, &AnalysisConfig::default());
//!     assert_eq!(latency.overall.mean, 5.0);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] — [`TalkParser`] and its [`ParsedLog`] result
//! - [`parsing`] — line classification, timestamp resolution, text decoding
//! - [`record`] — the [`Record`] type and the two orderings
//! - [`integrity`] — [`OrderingIntegrityReport`]
//! - [`analysis`] — statistics aggregators and [`ConversationSummary`](analysis::ConversationSummary)
//! - [`core`] — [`ConversationIndex`](core::ConversationIndex), filtering and output writers
//! - [`config`] — [`ParserConfig`], [`AnalysisConfig`]
//! - [`format`] — [`OutputFormat`](format::OutputFormat) dispatch
//! - [`error`] — [`TalkError`], [`Result`]
//! - [`prelude`] — Convenient re-exports

pub mod analysis;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod integrity;
pub mod parser;
pub mod parsing;
pub mod record;

// Re-export the main types at the crate root for convenience
pub use config::{AnalysisConfig, ParserConfig};
pub use error::{Result, TalkError};
pub use integrity::OrderingIntegrityReport;
pub use parser::{ParsedLog, TalkParser};
pub use record::{Record, RecordKind};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use talklog::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Result, TalkError};
    pub use crate::record::{Record, RecordKind};

    pub use crate::config::{AnalysisConfig, ParserConfig};
    pub use crate::integrity::OrderingIntegrityReport;
    pub use crate::parser::{ParsedLog, TalkParser};

    pub use crate::core::{ConversationIndex, FilterConfig, OutputConfig, apply_filters};

    pub use crate::analysis::{
        ConversationSummary, EmotionScorer, ScriptTokenizer, Tokenizer, conversation_summary,
        emoji_usage, message_length, response_latency, seasonal_patterns, send_tempo,
        time_distribution, word_frequency,
    };

    #[cfg(feature = "csv-output")]
    pub use crate::core::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::{to_json, to_jsonl, write_json, write_jsonl};

    pub use crate::format::{OutputFormat, write_to_format};
}
