//! Record views, filtering and export.
//!
//! This module contains:
//! - [`index`] - Read-only views over a record sequence
//! - [`filter`] - Record filtering by date, sender, type, length and keyword
//! - [`output`] - Format writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() {
//! use talklog::core::{
//!     ConversationIndex, FilterConfig, OutputConfig,
//!     apply_filters, write_csv, write_json, write_jsonl,
//! };
//! # }
//! ```

pub mod filter;
pub mod index;
pub mod output;

pub use filter::{FilterConfig, MessageType, apply_filters};
pub use index::{ConversationIndex, DailyStats};
pub use output::OutputConfig;

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
