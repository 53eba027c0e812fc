//! Low-level parsing building blocks.
//!
//! - [`timestamp`] resolves `YYYY/M/D` and `H:MM` tokens
//! - [`classifier`] decides what one physical line is
//! - [`decode`] turns raw bytes into text (UTF-8, then Shift_JIS)
//!
//! [`TalkParser`](crate::parser::TalkParser) drives these over a whole document.

pub mod classifier;
pub mod decode;
pub mod timestamp;

// Re-export commonly used items
pub use classifier::{LineClass, LineClassifier, MessageFormat, classify_line};
pub use decode::{SourceEncoding, decode_source};
pub use timestamp::{resolve_date, resolve_timestamp};
