//! Source text decoding.
//!
//! Exports from current app versions are UTF-8. Older Japanese Windows exports
//! are Shift_JIS. Decoding tries UTF-8 first and falls back to exactly one
//! legacy encoding; anything else is unreadable.

use std::borrow::Cow;

use encoding_rs::SHIFT_JIS;
use serde::Serialize;

/// Encoding the source document was decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceEncoding {
    /// UTF-8 (with or without BOM)
    Utf8,
    /// Shift_JIS legacy fallback
    ShiftJis,
}

impl std::fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceEncoding::Utf8 => write!(f, "UTF-8"),
            SourceEncoding::ShiftJis => write!(f, "Shift_JIS"),
        }
    }
}

const UTF8_BOM: &str = "\u{feff}";

/// Decodes raw export bytes.
///
/// Returns `None` when the bytes are neither valid UTF-8 nor valid Shift_JIS.
///
/// # Example
///
/// ```rust
/// use talklog::parsing::decode::{SourceEncoding, decode_source};
///
/// let (text, encoding) = decode_source("[2025/1/15 09:05] Bob: hi".as_bytes()).unwrap();
/// assert_eq!(encoding, SourceEncoding::Utf8);
/// assert!(text.starts_with('['));
/// ```
pub fn decode_source(bytes: &[u8]) -> Option<(Cow<'_, str>, SourceEncoding)> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);
        return Some((Cow::Borrowed(text), SourceEncoding::Utf8));
    }

    SHIFT_JIS
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| (text, SourceEncoding::ShiftJis))
}
