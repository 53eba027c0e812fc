//! JSON output writer.

use std::fs::File;
use std::io::Write;

use super::{OutputConfig, OutputRecord};
use crate::error::Result;
use crate::record::Record;

/// Writes records to a JSON file as an array.
///
/// # Format
/// ```json
/// [
///   {"date": "2025-01-15", "time": "09:00", "sender": "Alice", "body": "Hello"},
///   {"date": "2025-01-15", "time": "09:05", "sender": "Bob", "body": "Hi"}
/// ]
/// ```
pub fn write_json(records: &[Record], output_path: &str, config: &OutputConfig) -> Result<()> {
    let json = to_json(records, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts records to a pretty-printed JSON array.
///
/// Same format as [`write_json`], but returns a String instead of writing to file.
pub fn to_json(records: &[Record], config: &OutputConfig) -> Result<String> {
    let rows: Vec<OutputRecord<'_>> = records
        .iter()
        .map(|r| OutputRecord::new(r, config))
        .collect();

    Ok(serde_json::to_string_pretty(&rows)?)
}
