//! JSON Lines output writer.

use std::fs::File;
use std::io::{BufWriter, Write};

use super::{OutputConfig, OutputRecord};
use crate::error::Result;
use crate::record::Record;

/// Writes records to a JSONL file, one object per line.
///
/// # Format
/// ```text
/// {"date":"2025-01-15","time":"09:00","sender":"Alice","body":"Hello"}
/// {"date":"2025-01-15","time":"09:05","sender":"Bob","body":"Hi"}
/// ```
pub fn write_jsonl(records: &[Record], output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);

    for record in records {
        let line = serde_json::to_string(&OutputRecord::new(record, config))?;
        writeln!(writer, "{line}")?;
    }

    writer.flush()?;
    Ok(())
}

/// Converts records to a JSONL string.
///
/// Same format as [`write_jsonl`]; every line ends with `\n`.
pub fn to_jsonl(records: &[Record], config: &OutputConfig) -> Result<String> {
    let mut output = String::new();

    for record in records {
        output.push_str(&serde_json::to_string(&OutputRecord::new(record, config))?);
        output.push('\n');
    }

    Ok(output)
}
