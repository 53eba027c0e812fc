//! CSV output writer.

use std::fs::File;
use std::io::Write;

use super::OutputConfig;
use crate::error::Result;
use crate::record::Record;

/// Writes records to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `[Line;]Date;Time;Sender;Body[;Kind]`
/// - Encoding: UTF-8
pub fn write_csv(records: &[Record], output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(records, file, config)
}

/// Converts records to a CSV string.
///
/// Same format as [`write_csv`], but returns a String instead of writing to file.
pub fn to_csv(records: &[Record], config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(records, &mut buffer, config)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn write_records(records: &[Record], out: impl Write, config: &OutputConfig) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(out);

    writer.write_record(build_header(config))?;
    for record in records {
        writer.write_record(build_row(record, config))?;
    }

    writer.flush()?;
    Ok(())
}

fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = Vec::with_capacity(6);

    if config.include_line_numbers {
        header.push("Line");
    }
    header.extend(["Date", "Time", "Sender", "Body"]);
    if config.include_kind {
        header.push("Kind");
    }

    header
}

fn build_row(record: &Record, config: &OutputConfig) -> Vec<String> {
    let mut row = Vec::with_capacity(6);

    if config.include_line_numbers {
        row.push(record.line_number().to_string());
    }
    row.push(record.date().format("%Y-%m-%d").to_string());
    row.push(record.time_of_day().to_string());
    row.push(record.sender().to_string());
    row.push(record.body().to_string());
    if config.include_kind {
        row.push(record.kind().to_string());
    }

    row
}
