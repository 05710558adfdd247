//! CSV output writer.

use std::fs::File;
use std::io::Write;

use crate::Message;
use crate::core::models::OutputConfig;
use crate::error::{ChatshareError, Result};

/// Writes messages to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `ID;Timestamp;Sender;Message`, without `ID` when ids are disabled
/// - Encoding: UTF-8
pub fn write_csv(messages: &[Message], output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(file, messages, config)
}

/// Converts messages to a CSV string.
pub fn to_csv(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(&mut buffer, messages, config)?;
    String::from_utf8(buffer).map_err(|e| ChatshareError::invalid_format("csv", e.to_string()))
}

fn write_records<W: Write>(sink: W, messages: &[Message], config: &OutputConfig) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(sink);

    writer.write_record(build_header(config))?;
    for msg in messages {
        writer.write_record(build_record(msg, config))?;
    }

    writer.flush()?;
    Ok(())
}

fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = Vec::with_capacity(4);
    if config.include_ids {
        header.push("ID");
    }
    header.extend(["Timestamp", "Sender", "Message"]);
    header
}

fn build_record<'a>(msg: &'a Message, config: &OutputConfig) -> Vec<&'a str> {
    let mut record = Vec::with_capacity(4);
    if config.include_ids {
        record.push(msg.id.as_str());
    }
    record.extend([msg.timestamp.as_str(), msg.sender.as_str(), msg.message.as_str()]);
    record
}
