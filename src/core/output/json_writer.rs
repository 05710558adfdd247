//! JSON output writer.

use std::fs::File;
use std::io::Write;

use crate::Message;
use crate::core::models::{MessageRecord, OutputConfig};
use crate::error::Result;

/// Writes messages to a JSON file as a pretty-printed array.
///
/// # Format
/// ```json
/// [
///   {"id": "c2bzg3-k9x1a", "timestamp": "9:00", "sender": "Alice", "message": "Hello"},
///   {"id": "gzzj8f-0qz7m", "timestamp": "9:01", "sender": "Bob", "message": "Hi"}
/// ]
/// ```
pub fn write_json(messages: &[Message], output_path: &str, config: &OutputConfig) -> Result<()> {
    let json = to_json(messages, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts messages to a JSON array string.
///
/// With the default [`OutputConfig`] this is the stored representation: it
/// decodes back into the same messages.
pub fn to_json(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let records: Vec<MessageRecord<'_>> = messages
        .iter()
        .map(|m| MessageRecord::from_message(m, config))
        .collect();

    Ok(serde_json::to_string_pretty(&records)?)
}
