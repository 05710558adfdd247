//! JSON Lines (JSONL) output writer.
//!
//! One message object per line, convenient for piping into `jq` or loading
//! a chat incrementally.

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::Message;
use crate::core::models::{MessageRecord, OutputConfig};
use crate::error::Result;

/// Writes messages to a JSONL file.
///
/// ```jsonl
/// {"id":"c2bzg3-k9x1a","timestamp":"9:00","sender":"Alice","message":"Hello"}
/// {"id":"gzzj8f-0qz7m","timestamp":"9:01","sender":"Bob","message":"Hi"}
/// ```
pub fn write_jsonl(messages: &[Message], output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(&mut writer, messages, config)?;
    writer.flush()?;
    Ok(())
}

/// Converts messages to a JSONL string, each line terminated by `\n`.
pub fn to_jsonl(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_lines(&mut buffer, messages, config)?;
    String::from_utf8(buffer)
        .map_err(|e| crate::ChatshareError::invalid_format("jsonl", e.to_string()))
}

fn write_lines<W: Write>(writer: &mut W, messages: &[Message], config: &OutputConfig) -> Result<()> {
    for msg in messages {
        let record = MessageRecord::from_message(msg, config);
        serde_json::to_writer(&mut *writer, &record)?;
        writeln!(writer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_jsonl_basic() {
        let messages = vec![
            Message::with_id("a-00001", "9:00", "Alice", "Hello"),
            Message::with_id("b-00002", "9:01", "Bob", "Hi"),
        ];

        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();
        write_jsonl(&messages, path, &OutputConfig::new()).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["sender"], "Alice");
        assert_eq!(first["message"], "Hello");
        assert_eq!(first["id"], "a-00001");

        let second: Message = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second, messages[1]);
    }

    #[test]
    fn test_jsonl_no_array_brackets() {
        let messages = vec![Message::with_id("a", "9:00", "Alice", "Hello")];
        let content = to_jsonl(&messages, &OutputConfig::new()).unwrap();
        assert!(!content.starts_with('['));
        assert!(content.ends_with('\n'));
    }

    #[test]
    fn test_multiline_body_stays_on_one_line() {
        let messages = vec![Message::with_id("a", "9:00", "Alice", "line one\nline two")];
        let content = to_jsonl(&messages, &OutputConfig::new()).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.contains(r"line one\nline two"));
    }
}
