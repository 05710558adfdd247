//! Bracketed text rendering.
//!
//! Turns messages back into the bracketed dialect, one `[ts] sender: body`
//! entry per message. It doubles as the editable text for chats stored as
//! message arrays, so rendering refuses any message whose entry would not
//! parse back to the same timestamp, sender and body (see
//! [`ensure_renderable`]).

use std::fs::File;
use std::io::Write;

use crate::Message;
use crate::error::{ChatshareError, Result};
use crate::parsing::is_timestamp_only_line;

/// Checks that a message survives rendering and re-parsing unchanged.
///
/// Rejected messages are those where:
/// - the timestamp holds a line break or `"] "`, which ends the header early
/// - the sender holds a `:` or a line break, which splits the header
/// - the body holds a line starting with `[`, which starts a new message
/// - a body line is a bare `D Mon, H:MM` timestamp, which turns the whole
///   text into a generic export on re-parse
///
/// Comparison assumes the trimmed fields and normalized timestamp that
/// [`Message::new`] produces.
///
/// ```rust
/// use chatshare::Message;
/// use chatshare::core::output::ensure_renderable;
///
/// assert!(ensure_renderable(&Message::new("9:00", "Alice", "Hi")).is_ok());
/// assert!(ensure_renderable(&Message::new("9:00", "Re: Bob", "Hi")).is_err());
/// assert!(ensure_renderable(&Message::new("9:00", "Alice", "look\n[photo]")).is_err());
/// ```
pub fn ensure_renderable(msg: &Message) -> Result<()> {
    let reason = if msg.timestamp.contains('\n') || msg.timestamp.contains("] ") {
        "timestamp contains a line break or \"] \""
    } else if msg.sender.contains(':') || msg.sender.contains('\n') {
        "sender contains ':' or a line break"
    } else if msg.message.contains("\n[") {
        "body has a line starting with '['"
    } else if msg.message.lines().any(is_timestamp_only_line) {
        "body has a line that is only a timestamp"
    } else {
        return Ok(());
    };

    Err(ChatshareError::invalid_format(
        "text",
        format!("message {} cannot be rendered as chat text: {}", msg.id, reason),
    ))
}

/// Renders messages as bracketed chat text joined with `\n`.
///
/// Fails with an invalid format error on the first message that would not
/// parse back unchanged.
///
/// ```rust
/// use chatshare::Message;
/// use chatshare::core::output::to_raw_text;
///
/// let messages = vec![
///     Message::new("9:00", "Alice", "Hello"),
///     Message::new("9:01", "Bob", "Hi"),
/// ];
/// assert_eq!(to_raw_text(&messages).unwrap(), "[9:00] Alice: Hello\n[9:01] Bob: Hi");
/// ```
pub fn to_raw_text(messages: &[Message]) -> Result<String> {
    let lines = messages
        .iter()
        .map(|m| {
            ensure_renderable(m)?;
            Ok(format!("[{}] {}: {}", m.timestamp, m.sender, m.message))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(lines.join("\n"))
}

/// Writes the bracketed rendering to a file, with a trailing newline.
///
/// Nothing is written if a message cannot be rendered.
pub fn write_text(messages: &[Message], output_path: &str) -> Result<()> {
    let text = to_raw_text(messages)?;
    let mut file = File::create(output_path)?;
    file.write_all(text.as_bytes())?;
    if !text.is_empty() {
        file.write_all(b"\n")?;
    }
    Ok(())
}
