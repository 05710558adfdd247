//! Persisted chat records.
//!
//! The `rawText` field of a stored chat has held three shapes over time:
//!
//! | Shape | Meaning |
//! |-------|---------|
//! | JSON array of messages | current format, ids are authoritative |
//! | string holding a JSON array | legacy double-encoded messages |
//! | any other string | raw export text, parsed on load |
//!
//! [`ChatContent::decode`] sorts a value into one of these and
//! [`encode_messages`] writes the current shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::Message;
use crate::core::participants::{NameMapping, SenderPositions};
use crate::error::{ChatshareError, Result};
use crate::parser::ChatParser;

/// Decoded `rawText` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatContent {
    /// Messages with their stored ids.
    Messages(Vec<Message>),
    /// Export text that still has to be parsed.
    RawText(String),
}

impl ChatContent {
    /// Classifies a stored `rawText` value.
    ///
    /// ```rust
    /// use chatshare::core::stored::ChatContent;
    /// use serde_json::json;
    ///
    /// let raw = ChatContent::decode(&json!("[9:00] Alice: Hi")).unwrap();
    /// assert!(matches!(raw, ChatContent::RawText(_)));
    ///
    /// let legacy = json!(r#"[{"id":"a","timestamp":"9:00","sender":"Alice","message":"Hi"}]"#);
    /// assert!(matches!(ChatContent::decode(&legacy).unwrap(), ChatContent::Messages(_)));
    /// ```
    pub fn decode(value: &Value) -> Result<Self> {
        match value {
            Value::Array(_) => {
                let messages = Vec::<Message>::deserialize(value).map_err(|e| {
                    ChatshareError::invalid_stored_chat(format!("rawText array: {e}"))
                })?;
                Ok(ChatContent::Messages(messages))
            }
            Value::String(text) => {
                // Only a string that starts like an array is worth trying as
                // legacy messages; chat text such as "[9:00] ..." also starts
                // with '[' and simply falls through.
                if text.trim_start().starts_with('[') {
                    if let Ok(messages) = serde_json::from_str::<Vec<Message>>(text) {
                        debug!(count = messages.len(), "Decoded legacy string-encoded messages");
                        return Ok(ChatContent::Messages(messages));
                    }
                }
                Ok(ChatContent::RawText(text.clone()))
            }
            other => Err(ChatshareError::invalid_stored_chat(format!(
                "rawText must be a string or an array, got {}",
                value_kind(other)
            ))),
        }
    }

    /// Returns `true` if ids are stored rather than freshly generated.
    pub fn has_stored_ids(&self) -> bool {
        matches!(self, ChatContent::Messages(_))
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Serializes messages in the current stored shape.
pub fn encode_messages(messages: &[Message]) -> Result<Value> {
    Ok(serde_json::to_value(messages)?)
}

/// A chat as kept by the sharing service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredChat {
    pub raw_text: Value,
    #[serde(default)]
    pub sender_positions: SenderPositions,
    #[serde(default)]
    pub name_mapping: NameMapping,
}

impl StoredChat {
    /// Builds a record for freshly parsed messages, seeding sender sides.
    pub fn from_messages(messages: &[Message]) -> Result<Self> {
        Ok(Self {
            raw_text: encode_messages(messages)?,
            sender_positions: SenderPositions::seed(messages),
            name_mapping: NameMapping::new(),
        })
    }

    /// Builds a record around raw export text, parsed lazily on load.
    pub fn from_raw_text(text: impl Into<String>) -> Self {
        Self {
            raw_text: Value::String(text.into()),
            sender_positions: SenderPositions::default(),
            name_mapping: NameMapping::default(),
        }
    }

    /// Reads a record from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the record to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn content(&self) -> Result<ChatContent> {
        ChatContent::decode(&self.raw_text)
    }

    /// Returns the chat's messages, parsing raw text with `parser` if needed.
    ///
    /// Raw text that no dialect recognises is an error here: a stored chat
    /// with zero messages would silently show an empty page.
    #[instrument(level = "debug", skip_all)]
    pub fn messages(&self, parser: &ChatParser) -> Result<Vec<Message>> {
        match self.content()? {
            ChatContent::Messages(messages) => Ok(messages),
            ChatContent::RawText(text) => {
                let messages = parser.parse(&text);
                if messages.is_empty() {
                    return Err(ChatshareError::unparseable(&parser.config().dialects));
                }
                Ok(messages)
            }
        }
    }

    /// Replaces the stored content with `messages`.
    pub fn set_messages(&mut self, messages: &[Message]) -> Result<()> {
        self.raw_text = encode_messages(messages)?;
        Ok(())
    }
}
