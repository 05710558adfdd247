//! The message type produced by every dialect.
//!
//! A [`Message`] is one entry of a parsed chat: an identity token plus the
//! `(timestamp, sender, message)` triple captured from the raw export text.
//! The raw text stays the source of truth; messages are a derived view that
//! carries identity across re-parses.
//!
//! # Examples
//!
//! ```
//! use chatshare::Message;
//!
//! let msg = Message::new("1/1/24, 9:00 AM", "Alice", "Hello");
//! assert_eq!(msg.sender(), "Alice");
//! assert!(!msg.id().is_empty());
//! ```
//!
//! ## Serialization
//!
//! Messages serialize with the camelCase field names used by stored chats.
//! Session-only bookkeeping is omitted when absent.
//!
//! ```
//! use chatshare::Message;
//!
//! let msg = Message::with_id("abc-12345", "9:00", "Alice", "Hi");
//! let json = serde_json::to_string(&msg)?;
//! assert!(!json.contains("originalIndex"));
//!
//! let parsed: Message = serde_json::from_str(&json)?;
//! assert_eq!(msg, parsed);
//! # Ok::<(), serde_json::Error>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::parsing::{generate_id, normalize_timestamp};

/// A single chat message with a stable identity.
///
/// | Field | Description |
/// |-------|-------------|
/// | `id` | Identity token, unique within a sequence |
/// | `timestamp` | Whitespace-normalized timestamp text, never interpreted |
/// | `sender` | Trimmed display name |
/// | `message` | Trimmed body, may span several lines |
/// | `is_redacted` | Editor flag, not produced by parsing |
/// | `original_index` | Byte offset of the match in the tokenized text |
/// | `original_length` | Byte length of the match |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Identity token.
    ///
    /// Freshly parsed messages get `<hash>-<random>` ids; reconciliation
    /// replaces them with ids from an earlier parse where content allows.
    pub id: String,

    /// Timestamp substring as captured, with whitespace variants folded.
    pub timestamp: String,

    /// Display name of the author.
    pub sender: String,

    /// Body text. Multi-line bodies are kept intact.
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_redacted: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_index: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_length: Option<usize>,
}

impl Message {
    /// Creates a message with a freshly generated id.
    ///
    /// The timestamp is normalized, sender and body are trimmed.
    pub fn new(
        timestamp: impl AsRef<str>,
        sender: impl AsRef<str>,
        message: impl AsRef<str>,
    ) -> Self {
        let timestamp = normalize_timestamp(timestamp.as_ref());
        let sender = sender.as_ref().trim();
        let message = message.as_ref().trim();
        let id = generate_id(&timestamp, sender, message);
        Self::with_id(id, timestamp, sender, message)
    }

    /// Creates a message with a caller-supplied id, stored verbatim.
    pub fn with_id(
        id: impl Into<String>,
        timestamp: impl Into<String>,
        sender: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp: timestamp.into(),
            sender: sender.into(),
            message: message.into(),
            is_redacted: None,
            original_index: None,
            original_length: None,
        }
    }

    /// Builder method to record where the message was found in the source text.
    #[must_use]
    pub fn with_span(mut self, index: usize, length: usize) -> Self {
        self.original_index = Some(index);
        self.original_length = Some(length);
        self
    }

    /// Builder method to set the redaction flag.
    #[must_use]
    pub fn with_redacted(mut self, redacted: bool) -> Self {
        self.is_redacted = Some(redacted);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the `(index, length)` span, if tracked.
    pub fn span(&self) -> Option<(usize, usize)> {
        self.original_index.zip(self.original_length)
    }

    /// Drops the session-only span bookkeeping.
    pub fn clear_span(&mut self) {
        self.original_index = None;
        self.original_length = None;
    }

    /// Exact-match key used by reconciliation: `timestamp|sender|message`.
    ///
    /// The timestamp is normalized again so messages loaded from older
    /// storage compare equal to freshly parsed ones.
    pub fn content_signature(&self) -> String {
        format!(
            "{}|{}|{}",
            normalize_timestamp(&self.timestamp),
            self.sender,
            self.message
        )
    }

    /// Returns `true` if both messages share timestamp and sender.
    pub fn same_slot(&self, other: &Message) -> bool {
        self.sender == other.sender
            && normalize_timestamp(&self.timestamp) == normalize_timestamp(&other.timestamp)
    }

    /// Number of whitespace-separated words in the body.
    pub fn word_count(&self) -> usize {
        self.message.split_whitespace().count()
    }

    /// Returns `true` if the body is empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.message.trim().is_empty()
    }
}
