//! Output configuration shared by the writers.

use serde::Serialize;

use crate::Message;

/// Controls which fields the writers emit.
///
/// The default keeps everything, so JSON output is exactly the stored
/// representation of the messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    /// Include message ids (default: true)
    pub include_ids: bool,
    /// Include `originalIndex`/`originalLength` when tracked (default: true)
    pub include_spans: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            include_ids: true,
            include_spans: true,
        }
    }
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content only: no ids and no spans.
    pub fn content_only() -> Self {
        Self {
            include_ids: false,
            include_spans: false,
        }
    }

    #[must_use]
    pub fn with_ids(mut self, enabled: bool) -> Self {
        self.include_ids = enabled;
        self
    }

    #[must_use]
    pub fn with_spans(mut self, enabled: bool) -> Self {
        self.include_spans = enabled;
        self
    }
}

/// Borrowed view of a [`Message`] with only the fields enabled in
/// [`OutputConfig`]. Field names match the stored representation.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MessageRecord<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    timestamp: &'a str,
    sender: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_redacted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    original_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    original_length: Option<usize>,
}

impl<'a> MessageRecord<'a> {
    pub(crate) fn from_message(msg: &'a Message, config: &OutputConfig) -> Self {
        let span = if config.include_spans { msg.span() } else { None };
        Self {
            id: config.include_ids.then_some(msg.id.as_str()),
            timestamp: &msg.timestamp,
            sender: &msg.sender,
            message: &msg.message,
            is_redacted: msg.is_redacted,
            original_index: span.map(|(index, _)| index),
            original_length: span.map(|(_, length)| length),
        }
    }
}
