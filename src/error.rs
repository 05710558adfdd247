//! Unified error types for chatshare.
//!
//! Parsing itself never fails: unrecognised text is an expected outcome and
//! comes back as [`ParseOutcome::NoMatch`](crate::parser::ParseOutcome::NoMatch).
//! [`ChatshareError`] covers the boundaries around the core: reading files,
//! decoding stored chats and writing output.

use std::io;

use thiserror::Error;

use crate::parser::Dialect;

/// A specialized [`Result`] type for chatshare operations.
///
/// # Example
///
/// ```rust
/// use chatshare::error::Result;
/// use chatshare::Message;
///
/// fn load() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatshareError>;

/// The error type for all chatshare operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatshareError {
    /// An I/O error occurred while reading input or writing output.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON parsing or serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writing failed.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// No enabled dialect recognised the text.
    ///
    /// Surface this to the user as "couldn't parse this format"; do not store
    /// an empty chat in its place.
    #[error("Could not recognise the chat format (tried: {})", format_dialects(.dialects))]
    Unparseable {
        /// Dialects that were tried, in order
        dialects: Vec<Dialect>,
    },

    /// A value doesn't match the expected structure.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// A stored chat record has an unusable `rawText` value.
    #[error("Invalid stored chat: {message}")]
    InvalidStoredChat {
        /// Description of what's wrong
        message: String,
    },
}

fn format_dialects(dialects: &[Dialect]) -> String {
    if dialects.is_empty() {
        return "none".to_string();
    }
    dialects
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatshareError {
    /// Creates an unparseable-input error.
    pub fn unparseable(dialects: &[Dialect]) -> Self {
        ChatshareError::Unparseable {
            dialects: dialects.to_vec(),
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatshareError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid stored chat error.
    pub fn invalid_stored_chat(message: impl Into<String>) -> Self {
        ChatshareError::InvalidStoredChat {
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatshareError::Io(_))
    }

    /// Returns `true` if the input was not recognised as any chat format.
    pub fn is_unparseable(&self) -> bool {
        matches!(self, ChatshareError::Unparseable { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatshareError::InvalidFormat { .. })
    }

    /// Returns `true` if a stored chat could not be decoded.
    pub fn is_invalid_stored_chat(&self) -> bool {
        matches!(self, ChatshareError::InvalidStoredChat { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
