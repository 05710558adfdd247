//! Configuration types for parsing and quota enforcement.
//!
//! Plain builder-style structs, usable from library code without any CLI
//! dependency. Both derive `serde` so applications can keep them in their own
//! settings files.
//!
//! # Example
//!
//! ```rust
//! use chatshare::config::{LimitConfig, ParserConfig};
//! use chatshare::parser::{ChatParser, Dialect};
//!
//! let config = ParserConfig::new()
//!     .with_track_spans(true)
//!     .with_dialects(vec![Dialect::Bracketed, Dialect::Generic]);
//!
//! let parser = ChatParser::with_config(config);
//! let limit = LimitConfig::new().with_max_words(500);
//! assert_eq!(limit.max_words, Some(500));
//! ```

use serde::{Deserialize, Serialize};

use crate::parser::Dialect;

/// Configuration for [`ChatParser`](crate::parser::ChatParser).
///
/// # Example
///
/// ```rust
/// use chatshare::config::ParserConfig;
///
/// let config = ParserConfig::editor();
/// assert!(config.track_spans);
/// assert!(config.convert_generic_exports);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Rewrite generic platform exports into the bracketed dialect first (default: true)
    pub convert_generic_exports: bool,

    /// Dialects to try, in priority order (default: bracketed, comma-prefixed, generic)
    pub dialects: Vec<Dialect>,

    /// Record each message's byte span in the source text (default: false)
    pub track_spans: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            convert_generic_exports: true,
            dialects: Dialect::all().to_vec(),
            track_spans: false,
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the configuration used by interactive editor sessions.
    pub fn editor() -> Self {
        Self {
            track_spans: true,
            ..Self::default()
        }
    }

    /// Enables or disables the generic-export pre-pass.
    #[must_use]
    pub fn with_convert_generic_exports(mut self, enabled: bool) -> Self {
        self.convert_generic_exports = enabled;
        self
    }

    /// Sets the dialects to try, in order.
    #[must_use]
    pub fn with_dialects(mut self, dialects: Vec<Dialect>) -> Self {
        self.dialects = dialects;
        self
    }

    /// Enables or disables span tracking.
    #[must_use]
    pub fn with_track_spans(mut self, enabled: bool) -> Self {
        self.track_spans = enabled;
        self
    }
}

/// Word budget applied when a chat is created.
///
/// `max_words: None` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitConfig {
    /// Maximum total words across all message bodies (default: unbounded)
    pub max_words: Option<usize>,
}

impl LimitConfig {
    /// Creates an unbounded configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the word budget.
    #[must_use]
    pub fn with_max_words(mut self, max_words: usize) -> Self {
        self.max_words = Some(max_words);
        self
    }

    /// Returns `true` if no budget is set.
    pub fn is_unbounded(&self) -> bool {
        self.max_words.is_none()
    }
}
