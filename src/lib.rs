//! # Chatshare
//!
//! Parses raw chat-export text into messages with stable identities, so that
//! comments and media attached to a message survive later edits of the text.
//!
//! ## Overview
//!
//! The raw text a user pastes or uploads is the source of truth. Chatshare
//! derives a message sequence from it and, when the text is edited, derives
//! a new sequence that reuses the old ids wherever messages still match.
//!
//! Three text dialects are recognised, tried in this order:
//! - **Bracketed**: `[<timestamp>] <sender>: <body>`
//! - **Comma-prefixed**: `<sender>, [<timestamp>]: <body>`
//! - **Generic**: a name line, a timestamp line, then body lines
//!
//! Generic web exports with avatar and attachment noise are rewritten into
//! the bracketed dialect first.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatshare::prelude::*;
//!
//! let text = "[1/1/24, 9:00 AM] Alice: Hello\n[1/1/24, 9:01 AM] Bob: Hi there";
//! let messages = parse(text);
//! assert_eq!(messages.len(), 2);
//!
//! // The user fixes a typo; both ids survive.
//! let edited = "[1/1/24, 9:00 AM] Alice: Hello!\n[1/1/24, 9:01 AM] Bob: Hi there";
//! let updated = reconcile(&messages, edited);
//! assert_eq!(updated[0].id, messages[0].id);
//! assert_eq!(updated[1].id, messages[1].id);
//!
//! // New chats are capped by a word budget.
//! let capped = trim_to_limit(&updated, Some(1));
//! assert_eq!(capped.len(), 1);
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`ChatParser`](parser::ChatParser), [`Dialect`](parser::Dialect),
//!   [`ParseOutcome`](parser::ParseOutcome), the [`Strategy`](parser::Strategy) trait
//! - [`parsers`] - one strategy per dialect
//! - [`parsing`] - timestamp normalization, id generation, line patterns
//! - [`convert`] - generic web export rewriting
//! - [`core`] - reconciliation, word limits, participants, stored chats, output writers
//! - [`config`] - [`ParserConfig`](config::ParserConfig), [`LimitConfig`](config::LimitConfig)
//! - [`format`] - [`OutputFormat`](format::OutputFormat) and dispatch helpers
//! - [`cli`] - CLI argument types (feature `cli`)
//! - [`error`] - [`ChatshareError`], [`Result`]
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod convert;
pub mod core;
pub mod error;
pub mod format;
pub mod message;
pub mod parser;
pub mod parsers;
pub mod parsing;

// Re-export the main types and operations at the crate root
pub use convert::convert_if_generic_export;
pub use core::limit::trim_to_limit;
pub use error::{ChatshareError, Result};
pub use message::Message;
pub use parser::{parse, reconcile};
pub use parsing::{generate_id, normalize_timestamp};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatshare::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Message;

    pub use crate::error::{ChatshareError, Result};

    pub use crate::parser::{ChatParser, Dialect, ParseOutcome, Strategy, parse, reconcile};

    pub use crate::config::{LimitConfig, ParserConfig};

    pub use crate::convert::convert_if_generic_export;
    pub use crate::parsing::{generate_id, normalize_timestamp};

    pub use crate::core::limit::{calculate_total_words, trim_to_limit};
    pub use crate::core::participants::{NameMapping, SenderPositions, Side};
    pub use crate::core::reconcile::ReconcileStats;
    pub use crate::core::stored::{ChatContent, StoredChat};

    pub use crate::core::models::OutputConfig;
    pub use crate::core::output::{
        ensure_renderable, to_json, to_jsonl, to_raw_text, write_json, write_jsonl,
    };
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};

    pub use crate::format::OutputFormat;
}
