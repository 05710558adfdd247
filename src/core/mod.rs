//! Processing that happens after parsing.
//!
//! This module contains:
//! - [`reconcile`] - Carrying message ids across edits
//! - [`limit`] - Word-budget trimming
//! - [`participants`] - Sender sides and name mapping
//! - [`stored`] - Persisted chat records
//! - [`models`] - Output configuration
//! - [`output`] - Format writers (JSON, JSONL, CSV, text)
//!
//! # Quick Start
//!
//! ```rust
//! use chatshare::core::{SenderPositions, reconcile_messages, to_raw_text, trim_to_limit};
//!
//! let messages = chatshare::parse("[9:00] Alice: Hello\n[9:01] Bob: Hi there");
//! let positions = SenderPositions::seed(&messages);
//! let trimmed = trim_to_limit(&messages, Some(1));
//!
//! let edited = chatshare::parse(&to_raw_text(&messages).unwrap());
//! let (reconciled, stats) = reconcile_messages(&messages, edited);
//! assert_eq!(stats.exact, 2);
//! # let _ = (positions, trimmed, reconciled);
//! ```

pub mod limit;
pub mod models;
pub mod output;
pub mod participants;
pub mod reconcile;
pub mod stored;

pub use limit::{LimitStats, apply_limit, calculate_total_words, trim_to_limit};
pub use models::OutputConfig;
pub use participants::{NameMapping, SenderPositions, Side};
pub use reconcile::{ReconcileStats, reconcile_messages};
pub use stored::{ChatContent, StoredChat, encode_messages};

pub use crate::Message;

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
pub use output::{
    ensure_renderable, to_json, to_jsonl, to_raw_text, write_json, write_jsonl, write_text,
};
