//! Output format writers.
//!
//! - [`write_json`] / [`to_json`] - JSON array of messages, the stored representation
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines, one message per line
//! - [`write_csv`] / [`to_csv`] - CSV with semicolon delimiter - requires `csv-output` feature
//! - [`write_text`] / [`to_raw_text`] - bracketed chat text, re-parseable; [`ensure_renderable`]
//!   rejects messages that would not survive the round trip
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> chatshare::Result<()> {
//! use chatshare::core::output::{to_raw_text, write_json, write_jsonl};
//! use chatshare::core::models::OutputConfig;
//!
//! let messages = chatshare::parse("[9:00] Alice: Hello\n[9:01] Bob: Hi there");
//!
//! write_json(&messages, "chat.json", &OutputConfig::new())?;
//! write_jsonl(&messages, "chat.jsonl", &OutputConfig::content_only())?;
//!
//! let text = to_raw_text(&messages)?;
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
mod json_writer;
mod jsonl_writer;
mod text_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
pub use json_writer::{to_json, write_json};
pub use jsonl_writer::{to_jsonl, write_jsonl};
pub use text_writer::{ensure_renderable, to_raw_text, write_text};
