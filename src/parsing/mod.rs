//! Shared parsing utilities.
//!
//! This module contains the leaf helpers used by every dialect strategy,
//! the generic-export converter and the reconciler:
//!
//! - [`timestamp`] - whitespace folding for timestamps
//! - [`id`] - content-hash plus random-suffix message ids
//! - [`patterns`] - loose timestamp and noise-line patterns

pub mod id;
pub mod patterns;
pub mod timestamp;

pub use id::{content_hash, generate_id};
pub use patterns::{is_avatar_initial, is_loose_timestamp_line, is_timestamp_only_line};
pub use timestamp::normalize_timestamp;
