//! Bracketed dialect: `[<timestamp>] <sender>: <body>`.
//!
//! This is the layout of iOS WhatsApp exports and the canonical form the
//! generic-export converter rewrites into:
//!
//! ```text
//! [1/15/24, 10:30:45 AM] Alice: Hello
//! [1/15/24, 10:31:02 AM] Bob: Meeting moved:
//! now at 3pm
//! ```
//!
//! A body runs until the next `\n[` or the end of the text, so multi-line
//! bodies and colons inside a body are kept.

use lazy_static::lazy_static;
use regex::Regex;

use crate::Message;
use crate::parser::{Dialect, Strategy};

lazy_static! {
    /// Header only; the body boundary is found by [`next_boundary`].
    static ref HEADER: Regex = Regex::new(r"\[(.*?)\] (.*?):").unwrap();
}

/// Strategy for the bracketed dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketedStrategy;

impl BracketedStrategy {
    pub fn new() -> Self {
        Self
    }
}

/// Start of the next line opening with `[`, or the end of the text.
fn next_boundary(text: &str, from: usize) -> usize {
    text[from..]
        .find("\n[")
        .map_or(text.len(), |offset| from + offset)
}

impl Strategy for BracketedStrategy {
    fn name(&self) -> &'static str {
        "bracketed"
    }

    fn dialect(&self) -> Dialect {
        Dialect::Bracketed
    }

    fn tokenize(&self, text: &str) -> Vec<Message> {
        let mut messages = Vec::new();
        let mut pos = 0;

        while let Some(caps) = HEADER.captures_at(text, pos) {
            let (Some(whole), Some(timestamp), Some(sender)) =
                (caps.get(0), caps.get(1), caps.get(2))
            else {
                break;
            };

            let body_end = next_boundary(text, whole.end());
            let body = &text[whole.end()..body_end];

            messages.push(
                Message::new(timestamp.as_str(), sender.as_str(), body)
                    .with_span(whole.start(), body_end - whole.start()),
            );

            pos = body_end;
        }

        messages
    }
}
