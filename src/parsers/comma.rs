//! Comma-prefixed dialect: `<sender>, [<timestamp>]: <body>`.
//!
//! Telegram desktop copy/paste produces this layout:
//!
//! ```text
//! Alice, [15.01.24 10:30]: Hello
//! Bob, [15.01.24 10:31]: Hi, how are you?
//! ```
//!
//! A body ends where a following line starts a new header, i.e. a line whose
//! text before its first `, [` has no comma.

use lazy_static::lazy_static;
use regex::Regex;

use crate::Message;
use crate::parser::{Dialect, Strategy};

lazy_static! {
    static ref HEADER: Regex = Regex::new(r"(.*?), \[(.*?)\]:").unwrap();
    static ref BOUNDARY: Regex = Regex::new(r"\n[^,\n]*, \[").unwrap();
}

/// Strategy for the comma-prefixed dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommaStrategy;

impl CommaStrategy {
    pub fn new() -> Self {
        Self
    }
}

fn next_boundary(text: &str, from: usize) -> usize {
    BOUNDARY
        .find_at(text, from)
        .map_or(text.len(), |m| m.start())
}

impl Strategy for CommaStrategy {
    fn name(&self) -> &'static str {
        "comma-prefixed"
    }

    fn dialect(&self) -> Dialect {
        Dialect::CommaPrefixed
    }

    fn tokenize(&self, text: &str) -> Vec<Message> {
        let mut messages = Vec::new();
        let mut pos = 0;

        while let Some(caps) = HEADER.captures_at(text, pos) {
            let (Some(whole), Some(sender), Some(timestamp)) =
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
