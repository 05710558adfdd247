//! Generic two-line dialect.
//!
//! Messages copied out of web chat UIs come out as a name line, a timestamp
//! line and one or more body lines:
//!
//! ```text
//! Alice
//! 15/01/24 10:30
//! Hello there
//! Bob
//! 15/01/24 10:31
//! Hi!
//! ```
//!
//! Every line starting with a loose timestamp is a boundary. The closest
//! non-empty line above it names the sender, and the lines below it up to the
//! next boundary form the body. The line naming the next boundary's sender is
//! not part of the current body.

use crate::Message;
use crate::parser::{Dialect, Strategy};
use crate::parsing::is_loose_timestamp_line;

/// Sender used when a boundary has no line above it.
pub const UNKNOWN_SENDER: &str = "Unknown";

/// Sender values that are UI artifacts rather than names.
const IGNORED_SENDERS: [&str; 3] = ["Me", "Profile Image", "Replied"];

const PROFILE_IMAGE: &str = "Profile Image";

/// A line with its byte range in the source text, `\r` excluded.
#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    text: &'a str,
    start: usize,
    end: usize,
}

fn split_lines(text: &str) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    let mut start = 0;
    for raw in text.split('\n') {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        lines.push(Line {
            text: line,
            start,
            end: start + line.len(),
        });
        start += raw.len() + 1;
    }
    lines
}

fn is_blank(line: &Line<'_>) -> bool {
    line.text.trim().is_empty()
}

fn is_body_line(line: &Line<'_>) -> bool {
    let trimmed = line.text.trim();
    trimmed.chars().count() > 1 && !trimmed.contains(PROFILE_IMAGE)
}

/// Strategy for the generic two-line dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericStrategy;

impl GenericStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for GenericStrategy {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn dialect(&self) -> Dialect {
        Dialect::Generic
    }

    fn tokenize(&self, text: &str) -> Vec<Message> {
        let lines = split_lines(text);
        let boundaries: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| is_loose_timestamp_line(line.text))
            .map(|(i, _)| i)
            .collect();

        let mut messages = Vec::new();

        for (k, &boundary) in boundaries.iter().enumerate() {
            let sender_idx = (0..boundary).rev().find(|&i| !is_blank(&lines[i]));
            let sender = sender_idx.map_or(UNKNOWN_SENDER, |i| lines[i].text.trim());

            let next = boundaries.get(k + 1).copied();
            let body_end = next.unwrap_or(lines.len());
            let next_sender_idx =
                next.and_then(|n| (boundary + 1..n).rev().find(|&i| !is_blank(&lines[i])));

            let body_lines: Vec<&Line<'_>> = (boundary + 1..body_end)
                .filter(|&i| Some(i) != next_sender_idx)
                .map(|i| &lines[i])
                .filter(|line| is_body_line(line))
                .collect();

            let body = body_lines
                .iter()
                .map(|line| line.text.trim())
                .collect::<Vec<_>>()
                .join(" ");

            if body.is_empty() || IGNORED_SENDERS.contains(&sender) {
                continue;
            }

            let span_start = sender_idx.map_or(lines[boundary].start, |i| lines[i].start);
            let span_end = body_lines.last().map_or(lines[boundary].end, |line| line.end);

            messages.push(
                Message::new(lines[boundary].text, sender, body)
                    .with_span(span_start, span_end - span_start),
            );
        }

        messages
    }
}
