//! Generic platform export converter.
//!
//! Some web exports put every timestamp on a line of its own, with the
//! sender somewhere above it and avatar artifacts, attachment notices and
//! "Profile Image" alt-texts scattered around:
//!
//! ```text
//! Profile Image
//! A
//! Alice
//! 1 Jan, 9:00
//! Hello
//! IMG_0042.jpg (1.2 MB)
//! Bob
//! 1 Jan, 9:01
//! Hi there
//! ```
//!
//! [`convert_if_generic_export`] rewrites such text into the bracketed
//! dialect so the regular strategies can tokenize it:
//!
//! ```text
//! [1 Jan, 9:00] Alice: Hello
//! [1 Jan, 9:01] Bob: Hi there
//! ```

use std::borrow::Cow;
use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

use crate::parsers::UNKNOWN_SENDER;
use crate::parsing::{is_avatar_initial, is_timestamp_only_line};

const PROFILE_IMAGE: &str = "Profile Image";

/// Substrings marking attachment and scanner notices.
const NOISE_MARKERS: [&str; 4] = ["File", "Please note:", "cannot be scanned", "Learn more"];

/// How far past an avatar initial to look for the next timestamp.
const AVATAR_LOOKAHEAD: usize = 3;

lazy_static! {
    static ref FILE_SIZE: Regex =
        Regex::new(r"(?i)\(\s*\d+(?:[.,]\d+)?\s*(?:[KMGT]i?B|bytes?)\s*\)").unwrap();
    static ref MEDIA_FILE: Regex = Regex::new(r"(?i)\.(?:mov|mp4|jpe?g|png|pdf)\b").unwrap();
}

/// Returns `true` for attachment notices, file sizes and media file names.
pub fn is_noise_line(line: &str) -> bool {
    NOISE_MARKERS.iter().any(|marker| line.contains(marker))
        || FILE_SIZE.is_match(line)
        || MEDIA_FILE.is_match(line)
}

/// Returns `true` if `text` contains at least one timestamp-only line.
pub fn is_generic_export(text: &str) -> bool {
    text.lines().any(is_timestamp_only_line)
}

/// Rewrites a generic platform export into the bracketed dialect.
///
/// Text without a timestamp-only line is returned borrowed and unchanged. If
/// the text looks like a generic export but no message survives filtering,
/// the input is also returned unchanged.
///
/// One timestamp-only line anywhere is enough to rewrite the whole text, even
/// when it sits inside a message body of an otherwise bracketed chat.
///
/// # Example
///
/// ```rust
/// use chatshare::convert::convert_if_generic_export;
///
/// let converted = convert_if_generic_export("Alice\n1 Jan, 9:00\nHello\nBob\n1 Jan, 9:01\nHi there");
/// assert_eq!(converted, "[1 Jan, 9:00] Alice: Hello\n[1 Jan, 9:01] Bob: Hi there");
///
/// let untouched = convert_if_generic_export("[9:00] Alice: Hello");
/// assert_eq!(untouched, "[9:00] Alice: Hello");
/// ```
pub fn convert_if_generic_export(text: &str) -> Cow<'_, str> {
    let lines: Vec<&str> = text.lines().collect();
    let timestamp_lines: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| is_timestamp_only_line(line))
        .map(|(i, _)| i)
        .collect();

    if timestamp_lines.is_empty() {
        return Cow::Borrowed(text);
    }

    let first = timestamp_lines[0];
    debug!(
        line = first,
        text = lines[first].trim(),
        "Timestamp-only line found, treating input as generic export"
    );

    let senders: Vec<Option<usize>> = timestamp_lines
        .iter()
        .map(|&ts| resolve_sender(&lines, ts))
        .collect();
    let sender_lines: HashSet<usize> = senders.iter().flatten().copied().collect();

    let mut output = Vec::with_capacity(timestamp_lines.len());

    for (&ts, sender_idx) in timestamp_lines.iter().zip(&senders) {
        let sender = sender_idx.map_or(UNKNOWN_SENDER, |i| lines[i].trim());
        let body = resolve_body(&lines, ts, &sender_lines);

        if body.is_empty() || sender == PROFILE_IMAGE {
            trace!(line = ts, sender, "Dropped generic export entry");
            continue;
        }

        output.push(format!("[{}] {}: {}", lines[ts].trim(), sender, body));
    }

    if output.is_empty() {
        debug!("Generic export produced no messages, keeping input");
        return Cow::Borrowed(text);
    }

    debug!(count = output.len(), "Converted generic export");
    Cow::Owned(output.join("\n"))
}

/// Closest line above `ts` that is not blank, an avatar initial or a
/// "Profile Image" marker.
fn resolve_sender(lines: &[&str], ts: usize) -> Option<usize> {
    (0..ts).rev().find(|&i| {
        let line = lines[i].trim();
        !(line.is_empty() || line == PROFILE_IMAGE || is_avatar_initial(line))
    })
}

/// Space-joined body lines following `ts`.
///
/// Stops at the next timestamp, a "Profile Image" marker, a line that names
/// a later message's sender, or an avatar initial shortly before a timestamp.
fn resolve_body(lines: &[&str], ts: usize, sender_lines: &HashSet<usize>) -> String {
    let mut parts = Vec::new();

    for i in ts + 1..lines.len() {
        let line = lines[i].trim();

        if is_timestamp_only_line(line) || line == PROFILE_IMAGE || sender_lines.contains(&i) {
            break;
        }

        if is_avatar_initial(line) {
            let next_is_timestamp = lines[i + 1..]
                .iter()
                .take(AVATAR_LOOKAHEAD)
                .any(|l| is_timestamp_only_line(l));
            if next_is_timestamp {
                break;
            }
            continue;
        }

        if !line.is_empty() && !is_noise_line(line) {
            parts.push(line);
        }
    }

    parts.join(" ")
}
