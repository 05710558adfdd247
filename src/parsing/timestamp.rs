//! Timestamp whitespace normalization.
//!
//! Mobile exporters write the same human-readable timestamp with different
//! space code points (`10:30\u{202f}PM`, `10:30\u{a0}PM`, `10:30 PM`). Every
//! hash and comparison involving a timestamp goes through
//! [`normalize_timestamp`] first.

/// Folds every Unicode whitespace character to an ASCII space and trims.
///
/// Runs of whitespace are not collapsed; only the code points change.
///
/// # Example
///
/// ```rust
/// use chatshare::parsing::normalize_timestamp;
///
/// assert_eq!(normalize_timestamp("10:30\u{202f}PM"), "10:30 PM");
/// assert_eq!(normalize_timestamp(" 1/1/24,\u{a0}9:00 "), "1/1/24, 9:00");
/// ```
pub fn normalize_timestamp(ts: &str) -> String {
    ts.chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}
