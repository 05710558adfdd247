//! Loose line patterns shared by the generic dialect and the converter.
//!
//! Generic platform exports put each timestamp on its own line, in one of
//! two shapes:
//!
//! - day and month name: `1 Jan, 9:00` or `12 March 14:05`
//! - numeric date: `1/1/24` or `15/01/2024 10:30`

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A line that *starts* with a loose timestamp.
    static ref LOOSE_TIMESTAMP: Regex = Regex::new(
        r"^(?:\d{1,2}\s+[A-Za-z]{3,9}\.?,?\s+\d{1,2}:\d{2}|\d{1,2}/\d{1,2}/\d{2,4})"
    )
    .unwrap();

    /// A line that *is* a day-and-month-name timestamp and nothing else.
    static ref TIMESTAMP_ONLY: Regex = Regex::new(
        r"^\d{1,2}\s+[A-Za-z]{3,9}\.?,?\s+\d{1,2}:\d{2}(?::\d{2})?(?:\s*[AaPp]\.?[Mm]\.?)?$"
    )
    .unwrap();
}

/// Returns `true` if the trimmed line begins with a loose timestamp.
///
/// ```rust
/// use chatshare::parsing::is_loose_timestamp_line;
///
/// assert!(is_loose_timestamp_line("1 Jan, 9:00"));
/// assert!(is_loose_timestamp_line("15/01/24 10:30 seen"));
/// assert!(!is_loose_timestamp_line("Alice"));
/// ```
pub fn is_loose_timestamp_line(line: &str) -> bool {
    LOOSE_TIMESTAMP.is_match(line.trim())
}

/// Returns `true` if the whole trimmed line is a `D Mon, H:MM` timestamp.
///
/// ```rust
/// use chatshare::parsing::is_timestamp_only_line;
///
/// assert!(is_timestamp_only_line("1 Jan, 9:00"));
/// assert!(is_timestamp_only_line("  3 Feb 10:15\u{202f}PM "));
/// assert!(!is_timestamp_only_line("1 Jan, 9:00 see you"));
/// ```
pub fn is_timestamp_only_line(line: &str) -> bool {
    TIMESTAMP_ONLY.is_match(line.trim())
}

/// Single uppercase letter lines are avatar initials left behind by copy/paste.
pub fn is_avatar_initial(line: &str) -> bool {
    let mut chars = line.trim().chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase())
}
