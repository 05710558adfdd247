//! Word-budget enforcement for newly created chats.

use tracing::debug;

use crate::Message;
use crate::config::LimitConfig;

/// Total whitespace-separated words across all message bodies.
pub fn calculate_total_words(messages: &[Message]) -> usize {
    messages.iter().map(Message::word_count).sum()
}

/// Drops trailing messages until the total word count fits `max_words`.
///
/// `None` means unbounded and returns a copy of the input. The input is never
/// modified. If even the first message exceeds the budget on its own, the
/// result is empty.
///
/// ```rust
/// use chatshare::{Message, trim_to_limit};
///
/// let messages = vec![
///     Message::new("9:00", "Alice", "one two three"),
///     Message::new("9:01", "Bob", "four five"),
/// ];
/// assert_eq!(trim_to_limit(&messages, Some(4)).len(), 1);
/// assert_eq!(trim_to_limit(&messages, None).len(), 2);
/// ```
pub fn trim_to_limit(messages: &[Message], max_words: Option<usize>) -> Vec<Message> {
    let Some(max_words) = max_words else {
        return messages.to_vec();
    };

    let mut total = calculate_total_words(messages);
    let mut keep = messages.len();
    while keep > 0 && total > max_words {
        keep -= 1;
        total -= messages[keep].word_count();
    }

    if keep < messages.len() {
        debug!(
            max_words,
            dropped = messages.len() - keep,
            "Trimmed messages to word limit"
        );
    }

    messages[..keep].to_vec()
}

/// Statistics about a trim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitStats {
    pub original_count: usize,
    pub kept_count: usize,
    pub original_words: usize,
    pub kept_words: usize,
}

impl LimitStats {
    pub fn dropped_count(&self) -> usize {
        self.original_count - self.kept_count
    }

    /// Returns `true` if any message was removed.
    pub fn was_trimmed(&self) -> bool {
        self.kept_count < self.original_count
    }
}

/// Applies a [`LimitConfig`] and reports what was dropped.
pub fn apply_limit(messages: &[Message], config: &LimitConfig) -> (Vec<Message>, LimitStats) {
    let kept = trim_to_limit(messages, config.max_words);
    let stats = LimitStats {
        original_count: messages.len(),
        kept_count: kept.len(),
        original_words: calculate_total_words(messages),
        kept_words: calculate_total_words(&kept),
    };
    (kept, stats)
}
