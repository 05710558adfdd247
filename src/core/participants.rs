//! Sender layout and display-name mapping for shared chats.
//!
//! A shared chat shows each sender's bubbles on the left or right.
//! [`SenderPositions`] holds that choice; [`NameMapping`] renames senders
//! (usually to anonymize them) by rewriting the raw text itself.

use std::collections::{BTreeMap, HashMap, HashSet};

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::Message;

/// Which column a sender's bubbles are shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Assignment of senders to the two sides of the chat view.
///
/// The two lists are always disjoint.
///
/// ```rust
/// use chatshare::core::participants::{SenderPositions, Side};
///
/// let messages = chatshare::parse("[9:00] Alice: Hi\n[9:01] Bob: Yo\n[9:02] Carol: Hey");
/// let positions = SenderPositions::seed(&messages);
///
/// assert_eq!(positions.left, vec!["Alice"]);
/// assert_eq!(positions.right, vec!["Bob", "Carol"]);
/// assert_eq!(positions.side_of("Bob"), Some(Side::Right));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SenderPositions {
    pub left: Vec<String>,
    pub right: Vec<String>,
}

impl SenderPositions {
    /// Seeds positions from a parsed chat: the first sender goes left, every
    /// other sender goes right, in order of first appearance.
    pub fn seed(messages: &[Message]) -> Self {
        let mut senders = distinct_senders(messages).into_iter();
        let left = senders.next().into_iter().collect();
        let right = senders.collect();
        Self { left, right }
    }

    pub fn side_of(&self, sender: &str) -> Option<Side> {
        if self.left.iter().any(|s| s == sender) {
            Some(Side::Left)
        } else if self.right.iter().any(|s| s == sender) {
            Some(Side::Right)
        } else {
            None
        }
    }

    /// Moves `sender` to `side`, removing it from the other list. Unknown
    /// senders are added.
    pub fn move_to(&mut self, sender: &str, side: Side) {
        self.left.retain(|s| s != sender);
        self.right.retain(|s| s != sender);
        match side {
            Side::Left => self.left.push(sender.to_string()),
            Side::Right => self.right.push(sender.to_string()),
        }
    }

    /// Brings the lists in line with an edited chat.
    ///
    /// Senders that no longer appear are dropped. New senders go right, or
    /// left while the left side is empty.
    pub fn reconcile_with(&mut self, messages: &[Message]) {
        let senders = distinct_senders(messages);
        let present: HashSet<&str> = senders.iter().map(String::as_str).collect();

        self.left.retain(|s| present.contains(s.as_str()));
        self.right.retain(|s| present.contains(s.as_str()));

        for sender in senders {
            if self.side_of(&sender).is_some() {
                continue;
            }
            debug!(sender = %sender, "New sender placed");
            if self.left.is_empty() {
                self.left.push(sender);
            } else {
                self.right.push(sender);
            }
        }
    }

    /// Returns `true` if no sender is placed.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }
}

fn distinct_senders(messages: &[Message]) -> Vec<String> {
    let mut seen = HashSet::new();
    messages
        .iter()
        .filter(|m| seen.insert(m.sender.as_str()))
        .map(|m| m.sender.clone())
        .collect()
}

/// Original display name to replacement name.
///
/// Applying the mapping rewrites the raw text so the change survives
/// re-parsing, and the old names never reach a viewer.
///
/// ```rust
/// use chatshare::core::participants::NameMapping;
///
/// let mut mapping = NameMapping::new();
/// mapping.insert("Alice", "Bob");
/// mapping.insert("Bob", "Carol");
///
/// // Single pass: Alice becomes Bob, and that Bob is not renamed again.
/// assert_eq!(mapping.apply("[9:00] Alice: Hi Bob"), "[9:00] Bob: Hi Carol");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameMapping(BTreeMap<String, String>);

impl NameMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, original: impl Into<String>, replacement: impl Into<String>) {
        self.0.insert(original.into(), replacement.into());
    }

    pub fn get(&self, original: &str) -> Option<&str> {
        self.0.get(original).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries that actually rename something, longest original first.
    fn effective_entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .0
            .iter()
            .filter(|(from, to)| !from.is_empty() && from != to)
            .map(|(from, to)| (from.as_str(), to.as_str()))
            .collect();
        entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// Replaces every occurrence of every original name in one pass.
    ///
    /// Longer names win where names overlap, so "Ann Lee" is replaced as a
    /// whole before "Ann" is considered. Replacement text is never matched
    /// again.
    pub fn apply(&self, raw_text: &str) -> String {
        let entries = self.effective_entries();
        if entries.is_empty() {
            return raw_text.to_string();
        }

        let pattern = entries
            .iter()
            .map(|(from, _)| regex::escape(from))
            .collect::<Vec<_>>()
            .join("|");

        match Regex::new(&pattern) {
            Ok(re) => {
                let lookup: HashMap<&str, &str> = entries.into_iter().collect();
                re.replace_all(raw_text, |caps: &regex::Captures<'_>| {
                    lookup.get(&caps[0]).copied().unwrap_or(&caps[0]).to_string()
                })
                .into_owned()
            }
            Err(e) => {
                warn!(error = %e, "Name pattern too large, renaming sequentially");
                entries
                    .into_iter()
                    .fold(raw_text.to_string(), |text, (from, to)| text.replace(from, to))
            }
        }
    }

    /// Carries side assignments over to the renamed senders.
    ///
    /// If two senders end up with the same name, the first placement wins.
    pub fn rename_positions(&self, positions: &SenderPositions) -> SenderPositions {
        let rename = |name: &String| self.get(name).unwrap_or(name.as_str()).to_string();

        let mut renamed = SenderPositions::default();
        for name in positions.left.iter().map(rename) {
            if renamed.side_of(&name).is_none() {
                renamed.left.push(name);
            }
        }
        for name in positions.right.iter().map(rename) {
            if renamed.side_of(&name).is_none() {
                renamed.right.push(name);
            }
        }
        renamed
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for NameMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
