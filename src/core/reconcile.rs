//! Identity reconciliation across edits.
//!
//! When a user edits the raw text of a chat, the text is parsed again and
//! every message comes back with a fresh id. Comments and assets are keyed
//! by id, so the fresh ids are replaced with ids from the previous parse
//! wherever the messages can be matched:
//!
//! 1. **Exact**: same `timestamp|sender|message` signature. The first
//!    unclaimed old message with that signature, in emission order, wins.
//! 2. **Positional**: same timestamp and sender. Walks the old messages in
//!    order and takes the first unclaimed one. This covers the common case
//!    of fixing a typo in one body.
//! 3. **Fresh**: everything else keeps its new id.
//!
//! Reconciliation only ever substitutes ids: the result has the length and
//! order of the fresh parse. Both inputs are immutable snapshots.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::Serialize;
use tracing::debug;

use crate::Message;
use crate::parsing::generate_id;

/// How each id in a reconciled sequence was resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileStats {
    /// Ids carried over by exact content match
    pub exact: usize,
    /// Ids carried over by timestamp and sender
    pub positional: usize,
    /// Messages that kept their freshly generated id
    pub fresh: usize,
}

impl ReconcileStats {
    /// Number of ids carried over from the old sequence.
    pub fn preserved(&self) -> usize {
        self.exact + self.positional
    }

    pub fn total(&self) -> usize {
        self.exact + self.positional + self.fresh
    }
}

/// Tracks which old messages and ids are already taken.
struct Claims<'a> {
    old: &'a [Message],
    claimed: Vec<bool>,
    used_ids: HashSet<String>,
}

impl<'a> Claims<'a> {
    fn new(old: &'a [Message]) -> Self {
        Self {
            old,
            claimed: vec![false; old.len()],
            used_ids: HashSet::new(),
        }
    }

    /// An old message is available if neither it nor its id was taken.
    /// The id check guards against stored sequences that carry duplicates.
    fn is_available(&self, idx: usize) -> bool {
        !self.claimed[idx] && !self.used_ids.contains(&self.old[idx].id)
    }

    fn claim(&mut self, idx: usize) -> String {
        self.claimed[idx] = true;
        let id = self.old[idx].id.clone();
        self.used_ids.insert(id.clone());
        id
    }
}

/// Replaces fresh ids in `fresh` with ids from `old` where messages match.
///
/// `fresh` is usually the output of a parse of the edited text; see
/// [`ChatParser::reconcile`](crate::parser::ChatParser::reconcile) for the
/// text-in entry point.
pub fn reconcile_messages(old: &[Message], fresh: Vec<Message>) -> (Vec<Message>, ReconcileStats) {
    let mut messages = fresh;
    let mut stats = ReconcileStats::default();
    let mut claims = Claims::new(old);
    let mut resolved = vec![false; messages.len()];

    let mut by_signature: HashMap<String, VecDeque<usize>> = HashMap::new();
    for (idx, msg) in old.iter().enumerate() {
        by_signature
            .entry(msg.content_signature())
            .or_default()
            .push_back(idx);
    }

    // Pass 1: exact content.
    for (i, msg) in messages.iter_mut().enumerate() {
        let Some(candidates) = by_signature.get_mut(&msg.content_signature()) else {
            continue;
        };
        while let Some(idx) = candidates.pop_front() {
            if claims.is_available(idx) {
                msg.id = claims.claim(idx);
                resolved[i] = true;
                stats.exact += 1;
                break;
            }
        }
    }

    // Pass 2: same timestamp and sender, first unclaimed in old order.
    for (i, msg) in messages.iter_mut().enumerate() {
        if resolved[i] {
            continue;
        }
        let candidate = (0..old.len()).find(|&idx| claims.is_available(idx) && old[idx].same_slot(msg));
        if let Some(idx) = candidate {
            msg.id = claims.claim(idx);
            resolved[i] = true;
            stats.positional += 1;
        }
    }

    // Pass 3: keep fresh ids, regenerating on the off chance one collides.
    for (i, msg) in messages.iter_mut().enumerate() {
        if resolved[i] {
            continue;
        }
        while claims.used_ids.contains(&msg.id) {
            msg.id = generate_id(&msg.timestamp, &msg.sender, &msg.message);
        }
        claims.used_ids.insert(msg.id.clone());
        stats.fresh += 1;
    }

    debug!(
        exact = stats.exact,
        positional = stats.positional,
        fresh = stats.fresh,
        "Reconciled message ids"
    );

    (messages, stats)
}
