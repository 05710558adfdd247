//! Message id generation.
//!
//! Ids have the shape `<hash>-<random>`:
//!
//! - `hash` is a base-36 rolling hash of `timestamp|sender|message`, so the
//!   same content always yields the same prefix. Repair tooling relies on
//!   recomputing it exactly, which is why the hash runs over UTF-16 code
//!   units with signed 32-bit wrapping arithmetic.
//! - `random` is five base-36 characters that keep two identical messages
//!   (a pair of "ok" sent in the same minute) apart.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::{OsRng, StdRng};
use rand::{Rng, RngCore, SeedableRng};
use tracing::warn;

use super::timestamp::normalize_timestamp;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of the random suffix.
pub const SUFFIX_LEN: usize = 5;

static FALLBACK_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generates a fresh id for a message.
///
/// # Example
///
/// ```rust
/// use chatshare::parsing::{content_hash, generate_id};
///
/// let id = generate_id("9:00", "Alice", "Hello");
/// let (hash, suffix) = id.split_once('-').unwrap();
/// assert_eq!(hash, content_hash("9:00", "Alice", "Hello"));
/// assert_eq!(suffix.len(), 5);
/// ```
pub fn generate_id(timestamp: &str, sender: &str, message: &str) -> String {
    format!(
        "{}-{}",
        content_hash(timestamp, sender, message),
        random_suffix()
    )
}

/// Returns the deterministic hash part of an id.
///
/// The timestamp is normalized first, so whitespace variants hash equally.
pub fn content_hash(timestamp: &str, sender: &str, message: &str) -> String {
    let key = format!("{}|{}|{}", normalize_timestamp(timestamp), sender, message);
    let hash = rolling_hash(&key);
    to_base36(i64::from(hash).unsigned_abs())
}

/// `hash = hash * 31 + unit` over UTF-16 code units, wrapping at 32 bits.
fn rolling_hash(input: &str) -> i32 {
    input
        .encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

fn random_suffix() -> String {
    let mut bytes = [0u8; SUFFIX_LEN];
    match OsRng.try_fill_bytes(&mut bytes) {
        Ok(()) => bytes
            .iter()
            .map(|b| char::from(BASE36[usize::from(*b) % 36]))
            .collect(),
        Err(e) => {
            warn!("OS random source unavailable, using fallback generator: {}", e);
            fallback_suffix()
        }
    }
}

/// Seeded from the clock and a process-wide counter.
fn fallback_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    let count = FALLBACK_COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut rng = StdRng::seed_from_u64(nanos ^ count.rotate_left(32));

    (0..SUFFIX_LEN)
        .map(|_| char::from(BASE36[rng.gen_range(0..36)]))
        .collect()
}
