//! Format detection and tokenization.
//!
//! [`ChatParser`] is the single entry point for turning raw chat text into
//! messages. It first runs the generic-export converter, then tries each
//! enabled [`Dialect`] strategy in order; the first one that yields at least
//! one message wins.
//!
//! # Example
//!
//! ```rust
//! use chatshare::parser::{ChatParser, Dialect, ParseOutcome};
//!
//! let parser = ChatParser::new();
//! let outcome = parser.parse_outcome("[1/1/24, 9:00 AM] Alice: Hello");
//!
//! match outcome {
//!     ParseOutcome::Matched { dialect, messages, .. } => {
//!         assert_eq!(dialect, Dialect::Bracketed);
//!         assert_eq!(messages[0].sender, "Alice");
//!     }
//!     ParseOutcome::NoMatch => unreachable!(),
//! }
//! ```
//!
//! # Unparseable input
//!
//! Text that no strategy recognises yields [`ParseOutcome::NoMatch`] (or an
//! empty vector from [`ChatParser::parse`]). This is an expected outcome:
//! callers should tell the user the format wasn't recognised rather than
//! store an empty chat.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::Message;
use crate::config::ParserConfig;
use crate::convert::convert_if_generic_export;
use crate::core::reconcile::{ReconcileStats, reconcile_messages};

/// Raw-text export layouts, in default priority order.
///
/// # Example
///
/// ```rust
/// use chatshare::parser::Dialect;
/// use std::str::FromStr;
///
/// assert_eq!(Dialect::from_str("comma").unwrap(), Dialect::CommaPrefixed);
/// assert_eq!(Dialect::Generic.to_string(), "generic");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum Dialect {
    /// `[<timestamp>] <sender>: <body>`
    #[serde(alias = "a")]
    Bracketed,

    /// `<sender>, [<timestamp>]: <body>`
    #[serde(alias = "comma", alias = "b")]
    CommaPrefixed,

    /// Name line, timestamp line, body lines
    #[serde(alias = "c")]
    Generic,
}

impl Dialect {
    /// Returns all dialects in default priority order.
    pub fn all() -> &'static [Dialect] {
        &[Dialect::Bracketed, Dialect::CommaPrefixed, Dialect::Generic]
    }

    /// Returns all accepted names including aliases.
    pub fn all_names() -> &'static [&'static str] {
        &["bracketed", "a", "comma-prefixed", "comma", "b", "generic", "c"]
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::Bracketed => write!(f, "bracketed"),
            Dialect::CommaPrefixed => write!(f, "comma-prefixed"),
            Dialect::Generic => write!(f, "generic"),
        }
    }
}

impl std::str::FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bracketed" | "a" => Ok(Dialect::Bracketed),
            "comma-prefixed" | "comma" | "b" => Ok(Dialect::CommaPrefixed),
            "generic" | "c" => Ok(Dialect::Generic),
            _ => Err(format!(
                "Unknown dialect: '{}'. Expected one of: {}",
                s,
                Dialect::all_names().join(", ")
            )),
        }
    }
}

/// A parsing rule for one dialect.
///
/// A strategy consumes the whole text and returns every message it finds,
/// in source order, each with a fresh id and its span in `text`. An empty
/// vector means the dialect does not apply.
pub trait Strategy: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Dialect this strategy recognises.
    fn dialect(&self) -> Dialect;

    /// Tokenizes `text` into messages.
    fn tokenize(&self, text: &str) -> Vec<Message>;
}

/// Creates the strategy for a dialect.
pub fn create_strategy(dialect: Dialect) -> Box<dyn Strategy> {
    match dialect {
        Dialect::Bracketed => Box::new(crate::parsers::BracketedStrategy::new()),
        Dialect::CommaPrefixed => Box::new(crate::parsers::CommaStrategy::new()),
        Dialect::Generic => Box::new(crate::parsers::GenericStrategy::new()),
    }
}

/// Result of running the strategy chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// No enabled strategy produced a message.
    NoMatch,

    /// A strategy recognised the text.
    Matched {
        /// Winning dialect.
        dialect: Dialect,
        /// `true` if the generic-export converter rewrote the input first.
        converted: bool,
        /// Messages in source order.
        messages: Vec<Message>,
    },
}

impl ParseOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, ParseOutcome::Matched { .. })
    }

    pub fn dialect(&self) -> Option<Dialect> {
        match self {
            ParseOutcome::Matched { dialect, .. } => Some(*dialect),
            ParseOutcome::NoMatch => None,
        }
    }

    pub fn messages(&self) -> &[Message] {
        match self {
            ParseOutcome::Matched { messages, .. } => messages,
            ParseOutcome::NoMatch => &[],
        }
    }

    /// Consumes the outcome, returning an empty vector for `NoMatch`.
    pub fn into_messages(self) -> Vec<Message> {
        match self {
            ParseOutcome::Matched { messages, .. } => messages,
            ParseOutcome::NoMatch => Vec::new(),
        }
    }
}

/// Converter plus ordered strategy chain.
pub struct ChatParser {
    config: ParserConfig,
    strategies: Vec<Box<dyn Strategy>>,
}

impl ChatParser {
    /// Creates a parser with default configuration.
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        let strategies = config.dialects.iter().map(|&d| create_strategy(d)).collect();
        Self { config, strategies }
    }

    /// Creates a parser that records message spans for editor sessions.
    pub fn editor() -> Self {
        Self::with_config(ParserConfig::editor())
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Runs the full pipeline and reports which dialect matched.
    #[instrument(level = "debug", skip_all, fields(len = text.len()))]
    pub fn parse_outcome(&self, text: &str) -> ParseOutcome {
        if text.trim().is_empty() {
            return ParseOutcome::NoMatch;
        }

        let input = if self.config.convert_generic_exports {
            convert_if_generic_export(text)
        } else {
            std::borrow::Cow::Borrowed(text)
        };
        let converted = matches!(input, std::borrow::Cow::Owned(_));
        if converted {
            debug!("Rewrote generic export into bracketed form");
        }

        for strategy in &self.strategies {
            let mut messages = strategy.tokenize(&input);
            trace!(strategy = strategy.name(), count = messages.len(), "Tried strategy");

            if messages.is_empty() {
                continue;
            }

            // Spans into rewritten text would not point at anything the user typed.
            if converted || !self.config.track_spans {
                messages.iter_mut().for_each(Message::clear_span);
            }

            debug!(
                dialect = %strategy.dialect(),
                count = messages.len(),
                "Parsed chat"
            );
            return ParseOutcome::Matched {
                dialect: strategy.dialect(),
                converted,
                messages,
            };
        }

        debug!("No strategy matched");
        ParseOutcome::NoMatch
    }

    /// Parses raw chat text, returning an empty vector if unrecognised.
    pub fn parse(&self, text: &str) -> Vec<Message> {
        self.parse_outcome(text).into_messages()
    }

    /// Re-parses edited text, keeping ids from `old` wherever possible.
    pub fn reconcile(&self, old: &[Message], new_text: &str) -> Vec<Message> {
        self.reconcile_with_stats(old, new_text).0
    }

    /// Like [`reconcile`](Self::reconcile), also reporting how each id was resolved.
    #[instrument(level = "debug", skip_all, fields(old = old.len()))]
    pub fn reconcile_with_stats(
        &self,
        old: &[Message],
        new_text: &str,
    ) -> (Vec<Message>, ReconcileStats) {
        let fresh = self.parse(new_text);
        reconcile_messages(old, fresh)
    }
}

impl Default for ChatParser {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ChatParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatParser")
            .field("config", &self.config)
            .field(
                "strategies",
                &self.strategies.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Parses raw chat text with the default parser.
///
/// ```rust
/// let messages = chatshare::parse("[1/1/24, 9:00 AM] Alice: Hello\n[1/1/24, 9:01 AM] Bob: Hi there");
/// assert_eq!(messages.len(), 2);
/// assert_eq!(messages[1].message, "Hi there");
/// ```
pub fn parse(text: &str) -> Vec<Message> {
    ChatParser::new().parse(text)
}

/// Re-parses `new_text` with the default parser, carrying ids over from `old`.
///
/// ```rust
/// let text = "[9:00] Alice: Hello\n[9:01] Bob: Hi";
/// let before = chatshare::parse(text);
/// let after = chatshare::reconcile(&before, "[9:00] Alice: Hello!\n[9:01] Bob: Hi");
/// assert_eq!(before[0].id, after[0].id);
/// assert_eq!(before[1].id, after[1].id);
/// ```
pub fn reconcile(old: &[Message], new_text: &str) -> Vec<Message> {
    ChatParser::new().reconcile(old, new_text)
}
