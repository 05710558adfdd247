//! Dialect strategies.
//!
//! Each strategy recognises one raw-text export layout and tokenizes the
//! whole text into messages. Strategies implement [`Strategy`](crate::parser::Strategy)
//! and are tried in order by [`ChatParser`](crate::parser::ChatParser).
//!
//! # Available Strategies
//!
//! - [`BracketedStrategy`] - `[<timestamp>] <sender>: <body>`
//! - [`CommaStrategy`] - `<sender>, [<timestamp>]: <body>`
//! - [`GenericStrategy`] - name line, timestamp line, body lines
//!
//! # Example
//!
//! ```rust
//! use chatshare::parser::{Dialect, create_strategy};
//!
//! let strategy = create_strategy(Dialect::Bracketed);
//! let messages = strategy.tokenize("[9:00] Alice: Hello");
//! assert_eq!(messages.len(), 1);
//! ```

mod bracketed;
mod comma;
mod generic;

pub use bracketed::BracketedStrategy;
pub use comma::CommaStrategy;
pub use generic::{GenericStrategy, UNKNOWN_SENDER};
