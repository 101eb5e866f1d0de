//! Core traits for the seekparse engine.
//!
//! Two traits carry the whole engine: [`CharStream`] is the seekable input,
//! [`Parser`] is a production that reads from it.
//!
//! # Trait Hierarchy
//!
//! ```text
//! CharStream (io::Read + read_char / unread_char / seek)
//!     └── rewind, at_end, ensure_consumed (provided)
//!
//! Parser (parse(&mut dyn CharStream) -> Outcome<Output>)
//!     └── map, apply, or, attempt, optional, boxed (provided)
//! ```
//!
//! # Usage Patterns
//!
//! ## Composing
//!
//! ```ignore
//! use seekparse_core::{center, exact_char, natural, Parser};
//!
//! let parenthesized = center(exact_char('('), natural(), exact_char(')'));
//! let value = natural().or(parenthesized);
//! ```
//!
//! ## Invoking
//!
//! ```ignore
//! use seekparse_core::{natural, Outcome, Parser, Stream};
//!
//! let mut stream = Stream::from("42rest");
//! match natural().parse(&mut stream) {
//!     Outcome::Match { value, consumed } => assert_eq!((value, consumed), (42, 2)),
//!     Outcome::NoMatch => unreachable!(),
//!     Outcome::HardError(err) => return Err(err),
//! }
//! ```

mod parser;
mod stream;

pub use parser::{from_fn, FromFn, Parser};
pub use stream::CharStream;
