//! Backtracking parser combinators over seekable character streams.
//!
//! A grammar is assembled from [`primitive`] matchers and
//! [`combinator`]s into an immutable [`Parser`] value, then invoked against a
//! [`Stream`]. Every invocation reports one [`Outcome`]:
//!
//! - `Match`: the value plus how many bytes were consumed;
//! - `NoMatch`: the production does not apply here, and the cursor is back
//!   where it started, so an alternative can be tried;
//! - `HardError`: I/O failure, invalid UTF-8, or a rejected conversion. It
//!   aborts the whole parse.
//!
//! Recursive grammars close the loop through [`Rec`] / [`fix`].

pub mod combinator;
pub mod config;
mod boxed;
mod error;
mod outcome;
pub mod primitive;
mod recursive;
mod stream;
pub mod text;
pub mod traits;

pub use boxed::BoxedParser;
pub use combinator::{
    Attempt, Many, apply, center, cons, many, many1, map, next, one_of, optional, or, prev,
    sep_by1, sequence_of,
};
pub use config::{ParseConfig, RecursionGuard};
pub use error::{BoxError, Error};
pub use outcome::Outcome;
pub use primitive::{any_char, digit, end_of_input, exact_char, none_of, one_of_chars, satisfy};
pub use recursive::{Rec, fix};
pub use stream::Stream;
pub use text::{exact_string, into_string, natural, number, token, whitespace};
pub use traits::{CharStream, FromFn, Parser, from_fn};
