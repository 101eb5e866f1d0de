//! Combinators: parsers built out of other parsers.
//!
//! | Group | Functions |
//! |-------|-----------|
//! | transform | [`map`], [`apply`] |
//! | sequencing | [`sequence_of`], [`cons`], [`next`], [`prev`], [`center`] |
//! | alternation | [`or`], [`one_of`], [`optional`] |
//! | repetition | [`many`], [`many1`], [`sep_by1`] |
//! | restoration | [`Attempt`] |
//!
//! Every combinator is a plain struct holding its sub-parsers by value, so a
//! grammar is an immutable tree of values (plus the late-bound edges of
//! [`Rec`](crate::Rec)).

mod backtrack;
mod choice;
mod repeat;
mod sequence;
mod transform;

pub use backtrack::Attempt;
pub use choice::{OneOf, Optional, Or, one_of, optional, or};
pub use repeat::{Many, many, many1, sep_by1};
pub use sequence::{Cons, Next, Prev, SequenceOf, center, cons, next, prev, sequence_of};
pub use transform::{Apply, Map, apply, map};
