//! Text and number helpers built from the primitives.

use crate::combinator::{Map, Prev, apply, many, many1, prev, sequence_of};
use crate::primitive::{digit, exact_char, satisfy};
use crate::Parser;

fn collect_chars(chars: Vec<char>) -> String {
    chars.into_iter().collect()
}

/// Renders a character-list parser's value as a `String`.
#[inline]
pub fn into_string<P>(p: P) -> Map<P, fn(Vec<char>) -> String>
where
    P: Parser<Output = Vec<char>>,
{
    Map::new(p, collect_chars as fn(Vec<char>) -> String)
}

/// One or more ASCII digits, as text.
///
/// `"123abc"` matches `"123"` and leaves `"abc"`.
#[inline]
pub fn number() -> impl Parser<Output = String> + Clone {
    into_string(many1(digit()))
}

/// A [`number`] converted to `i64`.
///
/// A numeral that does not fit is a hard error
/// ([`Error::Conversion`](crate::Error::Conversion)), which tells "malformed
/// numeral" apart from "no numeral here".
#[inline]
pub fn natural() -> impl Parser<Output = i64> + Clone {
    apply(number(), |digits: String| digits.parse::<i64>())
}

/// Matches `expected` character by character and returns it.
///
/// Atomic: a partial match restores the cursor. The empty string matches
/// with zero consumption.
pub fn exact_string(expected: &str) -> impl Parser<Output = String> + Clone + use<> {
    into_string(sequence_of(expected.chars().map(exact_char).collect()))
}

/// Zero or more whitespace characters, discarded.
#[inline]
pub fn whitespace() -> impl Parser<Output = ()> + Clone {
    many(satisfy(char::is_whitespace)).map(|_| ())
}

/// Runs `p` and skips any whitespace after it.
#[inline]
pub fn token<P: Parser>(p: P) -> Prev<P, impl Parser<Output = ()> + Clone> {
    prev(p, whitespace())
}
