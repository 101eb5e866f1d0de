use crate::error::{BoxError, Error};
use crate::{CharStream, Outcome, Parser};

/// Transforms a matched value. Created by [`map`] or [`Parser::map`].
#[derive(Debug, Clone)]
pub struct Map<P, F> {
    inner: P,
    f: F,
}

impl<P, F> Map<P, F> {
    #[inline]
    pub fn new(inner: P, f: F) -> Self {
        Self { inner, f }
    }
}

impl<P, F, U> Parser for Map<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> U,
{
    type Output = U;

    #[inline]
    fn parse(&self, stream: &mut dyn CharStream) -> Outcome<U> {
        self.inner.parse(stream).map(&self.f)
    }
}

/// Applies `f` to the value of a match, keeping the consumption.
///
/// No-matches and hard errors pass through unchanged.
#[inline]
pub fn map<P, F, U>(parser: P, f: F) -> Map<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> U,
{
    Map::new(parser, f)
}

/// Fallible transform of a matched value. Created by [`apply`] or
/// [`Parser::apply`].
#[derive(Debug, Clone)]
pub struct Apply<P, F> {
    inner: P,
    f: F,
}

impl<P, F> Apply<P, F> {
    #[inline]
    pub fn new(inner: P, f: F) -> Self {
        Self { inner, f }
    }
}

impl<P, F, U, E> Parser for Apply<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> Result<U, E>,
    E: Into<BoxError>,
{
    type Output = U;

    fn parse(&self, stream: &mut dyn CharStream) -> Outcome<U> {
        match self.inner.parse(stream) {
            Outcome::Match { value, consumed } => match (self.f)(value) {
                Ok(value) => Outcome::Match { value, consumed },
                Err(err) => Outcome::HardError(Error::conversion(err)),
            },
            Outcome::NoMatch => Outcome::NoMatch,
            Outcome::HardError(err) => Outcome::HardError(err),
        }
    }
}

/// Applies a fallible conversion to the value of a match.
///
/// A conversion failure is a hard error ([`Error::Conversion`]), not a
/// no-match: the input had the right shape but an unacceptable meaning, such
/// as a numeral too large for its integer type. The consumed input is not
/// given back.
#[inline]
pub fn apply<P, F, U, E>(parser: P, f: F) -> Apply<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> Result<U, E>,
    E: Into<BoxError>,
{
    Apply::new(parser, f)
}
