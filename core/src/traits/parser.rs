use std::rc::Rc;

use super::stream::CharStream;
use crate::combinator::{Apply, Attempt, Map, Optional, Or};
use crate::error::BoxError;
use crate::{BoxedParser, Outcome};

/// A grammar production.
///
/// A parser is an immutable value: invoking it reads from the stream and
/// reports an [`Outcome`], but never changes the parser itself. The same
/// parser can be invoked any number of times, on different streams or at
/// different positions of one stream.
///
/// # Contract
///
/// Implementations must uphold two rules that every combinator relies on:
///
/// 1. On [`Outcome::NoMatch`] the stream cursor is exactly where it was when
///    `parse` was called. Wrap a multi-step parser in
///    [`attempt`](Parser::attempt) when it can fail after consuming input.
/// 2. On [`Outcome::Match`] the reported `consumed` equals how far the
///    cursor advanced.
///
/// End of input is a no-match; every other failure is a hard error.
///
/// # Example
///
/// ```ignore
/// use seekparse_core::{CharStream, Outcome, Parser};
///
/// /// Matches a single ASCII letter and upper-cases it.
/// struct Upper;
///
/// impl Parser for Upper {
///     type Output = char;
///
///     fn parse(&self, stream: &mut dyn CharStream) -> Outcome<char> {
///         match stream.read_char() {
///             Ok(Some((c, n))) if c.is_ascii_alphabetic() => {
///                 Outcome::matched(c.to_ascii_uppercase(), n)
///             }
///             Ok(Some(_)) => match stream.unread_char() {
///                 Ok(()) => Outcome::NoMatch,
///                 Err(err) => Outcome::HardError(err),
///             },
///             Ok(None) => Outcome::NoMatch,
///             Err(err) => Outcome::HardError(err),
///         }
///     }
/// }
/// ```
///
/// # Blanket Implementations
///
/// - `&P`, `Box<P>` and `Rc<P>` delegate to `P`.
pub trait Parser {
    /// Value produced by a match.
    type Output;

    /// Runs the production at the stream's current position.
    fn parse(&self, stream: &mut dyn CharStream) -> Outcome<Self::Output>;

    /// Transforms the matched value. See [`map`](crate::map).
    #[inline]
    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> U,
    {
        Map::new(self, f)
    }

    /// Transforms the matched value with a fallible conversion.
    /// See [`apply`](crate::apply).
    #[inline]
    fn apply<U, E, F>(self, f: F) -> Apply<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> Result<U, E>,
        E: Into<BoxError>,
    {
        Apply::new(self, f)
    }

    /// Tries `other` when this parser does not match. See [`or`](crate::or).
    #[inline]
    fn or<P>(self, other: P) -> Or<Self, P>
    where
        Self: Sized,
        P: Parser<Output = Self::Output>,
    {
        Or::new(self, other)
    }

    /// Makes this parser restore the cursor itself on a no-match.
    /// See [`Attempt`].
    #[inline]
    fn attempt(self) -> Attempt<Self>
    where
        Self: Sized,
    {
        Attempt::new(self)
    }

    /// Turns a no-match into `Some`/`None`. See [`optional`](crate::optional).
    #[inline]
    fn optional(self) -> Optional<Self>
    where
        Self: Sized,
    {
        Optional::new(self)
    }

    /// Erases the parser's type.
    #[inline]
    fn boxed(self) -> BoxedParser<Self::Output>
    where
        Self: Sized + 'static,
    {
        BoxedParser::new(self)
    }
}

impl<P: Parser + ?Sized> Parser for &P {
    type Output = P::Output;

    #[inline]
    fn parse(&self, stream: &mut dyn CharStream) -> Outcome<Self::Output> {
        (**self).parse(stream)
    }
}

impl<P: Parser + ?Sized> Parser for Box<P> {
    type Output = P::Output;

    #[inline]
    fn parse(&self, stream: &mut dyn CharStream) -> Outcome<Self::Output> {
        (**self).parse(stream)
    }
}

impl<P: Parser + ?Sized> Parser for Rc<P> {
    type Output = P::Output;

    #[inline]
    fn parse(&self, stream: &mut dyn CharStream) -> Outcome<Self::Output> {
        (**self).parse(stream)
    }
}

/// A parser built from a closure. Created by [`from_fn`].
#[derive(Clone)]
pub struct FromFn<F> {
    f: F,
}

/// Builds a parser from a closure over the stream.
///
/// The closure takes on the parser contract: restore on no-match and report
/// accurate consumption.
#[inline]
pub fn from_fn<T, F>(f: F) -> FromFn<F>
where
    F: Fn(&mut dyn CharStream) -> Outcome<T>,
{
    FromFn { f }
}

impl<T, F> Parser for FromFn<F>
where
    F: Fn(&mut dyn CharStream) -> Outcome<T>,
{
    type Output = T;

    #[inline]
    fn parse(&self, stream: &mut dyn CharStream) -> Outcome<T> {
        (self.f)(stream)
    }
}
