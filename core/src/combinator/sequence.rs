use super::backtrack::restoring;
use crate::{CharStream, Outcome, Parser};

/// Runs same-typed parsers in order. Created by [`sequence_of`].
#[derive(Debug, Clone)]
pub struct SequenceOf<P> {
    parsers: Vec<P>,
}

impl<P: Parser> Parser for SequenceOf<P> {
    type Output = Vec<P::Output>;

    fn parse(&self, stream: &mut dyn CharStream) -> Outcome<Self::Output> {
        restoring(stream, |stream| {
            let start = stream.position();
            let mut values = Vec::with_capacity(self.parsers.len());
            for parser in &self.parsers {
                match parser.parse(stream) {
                    Outcome::Match { value, .. } => values.push(value),
                    Outcome::NoMatch => return Outcome::NoMatch,
                    Outcome::HardError(err) => return Outcome::HardError(err),
                }
            }
            Outcome::matched(values, stream.consumed_since(start))
        })
    }
}

/// Runs each parser in order and collects their values.
///
/// If any element does not match, the whole sequence reports a no-match with
/// the cursor back at the start of the sequence. An empty list matches with
/// zero consumption. Use [`BoxedParser`](crate::BoxedParser) (or the
/// [`sequence!`](crate::sequence) macro) for elements of different types.
#[inline]
pub fn sequence_of<P: Parser>(parsers: Vec<P>) -> SequenceOf<P> {
    SequenceOf { parsers }
}

/// Prepends a head value to a list. Created by [`cons`].
#[derive(Debug, Clone)]
pub struct Cons<H, T> {
    head: H,
    tail: T,
}

impl<H, T, V> Parser for Cons<H, T>
where
    H: Parser<Output = V>,
    T: Parser<Output = Vec<V>>,
{
    type Output = Vec<V>;

    fn parse(&self, stream: &mut dyn CharStream) -> Outcome<Vec<V>> {
        let start = stream.position();
        let head = match self.head.parse(stream) {
            Outcome::Match { value, .. } => value,
            Outcome::NoMatch => return Outcome::NoMatch,
            Outcome::HardError(err) => return Outcome::HardError(err),
        };

        let mut values = vec![head];
        match self.tail.parse(stream) {
            Outcome::Match { value, .. } => values.extend(value),
            Outcome::NoMatch => {}
            Outcome::HardError(err) => return Outcome::HardError(err),
        }
        Outcome::matched(values, stream.consumed_since(start))
    }
}

/// Runs `head`, then the list parser `tail`, and prepends `head`'s value.
///
/// A no-match from `head` is a no-match. A no-match from `tail` leaves the
/// head value on its own. `cons` takes no snapshot: it relies on `head` and
/// `tail` restoring themselves.
#[inline]
pub fn cons<H, T, V>(head: H, tail: T) -> Cons<H, T>
where
    H: Parser<Output = V>,
    T: Parser<Output = Vec<V>>,
{
    Cons { head, tail }
}

/// Runs two parsers, keeping the second value. Created by [`next`].
#[derive(Debug, Clone)]
pub struct Next<A, B> {
    first: A,
    second: B,
}

impl<A: Parser, B: Parser> Parser for Next<A, B> {
    type Output = B::Output;

    fn parse(&self, stream: &mut dyn CharStream) -> Outcome<B::Output> {
        restoring(stream, |stream| {
            let start = stream.position();
            match self.first.parse(stream) {
                Outcome::Match { .. } => {}
                Outcome::NoMatch => return Outcome::NoMatch,
                Outcome::HardError(err) => return Outcome::HardError(err),
            }
            match self.second.parse(stream) {
                Outcome::Match { value, .. } => {
                    Outcome::matched(value, stream.consumed_since(start))
                }
                other => other,
            }
        })
    }
}

/// Runs `a` then `b`, keeping only `b`'s value.
///
/// Atomic: if either step does not match, the cursor goes back to where `a`
/// started.
#[inline]
pub fn next<A: Parser, B: Parser>(a: A, b: B) -> Next<A, B> {
    Next {
        first: a,
        second: b,
    }
}

/// Runs two parsers, keeping the first value. Created by [`prev`].
#[derive(Debug, Clone)]
pub struct Prev<A, B> {
    first: A,
    second: B,
}

impl<A: Parser, B: Parser> Parser for Prev<A, B> {
    type Output = A::Output;

    fn parse(&self, stream: &mut dyn CharStream) -> Outcome<A::Output> {
        restoring(stream, |stream| {
            let start = stream.position();
            let value = match self.first.parse(stream) {
                Outcome::Match { value, .. } => value,
                Outcome::NoMatch => return Outcome::NoMatch,
                Outcome::HardError(err) => return Outcome::HardError(err),
            };
            match self.second.parse(stream) {
                Outcome::Match { .. } => Outcome::matched(value, stream.consumed_since(start)),
                Outcome::NoMatch => Outcome::NoMatch,
                Outcome::HardError(err) => Outcome::HardError(err),
            }
        })
    }
}

/// Runs `a` then `b`, keeping only `a`'s value.
///
/// Atomic: if either step does not match, the cursor goes back to where `a`
/// started.
#[inline]
pub fn prev<A: Parser, B: Parser>(a: A, b: B) -> Prev<A, B> {
    Prev {
        first: a,
        second: b,
    }
}

/// Runs `a`, `b`, `c` in order, keeping only `b`'s value.
///
/// Equivalent to `prev(next(a, b), c)`; meant for delimited productions such
/// as a parenthesized sub-expression. Atomic.
#[inline]
pub fn center<A: Parser, B: Parser, C: Parser>(a: A, b: B, c: C) -> Prev<Next<A, B>, C> {
    prev(next(a, b), c)
}

/// Builds a [`sequence_of`] from a list of parsers of any types sharing one
/// output type, boxing each element.
///
/// ```ignore
/// let abc = sequence![exact_char('a'), digit(), any_char()];
/// ```
#[macro_export]
macro_rules! sequence {
    ($($parser:expr),* $(,)?) => {
        $crate::sequence_of(::std::vec![$($crate::Parser::boxed($parser)),*])
    };
}
