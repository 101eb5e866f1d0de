use super::sequence::{Cons, Next, cons, next};
use crate::{CharStream, Outcome, Parser};

/// Zero-or-more repetition. Created by [`many`].
#[derive(Debug, Clone)]
pub struct Many<P> {
    item: P,
}

impl<P: Parser> Parser for Many<P> {
    type Output = Vec<P::Output>;

    fn parse(&self, stream: &mut dyn CharStream) -> Outcome<Self::Output> {
        let start = stream.position();
        let mut values = Vec::new();
        loop {
            match self.item.parse(stream) {
                Outcome::Match { consumed: 0, .. } => break,
                Outcome::Match { value, .. } => values.push(value),
                Outcome::NoMatch => break,
                Outcome::HardError(err) => return Outcome::HardError(err),
            }
        }
        Outcome::matched(values, stream.consumed_since(start))
    }
}

/// Repeats `p` until it stops matching and collects the values in order.
///
/// Never reports a no-match: zero repetitions is an empty match with zero
/// consumption. A hard error aborts the loop and is reported as-is; the
/// repetitions already consumed are not rolled back. A repetition that
/// matches without consuming anything ends the loop and its value is dropped,
/// so a zero-width item cannot spin forever.
#[inline]
pub fn many<P: Parser>(p: P) -> Many<P> {
    Many { item: p }
}

/// One-or-more repetition: `cons(p, many(p))`.
///
/// Reports a no-match when `p` does not match even once.
#[inline]
pub fn many1<P: Parser + Clone>(p: P) -> Cons<P, Many<P>> {
    cons(p.clone(), many(p))
}

/// One or more `item`s separated by `sep`, keeping only the items.
///
/// A trailing separator with no item after it is left unconsumed.
#[inline]
pub fn sep_by1<P, S>(item: P, sep: S) -> Cons<P, Many<Next<S, P>>>
where
    P: Parser + Clone,
    S: Parser,
{
    cons(item.clone(), many(next(sep, item)))
}
