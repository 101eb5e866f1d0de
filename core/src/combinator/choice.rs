use crate::{CharStream, Outcome, Parser};

/// Two-way alternation. Created by [`or`] or [`Parser::or`].
#[derive(Debug, Clone)]
pub struct Or<A, B> {
    first: A,
    second: B,
}

impl<A, B> Or<A, B> {
    #[inline]
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A, B> Parser for Or<A, B>
where
    A: Parser,
    B: Parser<Output = A::Output>,
{
    type Output = A::Output;

    #[inline]
    fn parse(&self, stream: &mut dyn CharStream) -> Outcome<A::Output> {
        match self.first.parse(stream) {
            Outcome::NoMatch => self.second.parse(stream),
            outcome => outcome,
        }
    }
}

/// Tries `a`, and if it does not match, tries `b` from the same position.
///
/// `or` takes no snapshot of its own: it trusts `a` to have restored the
/// cursor on its no-match. Every primitive and combinator in this crate
/// does; wrap a [`from_fn`](crate::from_fn) closure that may not in
/// [`Attempt`](crate::Attempt) first. A hard error from `a` is reported
/// without trying `b`.
#[inline]
pub fn or<A, B>(a: A, b: B) -> Or<A, B>
where
    A: Parser,
    B: Parser<Output = A::Output>,
{
    Or::new(a, b)
}

/// N-way prioritized alternation. Created by [`one_of`].
#[derive(Debug, Clone)]
pub struct OneOf<P> {
    alternatives: Vec<P>,
}

impl<P: Parser> Parser for OneOf<P> {
    type Output = P::Output;

    fn parse(&self, stream: &mut dyn CharStream) -> Outcome<P::Output> {
        for alternative in &self.alternatives {
            match alternative.parse(stream) {
                Outcome::NoMatch => continue,
                outcome => return outcome,
            }
        }
        Outcome::NoMatch
    }
}

/// Returns the first alternative that matches, in left-to-right order.
///
/// This is priority, not longest match: a later alternative is never tried
/// once an earlier one matched. An empty list never matches. The restoration
/// caveat of [`or`] applies to every alternative but the last.
#[inline]
pub fn one_of<P: Parser>(alternatives: Vec<P>) -> OneOf<P> {
    OneOf { alternatives }
}

/// Builds a [`one_of`] from alternatives of any types sharing one output
/// type, boxing each.
///
/// ```ignore
/// let op = one_of![exact_char('+'), exact_char('-'), exact_char('*'), exact_char('/')];
/// ```
#[macro_export]
macro_rules! one_of {
    ($($parser:expr),* $(,)?) => {
        $crate::one_of(::std::vec![$($crate::Parser::boxed($parser)),*])
    };
}

/// Optional production. Created by [`optional`] or [`Parser::optional`].
#[derive(Debug, Clone)]
pub struct Optional<P> {
    inner: P,
}

impl<P> Optional<P> {
    #[inline]
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

impl<P: Parser> Parser for Optional<P> {
    type Output = Option<P::Output>;

    #[inline]
    fn parse(&self, stream: &mut dyn CharStream) -> Outcome<Self::Output> {
        match self.inner.parse(stream) {
            Outcome::Match { value, consumed } => Outcome::matched(Some(value), consumed),
            Outcome::NoMatch => Outcome::matched(None, 0),
            Outcome::HardError(err) => Outcome::HardError(err),
        }
    }
}

/// Matches `p` if possible, otherwise matches `None` without consuming.
///
/// Never reports a no-match; hard errors still propagate.
#[inline]
pub fn optional<P: Parser>(p: P) -> Optional<P> {
    Optional::new(p)
}
