use crate::{CharStream, Outcome, Parser};

/// Runs `body`, rewinding to the starting position if it reports a no-match.
///
/// The snapshot is the absolute cursor position, so it restores correctly no
/// matter how many reads, unreads or nested seeks `body` performed. A failed
/// rewind is a hard error.
pub(crate) fn restoring<T>(
    stream: &mut dyn CharStream,
    body: impl FnOnce(&mut dyn CharStream) -> Outcome<T>,
) -> Outcome<T> {
    let start = stream.position();
    match body(stream) {
        Outcome::NoMatch => match stream.rewind(start) {
            Ok(()) => Outcome::NoMatch,
            Err(err) => Outcome::HardError(err),
        },
        outcome => outcome,
    }
}

/// Restores the cursor when the inner parser reports a no-match.
///
/// Primitives and the atomic combinators ([`sequence_of`](crate::sequence_of),
/// [`next`](crate::next), [`prev`](crate::prev), [`center`](crate::center))
/// already restore themselves. Wrap anything else that may fail after
/// consuming input, typically a [`from_fn`](crate::from_fn) closure, before
/// handing it to [`or`](crate::or) or [`one_of`](crate::one_of).
///
/// Hard errors pass through without rewinding.
#[derive(Debug, Clone)]
pub struct Attempt<P> {
    inner: P,
}

impl<P> Attempt<P> {
    #[inline]
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

impl<P: Parser> Parser for Attempt<P> {
    type Output = P::Output;

    fn parse(&self, stream: &mut dyn CharStream) -> Outcome<P::Output> {
        restoring(stream, |stream| self.inner.parse(stream))
    }
}
