use std::fmt;
use std::rc::Rc;

use crate::{CharStream, Outcome, Parser};

/// A type-erased, reference-counted parser.
///
/// Cloning is cheap and shares the underlying production. Use it to mix
/// parsers of different concrete types in one [`one_of`](crate::one_of) or
/// [`sequence_of`](crate::sequence_of), or to keep long combinator types out
/// of signatures.
pub struct BoxedParser<T> {
    inner: Rc<dyn Parser<Output = T>>,
}

impl<T> Clone for BoxedParser<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> BoxedParser<T> {
    pub fn new<P>(parser: P) -> Self
    where
        P: Parser<Output = T> + 'static,
    {
        Self {
            inner: Rc::new(parser),
        }
    }
}

impl<T> Parser for BoxedParser<T> {
    type Output = T;

    #[inline]
    fn parse(&self, stream: &mut dyn CharStream) -> Outcome<T> {
        self.inner.parse(stream)
    }
}

impl<T> fmt::Debug for BoxedParser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BoxedParser")
    }
}
