use crate::Error;

/// Result of invoking a parser.
///
/// Exactly one variant is reported per invocation:
///
/// - [`Match`](Outcome::Match): the production applied; `consumed` bytes were
///   read past the position where it started.
/// - [`NoMatch`](Outcome::NoMatch): the production does not apply here. This
///   is not an error, and the stream cursor is back where the parser started.
/// - [`HardError`](Outcome::HardError): the parse cannot continue. Hard errors
///   are never turned into `NoMatch` by any combinator.
#[must_use = "a parse outcome may carry a hard error"]
#[derive(Debug)]
pub enum Outcome<T> {
    /// The production applied.
    Match {
        /// Parsed value.
        value: T,
        /// Bytes advanced past the starting position.
        consumed: usize,
    },
    /// The production does not apply at this position.
    NoMatch,
    /// The parse was aborted.
    HardError(Error),
}

impl<T> Outcome<T> {
    #[inline]
    pub fn matched(value: T, consumed: usize) -> Self {
        Self::Match { value, consumed }
    }

    #[inline]
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match { .. })
    }

    #[inline]
    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatch)
    }

    #[inline]
    pub fn is_hard_error(&self) -> bool {
        matches!(self, Self::HardError(_))
    }

    /// Bytes consumed; zero for anything but a match.
    #[inline]
    pub fn consumed(&self) -> usize {
        match self {
            Self::Match { consumed, .. } => *consumed,
            Self::NoMatch | Self::HardError(_) => 0,
        }
    }

    /// Returns the matched value, discarding the consumption count.
    #[inline]
    pub fn value(self) -> Option<T> {
        match self {
            Self::Match { value, .. } => Some(value),
            Self::NoMatch | Self::HardError(_) => None,
        }
    }

    #[inline]
    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::HardError(err) => Some(err),
            Self::Match { .. } | Self::NoMatch => None,
        }
    }

    /// Maps the value of a match, keeping its consumption.
    #[inline]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Self::Match { value, consumed } => Outcome::Match {
                value: f(value),
                consumed,
            },
            Self::NoMatch => Outcome::NoMatch,
            Self::HardError(err) => Outcome::HardError(err),
        }
    }

    /// Splits the outcome into the `(value, consumed)` pair or the error.
    ///
    /// `Ok(None)` is a no-match.
    #[inline]
    pub fn into_result(self) -> Result<Option<(T, usize)>, Error> {
        match self {
            Self::Match { value, consumed } => Ok(Some((value, consumed))),
            Self::NoMatch => Ok(None),
            Self::HardError(err) => Err(err),
        }
    }
}

impl<T> From<Error> for Outcome<T> {
    #[inline]
    fn from(err: Error) -> Self {
        Self::HardError(err)
    }
}
