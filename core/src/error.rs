//! Core error types for seekparse.
//!
//! Everything in this module is a *hard* error: it aborts the parse and is
//! propagated unchanged through every combinator. The "this production does
//! not apply here" result is not an error at all, it is
//! [`Outcome::NoMatch`](crate::Outcome::NoMatch).
//!
//! Grammar crates should define their own error type and implement
//! `From<seekparse::Error>` for it.
//!
//! # Example
//!
//! ```ignore
//! use thiserror::Error;
//!
//! #[derive(Error, Debug)]
//! pub enum MyGrammarError {
//!     #[error(transparent)]
//!     Parse(#[from] seekparse::Error),
//!
//!     #[error("trailing input at byte {offset}")]
//!     TrailingInput { offset: u64 },
//! }
//! ```

use std::io;

use thiserror::Error;

/// Boxed cause of a failed [`apply`](crate::apply) conversion.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Core seekparse error type.
#[derive(Error, Debug)]
pub enum Error {
    /// The underlying source failed for a reason other than end of input.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// The bytes at `offset` are not a complete UTF-8 character.
    #[error("invalid UTF-8 sequence at byte offset {offset}")]
    InvalidUtf8 {
        /// Byte offset of the first byte of the bad sequence.
        offset: u64,
    },

    /// `unread_char` was called without a character to push back.
    ///
    /// Only the most recently read character can be unread, and only once.
    /// Seeks and byte reads discard the pending pushback.
    #[error("no character to unread")]
    NothingToUnread,

    /// A seek resolved to a position before the start of the stream.
    #[error("cannot seek to offset {offset}: before start of stream")]
    SeekBeforeStart {
        /// The (negative) absolute offset the seek resolved to.
        offset: i64,
    },

    /// A syntactically valid match was rejected by an [`apply`](crate::apply)
    /// conversion.
    #[error("conversion failed: {0}")]
    Conversion(#[source] BoxError),

    /// A recursive production was invoked before it was defined.
    #[error("recursive production invoked before it was defined")]
    Undefined,

    /// A recursive production was defined twice.
    #[error("recursive production is already defined")]
    AlreadyDefined,

    /// A weak handle to a recursive production outlived its owner.
    #[error("recursive production was dropped while still referenced")]
    Dropped,

    /// Nested invocations of recursive productions exceeded the configured
    /// limit.
    ///
    /// Input like `((((((...))))))` with thousands of nesting levels would
    /// trigger this with the default limit of 128.
    #[error("recursion limit exceeded: depth {depth} > limit {limit}")]
    RecursionLimitExceeded {
        /// Depth reached when the limit was exceeded.
        depth: usize,
        /// Maximum allowed depth.
        limit: usize,
    },

    /// Input remained after a parse that was required to consume everything.
    ///
    /// Returned by [`CharStream::ensure_consumed`](crate::CharStream::ensure_consumed).
    #[error("stream not fully consumed: input remains at byte offset {offset}")]
    StreamNotConsumed {
        /// Cursor position where the unconsumed input starts.
        offset: u64,
    },
}

impl Error {
    /// Wraps a conversion failure raised inside [`apply`](crate::apply).
    pub fn conversion<E: Into<BoxError>>(err: E) -> Self {
        Self::Conversion(err.into())
    }
}
