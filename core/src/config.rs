//! Parser configuration for resource limits and buffering.
//!
//! This module provides [`ParseConfig`], handed to a
//! [`Stream`](crate::Stream) when it is built, and [`RecursionGuard`], the
//! depth counter the stream keeps for recursive productions.
//!
//! # Recursion Limits
//!
//! Following the pattern established by `serde_json`, every invocation of a
//! recursive production ([`Rec`](crate::Rec)) counts as one level of nesting.
//! Exceeding the limit is a hard error rather than a stack overflow. The
//! default limit of 128 balances safety with practical grammars.
//!
//! # Example
//!
//! ```ignore
//! use seekparse_core::{ParseConfig, Stream};
//!
//! // Use default limits (recursion depth: 128, 8 KiB read-ahead)
//! let config = ParseConfig::default();
//!
//! // Deeply nested input, small buffer
//! let config = ParseConfig::new()
//!     .with_max_recursion_depth(1024)
//!     .with_buffer_capacity(256);
//!
//! let stream = Stream::with_config(std::io::Cursor::new("((1))"), config);
//! ```

use crate::Error;

/// Smallest buffer that can hold any single UTF-8 encoded character.
pub const MIN_BUFFER_CAPACITY: usize = 4;

/// Limits and buffering for one [`Stream`](crate::Stream).
///
/// | Setting | Default |
/// |---------|---------|
/// | `max_recursion_depth` | 128, as in `serde_json` |
/// | `buffer_capacity` | 8192, as in `std::io::BufReader` |
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseConfig {
    /// How many [`Rec`](crate::Rec) invocations may be nested before the
    /// next one fails with [`Error::RecursionLimitExceeded`].
    pub max_recursion_depth: usize,

    /// Read-ahead size in bytes. Raised to [`MIN_BUFFER_CAPACITY`] if smaller.
    pub buffer_capacity: usize,
}

impl Default for ParseConfig {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ParseConfig {
    pub const DEFAULT: Self = Self {
        max_recursion_depth: 128,
        buffer_capacity: 8 * 1024,
    };

    #[inline]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    #[inline]
    pub const fn with_max_recursion_depth(mut self, depth: usize) -> Self {
        self.max_recursion_depth = depth;
        self
    }

    #[inline]
    pub const fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    /// Lifts the nesting limit entirely.
    ///
    /// Deeply nested untrusted input can then overflow the stack.
    #[inline]
    pub const fn disable_recursion_limit(self) -> Self {
        self.with_max_recursion_depth(usize::MAX)
    }

    /// Buffer size a stream built from this config will allocate.
    #[inline]
    pub const fn effective_buffer_capacity(&self) -> usize {
        if self.buffer_capacity < MIN_BUFFER_CAPACITY {
            MIN_BUFFER_CAPACITY
        } else {
            self.buffer_capacity
        }
    }
}

/// Nesting counter for recursive productions.
///
/// Each [`Stream`](crate::Stream) carries one. [`Rec`](crate::Rec) enters
/// it before running its production and exits once the production returns,
/// whatever the outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecursionGuard {
    depth: usize,
}

impl RecursionGuard {
    #[inline]
    pub const fn new() -> Self {
        Self { depth: 0 }
    }

    /// Number of productions currently entered.
    #[inline]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Enters one more level, refusing to go past `limit`.
    ///
    /// A refused enter leaves the depth as it was and must not be paired
    /// with [`exit`](Self::exit).
    #[inline]
    pub fn enter(&mut self, limit: usize) -> Result<(), Error> {
        match self.depth.checked_add(1).filter(|&next| next <= limit) {
            Some(next) => {
                self.depth = next;
                Ok(())
            }
            None => Err(Error::RecursionLimitExceeded {
                depth: self.depth.saturating_add(1),
                limit,
            }),
        }
    }

    /// Leaves one level. Unbalanced exits stop at zero.
    #[inline]
    pub fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
