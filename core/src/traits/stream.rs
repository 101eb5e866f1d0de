use std::io::{self, SeekFrom};

use crate::Error;

/// A seekable character stream for parsing.
///
/// This is the single piece of shared mutable state in a parse. Parsers
/// read characters from it, push back at most one character, and seek to
/// undo failed attempts.
///
/// All offsets (the cursor, seek targets, consumption counts reported by
/// parsers) are UTF-8 byte offsets from the start of the stream.
///
/// The trait is object safe; parsers receive `&mut dyn CharStream`.
pub trait CharStream: io::Read {
    /// Reads one UTF-8 encoded character.
    ///
    /// Returns the character and its encoded width in bytes, or `Ok(None)` at
    /// end of input. A malformed or truncated sequence is
    /// [`Error::InvalidUtf8`] and does not advance the cursor.
    fn read_char(&mut self) -> Result<Option<(char, usize)>, Error>;

    /// Pushes back the most recently read character.
    ///
    /// Valid exactly once after a successful [`read_char`](Self::read_char).
    /// Calling it again, or after a seek or byte read, is
    /// [`Error::NothingToUnread`].
    fn unread_char(&mut self) -> Result<(), Error>;

    /// Moves the cursor.
    ///
    /// `SeekFrom::Current` is relative to the logical cursor. Seeking before
    /// the start of the stream is [`Error::SeekBeforeStart`] and leaves the
    /// cursor where it was. A successful seek discards all read-ahead and the
    /// pending pushback.
    fn seek(&mut self, pos: SeekFrom) -> Result<u64, Error>;

    /// Returns the current cursor position.
    fn position(&self) -> u64;

    /// Enters one level of recursive-production nesting.
    ///
    /// Returns [`Error::RecursionLimitExceeded`] once the configured depth is
    /// exceeded. A failed enter must not be paired with
    /// [`exit_nested`](Self::exit_nested).
    fn enter_nested(&mut self) -> Result<(), Error>;

    /// Leaves one level of recursive-production nesting.
    fn exit_nested(&mut self);

    /// Rewinds to a previously observed absolute position.
    ///
    /// Does nothing when the cursor is already there, so atomic primitives
    /// that restored themselves with `unread_char` keep their read-ahead.
    #[inline]
    fn rewind(&mut self, pos: u64) -> Result<(), Error> {
        if self.position() != pos {
            self.seek(SeekFrom::Start(pos))?;
        }
        Ok(())
    }

    /// Number of bytes the cursor advanced since `pos`.
    ///
    /// Saturates at zero if the cursor is behind `pos`.
    #[inline]
    fn consumed_since(&self, pos: u64) -> usize {
        usize::try_from(self.position().saturating_sub(pos)).unwrap_or(usize::MAX)
    }

    /// Returns `true` if no characters remain.
    ///
    /// Peeks one character and pushes it back. This discards any pending
    /// pushback from an earlier read.
    fn at_end(&mut self) -> Result<bool, Error> {
        match self.read_char()? {
            Some(_) => {
                self.unread_char()?;
                Ok(false)
            }
            None => Ok(true),
        }
    }

    /// Ensures the stream has been fully consumed.
    ///
    /// Returns `Ok(())` if no characters remain, or
    /// `Err(Error::StreamNotConsumed)` with the current offset otherwise.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let value = grammar.parse(&mut stream);
    /// stream.ensure_consumed()?; // Error if trailing garbage
    /// ```
    fn ensure_consumed(&mut self) -> Result<(), Error> {
        if self.at_end()? {
            Ok(())
        } else {
            Err(Error::StreamNotConsumed {
                offset: self.position(),
            })
        }
    }
}
