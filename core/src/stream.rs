//! Buffered character stream over any `Read + Seek` source.

use std::fmt;
use std::io::{self, Cursor, Read, Seek, SeekFrom};

use crate::config::{ParseConfig, RecursionGuard};
use crate::traits::CharStream;
use crate::Error;

/// A buffered, seekable character stream with single-step pushback.
///
/// `Stream` reads ahead from its source in chunks of
/// [`ParseConfig::buffer_capacity`] bytes and decodes UTF-8 characters out of
/// that buffer. Seeking always drops the buffer, so reads after a seek reflect
/// exactly the new position.
///
/// The source must be positioned at its start when the stream is built; all
/// positions are absolute offsets into the source.
///
/// # Example
///
/// ```ignore
/// use seekparse_core::{CharStream, Stream};
///
/// let mut stream = Stream::from("日本");
/// assert_eq!(stream.read_char()?, Some(('日', 3)));
/// stream.unread_char()?;
/// assert_eq!(stream.position(), 0);
/// ```
pub struct Stream<R> {
    source: R,
    buf: Box<[u8]>,
    /// Next unread byte in `buf`.
    head: usize,
    /// End of valid bytes in `buf`.
    tail: usize,
    /// Logical cursor; the source itself is `tail - head` bytes further on.
    offset: u64,
    /// Width of the last character read, while it may still be unread.
    pending: Option<usize>,
    guard: RecursionGuard,
    config: ParseConfig,
}

impl<R: Read + Seek> Stream<R> {
    /// Creates a stream with the default [`ParseConfig`].
    #[inline]
    pub fn new(source: R) -> Self {
        Self::with_config(source, ParseConfig::DEFAULT)
    }

    /// Creates a stream with the given configuration.
    pub fn with_config(source: R, config: ParseConfig) -> Self {
        Self {
            source,
            buf: vec![0; config.effective_buffer_capacity()].into_boxed_slice(),
            head: 0,
            tail: 0,
            offset: 0,
            pending: None,
            guard: RecursionGuard::new(),
            config,
        }
    }

    /// Reads everything after the cursor into a `String`.
    ///
    /// Mostly useful for inspecting what a parse left behind.
    pub fn rest(&mut self) -> Result<String, Error> {
        let mut rest = String::new();
        self.read_to_string(&mut rest)?;
        Ok(rest)
    }

    /// Returns the configuration this stream was built with.
    #[inline]
    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// Current nesting depth of recursive productions.
    #[inline]
    pub fn depth(&self) -> usize {
        self.guard.depth()
    }

    /// Returns a reference to the underlying source.
    ///
    /// The source's own position is ahead of [`position`](CharStream::position)
    /// by however much has been buffered.
    #[inline]
    pub fn get_ref(&self) -> &R {
        &self.source
    }

    /// Consumes the stream, returning the underlying source.
    #[inline]
    pub fn into_inner(self) -> R {
        self.source
    }

    #[inline]
    fn buffered(&self) -> usize {
        self.tail - self.head
    }

    /// Tries to make at least `need` bytes available after `head`.
    ///
    /// Returns the number of available bytes, which is less than `need` only
    /// at end of input. `need` must not exceed the buffer size.
    fn fill(&mut self, need: usize) -> io::Result<usize> {
        while self.buffered() < need {
            if self.tail == self.buf.len() {
                self.buf.copy_within(self.head..self.tail, 0);
                self.tail -= self.head;
                self.head = 0;
            }
            match self.source.read(&mut self.buf[self.tail..]) {
                Ok(0) => break,
                Ok(n) => self.tail += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(self.buffered())
    }

    /// Moves the source to `target` and drops all buffered state.
    ///
    /// If the source refuses to seek, the buffer and cursor are left as
    /// they were.
    fn reposition(&mut self, target: u64) -> Result<u64, Error> {
        let pos = self.source.seek(SeekFrom::Start(target))?;
        self.head = 0;
        self.tail = 0;
        self.pending = None;
        self.offset = pos;
        Ok(pos)
    }
}

impl<R: Read + Seek> CharStream for Stream<R> {
    fn read_char(&mut self) -> Result<Option<(char, usize)>, Error> {
        self.pending = None;
        if self.fill(1)? == 0 {
            return Ok(None);
        }

        let invalid = Error::InvalidUtf8 {
            offset: self.offset,
        };
        let Some(width) = utf8_width(self.buf[self.head]) else {
            return Err(invalid);
        };
        if self.fill(width)? < width {
            return Err(invalid);
        }

        let bytes = &self.buf[self.head..self.head + width];
        let Some(ch) = std::str::from_utf8(bytes)
            .ok()
            .and_then(|s| s.chars().next())
        else {
            return Err(invalid);
        };

        self.head += width;
        self.offset += width as u64;
        self.pending = Some(width);
        Ok(Some((ch, width)))
    }

    fn unread_char(&mut self) -> Result<(), Error> {
        let width = self.pending.take().ok_or(Error::NothingToUnread)?;
        match self.head.checked_sub(width) {
            Some(head) => {
                self.head = head;
                self.offset -= width as u64;
            }
            None => {
                self.reposition(self.offset - width as u64)?;
            }
        }
        Ok(())
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64, Error> {
        let current = i64::try_from(self.offset).unwrap_or(i64::MAX);
        let target = match pos {
            SeekFrom::Start(target) => return self.reposition(target),
            SeekFrom::Current(delta) => current.saturating_add(delta),
            SeekFrom::End(delta) => {
                let len = self.source.seek(SeekFrom::End(0))?;
                let target = i64::try_from(len).unwrap_or(i64::MAX).saturating_add(delta);
                if target < 0 {
                    // The source moved to its end; put it back under the cursor.
                    self.reposition(self.offset)?;
                }
                target
            }
        };

        if target < 0 {
            return Err(Error::SeekBeforeStart { offset: target });
        }
        self.reposition(target as u64)
    }

    #[inline]
    fn position(&self) -> u64 {
        self.offset
    }

    #[inline]
    fn enter_nested(&mut self) -> Result<(), Error> {
        self.guard.enter(self.config.max_recursion_depth)
    }

    #[inline]
    fn exit_nested(&mut self) {
        self.guard.exit();
    }
}

impl<R: Read + Seek> Read for Stream<R> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        self.pending = None;
        if out.is_empty() {
            return Ok(0);
        }

        if self.buffered() == 0 {
            self.head = 0;
            self.tail = 0;
            if out.len() >= self.buf.len() {
                let n = self.source.read(out)?;
                self.offset += n as u64;
                return Ok(n);
            }
            if self.fill(1)? == 0 {
                return Ok(0);
            }
        }

        let n = out.len().min(self.buffered());
        out[..n].copy_from_slice(&self.buf[self.head..self.head + n]);
        self.head += n;
        self.offset += n as u64;
        Ok(n)
    }
}

impl<R> fmt::Debug for Stream<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream")
            .field("offset", &self.offset)
            .field("buffered", &(self.tail - self.head))
            .field("pending", &self.pending)
            .field("depth", &self.guard.depth())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl From<&str> for Stream<Cursor<Vec<u8>>> {
    fn from(input: &str) -> Self {
        Self::new(Cursor::new(input.as_bytes().to_vec()))
    }
}

impl From<String> for Stream<Cursor<Vec<u8>>> {
    fn from(input: String) -> Self {
        Self::new(Cursor::new(input.into_bytes()))
    }
}

/// Encoded width implied by a UTF-8 lead byte.
#[inline]
fn utf8_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(input: &str, capacity: usize) -> Stream<Cursor<Vec<u8>>> {
        Stream::with_config(
            Cursor::new(input.as_bytes().to_vec()),
            ParseConfig::new().with_buffer_capacity(capacity),
        )
    }

    #[test]
    fn test_read_multibyte_with_widths() {
        let mut stream = Stream::from("日本語");
        assert_eq!(stream.read_char().unwrap(), Some(('日', 3)));
        assert_eq!(stream.read_char().unwrap(), Some(('本', 3)));
        assert_eq!(stream.position(), 6);
        assert_eq!(stream.read_char().unwrap(), Some(('語', 3)));
        assert_eq!(stream.read_char().unwrap(), None);
    }

    #[test]
    fn test_unread_then_reread() {
        let mut stream = Stream::from("日本語");
        stream.read_char().unwrap();
        stream.read_char().unwrap();
        stream.unread_char().unwrap();
        assert_eq!(stream.position(), 3);
        assert_eq!(stream.read_char().unwrap(), Some(('本', 3)));

        // Same sequence again after seeking back gives the same result
        stream.seek(SeekFrom::Current(-6)).unwrap();
        assert_eq!(stream.read_char().unwrap(), Some(('日', 3)));
        assert_eq!(stream.read_char().unwrap(), Some(('本', 3)));
    }

    #[test]
    fn test_unread_twice_fails() {
        let mut stream = Stream::from("ab");
        stream.read_char().unwrap();
        stream.read_char().unwrap();
        stream.unread_char().unwrap();
        assert!(matches!(stream.unread_char(), Err(Error::NothingToUnread)));
        assert_eq!(stream.position(), 1);
    }

    #[test]
    fn test_unread_without_read_fails() {
        let mut stream = Stream::from("ab");
        assert!(matches!(stream.unread_char(), Err(Error::NothingToUnread)));
    }

    #[test]
    fn test_unread_after_eof_fails() {
        let mut stream = Stream::from("a");
        stream.read_char().unwrap();
        assert_eq!(stream.read_char().unwrap(), None);
        assert!(matches!(stream.unread_char(), Err(Error::NothingToUnread)));
    }

    #[test]
    fn test_seek_discards_pushback() {
        let mut stream = Stream::from("abc");
        stream.read_char().unwrap();
        stream.seek(SeekFrom::Start(2)).unwrap();
        assert!(matches!(stream.unread_char(), Err(Error::NothingToUnread)));
    }

    #[test]
    fn test_byte_read_discards_pushback() {
        let mut stream = Stream::from("abc");
        stream.read_char().unwrap();
        let mut byte = [0u8; 1];
        stream.read_exact(&mut byte).unwrap();
        assert_eq!(&byte, b"b");
        assert!(matches!(stream.unread_char(), Err(Error::NothingToUnread)));
    }

    #[test]
    fn test_seek_before_start_keeps_cursor() {
        let mut stream = Stream::from("abc");
        stream.read_char().unwrap();
        assert!(matches!(
            stream.seek(SeekFrom::Current(-2)),
            Err(Error::SeekBeforeStart { offset: -1 })
        ));
        assert_eq!(stream.position(), 1);
        assert_eq!(stream.read_char().unwrap(), Some(('b', 1)));
    }

    #[test]
    fn test_seek_end_before_start_keeps_cursor() {
        let mut stream = Stream::from("abc");
        stream.read_char().unwrap();
        assert!(matches!(
            stream.seek(SeekFrom::End(-4)),
            Err(Error::SeekBeforeStart { offset: -1 })
        ));
        assert_eq!(stream.position(), 1);
        assert_eq!(stream.rest().unwrap(), "bc");
    }

    #[test]
    fn test_seek_end() {
        let mut stream = Stream::from("abc");
        assert_eq!(stream.seek(SeekFrom::End(-1)).unwrap(), 2);
        assert_eq!(stream.read_char().unwrap(), Some(('c', 1)));
    }

    #[test]
    fn test_seek_current_is_relative_to_cursor_not_source() {
        // The whole input is buffered after the first read, so the source sits
        // at its end while the cursor is at 1.
        let mut stream = Stream::from("abcdef");
        stream.read_char().unwrap();
        assert_eq!(stream.seek(SeekFrom::Current(2)).unwrap(), 3);
        assert_eq!(stream.read_char().unwrap(), Some(('d', 1)));
    }

    #[test]
    fn test_seek_resets_buffer() {
        let mut stream = small("abcdefgh", 4);
        for _ in 0..6 {
            stream.read_char().unwrap();
        }
        stream.seek(SeekFrom::Start(1)).unwrap();
        assert_eq!(stream.rest().unwrap(), "bcdefgh");
    }

    #[test]
    fn test_multibyte_across_buffer_boundary() {
        let mut stream = small("ab日本", 4);
        assert_eq!(stream.read_char().unwrap(), Some(('a', 1)));
        assert_eq!(stream.read_char().unwrap(), Some(('b', 1)));
        assert_eq!(stream.read_char().unwrap(), Some(('日', 3)));
        stream.unread_char().unwrap();
        assert_eq!(stream.read_char().unwrap(), Some(('日', 3)));
        assert_eq!(stream.read_char().unwrap(), Some(('本', 3)));
        assert_eq!(stream.position(), 8);
    }

    #[test]
    fn test_invalid_utf8_lead_byte() {
        let mut stream = Stream::new(Cursor::new(vec![b'a', 0xFF, b'b']));
        stream.read_char().unwrap();
        assert!(matches!(
            stream.read_char(),
            Err(Error::InvalidUtf8 { offset: 1 })
        ));
        assert_eq!(stream.position(), 1);
    }

    #[test]
    fn test_truncated_utf8_sequence() {
        let mut stream = Stream::new(Cursor::new(vec![0xE6, 0x97]));
        assert!(matches!(
            stream.read_char(),
            Err(Error::InvalidUtf8 { offset: 0 })
        ));
    }

    #[test]
    fn test_at_end_and_ensure_consumed() {
        let mut stream = Stream::from("x");
        assert!(!stream.at_end().unwrap());
        assert_eq!(stream.position(), 0);
        assert!(matches!(
            stream.ensure_consumed(),
            Err(Error::StreamNotConsumed { offset: 0 })
        ));

        stream.read_char().unwrap();
        assert!(stream.at_end().unwrap());
        assert!(stream.ensure_consumed().is_ok());
    }

    #[test]
    fn test_rewind_skips_seek_when_in_place() {
        let mut stream = Stream::from("ab");
        stream.read_char().unwrap();
        stream.rewind(1).unwrap();
        // The pushback survives because no seek happened
        stream.unread_char().unwrap();
        assert_eq!(stream.position(), 0);
    }

    #[test]
    fn test_large_byte_read_bypasses_buffer() {
        let input = "0123456789";
        let mut stream = small(input, 4);
        let mut out = [0u8; 8];
        let n = stream.read(&mut out).unwrap();
        assert_eq!(&out[..n], &input.as_bytes()[..n]);
        assert_eq!(stream.position(), n as u64);
    }

    #[test]
    fn test_nesting_is_bounded() {
        let mut stream = Stream::with_config(
            Cursor::new(Vec::new()),
            ParseConfig::new().with_max_recursion_depth(1),
        );
        stream.enter_nested().unwrap();
        assert_eq!(stream.depth(), 1);
        assert!(matches!(
            stream.enter_nested(),
            Err(Error::RecursionLimitExceeded { depth: 2, limit: 1 })
        ));
        stream.exit_nested();
        assert_eq!(stream.depth(), 0);
    }

    /// Cursor whose seeks can be switched off from outside the stream.
    struct Jammed {
        inner: Cursor<Vec<u8>>,
        jammed: std::rc::Rc<std::cell::Cell<bool>>,
        refused: usize,
    }

    impl Read for Jammed {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.inner.read(buf)
        }
    }

    impl Seek for Jammed {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            if self.jammed.get() {
                self.refused += 1;
                return Err(io::Error::other("seek jammed"));
            }
            self.inner.seek(pos)
        }
    }

    #[test]
    fn test_failed_seek_keeps_buffer_in_step() {
        let jammed = std::rc::Rc::new(std::cell::Cell::new(false));
        let source = Jammed {
            inner: Cursor::new(b"abcdef".to_vec()),
            jammed: std::rc::Rc::clone(&jammed),
            refused: 0,
        };
        let config = ParseConfig::new().with_buffer_capacity(4);
        let mut stream = Stream::with_config(source, config);
        assert_eq!(stream.config(), &config);

        assert_eq!(stream.read_char().unwrap(), Some(('a', 1)));
        assert_eq!(stream.read_char().unwrap(), Some(('b', 1)));
        // "abcd" is buffered, so the source already sits at 4
        assert_eq!(stream.get_ref().inner.position(), 4);

        jammed.set(true);
        assert!(matches!(stream.seek(SeekFrom::Start(0)), Err(Error::Io(_))));
        assert_eq!(stream.get_ref().refused, 1);
        assert_eq!(stream.position(), 2);

        assert_eq!(stream.rest().unwrap(), "cdef");
        assert_eq!(stream.position(), 6);
        assert_eq!(stream.into_inner().inner.position(), 6);
    }
}
