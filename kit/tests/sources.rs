//! Streams over sources other than an in-memory string, and hard-error
//! propagation from them.

use std::io::{self, Cursor, Read, Seek, SeekFrom};

use seekparse::{
    CharStream, Error, Outcome, ParseConfig, Parser, Stream, exact_char, exact_string, many,
    natural, next, sep_by1,
};

/// Hands out at most one byte per read and is interrupted every other call.
struct Trickle {
    inner: Cursor<Vec<u8>>,
    interrupt: bool,
}

impl Trickle {
    fn new(input: &str) -> Self {
        Self {
            inner: Cursor::new(input.as_bytes().to_vec()),
            interrupt: false,
        }
    }
}

impl Read for Trickle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.interrupt = !self.interrupt;
        if self.interrupt {
            return Err(io::ErrorKind::Interrupted.into());
        }
        let end = buf.len().min(1);
        self.inner.read(&mut buf[..end])
    }
}

impl Seek for Trickle {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

/// Fails once the read position reaches `fail_at`.
struct Broken {
    inner: Cursor<Vec<u8>>,
    fail_at: u64,
}

impl Read for Broken {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let pos = self.inner.position();
        if pos >= self.fail_at {
            return Err(io::Error::other("device unplugged"));
        }
        let room = usize::try_from(self.fail_at - pos).unwrap_or(usize::MAX);
        let end = buf.len().min(room);
        self.inner.read(&mut buf[..end])
    }
}

impl Seek for Broken {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

#[test]
fn trickling_source_parses_like_a_string() {
    let list = sep_by1(natural(), exact_char(','));
    let mut stream = Stream::with_config(
        Trickle::new("10,200,3000;"),
        ParseConfig::new().with_buffer_capacity(4),
    );
    let outcome = list.parse(&mut stream);
    assert!(matches!(outcome, Outcome::Match { ref value, consumed: 11 } if value == &[10, 200, 3000]));
    assert_eq!(stream.rest().unwrap(), ";");
}

#[test]
fn backtracking_across_refills() {
    // Capacity 4 forces the failed branch to run past the buffered window.
    let parser = exact_string("abcdefgX").or(exact_string("abcdefgh"));
    let mut stream = Stream::with_config(
        Trickle::new("abcdefgh"),
        ParseConfig::new().with_buffer_capacity(4),
    );
    assert!(matches!(parser.parse(&mut stream), Outcome::Match { consumed: 8, .. }));
    assert!(stream.at_end().unwrap());
}

#[test]
fn io_failure_is_a_hard_error() {
    let source = Broken {
        inner: Cursor::new(b"12345678".to_vec()),
        fail_at: 3,
    };
    let mut stream = Stream::new(source);
    let outcome = many(next(exact_char('1').or(exact_char('2')).or(exact_char('3')), natural()))
        .parse(&mut stream);
    match outcome {
        Outcome::HardError(Error::Io(err)) => assert_eq!(err.to_string(), "device unplugged"),
        other => panic!("expected an i/o error, got {other:?}"),
    }
}

#[test]
fn invalid_utf8_reports_offset() {
    let mut bytes = b"12".to_vec();
    bytes.push(0xFF);
    let mut stream = Stream::new(Cursor::new(bytes));
    let outcome = natural().parse(&mut stream);
    assert_eq!(outcome.consumed(), 0);
    let err = outcome.error().unwrap();
    insta::assert_snapshot!(err, @"invalid UTF-8 sequence at byte offset 2");
}

#[test]
fn truncated_multibyte_at_end_is_invalid() {
    // First two bytes of '日'
    let mut stream = Stream::new(Cursor::new(vec![b'a', 0xE6, 0x97]));
    assert_eq!(stream.read_char().unwrap(), Some(('a', 1)));
    assert!(matches!(stream.read_char(), Err(Error::InvalidUtf8 { offset: 1 })));
    assert_eq!(stream.position(), 1);
}

#[test]
fn ensure_consumed_reports_remaining_offset() {
    let mut stream = Stream::from("42 ");
    assert_eq!(natural().parse(&mut stream).value(), Some(42));
    let err = stream.ensure_consumed().unwrap_err();
    insta::assert_snapshot!(err, @"stream not fully consumed: input remains at byte offset 2");
    assert_eq!(stream.position(), 2);
}

#[test]
fn error_messages() {
    insta::assert_snapshot!(Error::NothingToUnread, @"no character to unread");
    insta::assert_snapshot!(
        Error::SeekBeforeStart { offset: -3 },
        @"cannot seek to offset -3: before start of stream"
    );
    insta::assert_snapshot!(
        Error::RecursionLimitExceeded { depth: 129, limit: 128 },
        @"recursion limit exceeded: depth 129 > limit 128"
    );
    insta::assert_snapshot!(
        Error::conversion("out of range"),
        @"conversion failed: out of range"
    );
}
