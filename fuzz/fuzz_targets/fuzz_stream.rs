#![no_main]

use std::io::{Cursor, Read, SeekFrom};

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use seekparse::{CharStream, Error, ParseConfig, Stream};

#[derive(Arbitrary, Debug)]
enum Step {
    ReadChar,
    UnreadChar,
    SeekStart(u16),
    SeekCurrent(i16),
    SeekEnd(i16),
    ReadBytes(u8),
}

#[derive(Arbitrary, Debug)]
struct Input {
    text: String,
    capacity: u8,
    steps: Vec<Step>,
}

/// Reference cursor over the same text.
struct Model<'a> {
    text: &'a str,
    pos: usize,
    pending: Option<usize>,
}

fuzz_target!(|input: Input| {
    let config = ParseConfig::new().with_buffer_capacity(usize::from(input.capacity));
    let mut stream = Stream::with_config(Cursor::new(input.text.as_bytes().to_vec()), config);
    let mut model = Model {
        text: &input.text,
        pos: 0,
        pending: None,
    };
    let len = model.text.len() as i64;

    for step in &input.steps {
        match *step {
            Step::ReadChar => {
                let got = stream.read_char();
                model.pending = None;
                if model.pos >= model.text.len() {
                    assert!(matches!(got, Ok(None)));
                } else if model.text.is_char_boundary(model.pos) {
                    let c = model.text[model.pos..].chars().next();
                    let width = c.map_or(0, char::len_utf8);
                    assert_eq!(got.ok(), Some(c.map(|c| (c, width))));
                    model.pos += width;
                    model.pending = Some(width);
                } else {
                    let offset = model.pos as u64;
                    assert!(matches!(got, Err(Error::InvalidUtf8 { offset: at }) if at == offset));
                }
            }
            Step::UnreadChar => {
                let got = stream.unread_char();
                match model.pending.take() {
                    Some(width) => {
                        assert!(got.is_ok());
                        model.pos -= width;
                    }
                    None => assert!(matches!(got, Err(Error::NothingToUnread))),
                }
            }
            Step::SeekStart(target) => {
                assert_eq!(stream.seek(SeekFrom::Start(u64::from(target))).ok(), Some(u64::from(target)));
                model.pos = usize::from(target);
                model.pending = None;
            }
            Step::SeekCurrent(delta) => {
                let target = model.pos as i64 + i64::from(delta);
                let got = stream.seek(SeekFrom::Current(i64::from(delta)));
                if target < 0 {
                    assert!(matches!(got, Err(Error::SeekBeforeStart { .. })));
                } else {
                    assert_eq!(got.ok(), Some(target as u64));
                    model.pos = target as usize;
                    model.pending = None;
                }
            }
            Step::SeekEnd(delta) => {
                let target = len + i64::from(delta);
                let got = stream.seek(SeekFrom::End(i64::from(delta)));
                model.pending = None;
                if target < 0 {
                    assert!(matches!(got, Err(Error::SeekBeforeStart { .. })));
                } else {
                    assert_eq!(got.ok(), Some(target as u64));
                    model.pos = target as usize;
                }
            }
            Step::ReadBytes(n) => {
                let mut buf = vec![0u8; usize::from(n)];
                let read = stream.read(&mut buf).unwrap_or(0);
                let bytes = model.text.as_bytes();
                let start = model.pos.min(bytes.len());
                let end = (model.pos + read).min(bytes.len());
                assert_eq!(&buf[..read], &bytes[start..end]);
                model.pos += read;
                model.pending = None;
            }
        }
        assert_eq!(stream.position(), model.pos as u64);
    }
});
