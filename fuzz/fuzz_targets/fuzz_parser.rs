#![no_main]

use arbitrary::Arbitrary;
use expr_parser::{ExprError, ExprParser, grammar};
use libfuzzer_sys::fuzz_target;
use seekparse::{
    CharStream, Outcome, ParseConfig, Parser, Stream, exact_char, natural, next, sep_by1, token,
};
use std::io::Cursor;

#[derive(Arbitrary, Debug)]
struct Input {
    text: String,
    /// Bytes skipped before parsing starts, clamped to a char boundary.
    skip: u8,
    capacity: u8,
}

/// Checks the two outcome rules against the remaining input.
fn check<P: Parser>(parser: &P, text: &str, start: usize, config: ParseConfig) {
    let mut stream = Stream::with_config(Cursor::new(text.as_bytes().to_vec()), config);
    if start > 0 && stream.seek(std::io::SeekFrom::Start(start as u64)).is_err() {
        return;
    }
    match parser.parse(&mut stream) {
        Outcome::Match { consumed, .. } => {
            assert_eq!(stream.position(), (start + consumed) as u64);
            assert_eq!(stream.rest().ok().as_deref(), text.get(start + consumed..));
        }
        Outcome::NoMatch => {
            assert_eq!(stream.position(), start as u64);
            assert_eq!(stream.rest().ok().as_deref(), text.get(start..));
        }
        Outcome::HardError(_) => {}
    }
}

fuzz_target!(|input: Input| {
    let text = input.text.as_str();
    let mut start = usize::from(input.skip).min(text.len());
    while !text.is_char_boundary(start) {
        start -= 1;
    }
    let config = ParseConfig::new().with_buffer_capacity(usize::from(input.capacity));

    let expr = grammar();
    check(&expr, text, start, config);
    check(&next(exact_char('-'), natural()), text, start, config);
    check(&sep_by1(token(natural()), token(exact_char(','))), text, start, config);

    // Full-input policy: success means the whole text was an expression.
    match ExprParser::new().parse_str(text) {
        // Checked arithmetic: evaluation reports overflow instead of panicking.
        Ok(tree) => {
            let _ = tree.eval();
        }
        Err(ExprError::TrailingInput { offset }) => assert!(offset as usize <= text.len()),
        Err(_) => {}
    }
});
