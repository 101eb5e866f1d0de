//! Single-character matchers built directly on the stream.
//!
//! Each primitive performs at most one read and, when it does not match,
//! exactly one unread, so it restores the cursor by itself.

use crate::{CharStream, Outcome, Parser};

/// Matches one character accepted by a predicate. Created by [`satisfy`].
#[derive(Debug, Clone)]
pub struct Satisfy<F> {
    predicate: F,
}

impl<F> Parser for Satisfy<F>
where
    F: Fn(char) -> bool,
{
    type Output = char;

    fn parse(&self, stream: &mut dyn CharStream) -> Outcome<char> {
        match stream.read_char() {
            Ok(Some((c, width))) if (self.predicate)(c) => Outcome::matched(c, width),
            Ok(Some(_)) => match stream.unread_char() {
                Ok(()) => Outcome::NoMatch,
                Err(err) => Outcome::HardError(err),
            },
            Ok(None) => Outcome::NoMatch,
            Err(err) => Outcome::HardError(err),
        }
    }
}

/// Reads one character and matches it if `predicate` accepts it.
///
/// End of input is a no-match. A rejected character is pushed back.
#[inline]
pub fn satisfy<F: Fn(char) -> bool>(predicate: F) -> Satisfy<F> {
    Satisfy { predicate }
}

/// Matches any single character.
#[inline]
pub fn any_char() -> impl Parser<Output = char> + Clone {
    satisfy(|_| true)
}

/// Matches exactly `expected`.
#[inline]
pub fn exact_char(expected: char) -> impl Parser<Output = char> + Clone {
    satisfy(move |c| c == expected)
}

/// Matches one ASCII decimal digit, `0` to `9`.
#[inline]
pub fn digit() -> impl Parser<Output = char> + Clone {
    satisfy(|c: char| c.is_ascii_digit())
}

/// Matches any one character contained in `chars`.
pub fn one_of_chars(chars: &str) -> impl Parser<Output = char> + Clone + use<> {
    let chars = chars.to_owned();
    satisfy(move |c| chars.contains(c))
}

/// Matches any one character not contained in `chars`.
pub fn none_of(chars: &str) -> impl Parser<Output = char> + Clone + use<> {
    let chars = chars.to_owned();
    satisfy(move |c| !chars.contains(c))
}

/// Matches the end of input. Created by [`end_of_input`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EndOfInput;

impl Parser for EndOfInput {
    type Output = ();

    fn parse(&self, stream: &mut dyn CharStream) -> Outcome<()> {
        match stream.at_end() {
            Ok(true) => Outcome::matched((), 0),
            Ok(false) => Outcome::NoMatch,
            Err(err) => Outcome::HardError(err),
        }
    }
}

/// Matches, without consuming, only when no input remains.
#[inline]
pub fn end_of_input() -> EndOfInput {
    EndOfInput
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Stream};
    use std::io::Cursor;

    fn run<P: Parser<Output = char>>(parser: P, input: &str) -> (Option<char>, String) {
        let mut stream = Stream::from(input);
        let outcome = parser.parse(&mut stream);
        assert!(!outcome.is_hard_error());
        (outcome.value(), stream.rest().unwrap())
    }

    #[test]
    fn test_any_char() {
        assert_eq!(run(any_char(), "abc"), (Some('a'), "bc".into()));
        assert_eq!(run(any_char(), ""), (None, "".into()));
    }

    #[test_case::test_case('a', "abc", Some('a'), "bc"; "match")]
    #[test_case::test_case('z', "abc", None, "abc"; "mismatch")]
    #[test_case::test_case('本', "本日", Some('本'), "日"; "multibyte")]
    fn test_exact_char(expected: char, input: &str, value: Option<char>, rest: &str) {
        assert_eq!(run(exact_char(expected), input), (value, rest.to_string()));
    }

    #[test_case::test_case("1bc", Some('1'), "bc"; "digit")]
    #[test_case::test_case("abc", None, "abc"; "letter")]
    #[test_case::test_case("٣", None, "٣"; "non ascii digit")]
    fn test_digit(input: &str, value: Option<char>, rest: &str) {
        assert_eq!(run(digit(), input), (value, rest.to_string()));
    }

    #[test]
    fn test_char_sets() {
        assert_eq!(run(one_of_chars("+-"), "-1"), (Some('-'), "1".into()));
        assert_eq!(run(one_of_chars("+-"), "*1"), (None, "*1".into()));
        assert_eq!(run(none_of(")"), ")"), (None, ")".into()));
        assert_eq!(run(none_of(")"), "x)"), (Some('x'), ")".into()));
    }

    #[test]
    fn test_satisfy_reports_width() {
        let mut stream = Stream::from("éa");
        let outcome = satisfy(char::is_alphabetic).parse(&mut stream);
        assert!(matches!(outcome, Outcome::Match { value: 'é', consumed: 2 }));
    }

    #[test]
    fn test_invalid_utf8_is_hard_error() {
        let mut stream = Stream::new(Cursor::new(vec![0xC0, 0x80]));
        let outcome = any_char().parse(&mut stream);
        assert!(matches!(outcome, Outcome::HardError(Error::InvalidUtf8 { offset: 0 })));
    }

    #[test]
    fn test_end_of_input() {
        let mut stream = Stream::from("a");
        assert!(end_of_input().parse(&mut stream).is_no_match());
        assert_eq!(stream.position(), 0);
        let _ = any_char().parse(&mut stream);
        assert!(matches!(end_of_input().parse(&mut stream), Outcome::Match { value: (), consumed: 0 }));
    }
}
