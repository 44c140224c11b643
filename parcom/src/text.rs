//! Primitive matchers over string input.
//!
//! Positions count Unicode scalar values; range checks compare raw scalar
//! ordinals. Every primitive verifies the remaining length before reading,
//! so nothing ever reads past the end of the input.

use crate::cursor::{Cursor, Step};
use crate::error::ErrorKind;
use crate::parser::Parser;
use smartstring::alias::String;

/// Matches exactly the scalar `expected`, consuming one position.
pub fn char(expected: char) -> Parser<str, char> {
    Parser::new(
        format!("char({expected:?})"),
        format!("the character {expected:?}"),
        move |input: Cursor<str>| match input.peek() {
            Some(c) if c == expected => Ok(Step {
                value: c,
                position: input.position + 1,
                context: input.context,
            }),
            Some(c) => Err(input.error(ErrorKind::Mismatch {
                expected: format!("{expected:?}").into(),
                found: format!("{c:?}").into(),
            })),
            None => Err(input.out_of_range()),
        },
    )
}

/// Matches any scalar whose ordinal lies in `[lo, hi]` inclusive.
pub fn char_range(lo: char, hi: char) -> Parser<str, char> {
    Parser::new(
        format!("char_range({lo:?}, {hi:?})"),
        format!("a character between {lo:?} and {hi:?}"),
        move |input: Cursor<str>| match input.peek() {
            Some(c) if (lo..=hi).contains(&c) => Ok(Step {
                value: c,
                position: input.position + 1,
                context: input.context,
            }),
            Some(c) => Err(input.error(ErrorKind::Mismatch {
                expected: format!("a character between {lo:?} and {hi:?}").into(),
                found: format!("{c:?}").into(),
            })),
            None => Err(input.out_of_range()),
        },
    )
}

/// Matches any single scalar; fails only at the end of the input.
pub fn any_char() -> Parser<str, char> {
    Parser::new(
        "any_char",
        "any single character",
        move |input: Cursor<str>| match input.peek() {
            Some(c) => Ok(Step {
                value: c,
                position: input.position + 1,
                context: input.context,
            }),
            None => Err(input.out_of_range()),
        },
    )
}

/// Matches `literal` exactly, scalar by scalar, with no case folding.
///
/// The remaining length is checked before any comparison, so too-short input
/// fails with an out-of-range error rather than a partial mismatch.
pub fn string(literal: &str) -> Parser<str, String> {
    let literal: String = literal.into();
    let count = literal.chars().count();
    Parser::new(
        format!("string({literal:?})"),
        format!("the literal {literal:?}"),
        move |input: Cursor<str>| {
            if input.position + count > input.len() {
                return Err(input.out_of_range());
            }
            let mut rest = input.value.chars().skip(input.position);
            for expected in literal.chars() {
                match rest.next() {
                    Some(c) if c == expected => {}
                    Some(c) => {
                        return Err(input.error(ErrorKind::Mismatch {
                            expected: format!("{literal:?}").into(),
                            found: format!("{c:?}").into(),
                        }));
                    }
                    None => return Err(input.out_of_range()),
                }
            }
            Ok(Step {
                value: literal.clone(),
                position: input.position + count,
                context: input.context,
            })
        },
    )
}

/// Succeeds, consuming nothing, exactly at the end of the input.
pub fn eof() -> Parser<str, ()> {
    Parser::new("eof", "end of input", move |input: Cursor<str>| {
        if input.is_at_end() {
            Ok(Step {
                value: (),
                position: input.position,
                context: input.context,
            })
        } else {
            Err(input.error(ErrorKind::ExpectedEndOfInput {
                position: input.position,
            }))
        }
    })
}

/// Collects a sequence of scalars into one string.
pub fn text<I: ?Sized + 'static>(parser: Parser<I, Vec<char>>) -> Parser<I, String> {
    let description = format!("{} collected into text", parser.name());
    parser
        .map(|chars| {
            let joined: std::string::String = chars.into_iter().collect();
            joined.into()
        })
        .named("text", description)
}

/// Joins a sequence of strings with `separator`.
pub fn join<I: ?Sized + 'static>(parser: Parser<I, Vec<String>>, separator: &str) -> Parser<I, String> {
    let description = format!("{} joined", parser.name());
    let separator = separator.to_owned();
    parser
        .map(move |parts| {
            let joined: std::string::String = parts.join(separator.as_str());
            joined.into()
        })
        .named("join", description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinator::many;

    #[test]
    fn char_matches_one_scalar() {
        let step = char('a').parse(Cursor::new("ab")).unwrap();
        assert_eq!(step.value, 'a');
        assert_eq!(step.position, 1);

        let err = char('a').parse(Cursor::new("ba")).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Mismatch { .. }));
        let err = char('a').parse(Cursor::new("")).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::OutOfRange { .. }));
    }

    #[test]
    fn char_range_bounds_are_inclusive() {
        for (input, ok) in [("0", true), ("9", true), ("/", false), (":", false)] {
            assert_eq!(char_range('0', '9').parse(Cursor::new(input)).is_ok(), ok);
        }
    }

    #[test]
    fn string_matches_the_whole_literal() {
        let step = string("foo").parse(Cursor::new("foobar")).unwrap();
        assert_eq!(step.value, "foo");
        assert_eq!(step.position, 3);
    }

    #[test]
    fn string_checks_the_remaining_length_first() {
        let err = string("foobar").parse(Cursor::new("foo")).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::OutOfRange { .. }));

        let err = string("for").parse(Cursor::new("foobar")).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Mismatch { .. }));
    }

    #[test]
    fn any_char_fails_only_at_the_end() {
        assert_eq!(any_char().parse(Cursor::new("x")).unwrap().value, 'x');
        assert!(any_char().parse(Cursor::new("")).is_err());
    }

    #[test]
    fn eof_rejects_trailing_input() {
        assert!(eof().parse(Cursor::new("")).is_ok());

        let done = string("ok").then_ignore(eof());
        assert_eq!(done.parse(Cursor::new("ok")).unwrap().position, 2);
        let err = done.parse(Cursor::new("ok!")).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ExpectedEndOfInput { .. }));
    }

    #[test]
    fn positions_advance_by_scalars_in_multibyte_input() {
        let step = (char('é') + char('x')).parse(Cursor::new("éx")).unwrap();
        assert_eq!(step.value, ('é', 'x'));
        assert_eq!(step.position, 2);
    }

    #[test]
    fn join_and_text_collect_repetitions() {
        let step = join(many(string("ab")), "-").parse(Cursor::new("abab")).unwrap();
        assert_eq!(step.value, "ab-ab");

        let step = text(many(char_range('0', '9'))).parse(Cursor::new("42x")).unwrap();
        assert_eq!(step.value, "42");
        assert_eq!(step.position, 2);
    }
}
