//! The combinator algebra: pure functions from parsers to parsers.
//!
//! Sequencing and mapping live as methods on [`Parser`]; repetition,
//! optionality, delimiting and late binding are free functions. All of them
//! only build new parser values; no matching happens until
//! [`Parser::parse`] runs. Failure recovery is confined to exactly three
//! places: [`Parser::or`] resets the position and tries the right branch,
//! [`optional`] substitutes `None` at the original position, and
//! [`many`]/[`many0`] stop accumulating. Everything else propagates.

use crate::cursor::{Cursor, Step};
use crate::error::{ErrorKind, ParseError};
use crate::parser::Parser;
use once_cell::unsync::OnceCell;
use std::fmt;

impl<I: ?Sized + 'static, O: 'static> Parser<I, O> {
    /// Sequencing: runs `self`, then `other` from the resulting position
    /// over the same shared value. Produces the pair of outputs. Wider
    /// tuples are built by folding `then` and flattening with [`map`].
    ///
    /// Fails if either side fails; a right-side failure is reported with the
    /// right parser's frame innermost.
    ///
    /// [`map`]: Parser::map
    pub fn then<O2: 'static>(self, other: Parser<I, O2>) -> Parser<I, (O, O2)> {
        let description = format!("{} then {}", self.name(), other.name());
        Parser::new("then", description, move |input: Cursor<I>| {
            let value = input.value;
            let first = self.parse(input)?;
            let second = other.parse(Cursor {
                value,
                position: first.position,
                context: first.context,
            })?;
            Ok(Step {
                value: (first.value, second.value),
                position: second.position,
                context: second.context,
            })
        })
    }

    /// Ordered choice: runs `self`; on failure resets the position to the
    /// original input and runs `other` from scratch. The left branch wins
    /// whenever it matches, even if the right would match a longer span.
    ///
    /// When both branches fail, the error reported is the right branch's;
    /// the left branch's detail survives only in the observer event stream.
    pub fn or(self, other: Parser<I, O>) -> Parser<I, O> {
        let description = format!("{} or {}", self.name(), other.name());
        Parser::new("or", description, move |input: Cursor<I>| {
            let retry = input.clone();
            match self.parse(input) {
                Ok(step) => Ok(step),
                Err(_) => other.parse(retry),
            }
        })
    }

    /// Runs `self` and `other` from the same starting position, requiring
    /// both to match. Keeps `self`'s output at `other`'s final position.
    pub fn and<O2: 'static>(self, other: Parser<I, O2>) -> Parser<I, O> {
        let description = format!("{} and {}", self.name(), other.name());
        Parser::new("and", description, move |input: Cursor<I>| {
            let probe = input.clone();
            let first = self.parse(input)?;
            let second = other.parse(probe)?;
            Ok(Step {
                value: first.value,
                position: second.position,
                context: second.context,
            })
        })
    }

    /// Applies `f` to the output of a successful match.
    pub fn map<O2: 'static, F>(self, f: F) -> Parser<I, O2>
    where
        F: Fn(O) -> O2 + 'static,
    {
        let description = format!("{} mapped", self.name());
        Parser::new("map", description, move |input: Cursor<I>| {
            let step = self.parse(input)?;
            Ok(Step {
                value: f(step.value),
                position: step.position,
                context: step.context,
            })
        })
    }

    /// Like [`map`](Parser::map), but `f` may reject the value; the
    /// rejection propagates exactly like a matcher failure.
    pub fn try_map<O2: 'static, E, F>(self, f: F) -> Parser<I, O2>
    where
        E: fmt::Display,
        F: Fn(O) -> Result<O2, E> + 'static,
    {
        let description = format!("{} mapped", self.name());
        Parser::new("try_map", description, move |input: Cursor<I>| {
            let step = self.parse(input)?;
            match f(step.value) {
                Ok(value) => Ok(Step {
                    value,
                    position: step.position,
                    context: step.context,
                }),
                Err(err) => Err(ParseError::new(
                    ErrorKind::Map {
                        message: err.to_string().into(),
                    },
                    step.position,
                    step.context.call_stack().to_vec(),
                )),
            }
        })
    }

    /// Discards the output and substitutes a fixed value; `self` must still
    /// match and the position still advances by its span.
    pub fn map_to<O2>(self, value: O2) -> Parser<I, O2>
    where
        O2: Clone + 'static,
    {
        let description = format!("{} replaced by a constant", self.name());
        self.map(move |_| value.clone()).named("map_to", description)
    }

    /// Discards the output entirely.
    pub fn ignore(self) -> Parser<I, ()> {
        let description = format!("{} ignored", self.name());
        self.map(|_| ()).named("ignore", description)
    }

    /// Runs `self` then `other`, keeping only `other`'s output.
    pub fn ignore_then<O2: 'static>(self, other: Parser<I, O2>) -> Parser<I, O2> {
        let description = format!("{} dropped before {}", self.name(), other.name());
        self.then(other)
            .map(|(_, second)| second)
            .named("ignore_then", description)
    }

    /// Runs `self` then `other`, keeping only `self`'s output.
    pub fn then_ignore<O2: 'static>(self, other: Parser<I, O2>) -> Parser<I, O> {
        let description = format!("{} dropped after {}", other.name(), self.name());
        self.then(other)
            .map(|(first, _)| first)
            .named("then_ignore", description)
    }

    /// Requires `around` before and after `self`, keeping `self`'s output.
    pub fn surrounded_by<O2: 'static>(self, around: Parser<I, O2>) -> Parser<I, O> {
        let description = format!("{} surrounded by {}", self.name(), around.name());
        around
            .clone()
            .ignore_then(self)
            .then_ignore(around)
            .named("surrounded_by", description)
    }
}

/// `open`, then `parser`, then `close`, keeping only `parser`'s output.
pub fn delimited<I, A, O, B>(
    open: Parser<I, A>,
    parser: Parser<I, O>,
    close: Parser<I, B>,
) -> Parser<I, O>
where
    I: ?Sized + 'static,
    A: 'static,
    O: 'static,
    B: 'static,
{
    let description = format!(
        "{} between {} and {}",
        parser.name(),
        open.name(),
        close.name()
    );
    open.ignore_then(parser)
        .then_ignore(close)
        .named("delimited", description)
}

/// Zero or one match: `Some(output)` at the advanced position, or `None` at
/// the original position. Never fails.
pub fn optional<I: ?Sized + 'static, O: 'static>(parser: Parser<I, O>) -> Parser<I, Option<O>> {
    let description = format!("zero or one {}", parser.name());
    Parser::new("optional", description, move |input: Cursor<I>| {
        let retry = input.clone();
        match parser.parse(input) {
            Ok(step) => Ok(Step {
                value: Some(step.value),
                position: step.position,
                context: step.context,
            }),
            Err(_) => Ok(Step {
                value: None,
                position: retry.position,
                context: retry.context,
            }),
        }
    })
}

/// One or more matches, re-invoked from the position after each success over
/// the same shared value. The terminating failure is swallowed. Zero matches
/// fail with [`ErrorKind::UnsatisfiedRepetition`].
///
/// A parser that matches the empty string makes this loop forever; termination
/// is the grammar author's responsibility.
pub fn many<I: ?Sized + 'static, O: 'static>(parser: Parser<I, O>) -> Parser<I, Vec<O>> {
    let description = format!("one or more {}", parser.name());
    Parser::new("many", description, move |input: Cursor<I>| {
        let mut items = Vec::new();
        let mut position = input.position;
        loop {
            let attempt = Cursor {
                value: input.value,
                position,
                context: input.context.clone(),
            };
            match parser.parse(attempt) {
                Ok(step) => {
                    position = step.position;
                    items.push(step.value);
                }
                Err(_) if items.is_empty() => {
                    return Err(input.error(ErrorKind::UnsatisfiedRepetition));
                }
                Err(_) => break,
            }
        }
        Ok(Step {
            value: items,
            position,
            context: input.context,
        })
    })
}

/// Zero or more matches; an immediate failure yields an empty sequence at
/// the original position.
pub fn many0<I: ?Sized + 'static, O: 'static>(parser: Parser<I, O>) -> Parser<I, Vec<O>> {
    let description = format!("zero or more {}", parser.name());
    Parser::new("many0", description, move |input: Cursor<I>| {
        let mut items = Vec::new();
        let mut position = input.position;
        loop {
            let attempt = Cursor {
                value: input.value,
                position,
                context: input.context.clone(),
            };
            match parser.parse(attempt) {
                Ok(step) => {
                    position = step.position;
                    items.push(step.value);
                }
                Err(_) => break,
            }
        }
        Ok(Step {
            value: items,
            position,
            context: input.context,
        })
    })
}

/// Defers construction of a parser until its first invocation, allowing a
/// grammar rule to refer to itself or to a sibling defined later.
///
/// `build` runs at most once per `lazy` value; the result is kept in a
/// resolve-once cell and reused by later invocations.
pub fn lazy<I, O, F>(build: F) -> Parser<I, O>
where
    I: ?Sized + 'static,
    O: 'static,
    F: Fn() -> Parser<I, O> + 'static,
{
    let cell: OnceCell<Parser<I, O>> = OnceCell::new();
    Parser::new("lazy", "deferred grammar rule", move |input: Cursor<I>| {
        cell.get_or_init(&build).parse(input)
    })
}

/// Negation with single-unit lookahead: succeeds by consuming exactly one
/// scalar when `parser` fails at the current position; fails without
/// consuming when `parser` matches. Callable through the `!` operator.
pub fn negate<O: 'static>(parser: Parser<str, O>) -> Parser<str, char> {
    let description = format!("any character but {}", parser.name());
    Parser::new("not", description, move |input: Cursor<str>| {
        let probe = input.clone();
        match parser.parse(probe) {
            Ok(_) => Err(input.error(ErrorKind::UnexpectedMatch)),
            Err(_) => match input.peek() {
                Some(c) => Ok(Step {
                    value: c,
                    position: input.position + 1,
                    context: input.context,
                }),
                None => Err(input.out_of_range()),
            },
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{any_char, char, char_range, text};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn many_requires_at_least_one_match() {
        let err = many(char('x')).parse(Cursor::new("yyy")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnsatisfiedRepetition);
    }

    #[test]
    fn many0_accepts_zero_matches_at_the_original_position() {
        let step = many0(char('x')).parse(Cursor::new("yyy")).unwrap();
        assert!(step.value.is_empty());
        assert_eq!(step.position, 0);
    }

    #[test]
    fn many_stops_at_the_first_failure() {
        let step = many(char('a')).parse(Cursor::new("aab")).unwrap();
        assert_eq!(step.value, vec!['a', 'a']);
        assert_eq!(step.position, 2);
    }

    #[test]
    fn optional_resets_the_position_on_failure() {
        let step = optional(char('x')).parse(Cursor::at("ay", 1)).unwrap();
        assert_eq!(step.value, None);
        assert_eq!(step.position, 1);

        let step = optional(char('y')).parse(Cursor::at("ay", 1)).unwrap();
        assert_eq!(step.value, Some('y'));
        assert_eq!(step.position, 2);
    }

    #[test]
    fn map_with_identity_behaves_as_the_underlying_parser() {
        let plain = char_range('0', '9');
        let mapped = char_range('0', '9').map(|c| c);
        let a = plain.parse(Cursor::new("7")).unwrap();
        let b = mapped.parse(Cursor::new("7")).unwrap();
        assert_eq!(a.value, b.value);
        assert_eq!(a.position, b.position);
        assert!(mapped.parse(Cursor::new("x")).is_err());
    }

    #[test]
    fn map_to_substitutes_a_constant_and_still_advances() {
        let step = char('t').map_to(true).parse(Cursor::new("t")).unwrap();
        assert!(step.value);
        assert_eq!(step.position, 1);
    }

    #[test]
    fn try_map_failures_propagate_as_parse_failures() {
        let number = text(many(char('.'))).try_map(|s| s.parse::<f64>());
        let err = number.parse(Cursor::new("..")).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Map { .. }));
    }

    #[test]
    fn negation_consumes_one_unit_when_the_parser_fails() {
        init_logger();
        let not_bang = !char('!');
        let step = not_bang.parse(Cursor::new("x")).unwrap();
        assert_eq!(step.value, 'x');
        assert_eq!(step.position, 1);

        let err = not_bang.parse(Cursor::new("!")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedMatch);
        assert!(matches!(
            not_bang.parse(Cursor::new("")).unwrap_err().kind,
            ErrorKind::OutOfRange { .. }
        ));
    }

    #[test]
    fn and_requires_both_and_keeps_the_left_output() {
        let quoted = any_char() & !char('"');
        let step = quoted.parse(Cursor::new("a")).unwrap();
        assert_eq!(step.value, 'a');
        assert_eq!(step.position, 1);
        assert!(quoted.parse(Cursor::new("\"")).is_err());
    }

    #[test]
    fn structural_helpers_keep_only_the_inner_output() {
        let inner = delimited(char('('), char('x'), char(')'));
        let step = inner.parse(Cursor::new("(x)")).unwrap();
        assert_eq!(step.value, 'x');
        assert_eq!(step.position, 3);

        let step = char('a')
            .surrounded_by(char('-'))
            .parse(Cursor::new("-a-"))
            .unwrap();
        assert_eq!(step.value, 'a');
        assert_eq!(step.position, 3);
    }

    fn parens() -> Parser<str, usize> {
        lazy(|| {
            delimited(char('('), optional(parens()), char(')'))
                .map(|inner| inner.map_or(1, |depth| depth + 1))
        })
    }

    #[test]
    fn lazy_supports_self_referential_grammars() {
        init_logger();
        let step = parens().parse(Cursor::new("((()))")).unwrap();
        assert_eq!(step.value, 3);
        assert_eq!(step.position, 6);
        assert!(parens().parse(Cursor::new("((")).is_err());
    }

    #[test]
    fn lazy_resolves_its_builder_once() {
        use std::cell::Cell;
        use std::rc::Rc;

        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let parser = lazy(move || {
            counter.set(counter.get() + 1);
            char('a')
        });
        parser.parse(Cursor::new("a")).unwrap();
        parser.parse(Cursor::new("a")).unwrap();
        assert_eq!(calls.get(), 1);
    }
}
