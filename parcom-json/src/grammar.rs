//! The JSON object-literal grammar, composed from parcom primitives.
//!
//! This grammar exists to exercise the engine, not to be a general JSON
//! library: strings have no escape sequences, numbers have no sign, exponent
//! or digit grouping (`-1` and `1e5` are out of grammar by design), and the
//! only compound form is the object. `object` appears inside `value` which
//! appears inside `object`, so the object rule is built through [`lazy`].

use crate::value::Value;
use parcom::text::{any_char, char, char_range, eof, text};
use parcom::{delimited, lazy, many, many0, optional, Parser};
use smartstring::alias::String;

/// Zero or more spaces and newlines, ignored.
fn space() -> Parser<str, ()> {
    many0(char(' ') | char('\n'))
        .ignore()
        .named("space", "optional spaces and newlines")
}

/// `"` followed by any characters except `"`, closed by `"`.
pub fn string_literal() -> Parser<str, String> {
    delimited(char('"'), text(many0(any_char() & !char('"'))), char('"'))
        .named("string", "a double-quoted string")
}

/// One or more digits or dots, read as a floating-point number.
pub fn number() -> Parser<str, f64> {
    text(many(char_range('0', '9') | char('.')))
        .try_map(|s| s.parse::<f64>())
        .named("number", "an unsigned decimal number")
}

/// A single key/value pair: `"key" : value`.
fn member() -> Parser<str, (String, Value)> {
    string_literal()
        .then_ignore(space())
        .then_ignore(char(':'))
        .then_ignore(space())
        .then(value())
        .named("member", "a key/value pair")
}

/// `{` space (member (`,` space member)*)? space `}`.
///
/// Entries keep declaration order; duplicate keys are not collapsed.
pub fn object() -> Parser<str, Vec<(String, Value)>> {
    lazy(|| {
        let members = optional(
            member().then(many0(char(',').ignore_then(space()).ignore_then(member()))),
        )
        .map(|head| match head {
            Some((first, mut rest)) => {
                rest.insert(0, first);
                rest
            }
            None => Vec::new(),
        });
        delimited(
            char('{').then_ignore(space()),
            members,
            space().then_ignore(char('}')),
        )
        .named("object", "a JSON object literal")
    })
}

/// Any JSON value: a string, a number or an object.
pub fn value() -> Parser<str, Value> {
    (string_literal().map(Value::String)
        | number().map(Value::Number)
        | object().map(Value::Object))
    .named("value", "a JSON value")
}

/// A complete document: one object followed by the end of the input.
pub fn document() -> Parser<str, Vec<(String, Value)>> {
    object()
        .then_ignore(eof())
        .named("document", "a JSON document")
}

#[cfg(test)]
mod tests {
    use super::*;
    use parcom::Cursor;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn key(s: &str) -> String {
        String::from(s)
    }

    #[test]
    fn flat_object() {
        init_logger();
        let step = document()
            .parse(Cursor::new(r#"{"name": "mokha", "age": 10}"#))
            .unwrap();
        assert_eq!(
            step.value,
            vec![
                (key("name"), Value::String("mokha".into())),
                (key("age"), Value::Number(10.0)),
            ]
        );
    }

    #[test]
    fn nested_object_through_lazy_binding() {
        init_logger();
        let step = document()
            .parse(Cursor::new(r#"{"user": {"name": "mokha", "age": 10}}"#))
            .unwrap();
        assert_eq!(
            step.value,
            vec![(
                key("user"),
                Value::Object(vec![
                    (key("name"), Value::String("mokha".into())),
                    (key("age"), Value::Number(10.0)),
                ])
            )]
        );
    }

    #[test]
    fn duplicate_keys_keep_declaration_order() {
        let step = document()
            .parse(Cursor::new(r#"{"a": 1, "a": 2}"#))
            .unwrap();
        assert_eq!(
            step.value,
            vec![(key("a"), Value::Number(1.0)), (key("a"), Value::Number(2.0))]
        );
    }

    #[test]
    fn empty_object_and_empty_string() {
        assert!(document().parse(Cursor::new("{}")).unwrap().value.is_empty());

        let step = document().parse(Cursor::new(r#"{"a": ""}"#)).unwrap();
        assert_eq!(step.value, vec![(key("a"), Value::String("".into()))]);
    }

    #[test]
    fn whitespace_and_newlines_are_tolerated() {
        let step = document()
            .parse(Cursor::new("{ \"a\" : 1.5 }"))
            .unwrap();
        assert_eq!(step.value, vec![(key("a"), Value::Number(1.5))]);

        let step = document()
            .parse(Cursor::new("{\n\"a\": 1\n}"))
            .unwrap();
        assert_eq!(step.value, vec![(key("a"), Value::Number(1.0))]);
    }

    #[test]
    fn signs_and_exponents_are_out_of_grammar() {
        assert!(document().parse(Cursor::new(r#"{"a": -1}"#)).is_err());
        assert!(document().parse(Cursor::new(r#"{"a": 1e5}"#)).is_err());
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        assert!(document().parse(Cursor::new("{} x")).is_err());
        assert!(document().parse(Cursor::new(r#"{"a": 1}}"#)).is_err());
    }

    #[test]
    fn failure_trace_names_the_grammar_rules() {
        let err = document()
            .parse(Cursor::new(r#"{"a": }"#))
            .unwrap_err();
        let rendered = err.to_string();
        assert!(rendered.contains("[call stack]"));
        assert!(rendered.contains("- document"));
        assert!(rendered.contains("- object"));
    }

    #[test]
    fn number_alone_parses_digits_and_dots() {
        let step = number().parse(Cursor::new("10.5")).unwrap();
        assert_eq!(step.value, 10.5);
        assert_eq!(step.position, 4);
        assert!(number().parse(Cursor::new("x")).is_err());
        // Two dots survive the matcher but fail the float conversion.
        assert!(number().parse(Cursor::new("1..2")).is_err());
    }
}
