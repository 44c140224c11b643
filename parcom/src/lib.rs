//! # parcom
//!
//! A small parser-combinator engine: a handful of composable primitives over
//! a position-tracked input cursor, with structured failure reporting and
//! support for recursive grammars.
//!
//! Building a parser is pure value construction; nothing matches until
//! [`Parser::parse`] is invoked with a [`Cursor`]. Each combinator invokes
//! its sub-parsers recursively, advancing the position on success, resetting
//! it for ordered choice, and propagating failures everywhere else. A
//! diagnostic call stack travels with the cursor, so a failed parse reports
//! both *why* and *where* it stopped, with the chain of grammar rules active
//! at that point.
//!
//! ## Overview
//!
//! - [`cursor`] — the immutable `(value, position, context)` snapshot
//!   threaded through parsing, and [`Step`], its output-side counterpart.
//! - [`context`] — the diagnostic call stack and the injectable
//!   [`Observer`] hook notified at every combinator boundary.
//! - [`parser`] — the [`Parser`] abstraction and the operator sugar
//!   (`+` sequence, `|` ordered choice, `&` joint match, `!` negation).
//! - [`combinator`] — repetition, optionality, mapping, delimiting and the
//!   [`lazy`] late binding required by self-referential grammars.
//! - [`text`] — character-level primitives: [`text::char`],
//!   [`text::char_range`], [`text::any_char`], [`text::string`],
//!   [`text::eof`].
//! - [`error`] — the structured [`ParseError`] and its failure taxonomy.
//!
//! ## Example
//!
//! ```rust
//! use parcom::text::{char, char_range};
//! use parcom::{many, Cursor};
//!
//! let digits = many(char_range('0', '9'));
//! let step = digits.parse(Cursor::new("42!")).unwrap();
//! assert_eq!(step.value, vec!['4', '2']);
//! assert_eq!(step.position, 2);
//!
//! let err = char('#').parse(Cursor::new("x")).unwrap_err();
//! assert!(err.to_string().contains("[call stack]"));
//! ```
//!
//! Parsing is single-threaded and purely functional: cursors and contexts
//! are value types, so independent top-level parses never share state. Stack
//! depth grows with grammar nesting; deeply recursive inputs need a matching
//! thread stack budget.

pub mod combinator;
pub mod context;
pub mod cursor;
pub mod error;
pub mod parser;
pub mod text;

pub use combinator::{delimited, lazy, many, many0, negate, optional};
pub use context::{Context, Event, Frame, Observer, Phase};
pub use cursor::{Cursor, Step};
pub use error::{ErrorKind, ParseError};
pub use parser::Parser;
