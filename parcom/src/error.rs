//! # Parse failure types
//!
//! This module defines [`ParseError`], the single structured failure type of
//! the engine, and [`ErrorKind`], the taxonomy of ways a parse can reject its
//! input.
//!
//! Failures are ordinary `Result::Err` values on the backtracking hot path,
//! not panics: sequencing propagates them with `?`, and only the three
//! recovering combinators (`or`, `optional`, `many`/`many0`) ever catch one.
//! An exhausted alternation is reported as the failure of its last branch,
//! so there is no dedicated kind for it.
//!
//! A `ParseError` snapshots the diagnostic call stack active at the deepest
//! failure point; its `Display` rendering appends the stack as an ordered
//! trace, which is what makes "which rule rejected which input" answerable
//! from the error alone.
//!
//! # Examples
//!
//! ```rust
//! use parcom::text::char;
//! use parcom::{Cursor, ErrorKind};
//!
//! let err = char('a').parse(Cursor::new("z")).unwrap_err();
//! assert!(matches!(err.kind, ErrorKind::Mismatch { .. }));
//! assert!(err.to_string().contains("[call stack]"));
//! ```

use crate::context::Frame;
use smartstring::alias::String;
use std::fmt;
use thiserror::Error;

/// The ways a parser can reject its input.
///
/// Every variant is an expected, recoverable outcome; none of them abort the
/// overall parse unless no enclosing combinator chooses to recover.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// A primitive would have to read past the end of the input.
    #[error("position {position} is out of range for input of length {len}")]
    OutOfRange { position: usize, len: usize },

    /// A specific expected unit, range or literal was not found.
    #[error("expected {expected}, found {found}")]
    Mismatch { expected: String, found: String },

    /// `many` required at least one match and got zero.
    #[error("expected at least one repetition")]
    UnsatisfiedRepetition,

    /// A negated parser matched where it was required to fail.
    #[error("negated parser matched")]
    UnexpectedMatch,

    /// Input remained after a grammar that requires full consumption.
    #[error("expected end of input at position {position}")]
    ExpectedEndOfInput { position: usize },

    /// A mapping function rejected an otherwise successful match.
    #[error("{message}")]
    Map { message: String },
}

/// A structured parse failure: what went wrong, where, and which rules were
/// active at that moment.
///
/// The `call_stack` is ordered outermost first; it reflects the live nesting
/// at the deepest failure point, not a history of every invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ErrorKind,
    pub position: usize,
    pub call_stack: Vec<Frame>,
}

impl ParseError {
    pub fn new(kind: ErrorKind, position: usize, call_stack: Vec<Frame>) -> Self {
        Self {
            kind,
            position,
            call_stack,
        }
    }

    /// The call-stack trace as one `- name` line per frame, outermost first.
    pub fn trace(&self) -> std::string::String {
        self.call_stack
            .iter()
            .map(|frame| format!("- {}", frame.name))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at position {}", self.kind, self.position)?;
        if !self.call_stack.is_empty() {
            write!(f, "\n\n[call stack]\n{}", self.trace())?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}
