//! Position-tracked input snapshots.
//!
//! A [`Cursor`] is the immutable unit of work handed to every parser: a
//! shared borrow of the subject value, a logical position into it, and the
//! diagnostic [`Context`]. Parsers never mutate or copy the subject; a
//! sub-call receives a new `Cursor` over the same borrow with an updated
//! position. A successful invocation produces a [`Step`], the output-side
//! counterpart carrying the produced value and the advanced position.
//!
//! For string input the position counts Unicode scalar values from the start
//! of the input, not bytes and not grapheme clusters. `0 <= position <= len`
//! always holds for cursors produced by the engine, and no primitive reads a
//! scalar without checking the bound first.

use crate::context::Context;
use crate::error::{ErrorKind, ParseError};

/// An immutable `(value, position, context)` snapshot threaded through
/// parsing.
#[derive(Debug)]
pub struct Cursor<'i, I: ?Sized> {
    /// The subject being parsed, shared read-only by the whole composition.
    pub value: &'i I,
    /// Logical offset into `value`, in input units.
    pub position: usize,
    /// Diagnostic call stack and observer.
    pub context: Context,
}

impl<'i, I: ?Sized> Cursor<'i, I> {
    /// A cursor at the start of `value` with an empty [`Context`].
    pub fn new(value: &'i I) -> Self {
        Self {
            value,
            position: 0,
            context: Context::new(),
        }
    }

    /// A cursor at the start of `value` carrying `context`, typically one
    /// built with [`Context::with_observer`].
    pub fn with_context(value: &'i I, context: Context) -> Self {
        Self {
            value,
            position: 0,
            context,
        }
    }

    /// A cursor at an explicit starting `position`.
    pub fn at(value: &'i I, position: usize) -> Self {
        Self {
            value,
            position,
            context: Context::new(),
        }
    }

    /// Builds a [`ParseError`] of `kind` at this cursor's position,
    /// snapshotting the live call stack.
    pub fn error(&self, kind: ErrorKind) -> ParseError {
        ParseError::new(kind, self.position, self.context.call_stack().to_vec())
    }
}

impl<'i, I: ?Sized> Clone for Cursor<'i, I> {
    fn clone(&self) -> Self {
        Self {
            value: self.value,
            position: self.position,
            context: self.context.clone(),
        }
    }
}

impl<'i> Cursor<'i, str> {
    /// Input length in Unicode scalar values.
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    /// True if the input holds no scalar values at all.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// The scalar at the current position, if any remains.
    pub fn peek(&self) -> Option<char> {
        self.value.chars().nth(self.position)
    }

    /// True if the position sits at the end of the input.
    pub fn is_at_end(&self) -> bool {
        self.peek().is_none()
    }

    pub(crate) fn out_of_range(&self) -> ParseError {
        self.error(ErrorKind::OutOfRange {
            position: self.position,
            len: self.len(),
        })
    }
}

/// The success half of a parser invocation: the produced value, the position
/// after the match, and the threaded [`Context`].
#[derive(Debug)]
pub struct Step<O> {
    pub value: O,
    pub position: usize,
    pub context: Context,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_count_scalars_not_bytes() {
        let cursor = Cursor::new("héllo");
        assert_eq!(cursor.len(), 5);
        assert_eq!(cursor.peek(), Some('h'));
        assert_eq!(Cursor::at("héllo", 1).peek(), Some('é'));
    }

    #[test]
    fn peek_at_end_is_none() {
        let cursor = Cursor::at("ab", 2);
        assert!(cursor.is_at_end());
        assert_eq!(cursor.peek(), None);
    }

    #[test]
    fn error_snapshots_position_and_stack() {
        let cursor = Cursor::at("ab", 1);
        let err = cursor.error(ErrorKind::UnsatisfiedRepetition);
        assert_eq!(err.position, 1);
        assert!(err.call_stack.is_empty());
    }
}
