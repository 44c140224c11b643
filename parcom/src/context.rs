//! Diagnostic context threaded through every parser invocation.
//!
//! A [`Context`] travels inside the [`Cursor`](crate::cursor::Cursor) and
//! records the chain of combinator invocations that are live at any moment.
//! Each invocation pushes a [`Frame`] on entry and pops it on return, so the
//! stack depth always equals the combinator nesting depth. The stack is the
//! raw material for the `[call stack]` section of a rendered
//! [`ParseError`](crate::error::ParseError).
//!
//! The context also carries the optional [`Observer`] callback. The observer
//! is injected per top-level parse, never stored in process-global state, so
//! concurrent or re-entrant parses cannot interfere through it. When no
//! observer is attached, parsing behaves identically.

use smartstring::alias::String;
use std::fmt;
use std::rc::Rc;

/// One entry of the diagnostic call stack: the identity of a combinator or
/// primitive that is currently executing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Short name, e.g. `char('x')` or `many`.
    pub name: String,
    /// Longer human-readable description of what the parser matches.
    pub description: String,
}

/// Invocation phase reported to an [`Observer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The parser was just invoked at some position.
    Enter,
    /// The parser matched; the position is the one after the match.
    Success,
    /// The parser rejected the input; the position is the failure point.
    Failure,
}

/// Notification emitted at every combinator boundary while an observer is
/// attached.
///
/// The `call_stack` slice is a snapshot of the frames live at the moment of
/// the event, innermost last. Borrowed data must not be retained past the
/// callback.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a> {
    pub phase: Phase,
    pub name: &'a str,
    pub description: &'a str,
    pub position: usize,
    pub call_stack: &'a [Frame],
}

/// Injectable callback receiving an [`Event`] at every combinator boundary.
pub type Observer = Rc<dyn Fn(&Event<'_>)>;

/// Immutable call-stack plus observer, created once per top-level parse.
///
/// `push` and `pop` return new `Context` values instead of mutating shared
/// state; a caller's context is never changed by a sub-parse.
#[derive(Clone, Default)]
pub struct Context {
    observer: Option<Observer>,
    call_stack: Vec<Frame>,
}

impl Context {
    /// An empty context with no observer.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty context that reports every combinator boundary to `observer`.
    pub fn with_observer(observer: Observer) -> Self {
        Self {
            observer: Some(observer),
            call_stack: Vec::new(),
        }
    }

    /// The frames currently live, outermost first.
    pub fn call_stack(&self) -> &[Frame] {
        &self.call_stack
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.call_stack.len()
    }

    /// A new context with `frame` appended.
    #[must_use]
    pub fn push(&self, frame: Frame) -> Context {
        let mut call_stack = self.call_stack.clone();
        call_stack.push(frame);
        Context {
            observer: self.observer.clone(),
            call_stack,
        }
    }

    /// A new context with the innermost frame removed.
    #[must_use]
    pub fn pop(&self) -> Context {
        let mut call_stack = self.call_stack.clone();
        call_stack.pop();
        Context {
            observer: self.observer.clone(),
            call_stack,
        }
    }

    pub(crate) fn notify(&self, phase: Phase, name: &str, description: &str, position: usize) {
        log::trace!("{:?} {} at {}", phase, name, position);
        if let Some(observer) = &self.observer {
            observer(&Event {
                phase,
                name,
                description,
                position,
                call_stack: &self.call_stack,
            });
        }
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("observer", &self.observer.is_some())
            .field("call_stack", &self.call_stack)
            .finish()
    }
}
