use crate::context::{Frame, Phase};
use crate::cursor::{Cursor, Step};
use crate::error::ParseError;
use smartstring::alias::String;
use std::ops::{Add, BitAnd, BitOr, Not};
use std::rc::Rc;

type RunFn<I, O> = dyn for<'i> Fn(Cursor<'i, I>) -> Result<Step<O>, ParseError>;

/// A named, described, callable parsing unit from input cursors to typed
/// outputs.
///
/// Constructing a `Parser` performs no matching; only [`Parser::parse`]
/// does. The name and description are diagnostic metadata for call-stack
/// frames and observer events and never affect matching. Cloning shares the
/// underlying function.
pub struct Parser<I: ?Sized, O> {
    name: String,
    description: String,
    run: Rc<RunFn<I, O>>,
}

impl<I: ?Sized, O> Clone for Parser<I, O> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            description: self.description.clone(),
            run: Rc::clone(&self.run),
        }
    }
}

impl<I: ?Sized, O> Parser<I, O> {
    pub fn new<N, D, F>(name: N, description: D, run: F) -> Self
    where
        N: Into<String>,
        D: Into<String>,
        F: for<'i> Fn(Cursor<'i, I>) -> Result<Step<O>, ParseError> + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            run: Rc::new(run),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Relabels the diagnostic metadata without changing what is matched.
    #[must_use]
    pub fn named<N, D>(mut self, name: N, description: D) -> Self
    where
        N: Into<String>,
        D: Into<String>,
    {
        self.name = name.into();
        self.description = description.into();
        self
    }

    /// Runs this parser on `input`.
    ///
    /// On entry a [`Frame`] for this parser is pushed and an `Enter` event
    /// emitted; on success a `Success` event is emitted and the frame is
    /// popped from the returned context, so it never leaks into the caller;
    /// on failure a `Failure` event is emitted and the error propagates
    /// untouched, keeping the stack snapshot taken at the deepest failure
    /// point.
    pub fn parse<'i>(&self, input: Cursor<'i, I>) -> Result<Step<O>, ParseError> {
        let context = input.context.push(Frame {
            name: self.name.clone(),
            description: self.description.clone(),
        });
        context.notify(Phase::Enter, &self.name, &self.description, input.position);
        let cursor = Cursor {
            value: input.value,
            position: input.position,
            context: context.clone(),
        };
        match (self.run)(cursor) {
            Ok(step) => {
                step.context
                    .notify(Phase::Success, &self.name, &self.description, step.position);
                Ok(Step {
                    value: step.value,
                    position: step.position,
                    context: step.context.pop(),
                })
            }
            Err(err) => {
                context.notify(Phase::Failure, &self.name, &self.description, err.position);
                Err(err)
            }
        }
    }
}

/// `a + b`: sequence, producing the pair of outputs. See [`Parser::then`].
impl<I: ?Sized + 'static, O1: 'static, O2: 'static> Add<Parser<I, O2>> for Parser<I, O1> {
    type Output = Parser<I, (O1, O2)>;

    fn add(self, rhs: Parser<I, O2>) -> Self::Output {
        self.then(rhs)
    }
}

/// `a | b`: ordered choice. See [`Parser::or`].
impl<I: ?Sized + 'static, O: 'static> BitOr for Parser<I, O> {
    type Output = Parser<I, O>;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}

/// `a & b`: both from the same position, keeping `a`'s output at `b`'s final
/// position. See [`Parser::and`].
impl<I: ?Sized + 'static, O1: 'static, O2: 'static> BitAnd<Parser<I, O2>> for Parser<I, O1> {
    type Output = Parser<I, O1>;

    fn bitand(self, rhs: Parser<I, O2>) -> Self::Output {
        self.and(rhs)
    }
}

/// `!p`: succeeds by consuming one scalar exactly when `p` fails here. See
/// [`negate`](crate::combinator::negate).
impl<O: 'static> Not for Parser<str, O> {
    type Output = Parser<str, char>;

    fn not(self) -> Self::Output {
        crate::combinator::negate(self)
    }
}
