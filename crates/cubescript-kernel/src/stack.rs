//! The backend capability interface.
//!
//! The kernel only decodes source text. Everything with meaning (variable
//! lookup, command dispatch, value storage) lives behind [`CommandStack`],
//! which a host implements on top of its own runtime. The kernel treats the
//! stack as exclusively owned for the duration of one evaluation.

/// Start of one call's arguments on the backend stack.
///
/// Returned by [`CommandStack::push_command`]; every entry pushed after it,
/// up to the top of the stack, belongs to that call. Frames nest one per
/// open parenthesis and close in reverse order of opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Frame(usize);

impl Frame {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// A typed value pushed for the current call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Argument<'a> {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Literal text. Raw source bytes, or the decoded form when escapes or
    /// interpolations were present.
    String(&'a [u8]),
    /// A name the backend resolves (command or variable).
    Symbol(&'a str),
}

/// Stack-machine interface driven by the evaluator.
pub trait CommandStack {
    /// Begin a new call. The returned frame marks argument zero.
    fn push_command(&mut self) -> Frame;

    fn push_argument(&mut self, argument: Argument<'_>);

    /// Pop the top value and stringify it.
    fn pop_string(&mut self) -> String;

    /// Execute the call made of every entry from `frame` to the top.
    ///
    /// Must replace those entries with exactly one result value, whether
    /// the call succeeds or not. `Err` carries the failure message.
    fn call(&mut self, frame: Frame) -> Result<(), String>;

    /// Drop every entry from `frame` to the top without calling.
    ///
    /// Used to close a frame when a parse error unwinds through it.
    fn discard(&mut self, frame: Frame);

    /// Drop the top value.
    fn pop(&mut self) {
        let _ = self.pop_string();
    }
}

impl<S: CommandStack + ?Sized> CommandStack for &mut S {
    fn push_command(&mut self) -> Frame {
        (**self).push_command()
    }

    fn push_argument(&mut self, argument: Argument<'_>) {
        (**self).push_argument(argument)
    }

    fn pop_string(&mut self) -> String {
        (**self).pop_string()
    }

    fn call(&mut self, frame: Frame) -> Result<(), String> {
        (**self).call(frame)
    }

    fn discard(&mut self, frame: Frame) {
        (**self).discard(frame)
    }

    fn pop(&mut self) {
        (**self).pop()
    }
}
