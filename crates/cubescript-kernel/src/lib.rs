//! cubescript-kernel: the front end of cubescript.
//!
//! cubescript is a command-call language: every statement is a command name
//! followed by space-separated arguments, parentheses introduce nested calls,
//! and `$name` / `[...]` strings reference and interpolate variables. The
//! kernel never resolves variables or runs commands itself. It decodes the
//! lexical structure of the source and drives a host-supplied
//! [`CommandStack`] in a single pass.
//!
//! This crate provides:
//!
//! - **Classifier**: a 256-entry byte table mapping every byte to a [`TokenClass`]
//! - **Scanners**: words, quoted strings, symbols and comments
//! - **Evaluator**: the recursive-descent driver, including multi-line
//!   string interpolation
//! - **Completeness checker**: [`is_complete_code`] for incremental callers
//! - **Session**: a line-buffering host adapter built on the two entry points
//! - **MemoryStack**: an in-process reference backend
//!
//! # Example
//!
//! ```
//! use cubescript_kernel::memory::{MemoryStack, Value};
//! use cubescript_kernel::{eval_str, CommandStack};
//!
//! let mut stack = MemoryStack::new();
//! stack.define("add", |args| {
//!     let sum = args.iter().filter_map(Value::as_int).sum::<i64>();
//!     Ok(Value::Int(sum))
//! });
//!
//! eval_str("add 1 (add 2 3)", &mut stack).unwrap();
//! assert_eq!(stack.pop_string(), "6");
//! ```

pub mod classify;
pub mod complete;
pub mod config;
pub mod cursor;
pub mod diagnostic;
pub mod error;
pub mod eval;
pub mod memory;
pub mod scanner;
pub mod session;
pub mod stack;

pub use classify::{classify, TokenClass};
pub use complete::is_complete_code;
pub use config::EvalConfig;
pub use cursor::Cursor;
pub use diagnostic::Location;
pub use error::{ErrorKind, EvalError, EvalResult, ParseError, ParseErrorKind};
pub use eval::Evaluator;
pub use session::Session;
pub use stack::{Argument, CommandStack, Frame};

/// Evaluate every statement in `source`, starting at `*pos`.
///
/// On return `*pos` points past everything consumed; after a parse error it
/// points at the offending byte (or the end of the input). See
/// [`Evaluator::eval`] for the stack discipline.
pub fn eval<S: CommandStack + ?Sized>(
    source: &[u8],
    pos: &mut usize,
    stack: &mut S,
) -> EvalResult<()> {
    Evaluator::new(stack).eval(source, pos)
}

/// Like [`eval`], with explicit limits.
pub fn eval_with_config<S: CommandStack + ?Sized>(
    source: &[u8],
    pos: &mut usize,
    stack: &mut S,
    config: EvalConfig,
) -> EvalResult<()> {
    Evaluator::with_config(stack, config).eval(source, pos)
}

/// Evaluate a whole string from the beginning.
pub fn eval_str<S: CommandStack + ?Sized>(source: &str, stack: &mut S) -> EvalResult<()> {
    let mut pos = 0;
    eval(source.as_bytes(), &mut pos, stack)
}
