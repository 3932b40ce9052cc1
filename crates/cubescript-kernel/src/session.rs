//! Line-buffering host adapter.
//!
//! A `Session` is what an interactive host puts between its line editor and
//! the kernel: it collects lines until [`is_complete_code`] says they form a
//! statement, evaluates them, and hands back the stringified result. Line
//! editing, history and terminal output stay with the host.
//!
//! ```
//! use cubescript_kernel::memory::{MemoryStack, Value};
//! use cubescript_kernel::Session;
//!
//! let mut stack = MemoryStack::new();
//! stack.define("join", |args| {
//!     Ok(Value::String(args.iter().map(Value::to_string).collect()))
//! });
//!
//! let mut session = Session::new(stack);
//! assert!(session.feed_line("join a (join").is_none());
//! assert_eq!(session.prompt(), ">> ");
//! let result = session.feed_line("b c)").unwrap();
//! assert_eq!(result.unwrap(), "abc");
//! ```

use crate::complete::is_complete_code;
use crate::config::EvalConfig;
use crate::error::EvalResult;
use crate::eval::Evaluator;
use crate::stack::CommandStack;

/// Accumulates input lines and evaluates complete statements.
#[derive(Debug)]
pub struct Session<S> {
    stack: S,
    config: EvalConfig,
    pending: String,
}

impl<S: CommandStack> Session<S> {
    pub fn new(stack: S) -> Self {
        Self::with_config(stack, EvalConfig::default())
    }

    pub fn with_config(stack: S, config: EvalConfig) -> Self {
        Self {
            stack,
            config,
            pending: String::new(),
        }
    }

    /// Prompt for the next line: `"> "` when idle, `">> "` mid-statement.
    pub fn prompt(&self) -> &'static str {
        if self.pending.is_empty() {
            "> "
        } else {
            ">> "
        }
    }

    /// True while lines are buffered but not yet evaluated.
    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Add one line of input.
    ///
    /// Returns `None` while the buffered input is incomplete (empty lines
    /// are ignored outright). Otherwise the buffer is evaluated and cleared,
    /// and the result of the last statement comes back as a string.
    pub fn feed_line(&mut self, line: &str) -> Option<EvalResult<String>> {
        if line.is_empty() {
            return None;
        }
        self.pending.push_str(line);
        self.pending.push('\n');

        if !is_complete_code(self.pending.as_bytes()) {
            tracing::trace!(bytes = self.pending.len(), "input incomplete");
            return None;
        }
        Some(self.flush())
    }

    /// Evaluate whatever is still buffered at the real end of input.
    ///
    /// Incomplete input is evaluated anyway so that its parse error is
    /// reported instead of silently dropped.
    pub fn finish(&mut self) -> Option<EvalResult<String>> {
        if self.pending.trim().is_empty() {
            self.pending.clear();
            return None;
        }
        Some(self.flush())
    }

    fn flush(&mut self) -> EvalResult<String> {
        let source = std::mem::take(&mut self.pending);
        let mut pos = 0;
        Evaluator::with_config(&mut self.stack, self.config).eval(source.as_bytes(), &mut pos)?;
        Ok(self.stack.pop_string())
    }

    pub fn stack(&self) -> &S {
        &self.stack
    }

    pub fn stack_mut(&mut self) -> &mut S {
        &mut self.stack
    }

    pub fn into_inner(self) -> S {
        self.stack
    }
}
