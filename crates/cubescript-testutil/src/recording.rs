//! A backend that records what the evaluator asks of it.
//!
//! Every call succeeds (unless its command was marked with
//! [`RecordingStack::failing`]) and returns its own rendering,
//! `(name arg ...)`, so the final result of an evaluation shows the whole
//! call structure in one string.

use std::collections::{HashMap, HashSet};
use std::fmt;

use cubescript_kernel::{Argument, CommandStack, Frame};

/// An owned copy of one stack entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Sym(String),
    /// The result of a call: its rendering.
    Call(String),
}

impl fmt::Display for Recorded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recorded::Nil => f.write_str("nil"),
            Recorded::Bool(b) => write!(f, "{b}"),
            Recorded::Int(n) => write!(f, "{n}"),
            Recorded::Float(x) => write!(f, "{x:?}"),
            Recorded::Str(s) => write!(f, "{s:?}"),
            Recorded::Sym(name) => f.write_str(name),
            Recorded::Call(text) => f.write_str(text),
        }
    }
}

/// Frame lifecycle events, in the order they happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Open(usize),
    Call(usize),
    Discard(usize),
}

/// Recording [`CommandStack`] for tests.
#[derive(Debug, Default)]
pub struct RecordingStack {
    entries: Vec<Recorded>,
    events: Vec<Event>,
    calls: Vec<Vec<Recorded>>,
    globals: HashMap<String, String>,
    failing: HashSet<String>,
}

impl RecordingStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make calls whose command symbol is `name` fail.
    pub fn failing(mut self, name: impl Into<String>) -> Self {
        self.failing.insert(name.into());
        self
    }

    /// Give `name` a value for interpolation.
    pub fn with_global(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.globals.insert(name.into(), value.into());
        self
    }

    /// Current stack contents, bottom first.
    pub fn entries(&self) -> &[Recorded] {
        &self.entries
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The arguments of every call made, in call order.
    pub fn calls(&self) -> &[Vec<Recorded>] {
        &self.calls
    }

    /// Each call rendered as `(name arg ...)`, in call order.
    pub fn rendered_calls(&self) -> Vec<String> {
        self.calls.iter().map(|args| render_call(args)).collect()
    }

    /// True when every frame was closed exactly once, innermost first.
    pub fn frames_balanced(&self) -> bool {
        let mut open = Vec::new();
        for event in &self.events {
            match *event {
                Event::Open(index) => open.push(index),
                Event::Call(index) | Event::Discard(index) => {
                    if open.pop() != Some(index) {
                        return false;
                    }
                }
            }
        }
        open.is_empty()
    }
}

fn render_call(args: &[Recorded]) -> String {
    let parts: Vec<String> = args.iter().map(Recorded::to_string).collect();
    format!("({})", parts.join(" "))
}

impl CommandStack for RecordingStack {
    fn push_command(&mut self) -> Frame {
        let index = self.entries.len();
        self.events.push(Event::Open(index));
        Frame::new(index)
    }

    fn push_argument(&mut self, argument: Argument<'_>) {
        let entry = match argument {
            Argument::Nil => Recorded::Nil,
            Argument::Bool(b) => Recorded::Bool(b),
            Argument::Int(n) => Recorded::Int(n),
            Argument::Float(x) => Recorded::Float(x),
            Argument::String(bytes) => Recorded::Str(String::from_utf8_lossy(bytes).into_owned()),
            Argument::Symbol(name) => Recorded::Sym(name.to_string()),
        };
        self.entries.push(entry);
    }

    fn pop_string(&mut self) -> String {
        match self.entries.pop() {
            None | Some(Recorded::Nil) => String::new(),
            Some(Recorded::Str(s)) => s,
            Some(Recorded::Sym(name)) => match self.globals.get(&name) {
                Some(value) => value.clone(),
                None => format!("${name}"),
            },
            Some(other) => other.to_string(),
        }
    }

    fn call(&mut self, frame: Frame) -> Result<(), String> {
        let index = frame.index().min(self.entries.len());
        self.events.push(Event::Call(frame.index()));
        let args = self.entries.split_off(index);
        let rendered = render_call(&args);

        let failed = match args.first() {
            Some(Recorded::Sym(name)) if self.failing.contains(name) => Some(format!("{name} failed")),
            _ => None,
        };

        self.calls.push(args);
        self.entries.push(Recorded::Call(rendered));
        match failed {
            Some(message) => Err(message),
            None => Ok(()),
        }
    }

    fn discard(&mut self, frame: Frame) {
        self.events.push(Event::Discard(frame.index()));
        self.entries.truncate(frame.index());
    }
}
