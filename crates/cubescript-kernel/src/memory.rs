//! In-process reference backend.
//!
//! `MemoryStack` keeps globals and native commands in hash maps and the
//! argument stack in a `Vec`. It carries no command library of its own; a
//! host registers whatever commands it wants with [`MemoryStack::define`].
//!
//! Symbols are resolved lazily. The symbol in command position names a
//! native command; any other symbol reads a global, and an unknown global
//! reads as `Nil`.

use std::collections::HashMap;
use std::fmt;

use crate::stack::{Argument, CommandStack, Frame};

/// A value held by [`MemoryStack`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => f.write_str(s),
        }
    }
}

/// A host function callable from script.
pub type NativeCommand = Box<dyn Fn(&[Value]) -> Result<Value, String>>;

/// Stack entry: either a value or a name still to be resolved.
#[derive(Debug, Clone, PartialEq)]
enum Slot {
    Value(Value),
    Symbol(String),
}

/// Reference [`CommandStack`] backed by plain collections.
#[derive(Default)]
pub struct MemoryStack {
    globals: HashMap<String, Value>,
    commands: HashMap<String, NativeCommand>,
    slots: Vec<Slot>,
}

impl MemoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a native command under `name`, replacing any earlier one.
    pub fn define<F>(&mut self, name: impl Into<String>, command: F)
    where
        F: Fn(&[Value]) -> Result<Value, String> + 'static,
    {
        self.commands.insert(name.into(), Box::new(command));
    }

    pub fn set_global(&mut self, name: impl Into<String>, value: Value) {
        self.globals.insert(name.into(), value);
    }

    pub fn global(&self, name: &str) -> Option<&Value> {
        self.globals.get(name)
    }

    /// Number of entries currently on the stack.
    pub fn depth(&self) -> usize {
        self.slots.len()
    }

    /// Pop the top entry as a resolved value.
    pub fn pop_value(&mut self) -> Option<Value> {
        self.slots.pop().map(|slot| self.resolve(slot))
    }

    fn resolve(&self, slot: Slot) -> Value {
        match slot {
            Slot::Value(value) => value,
            Slot::Symbol(name) => self.globals.get(&name).cloned().unwrap_or(Value::Nil),
        }
    }

    fn invoke(&self, mut args: Vec<Slot>) -> Result<Value, String> {
        if args.is_empty() {
            return Err("empty command".to_string());
        }
        let name = match args.remove(0) {
            Slot::Symbol(name) => name,
            Slot::Value(Value::String(name)) => name,
            Slot::Value(other) => return Err(format!("not a command: {other}")),
        };
        let command = self
            .commands
            .get(&name)
            .ok_or_else(|| format!("unknown command: {name}"))?;

        let values: Vec<Value> = args.into_iter().map(|slot| self.resolve(slot)).collect();
        command(&values)
    }
}

impl fmt::Debug for MemoryStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut commands: Vec<&String> = self.commands.keys().collect();
        commands.sort();
        f.debug_struct("MemoryStack")
            .field("globals", &self.globals)
            .field("commands", &commands)
            .field("slots", &self.slots)
            .finish()
    }
}

impl CommandStack for MemoryStack {
    fn push_command(&mut self) -> Frame {
        Frame::new(self.slots.len())
    }

    fn push_argument(&mut self, argument: Argument<'_>) {
        let slot = match argument {
            Argument::Nil => Slot::Value(Value::Nil),
            Argument::Bool(b) => Slot::Value(Value::Bool(b)),
            Argument::Int(n) => Slot::Value(Value::Int(n)),
            Argument::Float(x) => Slot::Value(Value::Float(x)),
            Argument::String(bytes) => {
                Slot::Value(Value::String(String::from_utf8_lossy(bytes).into_owned()))
            }
            Argument::Symbol(name) => Slot::Symbol(name.to_string()),
        };
        self.slots.push(slot);
    }

    fn pop_string(&mut self) -> String {
        self.pop_value().map(|v| v.to_string()).unwrap_or_default()
    }

    fn call(&mut self, frame: Frame) -> Result<(), String> {
        let args = self.slots.split_off(frame.index().min(self.slots.len()));
        match self.invoke(args) {
            Ok(value) => {
                self.slots.push(Slot::Value(value));
                Ok(())
            }
            Err(message) => {
                tracing::trace!(%message, "native command failed");
                self.slots.push(Slot::Value(Value::String(message.clone())));
                Err(message)
            }
        }
    }

    fn discard(&mut self, frame: Frame) {
        self.slots.truncate(frame.index());
    }

    fn pop(&mut self) {
        self.slots.pop();
    }
}
