//! Value domain for kern
//!
//! Everything the evaluator manipulates is a `Value`. Program source and
//! persisted data share one representation: a parsed program is just a
//! tree of Lists, Symbols and literals, which the evaluator then reduces.

use crate::codec::{format_number, quote_string};
use crate::eval::{Context, Fault, Scope};
use std::fmt;
use std::rc::Rc;

/// A runtime value
#[derive(Debug, Clone)]
pub enum Value {
    /// Text
    String(String),
    /// A numeric value
    Number(f64),
    /// A boolean value
    Bool(bool),
    /// An ordered sequence of values
    List(Vec<Value>),
    /// An identifier
    Symbol(String),
    /// A primitive or user-defined function. Has no textual form.
    Callable(Callable),
}

/// Signature shared by every primitive.
///
/// Arguments arrive already evaluated and arity-checked.
pub type PrimitiveFn = fn(&[Value], &Context) -> Result<Value, Fault>;

/// How many arguments a primitive accepts
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == *n,
            Arity::AtLeast(n) => count >= *n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "{}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

/// A builtin function implemented in Rust
#[derive(Clone, Copy)]
pub struct Primitive {
    pub name: &'static str,
    pub arity: Arity,
    pub func: PrimitiveFn,
}

/// A user-defined function: parameters, body and the local scope it closed over
pub struct Lambda {
    pub params: Vec<String>,
    pub body: Vec<Value>,
    pub scope: Scope,
}

#[derive(Clone)]
pub enum Callable {
    Primitive(Primitive),
    Lambda(Rc<Lambda>),
}

impl Callable {
    pub fn name(&self) -> &str {
        match self {
            Callable::Primitive(p) => p.name,
            Callable::Lambda(_) => "lambda",
        }
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Callable::Primitive(a), Callable::Primitive(b)) => a.name == b.name,
            (Callable::Lambda(a), Callable::Lambda(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::Primitive(p) => write!(f, "#<primitive {}>", p.name),
            Callable::Lambda(l) => write!(f, "#<lambda ({})>", l.params.join(" ")),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => a == b,
            // NaN reads back from +nan.0, so it has to equal itself
            (Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Callable(a), Value::Callable(b)) => a == b,
            _ => false,
        }
    }
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    pub fn symbol(s: impl Into<String>) -> Self {
        Value::Symbol(s.into())
    }

    /// The empty list, used where a form has nothing meaningful to return
    pub fn unit() -> Self {
        Value::List(Vec::new())
    }

    /// Type name used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Bool(_) => "bool",
            Value::List(_) => "list",
            Value::Symbol(_) => "symbol",
            Value::Callable(_) => "callable",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Value::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Only `#f` is false
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Bool(false))
    }

    /// True for the members of the serializable subset, recursively
    pub fn is_serializable(&self) -> bool {
        match self {
            Value::Callable(_) => false,
            Value::List(items) => items.iter().all(Value::is_serializable),
            _ => true,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", quote_string(s)),
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::Bool(b) => write!(f, "{}", if *b { "#t" } else { "#f" }),
            Value::Symbol(s) => write!(f, "{}", s),
            Value::Callable(c) => write!(f, "{}", c),
            Value::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}
