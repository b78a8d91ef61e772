//! Evaluator for kern - tree-walking reduction over Values
//!
//! The reducer itself never touches the outside world. Every effect lives
//! in a primitive, and every effectful primitive goes through the
//! [`EffectBridge`] held by the [`Context`]. Faults from either side travel
//! the same `Result<Value, Fault>` channel up to the executor.
//!
//! # Dispatch
//!
//! 1. **Special forms in `eval()`**: `quote`, `if`, `lambda`, `let`, `begin`.
//!    Their operands are not evaluated up front.
//! 2. **Application**: the head evaluates to a Callable, the operands are
//!    evaluated left to right, then `apply()` runs it. Primitives are listed
//!    in `builtins.rs`.
//!
//! `define` and `load` change the session's bindings, so they are only
//! accepted at top level, where the executor handles them.

mod bridge;
mod builtins;
mod context;
mod file;
mod helpers;
mod http;
mod list;
mod math;
mod serialization;
mod string;

pub use bridge::{Effect, EffectBridge, SystemBridge, WriteMode};
pub use builtins::builtin_names;
pub use context::{Context, Scope, DEFAULT_MAX_DEPTH};

use crate::ast::{Callable, Lambda, Value};
use crate::lexer::LexError;
use crate::parser::ParseError;
use std::rc::Rc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Fault {
    #[error("expected {expected}, got {} {}", .got.type_name(), .got)]
    TypeMismatch { expected: String, got: Value },
    #[error("{message}")]
    IoFailure {
        message: String,
        resource: Option<String>,
    },
    #[error("{message}")]
    ParseFailure { message: String },
    #[error("unbound symbol: {0}")]
    Unbound(String),
    #[error("{name}: expected {expected} argument(s), got {got}")]
    Arity {
        name: String,
        expected: String,
        got: usize,
    },
    #[error("malformed {form}: {message}")]
    BadForm { form: String, message: String },
    #[error("recursion limit of {0} exceeded")]
    RecursionLimit(usize),
    #[error("{0}")]
    Internal(String),
}

impl Fault {
    pub fn type_mismatch(expected: impl Into<String>, got: &Value) -> Self {
        Fault::TypeMismatch {
            expected: expected.into(),
            got: got.clone(),
        }
    }

    pub fn io(message: impl Into<String>, resource: impl Into<String>) -> Self {
        Fault::IoFailure {
            message: message.into(),
            resource: Some(resource.into()),
        }
    }

    pub fn bad_form(form: &str, message: impl Into<String>) -> Self {
        Fault::BadForm {
            form: form.to_string(),
            message: message.into(),
        }
    }

    /// Stable name of the failure class
    pub fn kind(&self) -> &'static str {
        match self {
            Fault::TypeMismatch { .. } => "TypeMismatch",
            Fault::IoFailure { .. } => "IOFailure",
            Fault::ParseFailure { .. } => "ParseFailure",
            Fault::Unbound(_) => "Unbound",
            Fault::Arity { .. } => "Arity",
            Fault::BadForm { .. } => "BadForm",
            Fault::RecursionLimit(_) => "RecursionLimit",
            Fault::Internal(_) => "Internal",
        }
    }

    /// The file or URL an IOFailure is about
    pub fn resource(&self) -> Option<&str> {
        match self {
            Fault::IoFailure { resource, .. } => resource.as_deref(),
            _ => None,
        }
    }
}

impl From<LexError> for Fault {
    fn from(e: LexError) -> Self {
        Fault::ParseFailure {
            message: e.to_string(),
        }
    }
}

impl From<ParseError> for Fault {
    fn from(e: ParseError) -> Self {
        Fault::ParseFailure {
            message: e.to_string(),
        }
    }
}

/// Reduce a value in the given context
pub fn eval(expr: &Value, ctx: &Context) -> Result<Value, Fault> {
    match expr {
        Value::Symbol(name) => ctx
            .lookup(name)
            .ok_or_else(|| Fault::Unbound(name.clone())),
        Value::List(items) if !items.is_empty() => eval_list(items, ctx),
        // Literals, the empty list and callables evaluate to themselves
        _ => Ok(expr.clone()),
    }
}

fn eval_list(items: &[Value], ctx: &Context) -> Result<Value, Fault> {
    let ctx = &ctx.nested()?;
    let (head, operands) = (&items[0], &items[1..]);

    if let Value::Symbol(name) = head {
        match name.as_str() {
            "quote" => return eval_quote(operands),
            "if" => return eval_if(operands, ctx),
            "lambda" => return eval_lambda(operands, ctx),
            "let" => return eval_let(operands, ctx),
            "begin" => return eval_body(operands, ctx),
            "define" | "load" => {
                return Err(Fault::bad_form(name, "only allowed at top level"));
            }
            _ => {}
        }
    }

    let callee = eval(head, ctx)?;
    let callable = match callee {
        Value::Callable(c) => c,
        other => return Err(Fault::type_mismatch("callable in operator position", &other)),
    };

    let args = operands
        .iter()
        .map(|operand| eval(operand, ctx))
        .collect::<Result<Vec<_>, _>>()?;

    apply(&callable, &args, ctx)
}

/// Call a callable with already-evaluated arguments
pub fn apply(callable: &Callable, args: &[Value], ctx: &Context) -> Result<Value, Fault> {
    match callable {
        Callable::Primitive(prim) => {
            if !prim.arity.accepts(args.len()) {
                return Err(Fault::Arity {
                    name: prim.name.to_string(),
                    expected: prim.arity.to_string(),
                    got: args.len(),
                });
            }
            (prim.func)(args, ctx)
        }
        Callable::Lambda(lambda) => {
            if lambda.params.len() != args.len() {
                return Err(Fault::Arity {
                    name: "lambda".to_string(),
                    expected: lambda.params.len().to_string(),
                    got: args.len(),
                });
            }
            let bindings = lambda
                .params
                .iter()
                .cloned()
                .zip(args.iter().cloned())
                .collect();
            let inner = ctx.enter(&lambda.scope)?.extend(bindings);
            eval_body(&lambda.body, &inner)
        }
    }
}

/// Evaluate a sequence, returning the last value
fn eval_body(body: &[Value], ctx: &Context) -> Result<Value, Fault> {
    let mut result = Value::unit();
    for expr in body {
        result = eval(expr, ctx)?;
    }
    Ok(result)
}

fn eval_quote(operands: &[Value]) -> Result<Value, Fault> {
    match operands {
        [datum] => Ok(datum.clone()),
        _ => Err(Fault::bad_form("quote", "expected exactly one operand")),
    }
}

fn eval_if(operands: &[Value], ctx: &Context) -> Result<Value, Fault> {
    let (cond, then, otherwise) = match operands {
        [c, t] => (c, t, None),
        [c, t, e] => (c, t, Some(e)),
        _ => return Err(Fault::bad_form("if", "expected (if cond then [else])")),
    };

    if eval(cond, ctx)?.is_truthy() {
        eval(then, ctx)
    } else {
        match otherwise {
            Some(e) => eval(e, ctx),
            None => Ok(Value::unit()),
        }
    }
}

/// Collect a parameter list of symbols
pub(crate) fn lambda_params(form: &str, params: &Value) -> Result<Vec<String>, Fault> {
    let items = match params {
        Value::List(items) => items,
        _ => return Err(Fault::bad_form(form, "parameters must be a list")),
    };
    items
        .iter()
        .map(|p| {
            p.as_symbol()
                .map(str::to_string)
                .ok_or_else(|| Fault::bad_form(form, format!("parameter {} is not a symbol", p)))
        })
        .collect()
}

fn eval_lambda(operands: &[Value], ctx: &Context) -> Result<Value, Fault> {
    let (params, body) = match operands {
        [params, body @ ..] if !body.is_empty() => (params, body),
        _ => return Err(Fault::bad_form("lambda", "expected (lambda (params...) body...)")),
    };
    Ok(make_lambda(lambda_params("lambda", params)?, body.to_vec(), ctx))
}

pub(crate) fn make_lambda(params: Vec<String>, body: Vec<Value>, ctx: &Context) -> Value {
    Value::Callable(Callable::Lambda(Rc::new(Lambda {
        params,
        body,
        scope: ctx.scope(),
    })))
}

fn eval_let(operands: &[Value], ctx: &Context) -> Result<Value, Fault> {
    let (bindings, body) = match operands {
        [Value::List(bindings), body @ ..] if !body.is_empty() => (bindings, body),
        _ => return Err(Fault::bad_form("let", "expected (let ((name expr)...) body...)")),
    };

    let mut frame = Vec::with_capacity(bindings.len());
    for binding in bindings {
        match binding {
            Value::List(pair) if pair.len() == 2 => {
                let name = pair[0]
                    .as_symbol()
                    .ok_or_else(|| Fault::bad_form("let", "binding name must be a symbol"))?;
                frame.push((name.to_string(), eval(&pair[1], ctx)?));
            }
            _ => return Err(Fault::bad_form("let", format!("bad binding {}", binding))),
        }
    }

    eval_body(body, &ctx.extend(frame))
}
