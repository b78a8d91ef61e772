//! Executor: runs top-level forms and contains every fault
//!
//! A `Session` owns the current context snapshot. Each top-level form is
//! one evaluation step: faults raised anywhere inside it, whether by pure
//! reduction or by the effect bridge, and even panics, come back as an
//! [`Outcome::Fault`] instead of unwinding into the host loop. A failed
//! step leaves the session's bindings exactly as they were.
//!
//! Top-level `define` and `load` are handled here because they are the
//! only forms that change bindings: the session swaps in the extended
//! context the evaluator hands back.

use crate::ast::Value;
use crate::codec;
use crate::config::Config;
use crate::eval::{self, lambda_params, make_lambda, Context, EffectBridge, Fault, SystemBridge};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use tracing::{debug, info};

/// Result of one top-level evaluation step
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Value(Value),
    Fault(Fault),
}

impl Outcome {
    pub fn is_fault(&self) -> bool {
        matches!(self, Outcome::Fault(_))
    }

    pub fn into_result(self) -> Result<Value, Fault> {
        match self {
            Outcome::Value(v) => Ok(v),
            Outcome::Fault(f) => Err(f),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Value(v) => write!(f, "{}", v),
            Outcome::Fault(fault) => write!(f, "{}: {}", fault.kind(), fault),
        }
    }
}

pub struct Session {
    context: Context,
    /// Loads in progress inside the current step
    loading: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A session on the real filesystem and network
    pub fn new() -> Self {
        Self::with_bridge(Rc::new(SystemBridge))
    }

    pub fn with_bridge(bridge: Rc<dyn EffectBridge>) -> Self {
        Session {
            context: Context::new(bridge),
            loading: 0,
        }
    }

    pub fn with_config(config: &Config) -> Self {
        let mut session = Self::new();
        session.context = session.context.with_max_depth(config.max_depth);
        session
    }

    /// The current bindings
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Read and run every form in `source`, one outcome per form.
    ///
    /// Text that does not parse produces a single ParseFailure outcome and
    /// nothing runs. A faulting form does not stop the forms after it.
    pub fn run(&mut self, source: &str) -> Vec<Outcome> {
        match codec::read_all(source) {
            Ok(forms) => forms.iter().map(|form| self.run_form(form)).collect(),
            Err(fault) => vec![self.contain(fault)],
        }
    }

    /// Run one top-level form inside the fault boundary
    pub fn run_form(&mut self, form: &Value) -> Outcome {
        self.loading = 0;
        let step = panic::catch_unwind(AssertUnwindSafe(|| self.step(form)));
        match step {
            Ok(Ok(value)) => Outcome::Value(value),
            Ok(Err(fault)) => self.contain(fault),
            Err(payload) => self.contain(Fault::Internal(panic_message(payload.as_ref()))),
        }
    }

    fn contain(&self, fault: Fault) -> Outcome {
        info!(kind = fault.kind(), %fault, "evaluation step failed");
        Outcome::Fault(fault)
    }

    /// One step. Only a successful define replaces the context.
    fn step(&mut self, form: &Value) -> Result<Value, Fault> {
        if let Value::List(items) = form {
            match items.first().and_then(Value::as_symbol) {
                Some("define") => return self.define(&items[1..]),
                Some("load") => return self.load(&items[1..]),
                _ => {}
            }
        }
        eval::eval(form, &self.context)
    }

    /// (define name expr) or (define (name params...) body...)
    fn define(&mut self, operands: &[Value]) -> Result<Value, Fault> {
        let (name, value) = match operands {
            [Value::Symbol(name), expr] => (name.clone(), eval::eval(expr, &self.context)?),
            [Value::List(signature), body @ ..] if !body.is_empty() => {
                let (name, params) = match signature.split_first() {
                    Some((Value::Symbol(name), params)) => (name.clone(), params),
                    _ => return Err(Fault::bad_form("define", "function name must be a symbol")),
                };
                let params = lambda_params("define", &Value::List(params.to_vec()))?;
                (name, make_lambda(params, body.to_vec(), &self.context))
            }
            _ => {
                return Err(Fault::bad_form(
                    "define",
                    "expected (define name expr) or (define (name params...) body...)",
                ))
            }
        };

        debug!(%name, "define");
        self.context = self.context.define(name.clone(), value);
        Ok(Value::Symbol(name))
    }

    /// (load path): slurp a file and run its forms at top level.
    /// Stops at the first fault; definitions made before it are kept.
    /// Nested loads share the context's depth limit.
    fn load(&mut self, operands: &[Value]) -> Result<Value, Fault> {
        let limit = self.context.max_depth();
        if self.loading >= limit {
            return Err(Fault::RecursionLimit(limit));
        }
        self.loading += 1;
        let result = self.load_file(operands);
        self.loading -= 1;
        result
    }

    fn load_file(&mut self, operands: &[Value]) -> Result<Value, Fault> {
        let path = match operands {
            [expr] => eval::eval(expr, &self.context)?,
            _ => return Err(Fault::bad_form("load", "expected (load path)")),
        };
        let slurp = self
            .context
            .lookup("slurp")
            .ok_or_else(|| Fault::Unbound("slurp".into()))?;
        let text = match slurp {
            Value::Callable(c) => eval::apply(&c, &[path], &self.context)?,
            other => return Err(Fault::type_mismatch("callable", &other)),
        };
        let text = text
            .as_str()
            .ok_or_else(|| Fault::type_mismatch("string", &text))?;

        let mut last = Value::unit();
        for form in codec::read_all(text)? {
            last = self.step(&form)?;
        }
        Ok(last)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panic during evaluation: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panic during evaluation: {}", s)
    } else {
        "panic during evaluation".to_string()
    }
}
