//! Common test utilities for kern integration tests

#![allow(dead_code, unused_imports)]

pub use kern::{codec, Fault, Outcome, Session, Value};
use std::path::Path;

/// Evaluate kern source in a fresh session
pub fn eval(input: &str) -> Result<Value, Fault> {
    kern::eval(input)
}

/// Evaluate and return just the fault kind, panicking on success
pub fn fault_kind(input: &str) -> &'static str {
    match eval(input) {
        Ok(v) => panic!("expected a fault from {}, got {}", input, v),
        Err(f) => f.kind(),
    }
}

/// A path as a kern string literal
pub fn lit(path: &Path) -> String {
    codec::quote_string(path.to_str().expect("utf-8 temp path"))
}

pub fn num_list(items: &[f64]) -> Value {
    Value::List(items.iter().map(|n| Value::Number(*n)).collect())
}
