//! Argument guards shared by the primitives
//!
//! Each guard checks one argument's shape and fails with TypeMismatch
//! naming what was expected and carrying the value that was received.

use super::Fault;
use crate::ast::Value;

pub(crate) fn expect_string<'a>(value: &'a Value, expected: &str) -> Result<&'a str, Fault> {
    value
        .as_str()
        .ok_or_else(|| Fault::type_mismatch(expected, value))
}

pub(crate) fn expect_number(value: &Value) -> Result<f64, Fault> {
    value
        .as_number()
        .ok_or_else(|| Fault::type_mismatch("number", value))
}

pub(crate) fn expect_list(value: &Value) -> Result<&[Value], Fault> {
    match value {
        Value::List(items) => Ok(items),
        _ => Err(Fault::type_mismatch("list", value)),
    }
}

/// Guard every argument as a number
pub(crate) fn numbers(args: &[Value]) -> Result<Vec<f64>, Fault> {
    args.iter().map(expect_number).collect()
}
