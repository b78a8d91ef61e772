use super::helpers::expect_list;
use super::{Context, Fault};
use crate::ast::Value;

pub(crate) fn list(args: &[Value], _ctx: &Context) -> Result<Value, Fault> {
    Ok(Value::List(args.to_vec()))
}

pub(crate) fn head(args: &[Value], _ctx: &Context) -> Result<Value, Fault> {
    expect_list(&args[0])?
        .first()
        .cloned()
        .ok_or_else(|| Fault::type_mismatch("non-empty list", &args[0]))
}

pub(crate) fn tail(args: &[Value], _ctx: &Context) -> Result<Value, Fault> {
    match expect_list(&args[0])? {
        [] => Err(Fault::type_mismatch("non-empty list", &args[0])),
        [_, rest @ ..] => Ok(Value::List(rest.to_vec())),
    }
}

pub(crate) fn cons(args: &[Value], _ctx: &Context) -> Result<Value, Fault> {
    let rest = expect_list(&args[1])?;
    let mut items = Vec::with_capacity(rest.len() + 1);
    items.push(args[0].clone());
    items.extend_from_slice(rest);
    Ok(Value::List(items))
}

/// Length of a list or of a string in characters
pub(crate) fn length(args: &[Value], _ctx: &Context) -> Result<Value, Fault> {
    let len = match &args[0] {
        Value::List(items) => items.len(),
        Value::String(s) => s.chars().count(),
        other => return Err(Fault::type_mismatch("list or string", other)),
    };
    Ok(Value::Number(len as f64))
}

pub(crate) fn is_null(args: &[Value], _ctx: &Context) -> Result<Value, Fault> {
    Ok(Value::Bool(expect_list(&args[0])?.is_empty()))
}
