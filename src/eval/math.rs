use super::helpers::{expect_number, numbers};
use super::{Context, Fault};
use crate::ast::Value;

pub(crate) fn add(args: &[Value], _ctx: &Context) -> Result<Value, Fault> {
    Ok(Value::Number(numbers(args)?.iter().sum()))
}

pub(crate) fn mul(args: &[Value], _ctx: &Context) -> Result<Value, Fault> {
    Ok(Value::Number(numbers(args)?.iter().product()))
}

/// (- x) negates, (- x y ...) subtracts left to right
pub(crate) fn sub(args: &[Value], _ctx: &Context) -> Result<Value, Fault> {
    let nums = numbers(args)?;
    let result = match nums.split_first() {
        Some((first, [])) => -first,
        Some((first, rest)) => rest.iter().fold(*first, |acc, n| acc - n),
        None => 0.0,
    };
    Ok(Value::Number(result))
}

/// (/ x y ...) divides left to right, following IEEE semantics for zero
pub(crate) fn div(args: &[Value], _ctx: &Context) -> Result<Value, Fault> {
    let nums = numbers(args)?;
    let result = match nums.split_first() {
        Some((first, [])) => 1.0 / first,
        Some((first, rest)) => rest.iter().fold(*first, |acc, n| acc / n),
        None => 1.0,
    };
    Ok(Value::Number(result))
}

/// (= a b) structural equality on any two values
pub(crate) fn equal(args: &[Value], _ctx: &Context) -> Result<Value, Fault> {
    Ok(Value::Bool(args[0] == args[1]))
}

pub(crate) fn less(args: &[Value], _ctx: &Context) -> Result<Value, Fault> {
    Ok(Value::Bool(expect_number(&args[0])? < expect_number(&args[1])?))
}

pub(crate) fn greater(args: &[Value], _ctx: &Context) -> Result<Value, Fault> {
    Ok(Value::Bool(expect_number(&args[0])? > expect_number(&args[1])?))
}
