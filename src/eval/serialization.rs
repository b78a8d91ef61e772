use super::helpers::expect_string;
use super::{Context, Fault};
use crate::ast::Value;
use crate::codec;

/// (show value) -> String
pub(crate) fn show(args: &[Value], _ctx: &Context) -> Result<Value, Fault> {
    codec::show(&args[0]).map(Value::String)
}

/// (parse text) -> Value
pub(crate) fn parse(args: &[Value], _ctx: &Context) -> Result<Value, Fault> {
    let text = expect_string(&args[0], "string")?;
    codec::read(text)
}

/// (eval value) -> Value, reduced in the caller's context one level
/// deeper, so data that evaluates itself runs into RecursionLimit
pub(crate) fn eval(args: &[Value], ctx: &Context) -> Result<Value, Fault> {
    super::eval(&args[0], &ctx.nested()?)
}
