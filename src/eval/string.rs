use super::helpers::expect_string;
use super::{Context, Fault};
use crate::ast::Value;

/// (concat "a" "b" ...) -> "ab..."
pub(crate) fn concat(args: &[Value], _ctx: &Context) -> Result<Value, Fault> {
    let mut out = String::new();
    for arg in args {
        out.push_str(expect_string(arg, "string")?);
    }
    Ok(Value::String(out))
}

/// (lines text) -> list of lines
pub(crate) fn lines(args: &[Value], _ctx: &Context) -> Result<Value, Fault> {
    let text = expect_string(&args[0], "string")?;
    Ok(Value::List(text.lines().map(Value::string).collect()))
}
