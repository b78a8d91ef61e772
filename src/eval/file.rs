//! File primitives: slurp, put, append, fileExists
//!
//! All argument shapes are checked before the bridge is asked to do
//! anything, so a badly typed call never touches the filesystem.

use super::bridge::{Effect, WriteMode};
use super::helpers::expect_string;
use super::{Context, Fault};
use crate::ast::Value;

/// (slurp path) -> String
///
/// The existence check happens first so a missing file is reported by name
/// rather than as whatever the OS read error says.
pub(crate) fn slurp(args: &[Value], ctx: &Context) -> Result<Value, Fault> {
    let path = expect_string(&args[0], "string")?;

    if !probe(ctx, path)? {
        return Err(Fault::io(format!("slurp: file not found: {}", path), path));
    }

    ctx.bridge().perform(Effect::Read { path })
}

/// (put path content) -> content
pub(crate) fn put(args: &[Value], ctx: &Context) -> Result<Value, Fault> {
    write(args, ctx, WriteMode::Truncate)
}

/// (append path content) -> content
pub(crate) fn append(args: &[Value], ctx: &Context) -> Result<Value, Fault> {
    write(args, ctx, WriteMode::Append)
}

fn write(args: &[Value], ctx: &Context, mode: WriteMode) -> Result<Value, Fault> {
    let path = expect_string(&args[0], "string path")?;
    let content = expect_string(
        &args[1],
        "string content (convert other values with show)",
    )?;

    ctx.bridge().perform(Effect::Write {
        path,
        content,
        mode,
    })
}

/// (fileExists path) -> Bool. A missing file is #f, not a fault.
pub(crate) fn file_exists(args: &[Value], ctx: &Context) -> Result<Value, Fault> {
    let path = expect_string(&args[0], "string")?;
    probe(ctx, path).map(Value::Bool)
}

/// Ask the bridge whether a path exists. Anything but a Bool is a broken bridge.
fn probe(ctx: &Context, path: &str) -> Result<bool, Fault> {
    match ctx.bridge().perform(Effect::Probe { path })? {
        Value::Bool(exists) => Ok(exists),
        other => Err(Fault::Internal(format!(
            "existence probe of {} answered {} instead of a bool",
            path, other
        ))),
    }
}
