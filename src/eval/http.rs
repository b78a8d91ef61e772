//! Remote fetch for kern
//!
//! wslurp is slurp over the network: one blocking GET through the bridge,
//! body returned as text. Status codes are not inspected and transport
//! failures come back as a single IOFailure naming the URL.

use super::bridge::Effect;
use super::helpers::expect_string;
use super::{Context, Fault};
use crate::ast::Value;

/// (wslurp url) -> String
pub(crate) fn wslurp(args: &[Value], ctx: &Context) -> Result<Value, Fault> {
    let url = expect_string(&args[0], "string URL")?;
    ctx.bridge().perform(Effect::Fetch { url })
}
