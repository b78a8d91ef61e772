//! Builtin table
//!
//! The single list of primitives bound in every root context.

use super::{file, http, list, math, serialization, string};
use crate::ast::{Arity, Callable, Primitive, Value};
use std::collections::HashMap;

const fn prim(name: &'static str, arity: Arity, func: crate::ast::PrimitiveFn) -> Primitive {
    Primitive { name, arity, func }
}

pub(crate) const BUILTINS: &[Primitive] = &[
    // Effects
    prim("slurp", Arity::Exact(1), file::slurp),
    prim("put", Arity::Exact(2), file::put),
    prim("append", Arity::Exact(2), file::append),
    prim("fileExists", Arity::Exact(1), file::file_exists),
    prim("wslurp", Arity::Exact(1), http::wslurp),
    // Codec
    prim("show", Arity::Exact(1), serialization::show),
    prim("parse", Arity::Exact(1), serialization::parse),
    prim("eval", Arity::Exact(1), serialization::eval),
    // Arithmetic
    prim("+", Arity::AtLeast(0), math::add),
    prim("-", Arity::AtLeast(1), math::sub),
    prim("*", Arity::AtLeast(0), math::mul),
    prim("/", Arity::AtLeast(1), math::div),
    prim("=", Arity::Exact(2), math::equal),
    prim("<", Arity::Exact(2), math::less),
    prim(">", Arity::Exact(2), math::greater),
    // Lists
    prim("list", Arity::AtLeast(0), list::list),
    prim("head", Arity::Exact(1), list::head),
    prim("tail", Arity::Exact(1), list::tail),
    prim("cons", Arity::Exact(2), list::cons),
    prim("length", Arity::Exact(1), list::length),
    prim("null?", Arity::Exact(1), list::is_null),
    // Strings
    prim("concat", Arity::AtLeast(0), string::concat),
    prim("lines", Arity::Exact(1), string::lines),
];

pub(crate) fn globals() -> HashMap<String, Value> {
    BUILTINS
        .iter()
        .map(|p| (p.name.to_string(), Value::Callable(Callable::Primitive(*p))))
        .collect()
}

/// Names of every builtin, for completion and help
pub fn builtin_names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|p| p.name)
}
