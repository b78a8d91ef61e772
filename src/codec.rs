//! Serialization codec
//!
//! `show` writes a value in the same grammar the parser reads, and `read`
//! parses text back into a value, so `read(&show(v)?)? == v` holds for every
//! serializable value. Callables have no textual form and `show` refuses
//! them instead of writing a placeholder.

use crate::ast::Value;
use crate::eval::Fault;
use crate::lexer::lex;
use crate::parser::{atom_to_value, Parser, MAX_NESTING};

/// Render a number so that it parses back to the same f64
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "+nan.0".to_string()
    } else if n == f64::INFINITY {
        "+inf.0".to_string()
    } else if n == f64::NEG_INFINITY {
        "-inf.0".to_string()
    } else {
        // Display for f64 is the shortest representation that round-trips
        format!("{}", n)
    }
}

/// Render a string as a double-quoted literal
pub fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Whether a symbol name reads back as the same symbol
pub fn is_readable_symbol(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | '\'' | '"' | ';'))
        && atom_to_value(name) == Value::Symbol(name.to_string())
}

/// Write-direction: serialize a value to text.
///
/// Lists nested deeper than the parser accepts are refused, so whatever
/// `show` writes can be read back.
pub fn show(value: &Value) -> Result<String, Fault> {
    let mut out = String::new();
    write_datum(value, &mut out, 0)?;
    Ok(out)
}

fn write_datum(value: &Value, out: &mut String, depth: usize) -> Result<(), Fault> {
    match value {
        Value::String(s) => out.push_str(&quote_string(s)),
        Value::Number(n) => out.push_str(&format_number(*n)),
        Value::Bool(b) => out.push_str(if *b { "#t" } else { "#f" }),
        Value::Symbol(name) => {
            if !is_readable_symbol(name) {
                return Err(Fault::type_mismatch("symbol with a readable name", value));
            }
            out.push_str(name);
        }
        Value::List(items) => {
            if depth >= MAX_NESTING {
                return Err(Fault::RecursionLimit(MAX_NESTING));
            }
            out.push('(');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                write_datum(item, out, depth + 1)?;
            }
            out.push(')');
        }
        Value::Callable(_) => {
            return Err(Fault::type_mismatch(
                "serializable value (functions have no textual form)",
                value,
            ));
        }
    }
    Ok(())
}

/// Read-direction: parse exactly one value from text
pub fn read(text: &str) -> Result<Value, Fault> {
    let tokens = lex(text)?;
    Ok(Parser::new(tokens).parse_one()?)
}

/// Parse every top-level datum in a program text
pub fn read_all(text: &str) -> Result<Vec<Value>, Fault> {
    let tokens = lex(text)?;
    Ok(Parser::new(tokens).parse_all()?)
}
