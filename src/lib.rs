//! kern - a small term-reduction evaluator with a blocking effect bridge
//!
//! # Overview
//!
//! kern reduces s-expressions. Pure reduction lives in [`eval`]; anything
//! that touches the outside world (files, the network) is a primitive that
//! goes through the [`EffectBridge`] carried by the evaluation [`Context`].
//! Both kinds of failure travel the same [`Fault`] channel, and the
//! [`Session`] catches them at the top-level boundary.
//!
//! ```text
//! (put "data.txt" (show (list 1 2 3)))   ; => "(1 2 3)"
//! (parse (slurp "data.txt"))             ; => (1 2 3)
//! (fileExists "missing.txt")             ; => #f
//! (slurp "missing.txt")                  ; => Error[IOFailure]
//! (eval (parse (slurp "prog.kern")))     ; load and run a datum
//! ```
//!
//! # Persistence
//!
//! [`codec::show`] writes values in the same grammar [`codec::read`] (and
//! the program parser) accept, so `read(show(v)) == v` for strings,
//! numbers, booleans, symbols and lists. Functions have no textual form.
//!
//! # Example
//!
//! ```rust
//! use kern::{Session, Value};
//!
//! let mut session = Session::new();
//! let outcomes = session.run("(define x 20) (+ x 22)");
//! assert_eq!(outcomes[1].clone().into_result().unwrap(), Value::Number(42.0));
//! ```

pub mod ast;
pub mod codec;
pub mod config;
pub mod display;
pub mod eval;
pub mod executor;
pub mod lexer;
pub mod parser;

// Re-export commonly used items
pub use ast::{Arity, Callable, Primitive, Value};
pub use config::Config;
pub use eval::{Context, Effect, EffectBridge, Fault, SystemBridge, WriteMode};
pub use executor::{Outcome, Session};
pub use lexer::{lex, LexError, Token};
pub use parser::{parse, ParseError};

/// Convenience function to evaluate kern source in a fresh session.
///
/// Returns the last form's value, or the first fault any form produced.
pub fn eval(input: &str) -> Result<Value, Fault> {
    let mut session = Session::new();
    let mut last = Value::unit();
    for outcome in session.run(input) {
        last = outcome.into_result()?;
    }
    Ok(last)
}
