//! Parser for kern
//!
//! Converts tokens into data. There is no separate AST: a program is a
//! sequence of Values, and the same routine backs the `parse` primitive, so
//! anything `show` writes reads back through here unchanged.

use crate::ast::Value;
use crate::lexer::{Lexeme, Token};
use thiserror::Error;

/// Deepest list or quote nesting the parser accepts
pub const MAX_NESTING: usize = 1024;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("unmatched '(' at offset {0}")]
    UnclosedList(usize),
    #[error("unmatched ')' at offset {0}")]
    UnmatchedClose(usize),
    #[error("quote at offset {0} is not followed by a datum")]
    DanglingQuote(usize),
    #[error("expected a single datum, found nothing")]
    EmptyInput,
    #[error("expected a single datum, found more input at offset {0}")]
    TrailingInput(usize),
    #[error("list nesting too deep at offset {0}")]
    TooDeep(usize),
}

/// Parser state
pub struct Parser {
    tokens: Vec<Lexeme>,
    pos: usize,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Lexeme>) -> Self {
        Parser {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<&Lexeme> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Lexeme> {
        let lexeme = self.tokens.get(self.pos).cloned();
        if lexeme.is_some() {
            self.pos += 1;
        }
        lexeme
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Parse every datum in the input
    pub fn parse_all(&mut self) -> Result<Vec<Value>, ParseError> {
        let mut data = Vec::new();
        while !self.is_at_end() {
            data.push(self.parse_datum()?);
        }
        Ok(data)
    }

    /// Parse exactly one datum, rejecting empty input and leftovers
    pub fn parse_one(&mut self) -> Result<Value, ParseError> {
        if self.is_at_end() {
            return Err(ParseError::EmptyInput);
        }
        let datum = self.parse_datum()?;
        match self.peek() {
            Some(next) => Err(ParseError::TrailingInput(next.offset)),
            None => Ok(datum),
        }
    }

    fn parse_datum(&mut self) -> Result<Value, ParseError> {
        let lexeme = self.advance().ok_or(ParseError::UnexpectedEof)?;

        match lexeme.token {
            Token::Open => {
                self.descend(lexeme.offset)?;
                let list = self.parse_list(lexeme.offset);
                self.depth -= 1;
                list
            }
            Token::Close => Err(ParseError::UnmatchedClose(lexeme.offset)),
            Token::Quote => {
                if self.is_at_end() {
                    return Err(ParseError::DanglingQuote(lexeme.offset));
                }
                self.descend(lexeme.offset)?;
                let quoted = self.parse_datum();
                self.depth -= 1;
                Ok(Value::List(vec![Value::symbol("quote"), quoted?]))
            }
            Token::Str(s) => Ok(Value::String(s)),
            Token::Atom(a) => Ok(atom_to_value(&a)),
        }
    }

    fn descend(&mut self, offset: usize) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::TooDeep(offset));
        }
        self.depth += 1;
        Ok(())
    }

    /// Parse list items up to the matching ')'
    fn parse_list(&mut self, open_offset: usize) -> Result<Value, ParseError> {
        let mut items = Vec::new();

        loop {
            match self.peek() {
                Some(Lexeme { token: Token::Close, .. }) => {
                    self.advance();
                    return Ok(Value::List(items));
                }
                Some(_) => items.push(self.parse_datum()?),
                None => return Err(ParseError::UnclosedList(open_offset)),
            }
        }
    }
}

/// Parse a numeric spelling. Rust's float parser also accepts words such as
/// `inf` and `NaN`; those stay symbols here.
pub(crate) fn parse_number(s: &str) -> Option<f64> {
    match s {
        "+inf.0" => return Some(f64::INFINITY),
        "-inf.0" => return Some(f64::NEG_INFINITY),
        "+nan.0" => return Some(f64::NAN),
        _ => {}
    }
    let unsigned = s.strip_prefix(&['+', '-'][..]).unwrap_or(s);
    let starts_numeric = unsigned
        .chars()
        .next()
        .map(|c| c.is_ascii_digit() || c == '.')
        .unwrap_or(false);
    if !starts_numeric {
        return None;
    }
    s.parse::<f64>().ok()
}

/// Turn a bare atom into a Bool, Number or Symbol
pub(crate) fn atom_to_value(atom: &str) -> Value {
    match atom {
        "#t" => Value::Bool(true),
        "#f" => Value::Bool(false),
        _ => match parse_number(atom) {
            Some(n) => Value::Number(n),
            None => Value::Symbol(atom.to_string()),
        },
    }
}

/// Parse tokens into a sequence of data
pub fn parse(tokens: Vec<Lexeme>) -> Result<Vec<Value>, ParseError> {
    Parser::new(tokens).parse_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;

    fn parse_str(input: &str) -> Result<Vec<Value>, ParseError> {
        parse(lex(input).unwrap())
    }

    fn num(n: f64) -> Value {
        Value::Number(n)
    }

    #[test]
    fn parse_atoms() {
        assert_eq!(
            parse_str("42 -1.5 #t #f foo \"bar\"").unwrap(),
            vec![
                num(42.0),
                num(-1.5),
                Value::Bool(true),
                Value::Bool(false),
                Value::symbol("foo"),
                Value::string("bar"),
            ]
        );
    }

    #[test]
    fn parse_nested_lists() {
        assert_eq!(
            parse_str("(1 (2 3) ())").unwrap(),
            vec![Value::List(vec![
                num(1.0),
                Value::List(vec![num(2.0), num(3.0)]),
                Value::List(vec![]),
            ])]
        );
    }

    #[test]
    fn parse_quote_sugar() {
        assert_eq!(
            parse_str("'x").unwrap(),
            vec![Value::List(vec![Value::symbol("quote"), Value::symbol("x")])]
        );
    }

    #[test]
    fn number_words_stay_symbols() {
        assert_eq!(
            parse_str("inf NaN - + 1abc").unwrap(),
            vec![
                Value::symbol("inf"),
                Value::symbol("NaN"),
                Value::symbol("-"),
                Value::symbol("+"),
                Value::symbol("1abc"),
            ]
        );
    }

    #[test]
    fn parse_special_floats() {
        let values = parse_str("+inf.0 -inf.0 +nan.0").unwrap();
        assert_eq!(values[0], num(f64::INFINITY));
        assert_eq!(values[1], num(f64::NEG_INFINITY));
        assert!(matches!(values[2], Value::Number(n) if n.is_nan()));
    }

    #[test]
    fn parse_unclosed_list() {
        assert_eq!(parse_str("(a (b)"), Err(ParseError::UnclosedList(0)));
    }

    #[test]
    fn parse_unmatched_close() {
        assert_eq!(parse_str("a)"), Err(ParseError::UnmatchedClose(1)));
    }

    #[test]
    fn parse_dangling_quote() {
        assert_eq!(parse_str("(a) '"), Err(ParseError::DanglingQuote(4)));
    }

    #[test]
    fn parse_rejects_deep_nesting() {
        let deep = "(".repeat(300_000);
        assert_eq!(parse_str(&deep), Err(ParseError::TooDeep(MAX_NESTING)));

        let quotes = format!("{}x", "'".repeat(MAX_NESTING + 1));
        assert_eq!(parse_str(&quotes), Err(ParseError::TooDeep(MAX_NESTING)));
    }

    #[test]
    fn parse_accepts_nesting_at_the_limit() {
        let text = format!("{}{}", "(".repeat(MAX_NESTING), ")".repeat(MAX_NESTING));
        assert_eq!(parse_str(&text).unwrap().len(), 1);
    }

    #[test]
    fn parse_one_rejects_trailing() {
        let mut parser = Parser::new(lex("1 2").unwrap());
        assert_eq!(parser.parse_one(), Err(ParseError::TrailingInput(2)));
    }

    #[test]
    fn parse_one_rejects_empty() {
        let mut parser = Parser::new(lex("").unwrap());
        assert_eq!(parser.parse_one(), Err(ParseError::EmptyInput));
    }
}
