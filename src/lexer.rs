//! Tokenization for kern
//!
//! Tokens represent the atomic elements of the s-expression grammar shared
//! by program source and persisted data. Each token remembers the byte
//! offset it started at so parse failures can say where they happened.

use nom::{
    branch::alt,
    bytes::complete::{escaped_transform, take_while1},
    character::complete::{char, multispace1, none_of, not_line_ending},
    combinator::{map, opt, recognize, value},
    multi::many0,
    sequence::{delimited, pair},
    IResult,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// List start: (
    Open,
    /// List end: )
    Close,
    /// Quote prefix: '
    Quote,
    /// A double-quoted string, escapes already resolved
    Str(String),
    /// Anything else: number, boolean or symbol spelling
    Atom(String),
}

/// A token with the byte offset where it starts
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    pub token: Token,
    pub offset: usize,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("unterminated string starting at offset {0}")]
    UnterminatedString(usize),
    #[error("invalid escape in string starting at offset {0}")]
    InvalidEscape(usize),
}

/// Characters that end an atom
fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ')' | '\'' | '"' | ';')
}

/// Whitespace and `;` comments
fn trivia(input: &str) -> IResult<&str, &str> {
    recognize(many0(alt((
        multispace1,
        recognize(pair(char(';'), not_line_ending)),
    ))))(input)
}

/// Parse a double-quoted string, resolving escapes
fn string_literal(input: &str) -> IResult<&str, Token> {
    let (input, content) = delimited(
        char('"'),
        map(
            opt(escaped_transform(
                none_of("\"\\"),
                '\\',
                alt((
                    value("\\", char('\\')),
                    value("\"", char('"')),
                    value("\n", char('n')),
                    value("\t", char('t')),
                    value("\r", char('r')),
                )),
            )),
            Option::unwrap_or_default,
        ),
        char('"'),
    )(input)?;
    Ok((input, Token::Str(content)))
}

fn atom(input: &str) -> IResult<&str, Token> {
    map(take_while1(|c: char| !is_delimiter(c)), |s: &str| {
        Token::Atom(s.to_string())
    })(input)
}

fn token(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::Open, char('(')),
        value(Token::Close, char(')')),
        value(Token::Quote, char('\'')),
        string_literal,
        atom,
    ))(input)
}

/// Classify a string literal that failed to lex
fn string_error(rest: &str, offset: usize) -> LexError {
    let mut escaped = false;
    for c in rest.chars().skip(1) {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            return LexError::InvalidEscape(offset);
        }
    }
    LexError::UnterminatedString(offset)
}

fn skip_trivia(input: &str) -> &str {
    match trivia(input) {
        Ok((rest, _)) => rest,
        Err(_) => input,
    }
}

/// Tokenize a complete input string
pub fn lex(input: &str) -> Result<Vec<Lexeme>, LexError> {
    let mut tokens = Vec::new();
    let mut rest = skip_trivia(input);

    while !rest.is_empty() {
        let offset = input.len() - rest.len();
        match token(rest) {
            Ok((next, token)) => {
                tokens.push(Lexeme { token, offset });
                rest = skip_trivia(next);
            }
            // Every other character starts an atom, so only strings can fail
            Err(_) => return Err(string_error(rest, offset)),
        }
    }

    Ok(tokens)
}
