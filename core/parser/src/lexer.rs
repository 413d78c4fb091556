//! FILENAME: core/parser/src/lexer.rs
//! PURPOSE: Scans a raw expression string and produces a stream of Tokens.
//! CONTEXT: This is the first stage of the evaluation pipeline. It handles
//! whitespace skipping, decimal number scanning and the single-character
//! operators. Signs are never folded into numbers here; a leading '-' is
//! always its own token and the parser treats it as a unary operator.
//!
//! SUPPORTED INPUT:
//! - Numbers: 42, 3.14, .5
//! - Operators: + - * /
//! - Grouping: ( )

use crate::token::{Token, TokenKind};
use std::iter::{FusedIterator, Peekable};
use std::str::Chars;
use thiserror::Error;

/// What went wrong while scanning.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LexErrorKind {
    /// A character that cannot start any token.
    UnexpectedCharacter,
    /// A '.' without digits after it, or a second '.' inside one numeral.
    MalformedNumber,
    /// A numeral too large to be represented as a finite f64.
    NumberOutOfRange,
}

impl std::fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LexErrorKind::UnexpectedCharacter => write!(f, "unexpected character"),
            LexErrorKind::MalformedNumber => write!(f, "malformed number"),
            LexErrorKind::NumberOutOfRange => write!(f, "number out of range"),
        }
    }
}

/// Lexer error pointing at the offending character.
#[derive(Debug, PartialEq, Eq, Clone, Error)]
#[error("{kind} '{character}' at position {position}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub position: usize,
    pub character: char,
}

impl LexError {
    pub fn new(kind: LexErrorKind, character: char, position: usize) -> Self {
        LexError {
            kind,
            position,
            character,
        }
    }
}

pub struct Lexer<'a> {
    input: Peekable<Chars<'a>>,
    /// Character offset of the next unread character.
    position: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input: input.chars().peekable(),
            position: 0,
            finished: false,
        }
    }

    /// Advances the lexer and returns the next token.
    /// Once the input is exhausted every call returns an End token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        let start = self.position;

        let token = match self.bump() {
            Some('+') => Token::new(TokenKind::Plus, start),
            Some('-') => Token::new(TokenKind::Minus, start),
            Some('*') => Token::new(TokenKind::Star, start),
            Some('/') => Token::new(TokenKind::Slash, start),
            Some('(') => Token::new(TokenKind::LParen, start),
            Some(')') => Token::new(TokenKind::RParen, start),

            // Numbers start with a digit or with a dot followed by digits
            Some(ch) if ch.is_ascii_digit() || ch == '.' => self.read_number(ch, start)?,

            // End of input
            None => Token::new(TokenKind::End, start),

            // Unknown character
            Some(ch) => {
                return Err(LexError::new(LexErrorKind::UnexpectedCharacter, ch, start));
            }
        };

        log::trace!("token {}", token);
        Ok(token)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.input.next()?;
        self.position += 1;
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(&ch) = self.input.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.bump();
        }
    }

    fn read_number(&mut self, first_char: char, start: usize) -> Result<Token, LexError> {
        let mut literal = String::new();

        if first_char == '.' {
            literal.push_str("0.");
            self.read_fraction(&mut literal, start)?;
        } else {
            literal.push(first_char);
            self.read_digits(&mut literal);

            if self.input.peek() == Some(&'.') {
                let dot_position = self.position;
                literal.push('.');
                self.bump();
                self.read_fraction(&mut literal, dot_position)?;
            }
        }

        // "3.14.15": a second decimal point is never the start of a new numeral
        if self.input.peek() == Some(&'.') {
            return Err(LexError::new(
                LexErrorKind::MalformedNumber,
                '.',
                self.position,
            ));
        }

        let value: f64 = literal
            .parse()
            .map_err(|_| LexError::new(LexErrorKind::MalformedNumber, first_char, start))?;

        if !value.is_finite() {
            return Err(LexError::new(
                LexErrorKind::NumberOutOfRange,
                first_char,
                start,
            ));
        }

        Ok(Token::number(value, start))
    }

    /// Reads the digits after a decimal point; at least one is required.
    fn read_fraction(&mut self, literal: &mut String, dot_position: usize) -> Result<(), LexError> {
        match self.input.peek() {
            Some(ch) if ch.is_ascii_digit() => {
                self.read_digits(literal);
                Ok(())
            }
            _ => Err(LexError::new(
                LexErrorKind::MalformedNumber,
                '.',
                dot_position,
            )),
        }
    }

    fn read_digits(&mut self, literal: &mut String) {
        while let Some(&ch) = self.input.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            literal.push(ch);
            self.bump();
        }
    }
}

/// Yields tokens up to and including End, then stops.
/// A lexer error is yielded once and ends the sequence.
impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.next_token();
        match &result {
            Ok(token) if token.is_end() => self.finished = true,
            Err(_) => self.finished = true,
            Ok(_) => {}
        }
        Some(result)
    }
}

impl FusedIterator for Lexer<'_> {}

/// Convenience function to scan a whole expression into tokens.
/// The returned vector always ends with a single End token.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let tokens: Vec<Token> = Lexer::new(input).collect::<Result<_, _>>()?;
    log::debug!("tokenized {} tokens", tokens.len());
    Ok(tokens)
}
