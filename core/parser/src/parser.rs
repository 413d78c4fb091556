//! FILENAME: core/parser/src/parser.rs
//! PURPOSE: Recursive descent parser that converts a sequence of Tokens into an AST.
//! CONTEXT: This is the second stage of the evaluation pipeline. It takes the
//! tokens produced by the Lexer and builds an Expression tree that can be evaluated.
//!
//! GRAMMAR:
//!   expression --> term ( ("+" | "-") term )*        // left-associative
//!   term       --> factor ( ("*" | "/") factor )*    // left-associative
//!   factor     --> NUMBER
//!                | "(" expression ")"
//!                | ("+" | "-") factor                // right-associative unary
//!
//! Each production is chosen by the current token alone, so the parser never
//! backtracks. Nesting through "(" and unary signs is capped by `max_depth`.

use crate::ast::{BinaryOperator, Expression, UnaryOperator};
use crate::lexer::{tokenize, LexError};
use crate::token::{Token, TokenKind};
use thiserror::Error;

/// Default cap on combined parenthesis and unary-sign nesting.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// What the parser was looking for when it failed.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Expected {
    /// A number, "(" or a unary sign.
    Factor,
    ClosingParen,
    /// A binary operator or the end of input.
    OperatorOrEnd,
}

impl std::fmt::Display for Expected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expected::Factor => write!(f, "a number, '(' or a sign"),
            Expected::ClosingParen => write!(f, "')'"),
            Expected::OperatorOrEnd => write!(f, "an operator or end of input"),
        }
    }
}

/// Parser errors. Every variant records the position of the token that
/// stopped the parse.
#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum ParseError {
    #[error("expected {expected} at position {position}, found {found}")]
    UnexpectedToken {
        position: usize,
        expected: Expected,
        found: TokenKind,
    },

    #[error("unbalanced parentheses: '(' at position {open_position} is never closed (end of input at position {position})")]
    UnbalancedParenthesis { position: usize, open_position: usize },

    #[error("expected ')' to close '(' at position {open_position}, found {found} at position {position}")]
    MissingClosingParen {
        position: usize,
        open_position: usize,
        found: TokenKind,
    },

    #[error("unexpected {found} at position {position} after a complete expression")]
    TrailingInput { position: usize, found: TokenKind },

    #[error("missing operand for unary '{operator}' at position {operator_position}, found {found} at position {position}")]
    MissingOperand {
        position: usize,
        operator: UnaryOperator,
        operator_position: usize,
        found: TokenKind,
    },

    #[error("expression nested deeper than {limit} levels at position {position}")]
    NestingTooDeep {
        position: usize,
        limit: usize,
        found: TokenKind,
    },
}

impl ParseError {
    pub fn position(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { position, .. }
            | ParseError::UnbalancedParenthesis { position, .. }
            | ParseError::MissingClosingParen { position, .. }
            | ParseError::TrailingInput { position, .. }
            | ParseError::MissingOperand { position, .. }
            | ParseError::NestingTooDeep { position, .. } => *position,
        }
    }

    pub fn expected(&self) -> Expected {
        match self {
            ParseError::UnexpectedToken { expected, .. } => *expected,
            ParseError::UnbalancedParenthesis { .. } | ParseError::MissingClosingParen { .. } => {
                Expected::ClosingParen
            }
            ParseError::TrailingInput { .. } => Expected::OperatorOrEnd,
            ParseError::MissingOperand { .. } | ParseError::NestingTooDeep { .. } => {
                Expected::Factor
            }
        }
    }

    pub fn found(&self) -> TokenKind {
        match self {
            ParseError::UnbalancedParenthesis { .. } => TokenKind::End,
            ParseError::UnexpectedToken { found, .. }
            | ParseError::MissingClosingParen { found, .. }
            | ParseError::TrailingInput { found, .. }
            | ParseError::MissingOperand { found, .. }
            | ParseError::NestingTooDeep { found, .. } => *found,
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// The Parser owns the token sequence and a cursor into it.
pub struct Parser {
    tokens: Vec<Token>,
    cursor: usize,
    depth: usize,
    max_depth: usize,
}

impl Parser {
    /// Creates a parser over a token sequence.
    /// A missing trailing End token is supplied, so any vector is accepted.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_max_depth(tokens, DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(mut tokens: Vec<Token>, max_depth: usize) -> Self {
        if !tokens.last().is_some_and(Token::is_end) {
            let position = tokens.last().map_or(0, |t| t.position + 1);
            tokens.push(Token::new(TokenKind::End, position));
        }

        Parser {
            tokens,
            cursor: 0,
            depth: 0,
            max_depth,
        }
    }

    /// Parses the entire token sequence and returns the AST.
    pub fn parse(&mut self) -> ParseResult<Expression> {
        let expr = self.parse_expression()?;

        // Ensure we consumed all tokens
        let current = self.current();
        if !current.is_end() {
            return Err(ParseError::TrailingInput {
                position: current.position,
                found: current.kind,
            });
        }

        log::debug!("parsed {} tokens", self.tokens.len());
        Ok(expr)
    }

    fn current(&self) -> Token {
        self.tokens[self.cursor]
    }

    /// Advances to the next token. Never moves past End.
    fn advance(&mut self) {
        if self.cursor + 1 < self.tokens.len() {
            self.cursor += 1;
        }
    }

    fn enter_nesting(&mut self) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            let current = self.current();
            return Err(ParseError::NestingTooDeep {
                position: current.position,
                limit: self.max_depth,
                found: current.kind,
            });
        }
        Ok(())
    }

    fn leave_nesting(&mut self) {
        self.depth -= 1;
    }

    /// Parses additive expressions (+ and -).
    fn parse_expression(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_term()?;

        loop {
            let op = match self.current().kind {
                TokenKind::Plus => BinaryOperator::Add,
                TokenKind::Minus => BinaryOperator::Subtract,
                _ => break,
            };

            self.advance();
            let right = self.parse_term()?;
            left = Expression::binary(left, op, right);
        }

        Ok(left)
    }

    /// Parses multiplicative expressions (* and /).
    fn parse_term(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_factor()?;

        loop {
            let op = match self.current().kind {
                TokenKind::Star => BinaryOperator::Multiply,
                TokenKind::Slash => BinaryOperator::Divide,
                _ => break,
            };

            self.advance();
            let right = self.parse_factor()?;
            left = Expression::binary(left, op, right);
        }

        Ok(left)
    }

    /// Parses numbers, parenthesized groups and unary signs.
    fn parse_factor(&mut self) -> ParseResult<Expression> {
        let token = self.current();

        match token.kind {
            TokenKind::Number => match token.value.filter(|v| v.is_finite()) {
                Some(value) => {
                    self.advance();
                    Ok(Expression::Literal(value))
                }
                // Only reachable with hand-built tokens
                None => Err(ParseError::UnexpectedToken {
                    position: token.position,
                    expected: Expected::Factor,
                    found: token.kind,
                }),
            },

            TokenKind::Plus | TokenKind::Minus => {
                let op = if token.kind == TokenKind::Plus {
                    UnaryOperator::Plus
                } else {
                    UnaryOperator::Negate
                };
                self.advance();

                let next = self.current();
                if matches!(next.kind, TokenKind::RParen | TokenKind::End) {
                    return Err(ParseError::MissingOperand {
                        position: next.position,
                        operator: op,
                        operator_position: token.position,
                        found: next.kind,
                    });
                }

                self.enter_nesting()?;
                let operand = self.parse_factor()?;
                self.leave_nesting();

                Ok(Expression::unary(op, operand))
            }

            TokenKind::LParen => {
                self.enter_nesting()?;
                self.advance();
                let expr = self.parse_expression()?;

                let closing = self.current();
                match closing.kind {
                    TokenKind::RParen => self.advance(),
                    TokenKind::End => {
                        return Err(ParseError::UnbalancedParenthesis {
                            position: closing.position,
                            open_position: token.position,
                        });
                    }
                    found => {
                        return Err(ParseError::MissingClosingParen {
                            position: closing.position,
                            open_position: token.position,
                            found,
                        });
                    }
                }
                self.leave_nesting();

                Ok(expr)
            }

            found => Err(ParseError::UnexpectedToken {
                position: token.position,
                expected: Expected::Factor,
                found,
            }),
        }
    }
}

/// Convenience function to parse a complete token sequence.
pub fn parse(tokens: Vec<Token>) -> ParseResult<Expression> {
    let mut parser = Parser::new(tokens);
    parser.parse()
}

/// Either stage of turning text into a tree can fail.
#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum SyntaxError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Convenience function to tokenize and parse an expression string directly.
pub fn parse_str(input: &str) -> Result<Expression, SyntaxError> {
    let tokens = tokenize(input)?;
    Ok(parse(tokens)?)
}
