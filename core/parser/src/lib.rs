//! FILENAME: core/parser/src/lib.rs
//! PURPOSE: Library root for the arithmetic expression parser.
//! CONTEXT: This module exposes the lexer, parser, and AST components
//! needed to convert expression strings into evaluatable trees.
//!
//! PIPELINE: Expression String --> Lexer --> Tokens --> Parser --> AST --> Evaluator
//!
//! SUPPORTED FEATURES:
//! - Arithmetic: +, -, *, /
//! - Decimal literals: 42, 3.14, .5
//! - Parentheses for grouping
//! - Unary signs: -5, +5, --5

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod token;

// Register the separate tests module
#[cfg(test)]
mod tests;

// Re-export commonly used types for convenience
pub use ast::{BinaryOperator, Expression, UnaryOperator};
pub use lexer::{tokenize, LexError, LexErrorKind, Lexer};
pub use parser::{
    parse, parse_str, Expected, ParseError, ParseResult, Parser, SyntaxError, DEFAULT_MAX_DEPTH,
};
pub use token::{Token, TokenKind};
