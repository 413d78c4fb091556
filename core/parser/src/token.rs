//! FILENAME: core/parser/src/token.rs
//! PURPOSE: Token definitions for the expression lexer.
//! CONTEXT: Tokens are the atomic units produced by the lexer and consumed by the parser.

/// The kinds of token recognized by the expression lexer.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    // Literals
    Number,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,

    // Delimiters
    LParen,
    RParen,

    // Special
    End,
}

impl TokenKind {
    /// Returns the source character for single-character tokens.
    pub fn symbol(&self) -> Option<char> {
        match self {
            TokenKind::Plus => Some('+'),
            TokenKind::Minus => Some('-'),
            TokenKind::Star => Some('*'),
            TokenKind::Slash => Some('/'),
            TokenKind::LParen => Some('('),
            TokenKind::RParen => Some(')'),
            TokenKind::Number | TokenKind::End => None,
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Number => write!(f, "number"),
            TokenKind::End => write!(f, "end of input"),
            other => match other.symbol() {
                Some(ch) => write!(f, "'{}'", ch),
                None => write!(f, "{:?}", other),
            },
        }
    }
}

/// A single lexical unit with its source position.
/// `value` is populated only for `TokenKind::Number`.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Token {
    pub kind: TokenKind,
    pub value: Option<f64>,
    /// Zero-based character offset of the token's first character.
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, position: usize) -> Self {
        Token {
            kind,
            value: None,
            position,
        }
    }

    pub fn number(value: f64, position: usize) -> Self {
        Token {
            kind: TokenKind::Number,
            value: Some(value),
            position,
        }
    }

    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::End
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.kind, self.value) {
            (TokenKind::Number, Some(n)) => write!(f, "NUMBER({:?})@{}", n, self.position),
            (TokenKind::End, _) => write!(f, "END@{}", self.position),
            (kind, _) => write!(f, "{}@{}", kind, self.position),
        }
    }
}
