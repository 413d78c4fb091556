//! FILENAME: core/parser/src/ast.rs
//! PURPOSE: Defines the Abstract Syntax Tree (AST) for arithmetic expressions.
//! CONTEXT: After the Lexer tokenizes an expression string, the Parser converts
//! those tokens into this tree structure. The Evaluator then traverses
//! this tree to compute the final result.
//!
//! SUPPORTED EXPRESSIONS:
//! - Literals: finite decimal numbers
//! - Binary operations: +, -, *, /
//! - Unary operations: + (identity), - (negation), nested to any depth
//!
//! Parentheses leave no trace in the tree; grouping is expressed by shape.

/// Represents a parsed expression.
/// Each node exclusively owns its children and is never mutated after parsing.
#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    /// A literal number. Always finite.
    Literal(f64),

    /// A binary operation: left op right (e.g., 5 + 3).
    BinaryOp {
        left: Box<Expression>,
        op: BinaryOperator,
        right: Box<Expression>,
    },

    /// A unary operation: op operand (e.g., -5, +(2 * 3)).
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expression>,
    },
}

impl Expression {
    pub fn binary(left: Expression, op: BinaryOperator, right: Expression) -> Self {
        Expression::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOperator, operand: Expression) -> Self {
        Expression::UnaryOp {
            op,
            operand: Box::new(operand),
        }
    }

    /// Moves this node's boxed children out, leaving literals in their place.
    fn take_children(&mut self, pending: &mut Vec<Expression>) {
        match self {
            Expression::Literal(_) => {}
            Expression::UnaryOp { operand, .. } => {
                pending.push(std::mem::replace(&mut **operand, Expression::Literal(0.0)));
            }
            Expression::BinaryOp { left, right, .. } => {
                pending.push(std::mem::replace(&mut **left, Expression::Literal(0.0)));
                pending.push(std::mem::replace(&mut **right, Expression::Literal(0.0)));
            }
        }
    }
}

// Binary chains such as `1 + 1 + ... + 1` are as deep as they are long, so
// teardown flattens the tree instead of recursing through the boxes.
impl Drop for Expression {
    fn drop(&mut self) {
        if matches!(self, Expression::Literal(_)) {
            return;
        }

        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.take_children(&mut pending);
        }
    }
}

/// Binary operators for expressions.
/// Listed in order of precedence groups (additive is lowest).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum BinaryOperator {
    // Additive
    Add,      // +
    Subtract, // -

    // Multiplicative
    Multiply, // *
    Divide,   // /
}

/// Unary operators.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum UnaryOperator {
    Plus,   // +
    Negate, // -
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryOperator::Add => write!(f, "+"),
            BinaryOperator::Subtract => write!(f, "-"),
            BinaryOperator::Multiply => write!(f, "*"),
            BinaryOperator::Divide => write!(f, "/"),
        }
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnaryOperator::Plus => write!(f, "+"),
            UnaryOperator::Negate => write!(f, "-"),
        }
    }
}

/// Pending output for the non-recursive `Display` walk.
enum Piece<'a> {
    Node(&'a Expression),
    Unary(UnaryOperator),
    Binary(BinaryOperator),
    Close,
}

/// Renders the tree fully parenthesized, e.g. `(3.0 + (5.0 * 2.0))`.
impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut work = vec![Piece::Node(self)];

        while let Some(piece) = work.pop() {
            match piece {
                Piece::Node(Expression::Literal(n)) => write!(f, "{:?}", n)?,
                Piece::Node(Expression::UnaryOp { op, operand }) => {
                    f.write_str("(")?;
                    work.push(Piece::Close);
                    work.push(Piece::Node(operand));
                    work.push(Piece::Unary(*op));
                }
                Piece::Node(Expression::BinaryOp { left, op, right }) => {
                    f.write_str("(")?;
                    work.push(Piece::Close);
                    work.push(Piece::Node(right));
                    work.push(Piece::Binary(*op));
                    work.push(Piece::Node(left));
                }
                Piece::Unary(op) => write!(f, "{}", op)?,
                Piece::Binary(op) => write!(f, " {} ", op)?,
                Piece::Close => f.write_str(")")?,
            }
        }

        Ok(())
    }
}
