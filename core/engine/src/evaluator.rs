//! FILENAME: core/engine/src/evaluator.rs
//! PURPOSE: Evaluates AST expressions to compute a numeric result.
//! CONTEXT: After an expression is parsed into an AST, this module traverses
//! the tree post-order (children before parent) and computes the final value.
//!
//! SUPPORTED FEATURES:
//! - Literal evaluation
//! - Binary operations: +, -, *, /
//! - Unary operations: + (identity), - (negation)
//!
//! All arithmetic is IEEE-754 double precision. Division by an exact zero and
//! any step that leaves the finite range are reported as errors rather than
//! producing infinities or NaN.

use calc_parser::{BinaryOperator, Expression, UnaryOperator};
use thiserror::Error;

/// Runtime failures. The tree is well-formed by construction, so arithmetic
/// is the only thing that can go wrong.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("Division by zero: {dividend:?} / 0")]
    DivisionByZero { dividend: f64 },

    #[error("Arithmetic overflow: {left:?} {operator} {right:?} is not finite")]
    Overflow {
        operator: BinaryOperator,
        left: f64,
        right: f64,
    },
}

pub type EvalResult = Result<f64, EvalError>;

/// Pending work for the post-order walk.
enum Frame<'a> {
    Visit(&'a Expression),
    ApplyUnary(UnaryOperator),
    ApplyBinary(BinaryOperator),
}

/// Stateless tree walker. One instance may evaluate any number of trees.
///
/// The walk uses an explicit stack, so long left-associative chains such as
/// `1 + 1 + ... + 1` do not grow the native stack.
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Evaluator
    }

    /// Main evaluation entry point. Children are evaluated before their
    /// parent and left operands before right ones.
    pub fn evaluate(&self, expr: &Expression) -> EvalResult {
        let mut work = vec![Frame::Visit(expr)];
        let mut values: Vec<f64> = Vec::new();

        while let Some(frame) = work.pop() {
            match frame {
                Frame::Visit(Expression::Literal(n)) => values.push(*n),
                Frame::Visit(Expression::UnaryOp { op, operand }) => {
                    work.push(Frame::ApplyUnary(*op));
                    work.push(Frame::Visit(operand));
                }
                Frame::Visit(Expression::BinaryOp { left, op, right }) => {
                    work.push(Frame::ApplyBinary(*op));
                    work.push(Frame::Visit(right));
                    work.push(Frame::Visit(left));
                }
                Frame::ApplyUnary(op) => {
                    let operand = pop_operand(&mut values);
                    values.push(self.eval_unary_op(op, operand));
                }
                Frame::ApplyBinary(op) => {
                    let right = pop_operand(&mut values);
                    let left = pop_operand(&mut values);
                    values.push(self.eval_binary_op(left, op, right)?);
                }
            }
        }

        debug_assert_eq!(values.len(), 1, "a complete tree leaves exactly one value");
        Ok(pop_operand(&mut values))
    }

    /// Applies a binary operator to evaluated operands.
    fn eval_binary_op(&self, left_val: f64, op: BinaryOperator, right_val: f64) -> EvalResult {
        let result = match op {
            BinaryOperator::Add => left_val + right_val,
            BinaryOperator::Subtract => left_val - right_val,
            BinaryOperator::Multiply => left_val * right_val,
            BinaryOperator::Divide => self.eval_divide(left_val, right_val)?,
        };

        if !result.is_finite() {
            log::debug!("{:?} {} {:?} left the finite range", left_val, op, right_val);
            return Err(EvalError::Overflow {
                operator: op,
                left: left_val,
                right: right_val,
            });
        }

        log::trace!("{:?} {} {:?} = {:?}", left_val, op, right_val, result);
        Ok(result)
    }

    fn eval_divide(&self, left: f64, right: f64) -> EvalResult {
        // Matches both 0.0 and -0.0
        if right == 0.0 {
            return Err(EvalError::DivisionByZero { dividend: left });
        }
        Ok(left / right)
    }

    /// Applies a unary operator to an evaluated operand.
    fn eval_unary_op(&self, op: UnaryOperator, val: f64) -> f64 {
        match op {
            UnaryOperator::Plus => val,
            UnaryOperator::Negate => -val,
        }
    }
}

/// Takes the most recent operand off the value stack. Every Apply frame sits
/// beneath the Visit frames of its operands, so the stack is never short when
/// an operator is applied.
fn pop_operand(values: &mut Vec<f64>) -> f64 {
    debug_assert!(!values.is_empty(), "operand stack underflow");
    values.pop().unwrap_or(f64::NAN)
}

/// Convenience function to evaluate a tree with a fresh evaluator.
pub fn evaluate(expr: &Expression) -> EvalResult {
    Evaluator::new().evaluate(expr)
}
