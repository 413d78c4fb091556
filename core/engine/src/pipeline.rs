//! FILENAME: core/engine/src/pipeline.rs
//! PURPOSE: Composes lexer, parser and evaluator into a single call.
//! CONTEXT: This is the entry point used by the command-line front end and the
//! REPL. Each stage runs to completion before the next starts, and the first
//! failure ends the run. Nothing is kept between invocations.

use crate::evaluator::{EvalError, Evaluator};
use calc_parser::{tokenize, Expression, LexError, ParseError, Parser, Token};
use serde::Serialize;
use thiserror::Error;

/// The pipeline stage a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Tokenize,
    Parse,
    Evaluate,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Tokenize => write!(f, "tokenize"),
            Stage::Parse => write!(f, "parse"),
            Stage::Evaluate => write!(f, "evaluate"),
        }
    }
}

/// Any failure of a pipeline run, tagged by stage.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationFailure {
    #[error("Tokenization failed: {0}")]
    Lex(#[from] LexError),

    #[error("Parsing failed: {0}")]
    Parse(#[from] ParseError),

    #[error("Evaluation failed: {0}")]
    Eval(#[from] EvalError),
}

impl EvaluationFailure {
    pub fn stage(&self) -> Stage {
        match self {
            EvaluationFailure::Lex(_) => Stage::Tokenize,
            EvaluationFailure::Parse(_) => Stage::Parse,
            EvaluationFailure::Eval(_) => Stage::Evaluate,
        }
    }

    /// Source position of the failure. Evaluation failures have none.
    pub fn position(&self) -> Option<usize> {
        match self {
            EvaluationFailure::Lex(e) => Some(e.position),
            EvaluationFailure::Parse(e) => Some(e.position()),
            EvaluationFailure::Eval(_) => None,
        }
    }
}

/// Every intermediate product of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub tokens: Vec<Token>,
    pub ast: Expression,
    pub value: f64,
}

/// Runs the whole pipeline and keeps the tokens and tree for display.
pub fn run_traced(input: &str) -> Result<Evaluation, EvaluationFailure> {
    log::debug!("run {:?}", input);

    let tokens = tokenize(input)?;
    let ast = Parser::new(tokens.clone()).parse()?;
    let value = Evaluator::new().evaluate(&ast)?;

    log::debug!("result {:?}", value);
    Ok(Evaluation { tokens, ast, value })
}

/// Evaluates an expression string to a number.
pub fn run(input: &str) -> Result<f64, EvaluationFailure> {
    let tokens = tokenize(input)?;
    let ast = Parser::new(tokens).parse()?;
    let value = Evaluator::new().evaluate(&ast)?;

    log::debug!("{:?} = {:?}", input, value);
    Ok(value)
}
