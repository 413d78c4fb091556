//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the expression engine.
//! CONTEXT: Re-exports public types and modules for use by other crates.

pub mod evaluator;
pub mod pipeline;
pub mod report;

// Re-export commonly used types at the crate root
pub use evaluator::{evaluate, EvalError, EvalResult, Evaluator};
pub use pipeline::{run, run_traced, Evaluation, EvaluationFailure, Stage};
pub use report::{EvaluationReport, ReportError};
