//! FILENAME: core/engine/src/report.rs
//! PURPOSE: Serializable summary of one pipeline run.
//! CONTEXT: Front ends that need machine-readable output (the CLI's --json
//! mode) convert a run result into this record and hand it to serde.

use crate::pipeline::{EvaluationFailure, Stage};
use serde::Serialize;

/// Structured failure data for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportError {
    pub stage: Stage,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}

impl From<&EvaluationFailure> for ReportError {
    fn from(failure: &EvaluationFailure) -> Self {
        ReportError {
            stage: failure.stage(),
            message: failure.to_string(),
            position: failure.position(),
        }
    }
}

/// Exactly one of `value` and `error` is present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub expression: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ReportError>,
}

impl EvaluationReport {
    pub fn from_result(expression: &str, result: &Result<f64, EvaluationFailure>) -> Self {
        match result {
            Ok(value) => EvaluationReport {
                expression: expression.to_string(),
                value: Some(*value),
                error: None,
            },
            Err(failure) => EvaluationReport {
                expression: expression.to_string(),
                value: None,
                error: Some(failure.into()),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
