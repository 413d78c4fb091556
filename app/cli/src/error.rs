//! FILENAME: app/cli/src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Failures of the front end itself. Expression failures are not errors at
/// this level; they are rendered and turned into an exit status.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cannot open log file {path:?}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
