//! Error types shared by the output sinks.

use synth_core::ErrorKind;
use thiserror::Error;

/// Errors that can occur while writing a table file.
#[derive(Error, Debug)]
pub enum EmitError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Sink used after it was finished, or similar misuse.
    #[error("Internal emitter error: {0}")]
    Internal(String),
}

impl EmitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EmitError::Io(_) | EmitError::Csv(_) | EmitError::Json(_) => ErrorKind::Io,
            EmitError::Internal(_) => ErrorKind::Internal,
        }
    }
}
