use thiserror::Error;

use crate::diagnostic::Diagnostic;

#[derive(Debug, Error)]
pub enum LcmError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path:   String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Diagnostic(#[from] Diagnostic),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LcmError {
    /// The parse or semantic diagnostic behind this error, if any.
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            LcmError::Diagnostic(diag) => Some(diag),
            _ => None,
        }
    }
}
