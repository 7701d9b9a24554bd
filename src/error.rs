use thiserror::Error;

use crate::encoder::EncodeError;

/// Errors raised while analyzing a document set.
///
/// `DocumentUnreadable` and `NoSections` are per-document: the pipeline logs
/// them and keeps going. Everything else aborts the run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("document '{document}' is unreadable: {reason}")]
    DocumentUnreadable { document: String, reason: String },

    #[error("document '{document}' has no detectable sections")]
    NoSections { document: String },

    #[error("encoder error: {0}")]
    Encode(#[from] EncodeError),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalysisError {
    pub fn unreadable(document: &str, reason: impl ToString) -> Self {
        AnalysisError::DocumentUnreadable {
            document: document.to_string(),
            reason: reason.to_string(),
        }
    }
}
