use thiserror::Error;

/// Why a model response was classified as plain text.
///
/// Diagnostic only: the classification itself never fails.
#[derive(Debug, Error)]
pub enum InterpretError {
    #[error("no brace-delimited span in response")]
    NoCandidate,

    #[error("candidate span is not a JSON object: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("JSON object has no command shape (keys: {keys})")]
    NotACommand { keys: String },
}

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("policy JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("default function must not be empty")]
    EmptyDefaultFunction,
}
