use thiserror::Error;

/// Errors raised by the clustering engine and the article source layer.
#[derive(Error, Debug)]
pub enum SiftError {
    /// No usable vocabulary could be built from the batch.
    #[error("Empty corpus: {0}")]
    EmptyCorpus(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Batch integrity problems: duplicate or unknown ids, malformed matrices.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SiftError>;
