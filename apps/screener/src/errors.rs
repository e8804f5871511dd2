use thiserror::Error;

/// Application-level error type shared across the pipeline.
///
/// Extraction never surfaces through here — every extractor degrades to a
/// defined default instead of raising. What does surface: embedding failures
/// (fatal to that single candidate's scoring, since semantic similarity has
/// no safe default) and generation failures in the caller-facing features
/// (interview support, JD optimizer) where an empty result would be useless.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
