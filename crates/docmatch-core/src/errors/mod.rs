//! Error types for the matching subsystem.
//!
//! Each subsystem defines its own `thiserror` enum; `DocMatchError`
//! wraps them all so callers can hold one error type end to end.

mod analysis_error;
mod embedding_error;
mod index_error;

pub use analysis_error::AnalysisError;
pub use embedding_error::EmbeddingError;
pub use index_error::IndexError;

/// Umbrella error for the whole subsystem.
#[derive(Debug, thiserror::Error)]
pub enum DocMatchError {
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("config error: {reason}")]
    Config { reason: String },
}

/// Result alias used throughout the workspace.
pub type DocMatchResult<T> = Result<T, DocMatchError>;
