//! Embedding providers. Selection is config-driven: "onnx" for the real
//! model, "tfidf" for the deterministic hashed fallback used in tests and
//! air-gapped deployments.

mod onnx;
mod tfidf;

pub use onnx::OnnxProvider;
pub use tfidf::TfIdfProvider;

use docmatch_core::config::EmbeddingConfig;
use docmatch_core::errors::{DocMatchError, EmbeddingError};
use docmatch_core::traits::EmbeddingProvider;

/// Instantiate the configured provider.
///
/// An unknown provider name or a model that fails to load is an error;
/// the caller decides what to do, there is no silent degradation.
pub fn create_provider(
    config: &EmbeddingConfig,
) -> Result<Box<dyn EmbeddingProvider>, DocMatchError> {
    match config.provider.as_str() {
        "onnx" => Ok(Box::new(OnnxProvider::load(
            &config.model_path,
            &config.model_id,
            config.dimensions,
        )?)),
        "tfidf" => Ok(Box::new(TfIdfProvider::new(config.dimensions))),
        other => Err(EmbeddingError::ModelUnavailable {
            model: other.to_string(),
            reason: "unknown provider".to_string(),
        }
        .into()),
    }
}
