use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::{DEFAULT_BATCH_SIZE, EMBEDDING_DIMENSIONS};

/// Embedder configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Provider backend: "onnx" (real model) or "tfidf" (deterministic,
    /// for tests and air-gapped runs). Never a silent fallback.
    pub provider: String,
    /// Model identifier; `EMBEDDING_MODEL` env overrides.
    pub model_id: String,
    /// Filesystem path to the ONNX model (onnx provider only).
    pub model_path: String,
    /// Output vector dimensions.
    pub dimensions: usize,
    /// Batch size for provider calls; `EMBEDDING_BATCH_SIZE` env overrides.
    pub batch_size: usize,
    /// Max entries in the process-lifetime embedding cache.
    pub cache_capacity: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            model_id: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            model_path: String::new(),
            dimensions: EMBEDDING_DIMENSIONS,
            batch_size: DEFAULT_BATCH_SIZE,
            cache_capacity: defaults::DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl EmbeddingConfig {
    /// Apply environment overrides (`EMBEDDING_MODEL`, `EMBEDDING_BATCH_SIZE`).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(model) = std::env::var("EMBEDDING_MODEL") {
            if !model.is_empty() {
                self.model_id = model;
            }
        }
        if let Ok(batch) = std::env::var("EMBEDDING_BATCH_SIZE") {
            if let Ok(n) = batch.parse::<usize>() {
                if n > 0 {
                    self.batch_size = n;
                }
            }
        }
        self
    }
}
