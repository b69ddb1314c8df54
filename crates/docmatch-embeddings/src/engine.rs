//! EmbeddingEngine, the entry point of docmatch-embeddings.
//!
//! Wraps the configured provider behind a content-hash cache. The provider
//! is loaded lazily on the first embed call so that constructing the engine
//! never touches the filesystem or the ONNX runtime.

use std::sync::Mutex;

use tracing::{debug, info};

use docmatch_core::config::EmbeddingConfig;
use docmatch_core::errors::{DocMatchResult, EmbeddingError};
use docmatch_core::traits::EmbeddingProvider;

use crate::cache::{CacheStats, EmbeddingCache};
use crate::providers;

/// Cached, lazily-initialized embedding engine.
pub struct EmbeddingEngine {
    provider: Mutex<Option<Box<dyn EmbeddingProvider>>>,
    cache: EmbeddingCache,
    config: EmbeddingConfig,
}

impl EmbeddingEngine {
    pub fn new(config: EmbeddingConfig) -> Self {
        Self {
            provider: Mutex::new(None),
            cache: EmbeddingCache::new(config.cache_capacity),
            config,
        }
    }

    /// Embed a single text. Blank input maps to the zero vector without
    /// touching the provider; everything else is served cache-first.
    pub fn embed(&self, text: &str) -> DocMatchResult<Vec<f32>> {
        if text.trim().is_empty() {
            return Ok(vec![0.0; self.config.dimensions]);
        }

        let key = EmbeddingCache::key(text);
        if let Some(hit) = self.cache.get(&key) {
            debug!(%key, "embedding cache hit");
            return Ok(hit.as_ref().clone());
        }

        let embedding = self.with_provider(|p| p.embed(text))?;
        self.cache.insert(key, embedding.clone());
        Ok(embedding)
    }

    /// Embed many texts, preserving input order.
    ///
    /// Cache hits and blank texts are resolved up front; the remaining
    /// misses go to the provider in batches of the configured size.
    pub fn embed_batch(&self, texts: &[String]) -> DocMatchResult<Vec<Vec<f32>>> {
        let mut results: Vec<Option<Vec<f32>>> = vec![None; texts.len()];
        let mut miss_indices: Vec<usize> = Vec::new();
        let mut miss_texts: Vec<String> = Vec::new();

        for (i, text) in texts.iter().enumerate() {
            if text.trim().is_empty() {
                results[i] = Some(vec![0.0; self.config.dimensions]);
                continue;
            }
            let key = EmbeddingCache::key(text);
            if let Some(hit) = self.cache.get(&key) {
                results[i] = Some(hit.as_ref().clone());
            } else {
                miss_indices.push(i);
                miss_texts.push(text.clone());
            }
        }

        if !miss_texts.is_empty() {
            debug!(
                total = texts.len(),
                misses = miss_texts.len(),
                batch_size = self.config.batch_size,
                "embedding batch"
            );
            let batch_size = self.config.batch_size.max(1);
            let mut fresh: Vec<Vec<f32>> = Vec::with_capacity(miss_texts.len());
            for window in miss_texts.chunks(batch_size) {
                let batch = self.with_provider(|p| p.embed_batch(window))?;
                if batch.len() != window.len() {
                    return Err(EmbeddingError::InferenceFailed {
                        reason: format!(
                            "provider returned {} embeddings for {} inputs",
                            batch.len(),
                            window.len()
                        ),
                    }
                    .into());
                }
                fresh.extend(batch);
            }
            for (slot, embedding) in miss_indices.into_iter().zip(fresh) {
                self.cache
                    .insert(EmbeddingCache::key(&texts[slot]), embedding.clone());
                results[slot] = Some(embedding);
            }
        }

        // Every slot was filled by a hit, a blank, or the miss batch.
        Ok(results.into_iter().flatten().collect())
    }

    pub fn dimensions(&self) -> usize {
        self.config.dimensions
    }

    /// Cache and model diagnostics.
    pub fn cache_stats(&self) -> CacheStats {
        let loaded = self
            .provider
            .lock()
            .map(|p| p.is_some())
            .unwrap_or(false);
        CacheStats {
            cached_embeddings: self.cache.len(),
            model_loaded: loaded,
            model_name: self.config.model_id.clone(),
        }
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
        info!("embedding cache cleared");
    }

    /// Run `f` against the provider, loading it first if needed.
    fn with_provider<T>(
        &self,
        f: impl FnOnce(&dyn EmbeddingProvider) -> DocMatchResult<T>,
    ) -> DocMatchResult<T> {
        let mut guard = self
            .provider
            .lock()
            .map_err(|e| docmatch_core::errors::DocMatchError::Config {
                reason: format!("embedding provider lock poisoned: {e}"),
            })?;
        if guard.is_none() {
            let provider = providers::create_provider(&self.config)?;
            info!(
                provider = provider.name(),
                dims = provider.dimensions(),
                "embedding provider loaded"
            );
            *guard = Some(provider);
        }
        // Populated above when empty.
        let provider =
            guard
                .as_deref()
                .ok_or_else(|| docmatch_core::errors::DocMatchError::Config {
                    reason: "embedding provider missing after load".to_string(),
                })?;
        f(provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tfidf_engine() -> EmbeddingEngine {
        EmbeddingEngine::new(EmbeddingConfig {
            provider: "tfidf".to_string(),
            dimensions: 128,
            ..Default::default()
        })
    }

    #[test]
    fn blank_text_embeds_to_zero_vector() {
        let engine = tfidf_engine();
        for text in ["", "   ", "\n\t"] {
            let v = engine.embed(text).unwrap();
            assert_eq!(v.len(), 128);
            assert!(v.iter().all(|&x| x == 0.0));
        }
        // Blanks never reach the provider or the cache.
        assert_eq!(engine.cache_stats().cached_embeddings, 0);
    }

    #[test]
    fn repeated_embed_is_served_from_cache() {
        let engine = tfidf_engine();
        let a = engine.embed("giris ekrani dogrulama").unwrap();
        let b = engine.embed("giris ekrani dogrulama").unwrap();
        assert_eq!(a, b);
        assert_eq!(engine.cache_stats().cached_embeddings, 1);
    }

    #[test]
    fn batch_preserves_order_with_mixed_hits() {
        let engine = tfidf_engine();
        let warm = engine.embed("warm entry").unwrap();

        let texts = vec![
            "cold one".to_string(),
            "warm entry".to_string(),
            "".to_string(),
            "cold two".to_string(),
        ];
        let out = engine.embed_batch(&texts).unwrap();
        assert_eq!(out.len(), 4);
        assert_eq!(out[1], warm);
        assert!(out[2].iter().all(|&x| x == 0.0));
        assert_eq!(out[0], engine.embed("cold one").unwrap());
    }

    #[test]
    fn model_not_loaded_until_first_embed() {
        let engine = tfidf_engine();
        assert!(!engine.cache_stats().model_loaded);
        engine.embed("trigger load").unwrap();
        assert!(engine.cache_stats().model_loaded);
    }

    #[test]
    fn clear_cache_resets_count() {
        let engine = tfidf_engine();
        engine.embed("one").unwrap();
        engine.embed("two").unwrap();
        assert_eq!(engine.cache_stats().cached_embeddings, 2);
        engine.clear_cache();
        assert_eq!(engine.cache_stats().cached_embeddings, 0);
    }

    /// Drops the last vector of every batch to exercise the count check.
    struct ShortBatchProvider;

    impl EmbeddingProvider for ShortBatchProvider {
        fn embed(&self, _text: &str) -> DocMatchResult<Vec<f32>> {
            Ok(vec![1.0, 0.0])
        }

        fn embed_batch(&self, texts: &[String]) -> DocMatchResult<Vec<Vec<f32>>> {
            Ok(texts.iter().skip(1).map(|_| vec![1.0, 0.0]).collect())
        }

        fn dimensions(&self) -> usize {
            2
        }

        fn name(&self) -> &str {
            "short-batch"
        }
    }

    #[test]
    fn short_provider_batch_is_an_error_not_a_truncation() {
        let engine = EmbeddingEngine {
            provider: Mutex::new(Some(Box::new(ShortBatchProvider))),
            cache: EmbeddingCache::new(8),
            config: EmbeddingConfig {
                dimensions: 2,
                ..Default::default()
            },
        };
        let texts = vec!["alan ekle".to_string(), "hata duzelt".to_string()];
        let err = engine.embed_batch(&texts).unwrap_err();
        assert!(
            err.to_string().contains("1 embeddings for 2 inputs"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn unknown_provider_is_an_error() {
        let engine = EmbeddingEngine::new(EmbeddingConfig {
            provider: "magic".to_string(),
            ..Default::default()
        });
        assert!(engine.embed("anything").is_err());
    }
}
