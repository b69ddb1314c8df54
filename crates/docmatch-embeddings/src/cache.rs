//! In-memory embedding cache using moka.
//!
//! Keys are blake3 hashes of the exact input text. No TTL: entries live
//! for the process lifetime and are removed only by explicit `clear`.

use std::sync::Arc;

use moka::sync::Cache;

/// Diagnostics snapshot exposed by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheStats {
    pub cached_embeddings: u64,
    pub model_loaded: bool,
    pub model_name: String,
}

/// Concurrent embedding cache, safe for simultaneous batch and ad-hoc
/// query embedding.
pub struct EmbeddingCache {
    cache: Cache<String, Arc<Vec<f32>>>,
}

impl EmbeddingCache {
    pub fn new(max_entries: u64) -> Self {
        Self {
            cache: Cache::builder().max_capacity(max_entries).build(),
        }
    }

    /// Content hash for a text. The exact input string is hashed with no
    /// normalization, so differently spaced inputs cache separately.
    pub fn key(text: &str) -> String {
        blake3::hash(text.as_bytes()).to_hex().to_string()
    }

    pub fn get(&self, key: &str) -> Option<Arc<Vec<f32>>> {
        self.cache.get(key)
    }

    pub fn insert(&self, key: String, embedding: Vec<f32>) {
        self.cache.insert(key, Arc::new(embedding));
    }

    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks();
    }
}
