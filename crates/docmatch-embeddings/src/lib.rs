//! # docmatch-embeddings
//!
//! Fixed-dimension text embeddings with a blake3-keyed, process-lifetime
//! cache and lazy provider loading. Providers are chosen explicitly by
//! configuration; an unavailable model surfaces as an error, never as a
//! silent fallback.

mod cache;
mod engine;
pub mod providers;

pub use cache::CacheStats;
pub use engine::EmbeddingEngine;
