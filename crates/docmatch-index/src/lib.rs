//! Per-category vector index over SQLite.
//!
//! `VectorIndex` stores chunk embeddings as BLOBs and serves brute-force
//! cosine search. `DocumentIndexer` ties chunking and embedding together
//! for single-document writes; `BulkReindexer` rebuilds whole categories
//! with checkpointed resume.

pub mod indexer;
pub mod metadata;
pub mod reindex;
pub mod store;

pub use indexer::DocumentIndexer;
pub use metadata::FlatMetadata;
pub use reindex::{BulkReindexer, ReindexStats};
pub use store::{IndexEntry, IndexStats, SearchHit, VectorIndex};
