//! Hybrid retrieval and smart document matching.
//!
//! `lexical` scores queries with sparse TF-IDF, `hybrid` fuses that with
//! vector-index similarity, `matcher` turns fused candidates into
//! confidence-ranked `DocumentMatch` results, and `explain` renders the
//! human-readable reasoning.

pub mod explain;
pub mod hybrid;
pub mod lexical;
pub mod matcher;

pub use hybrid::{HybridCandidate, HybridSearcher};
pub use matcher::SmartMatcher;
