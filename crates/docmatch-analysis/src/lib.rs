//! Two-tier task feature extraction.
//!
//! Tier 1 (`fast_tier`) is rule-based: keyword lists, scope regexes and
//! a complexity heuristic, instant and free. Tier 2 (`slow_tier`) asks a
//! completion API for structured features and costs a model call. The
//! `TaskAnalyzer` in `tier` dispatches between them on measured query
//! complexity.

pub mod client;
pub mod dictionaries;
pub mod fast_tier;
pub mod metrics;
pub mod slow_tier;
pub mod tier;

pub use client::HttpCompletionClient;
pub use fast_tier::FastAnalysis;
pub use metrics::ComplexityMetrics;
pub use tier::{select_tier, TaskAnalyzer, Tier};
