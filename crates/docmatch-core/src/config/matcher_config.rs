use serde::{Deserialize, Serialize};

use super::defaults;

/// Matcher configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Candidates below this confidence are dropped.
    pub confidence_threshold: f64,
    /// Hybrid search is asked for `top_k * oversample_factor` candidates
    /// so confidence filtering has room to discard weak matches.
    pub oversample_factor: usize,
    /// Default number of matches returned.
    pub top_k: usize,
    /// Metadata-score multiplier when a candidate's category equals an
    /// explicit category filter (result capped at 1.0).
    pub category_filter_boost: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: defaults::DEFAULT_CONFIDENCE_THRESHOLD,
            oversample_factor: defaults::DEFAULT_OVERSAMPLE_FACTOR,
            top_k: defaults::DEFAULT_TOP_K,
            category_filter_boost: defaults::DEFAULT_CATEGORY_FILTER_BOOST,
        }
    }
}
