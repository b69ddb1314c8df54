use serde::{Deserialize, Serialize};

use super::defaults;

/// Hybrid search configuration.
///
/// `alpha` is the single canonical fusion weight for the whole system:
/// `combined = alpha * keyword + (1 - alpha) * semantic`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Keyword weight in [0, 1]; `HYBRID_SEARCH_ALPHA` env overrides.
    pub alpha: f64,
    /// Minimum semantic similarity for a chunk to stay a candidate.
    pub similarity_threshold: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            alpha: defaults::DEFAULT_ALPHA,
            similarity_threshold: defaults::DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

impl SearchConfig {
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(alpha) = std::env::var("HYBRID_SEARCH_ALPHA") {
            if let Ok(a) = alpha.parse::<f64>() {
                self.alpha = a.clamp(0.0, 1.0);
            }
        }
        self
    }
}
