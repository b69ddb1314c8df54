use serde::{Deserialize, Serialize};

use super::defaults;

/// Two-tier feature extractor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Fast-tier results with confidence at or above this threshold are
    /// used directly; below it the AI tier is consulted.
    pub fast_tier_confidence: f64,
    /// Endpoint of the structured-output completion API.
    pub api_url: String,
    /// Model identifier sent with extraction requests.
    pub model: String,
    /// Request timeout; a timed-out call falls back to the fast tier.
    pub timeout_secs: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            fast_tier_confidence: defaults::DEFAULT_FAST_TIER_CONFIDENCE,
            api_url: String::new(),
            model: defaults::DEFAULT_EXTRACTION_MODEL.to_string(),
            timeout_secs: defaults::DEFAULT_EXTRACTION_TIMEOUT_SECS,
        }
    }
}
