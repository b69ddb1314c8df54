//! Match results produced by the matcher, plus score breakdown and
//! action recommendation types.

use serde::{Deserialize, Serialize};

use crate::category::Category;

/// Weights applied to the three confidence signals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub semantic: f64,
    pub keyword: f64,
    pub metadata: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            semantic: 0.5,
            keyword: 0.3,
            metadata: 0.2,
        }
    }
}

/// Per-candidate score breakdown used for explanation and diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub semantic_score: f64,
    pub keyword_score: f64,
    pub metadata_score: f64,
    pub weights: ScoreWeights,
}

impl ScoreBreakdown {
    /// Weighted confidence, clamped into [0, 1].
    pub fn confidence(&self) -> f64 {
        let raw = self.semantic_score * self.weights.semantic
            + self.keyword_score * self.weights.keyword
            + self.metadata_score * self.weights.metadata;
        raw.clamp(0.0, 1.0)
    }
}

/// Recommended follow-up for a matched document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuggestedAction {
    UpdateExisting,
    CreateNew,
    ExtendDocument,
}

/// An action recommendation with its rationale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionSuggestion {
    pub action: SuggestedAction,
    pub reasoning: String,
    /// Sections the caller should look at when updating; empty for the
    /// rule-based path.
    pub sections_to_update: Vec<String>,
    pub confidence: f64,
}

/// One ranked match returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMatch {
    pub document_id: i64,
    pub title: String,
    pub category: Category,
    /// Final confidence in [0, 1].
    pub confidence: f64,
    pub score_breakdown: ScoreBreakdown,
    /// Best-matching chunk text, truncated for display.
    pub matched_excerpt: String,
    pub reasoning: String,
    pub suggested_action: SuggestedAction,
    pub action_reasoning: String,
}
