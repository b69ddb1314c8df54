//! Task features extracted from a free-text task description.
//!
//! `TaskFeatures` is always built through `from_raw`, which defaults
//! missing fields, coerces invalid enum values, and clamps relevance
//! scores. Validation lives at the deserialization boundary, not in
//! business logic downstream.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::constants::{MAX_ENTITIES, MAX_KEYWORDS};

/// What kind of work a task describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    AddFeature,
    UpdateFeature,
    FixBug,
    Refactor,
    Documentation,
}

impl Intent {
    /// Parse the wire form (`ADD_FEATURE`, ...). Unknown values map to
    /// the safe default `AddFeature`.
    pub fn parse_or_default(s: &str) -> Intent {
        match s {
            "ADD_FEATURE" => Intent::AddFeature,
            "UPDATE_FEATURE" => Intent::UpdateFeature,
            "FIX_BUG" => Intent::FixBug,
            "REFACTOR" => Intent::Refactor,
            "DOCUMENTATION" => Intent::Documentation,
            _ => Intent::AddFeature,
        }
    }
}

/// Estimated task complexity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl Complexity {
    /// Bucket a [0,1] complexity score.
    pub fn from_score(score: f64) -> Complexity {
        if score < 0.3 {
            Complexity::Low
        } else if score < 0.6 {
            Complexity::Medium
        } else {
            Complexity::High
        }
    }

    /// Parse the wire form. Unknown values map to `Medium`.
    pub fn parse_or_default(s: &str) -> Complexity {
        match s {
            "low" => Complexity::Low,
            "medium" => Complexity::Medium,
            "high" => Complexity::High,
            _ => Complexity::Medium,
        }
    }
}

/// Which extraction tier produced a `TaskFeatures`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMethod {
    RuleBased,
    AiBacked,
    HeuristicFallback,
}

/// Structured features describing a task, used to drive retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskFeatures {
    /// Ordered, deduplicated keywords (at most 10).
    pub keywords: Vec<String>,
    pub intent: Intent,
    /// Affected component/module/screen; "Unknown" when unresolved.
    pub scope: String,
    /// Domain terms found in the text (at most 5).
    pub entities: Vec<String>,
    /// Per-category relevance, each clamped to [0, 1].
    pub category_relevance: HashMap<Category, f64>,
    pub complexity: Complexity,
    /// Derived query used for retrieval.
    pub search_query: String,
    pub analysis_method: AnalysisMethod,
}

/// The raw, untrusted shape returned by the AI extraction tier.
///
/// Every field is optional; `TaskFeatures::from_raw` supplies defaults
/// and clamps out-of-range values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTaskFeatures {
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub intent: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub entities: Vec<String>,
    #[serde(default)]
    pub category_relevance: HashMap<String, f64>,
    #[serde(default)]
    pub complexity: Option<String>,
    #[serde(default)]
    pub search_query: Option<String>,
}

impl TaskFeatures {
    /// Validate and normalize a raw AI response into trusted features.
    pub fn from_raw(raw: RawTaskFeatures) -> TaskFeatures {
        let mut relevance = default_relevance();
        for (key, score) in &raw.category_relevance {
            if let Some(cat) = Category::parse(key) {
                relevance.insert(cat, score.clamp(0.0, 1.0));
            }
        }

        TaskFeatures {
            keywords: dedup_truncate(raw.keywords, MAX_KEYWORDS),
            intent: Intent::parse_or_default(raw.intent.as_deref().unwrap_or("")),
            scope: raw
                .scope
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
            entities: dedup_truncate(raw.entities, MAX_ENTITIES),
            category_relevance: relevance,
            complexity: Complexity::parse_or_default(raw.complexity.as_deref().unwrap_or("")),
            search_query: raw.search_query.unwrap_or_default(),
            analysis_method: AnalysisMethod::AiBacked,
        }
    }

    /// Relevance score for a category, with the neutral default for
    /// categories the extractor did not score.
    pub fn relevance(&self, category: Category) -> f64 {
        self.category_relevance.get(&category).copied().unwrap_or(0.5)
    }
}

/// Neutral relevance prior for all categories.
pub fn default_relevance() -> HashMap<Category, f64> {
    Category::ALL.iter().map(|c| (*c, 0.5)).collect()
}

/// Deduplicate preserving order, then truncate.
fn dedup_truncate(items: Vec<String>, max: usize) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for item in items {
        if seen.insert(item.clone()) {
            out.push(item);
        }
        if out.len() == max {
            break;
        }
    }
    out
}
