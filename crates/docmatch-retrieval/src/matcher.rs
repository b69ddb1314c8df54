//! The smart matcher: task analysis, hybrid retrieval, confidence
//! scoring and explanation, in one call.

use tracing::info;

use docmatch_core::category::Category;
use docmatch_core::config::MatcherConfig;
use docmatch_core::errors::DocMatchResult;
use docmatch_core::matching::{DocumentMatch, ScoreBreakdown, ScoreWeights};

use docmatch_analysis::TaskAnalyzer;

use crate::explain;
use crate::hybrid::{HybridCandidate, HybridSearcher};

/// Display length of the matched-excerpt preview.
const EXCERPT_CHARS: usize = 300;

pub struct SmartMatcher {
    searcher: HybridSearcher,
    analyzer: TaskAnalyzer,
    config: MatcherConfig,
    weights: ScoreWeights,
}

impl SmartMatcher {
    pub fn new(searcher: HybridSearcher, analyzer: TaskAnalyzer, config: MatcherConfig) -> Self {
        Self {
            searcher,
            analyzer,
            config,
            weights: ScoreWeights::default(),
        }
    }

    /// Find documents worth updating (or worth not duplicating) for a
    /// task description.
    ///
    /// Candidates are oversampled from hybrid search, scored with the
    /// confidence blend, filtered by the confidence threshold and
    /// returned best-first, at most `top_k`.
    pub fn find_matches(
        &self,
        task_description: &str,
        category_filter: Option<Category>,
        top_k: usize,
    ) -> DocMatchResult<Vec<DocumentMatch>> {
        let features = self.analyzer.analyze(task_description)?;

        // An extractor can come back empty-handed; the raw description
        // is still a usable query.
        let query = match features.search_query.trim() {
            "" | "..." => task_description,
            q => q,
        };
        info!(
            query_len = query.len(),
            intent = ?features.intent,
            scope = %features.scope,
            "matching task against document index"
        );

        let candidates =
            self.searcher
                .search(query, category_filter, top_k * self.config.oversample_factor)?;

        let mut matches: Vec<DocumentMatch> = candidates
            .iter()
            .filter_map(|candidate| {
                let metadata_score =
                    self.metadata_score(candidate, category_filter, &features);
                let breakdown = ScoreBreakdown {
                    semantic_score: candidate.semantic_score,
                    keyword_score: candidate.keyword_score,
                    metadata_score,
                    weights: self.weights,
                };
                let confidence = breakdown.confidence();
                if confidence < self.config.confidence_threshold {
                    return None;
                }
                Some(self.build_match(candidate, confidence, breakdown))
            })
            .collect();

        matches.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(top_k);

        info!(matches = matches.len(), "matching complete");
        Ok(matches)
    }

    /// Category relevance from the task features, boosted when the
    /// candidate sits in an explicitly requested category.
    fn metadata_score(
        &self,
        candidate: &HybridCandidate,
        category_filter: Option<Category>,
        features: &docmatch_core::features::TaskFeatures,
    ) -> f64 {
        let mut score = features.relevance(candidate.category);
        if category_filter == Some(candidate.category) {
            score = (score * self.config.category_filter_boost).min(1.0);
        }
        score
    }

    fn build_match(
        &self,
        candidate: &HybridCandidate,
        confidence: f64,
        breakdown: ScoreBreakdown,
    ) -> DocumentMatch {
        let reasoning =
            explain::explain_match(&candidate.title, candidate.category, confidence, &breakdown);
        let suggestion = explain::suggest_action(confidence);

        DocumentMatch {
            document_id: candidate.document_id,
            title: candidate.title.clone(),
            category: candidate.category,
            confidence,
            score_breakdown: breakdown,
            matched_excerpt: candidate.text.chars().take(EXCERPT_CHARS).collect(),
            reasoning,
            suggested_action: suggestion.action,
            action_reasoning: suggestion.reasoning,
        }
    }
}
