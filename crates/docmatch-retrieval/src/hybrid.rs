//! Hybrid search: semantic chunk retrieval fused with keyword scoring.
//!
//! The semantic side searches the vector index (oversampled 2x so
//! fusion has material to work with) and keeps each document's best
//! chunk. The lexical side then scores the query against those same
//! chunk texts. Both score sets are min-max normalized before the
//! weighted fusion `alpha * keyword + (1 - alpha) * semantic`.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use docmatch_core::category::Category;
use docmatch_core::config::SearchConfig;
use docmatch_core::errors::DocMatchResult;
use docmatch_embeddings::EmbeddingEngine;
use docmatch_index::{SearchHit, VectorIndex};

use crate::lexical;

/// One fused candidate, at document granularity.
#[derive(Debug, Clone)]
pub struct HybridCandidate {
    pub document_id: i64,
    pub title: String,
    pub category: Category,
    pub version: String,
    /// Text of the document's best-matching chunk.
    pub text: String,
    /// Normalized semantic score in [0, 1].
    pub semantic_score: f64,
    /// Normalized keyword score in [0, 1].
    pub keyword_score: f64,
    /// `alpha * keyword + (1 - alpha) * semantic`.
    pub combined_score: f64,
}

pub struct HybridSearcher {
    index: Arc<VectorIndex>,
    embeddings: Arc<EmbeddingEngine>,
    config: SearchConfig,
}

impl HybridSearcher {
    pub fn new(
        index: Arc<VectorIndex>,
        embeddings: Arc<EmbeddingEngine>,
        config: SearchConfig,
    ) -> Self {
        Self {
            index,
            embeddings,
            config,
        }
    }

    /// Search one category, or all of them when `category` is `None`.
    pub fn search(
        &self,
        query: &str,
        category: Option<Category>,
        top_k: usize,
    ) -> DocMatchResult<Vec<HybridCandidate>> {
        let categories: &[Category] = match category {
            Some(ref c) => std::slice::from_ref(c),
            None => &Category::ALL,
        };

        let embedding = self.embeddings.embed(query)?;

        // Best chunk per document across the searched categories.
        let mut best: HashMap<(Category, i64), SearchHit> = HashMap::new();
        for &cat in categories {
            for hit in self.index.search(cat, &embedding, top_k * 2, None)? {
                if hit.similarity < self.config.similarity_threshold {
                    continue;
                }
                let key = (cat, hit.document_id);
                let keep = match best.get(&key) {
                    Some(existing) => hit.similarity > existing.similarity,
                    None => true,
                };
                if keep {
                    best.insert(key, hit);
                }
            }
        }

        if best.is_empty() {
            debug!(query_len = query.len(), "hybrid search found no candidates");
            return Ok(Vec::new());
        }

        let mut hits: Vec<(Category, SearchHit)> = best
            .into_iter()
            .map(|((cat, _), hit)| (cat, hit))
            .collect();
        // Deterministic order before scoring.
        hits.sort_by_key(|(cat, hit)| (cat.as_str(), hit.document_id));

        let texts: Vec<&str> = hits.iter().map(|(_, h)| h.text.as_str()).collect();
        let keyword_raw = lexical::score_documents(query, &texts);
        let semantic_raw: Vec<f64> = hits.iter().map(|(_, h)| h.similarity).collect();

        let keyword_norm = min_max_normalize(&keyword_raw);
        let semantic_norm = min_max_normalize(&semantic_raw);

        let alpha = self.config.alpha;
        let mut candidates: Vec<HybridCandidate> = hits
            .iter()
            .enumerate()
            .map(|(i, (cat, hit))| HybridCandidate {
                document_id: hit.document_id,
                title: hit
                    .metadata
                    .get("title")
                    .cloned()
                    .unwrap_or_else(|| "Unknown".to_string()),
                category: *cat,
                version: hit.metadata.get("version").cloned().unwrap_or_default(),
                text: hit.text.clone(),
                semantic_score: semantic_norm[i],
                keyword_score: keyword_norm[i],
                combined_score: alpha * keyword_norm[i] + (1.0 - alpha) * semantic_norm[i],
            })
            .collect();

        candidates.sort_by(|a, b| {
            b.combined_score
                .partial_cmp(&a.combined_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        candidates.truncate(top_k);

        debug!(
            query_len = query.len(),
            candidates = candidates.len(),
            alpha,
            "hybrid search complete"
        );
        Ok(candidates)
    }
}

/// Scale scores into [0, 1]. A constant set normalizes to all zeros,
/// matching how a no-signal ranking should read.
fn min_max_normalize(scores: &[f64]) -> Vec<f64> {
    let Some(max) = scores.iter().copied().reduce(f64::max) else {
        return Vec::new();
    };
    let min = scores.iter().copied().fold(max, f64::min);
    let range = max - min;
    if range == 0.0 {
        return vec![0.0; scores.len()];
    }
    scores.iter().map(|s| (s - min) / range).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_spans_unit_interval() {
        let normalized = min_max_normalize(&[0.2, 0.5, 0.8]);
        assert_eq!(normalized[0], 0.0);
        assert_eq!(normalized[2], 1.0);
        assert!((normalized[1] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn constant_scores_normalize_to_zero() {
        assert_eq!(min_max_normalize(&[0.4, 0.4]), vec![0.0, 0.0]);
        assert_eq!(min_max_normalize(&[]), Vec::<f64>::new());
    }
}
