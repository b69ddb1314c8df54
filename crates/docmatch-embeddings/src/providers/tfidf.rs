//! Hashed lexical embedding provider.
//!
//! Deterministic dense vectors for tests and air-gapped runs. Unigrams
//! and adjacent-word bigrams are hashed into fixed-dimension buckets,
//! weighted by in-text frequency and a term-length prior, and L2
//! normalized. The bigram buckets keep multi-word domain terms such as
//! "face id" or "test senaryosu" distinguishable from their parts. Far
//! less semantically rich than the neural model, but always available.

use std::collections::HashMap;

use docmatch_core::errors::DocMatchResult;
use docmatch_core::traits::EmbeddingProvider;

/// Fillers that carry no ranking signal in either language.
const SKIP_WORDS: &[&str] = &[
    "bir", "bu", "ve", "için", "ile", "gibi", "the", "and", "with", "for", "are", "was",
];

pub struct TfIdfProvider {
    dimensions: usize,
}

impl TfIdfProvider {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    /// Lowercased words of at least two characters, minus fillers, plus
    /// one bigram per adjacent pair.
    fn terms(text: &str) -> Vec<String> {
        let words: Vec<String> = text
            .split(|c: char| !c.is_alphanumeric() && c != '_')
            .filter(|w| w.chars().count() >= 2)
            .map(str::to_lowercase)
            .filter(|w| !SKIP_WORDS.contains(&w.as_str()))
            .collect();

        let mut terms = words.clone();
        for pair in words.windows(2) {
            terms.push(format!("{} {}", pair[0], pair[1]));
        }
        terms
    }

    /// FNV-1a bucket for a term.
    fn bucket(&self, term: &str) -> usize {
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in term.as_bytes() {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
        }
        (hash as usize) % self.dimensions
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let terms = Self::terms(text);
        if terms.is_empty() {
            return vec![0.0; self.dimensions];
        }

        let mut counts: HashMap<&str, f32> = HashMap::new();
        for term in &terms {
            *counts.entry(term.as_str()).or_default() += 1.0;
        }

        let total = terms.len() as f32;
        let mut vector = vec![0.0f32; self.dimensions];
        for (term, count) in &counts {
            // Longer terms are rarer; a length prior stands in for IDF.
            let weight = (count / total) * (1.0 + (term.chars().count() as f32).ln());
            vector[self.bucket(term)] += weight;
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

impl EmbeddingProvider for TfIdfProvider {
    fn embed(&self, text: &str) -> DocMatchResult<Vec<f32>> {
        Ok(self.vectorize(text))
    }

    fn embed_batch(&self, texts: &[String]) -> DocMatchResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "tfidf-hashed"
    }
}
