//! Sparse TF-IDF keyword scoring.
//!
//! The lexical side of hybrid search. Vectors live in term space as
//! HashMaps, built over just the candidate set handed in, so IDF always
//! reflects the corpus actually being ranked.

use std::collections::{HashMap, HashSet};

/// Mixed Turkish/English stopwords dropped before scoring.
const STOPWORDS: &[&str] = &[
    "bir", "bu", "ve", "için", "ile", "olarak", "ise", "gibi", "the", "is", "at", "which", "on",
    "and", "or", "not", "are", "was",
];

/// Lowercased alphanumeric tokens of three or more characters.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|t| t.chars().count() >= 3 && !STOPWORDS.contains(t))
        .map(str::to_string)
        .collect()
}

/// Score a query against each document text. Returns one raw TF-IDF
/// cosine score per document, in input order.
pub fn score_documents(query: &str, documents: &[&str]) -> Vec<f64> {
    let query_tokens = tokenize(query);
    if query_tokens.is_empty() || documents.is_empty() {
        return vec![0.0; documents.len()];
    }

    let doc_tokens: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d)).collect();
    let idf = compute_idf(&doc_tokens);

    let query_vec = tfidf_vector(&term_frequencies(&query_tokens), &idf);
    doc_tokens
        .iter()
        .map(|tokens| {
            let doc_vec = tfidf_vector(&term_frequencies(tokens), &idf);
            cosine_similarity(&query_vec, &doc_vec)
        })
        .collect()
}

/// TF(t) = count(t) / total terms.
fn term_frequencies(tokens: &[String]) -> HashMap<String, f64> {
    let total = tokens.len() as f64;
    let mut counts: HashMap<String, f64> = HashMap::new();
    for token in tokens {
        *counts.entry(token.clone()).or_default() += 1.0;
    }
    for value in counts.values_mut() {
        *value /= total;
    }
    counts
}

/// IDF(t) = ln(total docs / docs containing t).
fn compute_idf(documents: &[Vec<String>]) -> HashMap<String, f64> {
    let total = documents.len() as f64;
    let mut doc_freq: HashMap<String, f64> = HashMap::new();
    for tokens in documents {
        let unique: HashSet<&String> = tokens.iter().collect();
        for term in unique {
            *doc_freq.entry(term.clone()).or_default() += 1.0;
        }
    }
    doc_freq
        .into_iter()
        .map(|(term, freq)| (term, (total / freq).ln()))
        .collect()
}

fn tfidf_vector(tf: &HashMap<String, f64>, idf: &HashMap<String, f64>) -> HashMap<String, f64> {
    tf.iter()
        .map(|(term, tf_val)| (term.clone(), tf_val * idf.get(term).copied().unwrap_or(0.0)))
        .collect()
}

fn cosine_similarity(a: &HashMap<String, f64>, b: &HashMap<String, f64>) -> f64 {
    let dot: f64 = a
        .iter()
        .filter_map(|(term, va)| b.get(term).map(|vb| va * vb))
        .sum();
    if dot == 0.0 {
        return 0.0;
    }
    let norm_a: f64 = a.values().map(|v| v * v).sum::<f64>().sqrt();
    let norm_b: f64 = b.values().map(|v| v * v).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    // Rounding can nudge identical vectors past 1.0.
    (dot / (norm_a * norm_b)).min(1.0)
}
