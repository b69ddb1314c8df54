//! Rule-based feature extraction: instant and free.
//!
//! Produces the same feature shape as the AI tier, plus a confidence
//! score (the inverse of the measured complexity) that the dispatcher
//! uses to decide whether the result is trustworthy on its own.

use std::sync::LazyLock;

use regex::Regex;

use docmatch_core::category::Category;
use docmatch_core::constants::{MAX_ENTITIES, MAX_KEYWORDS, MAX_QUERY_TERMS};
use docmatch_core::features::{AnalysisMethod, Complexity, Intent, TaskFeatures};

use crate::dictionaries::{
    INTENT_KEYWORDS, STOP_WORDS, TECHNICAL_TERMS, TECH_RELEVANCE_KEYWORDS, TEST_KEYWORDS,
};
use crate::metrics::ComplexityMetrics;

/// "X sayfası", "Y ekranı", "Z modülü" and the English equivalents.
static SCOPE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)(\w+)\s+(?:sayfası|sayfasına|sayfasında)",
        r"(?i)(\w+)\s+(?:ekranı|ekranına|ekranında)",
        r"(?i)(\w+)\s+(?:modülü|modülüne|modülünde)",
        r"(?i)(\w+)\s+(?:screen|page|module)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// A fast-tier result: the features plus how much to trust them.
#[derive(Debug, Clone)]
pub struct FastAnalysis {
    pub features: TaskFeatures,
    pub complexity_score: f64,
    /// Inverse of the complexity score. Simple requests are exactly the
    /// ones rules handle well.
    pub confidence: f64,
}

/// Extract features from a task description without any model call.
pub fn analyze(text: &str) -> FastAnalysis {
    let lower = text.to_lowercase();

    let keywords = extract_keywords(&lower);
    let intent = detect_intent(&lower);
    let entities = extract_entities(&lower);
    let scope = extract_scope(text, &lower, &keywords);
    let category_relevance = category_relevance(&lower);
    let search_query = build_search_query(&scope, &entities, &keywords);

    let metrics = ComplexityMetrics::measure(text);
    let complexity_score = metrics.calculate_score();

    FastAnalysis {
        features: TaskFeatures {
            keywords,
            intent,
            scope,
            entities,
            category_relevance,
            complexity: Complexity::from_score(complexity_score),
            search_query,
            analysis_method: AnalysisMethod::RuleBased,
        },
        complexity_score,
        confidence: 1.0 - complexity_score,
    }
}

/// Lowercased words longer than two characters, minus stopwords,
/// deduplicated in order of first appearance.
fn extract_keywords(lower: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut keywords = Vec::new();
    for word in lower.split(|c: char| !c.is_alphanumeric() && c != '_') {
        if word.chars().count() <= 2 || STOP_WORDS.contains(&word) {
            continue;
        }
        if seen.insert(word.to_string()) {
            keywords.push(word.to_string());
        }
        if keywords.len() == MAX_KEYWORDS {
            break;
        }
    }
    keywords
}

/// The intent with the most marker hits, first-listed wins ties.
fn detect_intent(lower: &str) -> Intent {
    let mut best = Intent::AddFeature;
    let mut best_score = 0;
    for (intent, markers) in INTENT_KEYWORDS {
        let score = markers.iter().filter(|m| lower.contains(*m)).count();
        if score > best_score {
            best = *intent;
            best_score = score;
        }
    }
    best
}

/// Scope resolution order: explicit "<name> screen/page/module" phrase,
/// then the first technical term present, then the first keyword.
fn extract_scope(text: &str, lower: &str, keywords: &[String]) -> String {
    for pattern in SCOPE_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            if let Some(m) = caps.get(1) {
                return capitalize(m.as_str());
            }
        }
    }
    for term in TECHNICAL_TERMS {
        if lower.contains(term) {
            return capitalize(term);
        }
    }
    keywords
        .first()
        .map(|k| capitalize(k))
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Technical terms present in the text, title-cased, at most five.
fn extract_entities(lower: &str) -> Vec<String> {
    TECHNICAL_TERMS
        .iter()
        .filter(|t| lower.contains(*t))
        .map(|t| title_case(t))
        .take(MAX_ENTITIES)
        .collect()
}

/// Category priors, shifted when the text leans toward test or technical
/// vocabulary. Technical markers win when both are present.
fn category_relevance(lower: &str) -> std::collections::HashMap<Category, f64> {
    let mut relevance = std::collections::HashMap::from([
        (Category::Spec, 0.7),
        (Category::Design, 0.5),
        (Category::TestSuite, 0.4),
    ]);

    if TEST_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        relevance.insert(Category::TestSuite, 0.9);
        relevance.insert(Category::Design, 0.6);
        relevance.insert(Category::Spec, 0.5);
    }
    if TECH_RELEVANCE_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        relevance.insert(Category::Design, 0.9);
        relevance.insert(Category::Spec, 0.6);
        relevance.insert(Category::TestSuite, 0.5);
    }
    relevance
}

/// Scope, then entities, then the keywords not already covered by
/// either. Terms dedupe case-insensitively and cap at
/// `MAX_QUERY_TERMS`.
fn build_search_query(scope: &str, entities: &[String], keywords: &[String]) -> String {
    let mut seen = std::collections::HashSet::new();
    let mut parts: Vec<String> = Vec::new();
    let mut push = |term: &str| {
        if seen.insert(term.to_lowercase()) {
            parts.push(term.to_string());
        }
    };

    if !scope.eq_ignore_ascii_case("unknown") {
        push(scope);
    }
    for entity in entities {
        push(entity);
    }

    let scope_lower = scope.to_lowercase();
    let entities_lower: Vec<String> = entities.iter().map(|e| e.to_lowercase()).collect();
    for kw in keywords {
        if !scope_lower.contains(kw.as_str()) && !entities_lower.iter().any(|e| e == kw) {
            push(kw);
        }
    }

    parts.truncate(MAX_QUERY_TERMS);
    parts.join(" ")
}

/// Uppercase the first letter, lowercase the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Capitalize every whitespace-separated word.
fn title_case(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}
