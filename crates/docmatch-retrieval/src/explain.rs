//! Template-based match explanations and action suggestions.
//!
//! Explanations are produced for business analysts and are written in
//! Turkish, matching the rest of the documentation workflow. Everything
//! here is rule-based; no model call is involved.

use docmatch_core::category::Category;
use docmatch_core::matching::{ActionSuggestion, ScoreBreakdown, SuggestedAction};

/// One-paragraph explanation of why a document matched.
pub fn explain_match(title: &str, category: Category, confidence: f64, scores: &ScoreBreakdown) -> String {
    let match_reason = if scores.semantic_score > scores.keyword_score {
        "içerik anlamsal olarak benzer"
    } else {
        "anahtar kelime eşleşmeleri güçlü"
    };

    let confidence_msg = if confidence > 0.75 {
        "Yüksek eşleşme skoruna sahip."
    } else if confidence > 0.5 {
        "Orta seviye eşleşme skoruna sahip."
    } else {
        "Düşük eşleşme skoruna sahip, değerlendirme gerekebilir."
    };

    format!(
        "{title} ({}) dokümeni görevinizle ilgili görünüyor - {match_reason}. {confidence_msg}",
        category.as_str().to_uppercase()
    )
}

/// Recommend updating the matched document or creating a new one.
///
/// High confidence means the document already covers the area; low
/// confidence means nothing existing really fits. `ExtendDocument` is
/// reserved for a reviewer override and never produced by the rules.
pub fn suggest_action(confidence: f64) -> ActionSuggestion {
    let (action, reasoning) = if confidence > 0.75 {
        (
            SuggestedAction::UpdateExisting,
            "Doküman görevinizi zaten kapsıyor. Mevcut dokümana ekleme yapılabilir.",
        )
    } else if confidence < 0.4 {
        (
            SuggestedAction::CreateNew,
            "Mevcut dokümanlar görevinizi tam olarak kapsamıyor. Yeni doküman oluşturulması önerilir.",
        )
    } else if confidence > 0.5 {
        (
            SuggestedAction::UpdateExisting,
            "Doküman ilgili görünüyor. Değerlendirme yapılabilir.",
        )
    } else {
        (
            SuggestedAction::CreateNew,
            "Yeni doküman oluşturulması önerilir.",
        )
    };

    ActionSuggestion {
        action,
        reasoning: reasoning.to_string(),
        sections_to_update: Vec::new(),
        confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docmatch_core::matching::ScoreWeights;

    fn breakdown(semantic: f64, keyword: f64) -> ScoreBreakdown {
        ScoreBreakdown {
            semantic_score: semantic,
            keyword_score: keyword,
            metadata_score: 0.5,
            weights: ScoreWeights::default(),
        }
    }

    #[test]
    fn semantic_dominant_match_is_explained_as_semantic() {
        let text = explain_match("Login Spec", Category::Spec, 0.8, &breakdown(0.9, 0.3));
        assert!(text.contains("anlamsal olarak benzer"));
        assert!(text.contains("Login Spec (SPEC)"));
        assert!(text.contains("Yüksek eşleşme"));
    }

    #[test]
    fn keyword_dominant_match_is_explained_as_keyword() {
        let text = explain_match("Auth Design", Category::Design, 0.6, &breakdown(0.2, 0.9));
        assert!(text.contains("anahtar kelime eşleşmeleri güçlü"));
        assert!(text.contains("Orta seviye"));
    }

    #[test]
    fn low_confidence_warns_the_reader() {
        let text = explain_match("Old Spec", Category::Spec, 0.35, &breakdown(0.3, 0.2));
        assert!(text.contains("Düşük eşleşme"));
    }

    #[test]
    fn action_thresholds() {
        assert_eq!(suggest_action(0.80).action, SuggestedAction::UpdateExisting);
        assert_eq!(suggest_action(0.60).action, SuggestedAction::UpdateExisting);
        // Exactly 0.5 is not "above the midpoint", so it stays CreateNew.
        assert_eq!(suggest_action(0.50).action, SuggestedAction::CreateNew);
        assert_eq!(suggest_action(0.45).action, SuggestedAction::CreateNew);
        assert_eq!(suggest_action(0.20).action, SuggestedAction::CreateNew);
    }

    #[test]
    fn suggestion_carries_the_confidence_through() {
        let suggestion = suggest_action(0.66);
        assert_eq!(suggestion.confidence, 0.66);
        assert!(suggestion.sections_to_update.is_empty());
    }
}
