//! Query complexity measurement.
//!
//! The score decides which extraction tier handles a task: simple, short
//! requests stay on the free rule-based tier, while long, ambiguous or
//! multi-condition requests go to the AI tier.

use crate::dictionaries::{AMBIGUOUS_WORDS, CONDITIONAL_WORDS, NEGATION_WORDS, TECHNICAL_TERMS};

/// Raw counts feeding the complexity score.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexityMetrics {
    pub sentence_count: usize,
    pub total_words: usize,
    pub avg_sentence_length: f64,
    pub question_count: usize,
    pub technical_term_count: usize,
    pub ambiguous_word_count: usize,
    pub has_conditional: bool,
    pub has_negation: bool,
}

impl ComplexityMetrics {
    /// Measure a task description.
    pub fn measure(text: &str) -> ComplexityMetrics {
        let sentence_count = text
            .split(['.', '!', '?'])
            .filter(|s| !s.trim().is_empty())
            .count();

        let total_words = text
            .split(|c: char| !c.is_alphanumeric() && c != '_')
            .filter(|w| !w.is_empty())
            .count();

        let avg_sentence_length = if sentence_count > 0 {
            total_words as f64 / sentence_count as f64
        } else {
            0.0
        };

        let lower = text.to_lowercase();
        let technical_term_count = TECHNICAL_TERMS.iter().filter(|t| lower.contains(*t)).count();
        let ambiguous_word_count = AMBIGUOUS_WORDS.iter().filter(|w| lower.contains(*w)).count();

        ComplexityMetrics {
            sentence_count,
            total_words,
            avg_sentence_length,
            question_count: text.matches('?').count(),
            technical_term_count,
            ambiguous_word_count,
            has_conditional: CONDITIONAL_WORDS.iter().any(|w| lower.contains(w)),
            has_negation: NEGATION_WORDS.iter().any(|w| lower.contains(w)),
        }
    }

    /// Complexity score in [0, 1]. Higher means the rule-based tier is
    /// less likely to get the analysis right.
    ///
    /// Weight caps per signal: sentences 0.3, length 0.2, technical
    /// vocabulary 0.2, ambiguity 0.15, questions 0.1, conditionals and
    /// negations 0.05 combined.
    pub fn calculate_score(&self) -> f64 {
        let mut score: f64 = 0.0;

        if self.sentence_count > 3 {
            score += 0.3;
        } else if self.sentence_count > 2 {
            score += 0.2;
        } else if self.sentence_count > 1 {
            score += 0.1;
        }

        if self.total_words > 30 {
            score += 0.2;
        } else if self.total_words > 20 {
            score += 0.1;
        }

        if self.technical_term_count > 3 {
            score += 0.2;
        } else if self.technical_term_count > 1 {
            score += 0.1;
        }

        if self.ambiguous_word_count > 2 {
            score += 0.15;
        } else if self.ambiguous_word_count > 0 {
            score += 0.08;
        }

        if self.question_count > 1 {
            score += 0.1;
        } else if self.question_count > 0 {
            score += 0.05;
        }

        if self.has_conditional {
            score += 0.03;
        }
        if self.has_negation {
            score += 0.02;
        }

        score.min(1.0)
    }
}
