use docmatch_core::matching::{ScoreBreakdown, ScoreWeights};
use proptest::prelude::*;

proptest! {
    #[test]
    fn confidence_stays_in_unit_range(
        semantic in -10.0f64..10.0,
        keyword in -10.0f64..10.0,
        metadata in -10.0f64..10.0,
    ) {
        let breakdown = ScoreBreakdown {
            semantic_score: semantic,
            keyword_score: keyword,
            metadata_score: metadata,
            weights: ScoreWeights::default(),
        };
        let confidence = breakdown.confidence();
        prop_assert!((0.0..=1.0).contains(&confidence));
    }

    #[test]
    fn confidence_is_monotone_in_each_signal(
        semantic in 0.0f64..0.9,
        keyword in 0.0f64..1.0,
        metadata in 0.0f64..1.0,
        bump in 0.01f64..0.1,
    ) {
        let base = ScoreBreakdown {
            semantic_score: semantic,
            keyword_score: keyword,
            metadata_score: metadata,
            weights: ScoreWeights::default(),
        };
        let better = ScoreBreakdown {
            semantic_score: semantic + bump,
            ..base.clone()
        };
        prop_assert!(better.confidence() >= base.confidence());
    }
}
