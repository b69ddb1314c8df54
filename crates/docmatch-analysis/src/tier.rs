//! Tier dispatch: rules first, AI only when the rules are unsure.

use tracing::{debug, warn};

use docmatch_core::config::AnalysisConfig;
use docmatch_core::errors::{AnalysisError, DocMatchResult};
use docmatch_core::features::TaskFeatures;
use docmatch_core::traits::CompletionClient;

use crate::fast_tier;
use crate::slow_tier;

/// Which extraction tier should handle a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Fast,
    Slow,
}

/// Pick a tier from the measured complexity. The fast tier's confidence
/// is the inverse of the complexity score; at or above the threshold the
/// rules handle it alone.
pub fn select_tier(complexity_score: f64, fast_tier_confidence: f64) -> Tier {
    if 1.0 - complexity_score >= fast_tier_confidence {
        Tier::Fast
    } else {
        Tier::Slow
    }
}

/// Two-tier task analyzer.
///
/// The fast tier always runs: its output is either the final answer or
/// the safety net when the slow tier times out. Without a configured
/// completion client the fast tier is simply all there is.
pub struct TaskAnalyzer {
    client: Option<Box<dyn CompletionClient>>,
    config: AnalysisConfig,
}

impl TaskAnalyzer {
    pub fn new(client: Option<Box<dyn CompletionClient>>, config: AnalysisConfig) -> Self {
        Self { client, config }
    }

    /// Rules-only analyzer.
    pub fn rule_based(config: AnalysisConfig) -> Self {
        Self {
            client: None,
            config,
        }
    }

    pub fn analyze(&self, text: &str) -> DocMatchResult<TaskFeatures> {
        self.analyze_task(text, None)
    }

    /// Like [`analyze`](Self::analyze), with the originating ticket key
    /// forwarded to the slow tier when one is known.
    pub fn analyze_task(
        &self,
        text: &str,
        ticket_key: Option<&str>,
    ) -> DocMatchResult<TaskFeatures> {
        let fast = fast_tier::analyze(text);
        let tier = select_tier(fast.complexity_score, self.config.fast_tier_confidence);
        debug!(
            complexity = fast.complexity_score,
            confidence = fast.confidence,
            ?tier,
            "task analysis dispatched"
        );

        if tier == Tier::Fast {
            return Ok(fast.features);
        }

        let Some(client) = self.client.as_deref() else {
            debug!("no completion client configured, keeping rule-based result");
            return Ok(fast.features);
        };

        match slow_tier::analyze(client, text, ticket_key) {
            Ok(features) => Ok(features),
            // A slow answer is worse than a rougher one.
            Err(AnalysisError::Timeout { seconds }) => {
                warn!(seconds, "extraction timed out, keeping rule-based result");
                Ok(fast.features)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docmatch_core::features::AnalysisMethod;

    struct StubClient {
        response: String,
    }

    impl CompletionClient for StubClient {
        fn complete(&self, _system: &str, _user: &str) -> Result<String, AnalysisError> {
            Ok(self.response.clone())
        }
    }

    struct TimeoutClient;

    impl CompletionClient for TimeoutClient {
        fn complete(&self, _system: &str, _user: &str) -> Result<String, AnalysisError> {
            Err(AnalysisError::Timeout { seconds: 30 })
        }
    }

    const COMPLEX_TASK: &str = "Maybe we should improve the payment module performance. \
        It is slow when the database has many transaction records. \
        If the api response takes too long, can we optimize the query? \
        Also the mobile app screen should be better. What do you think?";

    #[test]
    fn threshold_splits_tiers() {
        assert_eq!(select_tier(0.2, 0.5), Tier::Fast);
        assert_eq!(select_tier(0.5, 0.5), Tier::Fast);
        assert_eq!(select_tier(0.6, 0.5), Tier::Slow);
    }

    #[test]
    fn simple_task_never_calls_the_client() {
        struct PanicClient;
        impl CompletionClient for PanicClient {
            fn complete(&self, _: &str, _: &str) -> Result<String, AnalysisError> {
                panic!("slow tier must not run for simple tasks");
            }
        }
        let analyzer = TaskAnalyzer::new(Some(Box::new(PanicClient)), AnalysisConfig::default());
        let features = analyzer.analyze("Login ekranına yeni alan ekle").unwrap();
        assert_eq!(features.analysis_method, AnalysisMethod::RuleBased);
    }

    #[test]
    fn complex_task_uses_slow_tier() {
        let analyzer = TaskAnalyzer::new(
            Some(Box::new(StubClient {
                response: r#"{"keywords": ["payment"], "intent": "UPDATE_FEATURE"}"#.to_string(),
            })),
            AnalysisConfig::default(),
        );
        let features = analyzer.analyze(COMPLEX_TASK).unwrap();
        assert_eq!(features.analysis_method, AnalysisMethod::AiBacked);
    }

    #[test]
    fn timeout_falls_back_to_fast_tier() {
        let analyzer =
            TaskAnalyzer::new(Some(Box::new(TimeoutClient)), AnalysisConfig::default());
        let features = analyzer.analyze(COMPLEX_TASK).unwrap();
        assert_eq!(features.analysis_method, AnalysisMethod::RuleBased);
    }

    #[test]
    fn ticket_key_reaches_the_extraction_request() {
        use std::sync::{Arc, Mutex};

        struct RecordingClient {
            seen: Arc<Mutex<String>>,
        }
        impl CompletionClient for RecordingClient {
            fn complete(&self, _system: &str, user: &str) -> Result<String, AnalysisError> {
                *self.seen.lock().unwrap() = user.to_string();
                Ok(r#"{"keywords": ["payment"], "intent": "UPDATE_FEATURE"}"#.to_string())
            }
        }

        let seen = Arc::new(Mutex::new(String::new()));
        let analyzer = TaskAnalyzer::new(
            Some(Box::new(RecordingClient { seen: seen.clone() })),
            AnalysisConfig::default(),
        );
        analyzer.analyze_task(COMPLEX_TASK, Some("MOB-77")).unwrap();
        assert!(seen.lock().unwrap().contains("Ticket: MOB-77"));
    }

    #[test]
    fn missing_client_keeps_fast_result_for_complex_tasks() {
        let analyzer = TaskAnalyzer::rule_based(AnalysisConfig::default());
        let features = analyzer.analyze(COMPLEX_TASK).unwrap();
        assert_eq!(features.analysis_method, AnalysisMethod::RuleBased);
    }
}
