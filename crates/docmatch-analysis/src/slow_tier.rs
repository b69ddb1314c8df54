//! AI-backed feature extraction for requests the rules cannot handle.
//!
//! The model is asked for a strict JSON object; whatever comes back goes
//! through `TaskFeatures::from_raw` for validation. A response that is
//! not JSON at all drops to a heuristic extraction instead of failing
//! the whole match request.

use tracing::warn;

use docmatch_core::constants::MAX_KEYWORDS;
use docmatch_core::errors::AnalysisError;
use docmatch_core::features::{
    default_relevance, AnalysisMethod, Complexity, Intent, RawTaskFeatures, TaskFeatures,
};
use docmatch_core::traits::CompletionClient;

/// System prompt for the extraction call. The output contract mirrors
/// `RawTaskFeatures`.
pub const EXTRACTION_PROMPT: &str = r#"You are a requirements analysis expert. Analyze the task description and extract structured features used to find relevant existing documents.

Extract:

1. **keywords**: 3-10 important domain-specific keywords (e.g. "biometric", "authentication", "login")
2. **intent**: one of ADD_FEATURE, UPDATE_FEATURE, FIX_BUG, REFACTOR, DOCUMENTATION
3. **scope**: the affected component/module/screen (e.g. "Login Screen", "Payment Module")
4. **entities**: specific technical terms or proper nouns mentioned (e.g. "Face ID", "OAuth")
5. **category_relevance**: a relevance score (0.0-1.0) per document category:
   - spec: requirement specifications (features, user stories)
   - design: technical designs (architecture, services, endpoints)
   - test_suite: test-case sets (scenarios, test plans)
6. **complexity**: "low", "medium" or "high"
7. **search_query**: an optimized query (1-2 sentences) for finding relevant documents

Respond with exactly this JSON structure and nothing else:
{
  "keywords": ["keyword1", "keyword2"],
  "intent": "ADD_FEATURE",
  "scope": "Component Name",
  "entities": ["Entity1"],
  "category_relevance": {"spec": 0.9, "design": 0.7, "test_suite": 0.5},
  "complexity": "medium",
  "search_query": "optimized search query"
}"#;

/// Run the AI extraction. The ticket key, when known, rides along in
/// the user content so the model can pick up project context from it.
/// Transport-level failures surface as errors; a malformed response
/// body degrades to [`heuristic_fallback`].
pub fn analyze(
    client: &dyn CompletionClient,
    text: &str,
    ticket_key: Option<&str>,
) -> Result<TaskFeatures, AnalysisError> {
    let user_content = match ticket_key {
        Some(key) => format!("Ticket: {key}\nTask Description:\n{text}"),
        None => format!("Task Description:\n{text}"),
    };
    let response = client.complete(EXTRACTION_PROMPT, &user_content)?;

    match serde_json::from_str::<RawTaskFeatures>(response.trim()) {
        Ok(raw) => Ok(TaskFeatures::from_raw(raw)),
        Err(e) => {
            warn!(error = %e, "extraction response was not valid JSON, using heuristics");
            Ok(heuristic_fallback(text))
        }
    }
}

/// Last-resort extraction when the model response cannot be parsed:
/// long words as keywords, intent from a handful of verbs, the raw text
/// head as the query.
pub fn heuristic_fallback(text: &str) -> TaskFeatures {
    let lower = text.to_lowercase();
    let keywords: Vec<String> = lower
        .split_whitespace()
        .filter(|w| w.chars().count() > 4)
        .take(MAX_KEYWORDS)
        .map(str::to_string)
        .collect();

    let intent = if ["fix", "bug", "defect", "error"].iter().any(|w| lower.contains(w)) {
        Intent::FixBug
    } else if ["update", "modify", "change", "improve"].iter().any(|w| lower.contains(w)) {
        Intent::UpdateFeature
    } else if ["refactor", "cleanup", "optimize"].iter().any(|w| lower.contains(w)) {
        Intent::Refactor
    } else {
        Intent::AddFeature
    };

    TaskFeatures {
        keywords,
        intent,
        scope: "Unknown".to_string(),
        entities: Vec::new(),
        category_relevance: default_relevance(),
        complexity: Complexity::Medium,
        search_query: text.chars().take(200).collect(),
        analysis_method: AnalysisMethod::HeuristicFallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedClient {
        response: Result<String, AnalysisError>,
    }

    impl CompletionClient for CannedClient {
        fn complete(&self, _system: &str, _user: &str) -> Result<String, AnalysisError> {
            match &self.response {
                Ok(s) => Ok(s.clone()),
                Err(e) => Err(match e {
                    AnalysisError::Timeout { seconds } => AnalysisError::Timeout {
                        seconds: *seconds,
                    },
                    AnalysisError::Rejected { status } => AnalysisError::Rejected {
                        status: *status,
                    },
                    AnalysisError::Transport { reason } => AnalysisError::Transport {
                        reason: reason.clone(),
                    },
                }),
            }
        }
    }

    #[test]
    fn valid_json_becomes_ai_backed_features() {
        let client = CannedClient {
            response: Ok(r#"{
                "keywords": ["biometric", "login"],
                "intent": "UPDATE_FEATURE",
                "scope": "Login Screen",
                "entities": ["Face ID"],
                "category_relevance": {"spec": 0.9, "design": 0.6, "test_suite": 0.4},
                "complexity": "low",
                "search_query": "biometric login authentication"
            }"#
            .to_string()),
        };
        let features = analyze(&client, "add face id to login", None).unwrap();
        assert_eq!(features.analysis_method, AnalysisMethod::AiBacked);
        assert_eq!(features.intent, Intent::UpdateFeature);
        assert_eq!(features.scope, "Login Screen");
    }

    #[test]
    fn malformed_json_degrades_to_heuristics() {
        let client = CannedClient {
            response: Ok("Sure! Here is my analysis: the task is about login.".to_string()),
        };
        let features =
            analyze(&client, "improve the payment reconciliation process", None).unwrap();
        assert_eq!(features.analysis_method, AnalysisMethod::HeuristicFallback);
        assert_eq!(features.intent, Intent::UpdateFeature);
        assert!(features.keywords.contains(&"payment".to_string()));
    }

    #[test]
    fn transport_errors_propagate() {
        let client = CannedClient {
            response: Err(AnalysisError::Rejected { status: 429 }),
        };
        assert!(analyze(&client, "anything", None).is_err());
    }

    struct RecordingClient {
        seen: std::sync::Mutex<String>,
    }

    impl CompletionClient for RecordingClient {
        fn complete(&self, _system: &str, user: &str) -> Result<String, AnalysisError> {
            *self.seen.lock().unwrap() = user.to_string();
            Ok("{}".to_string())
        }
    }

    #[test]
    fn ticket_key_rides_along_with_the_task_text() {
        let client = RecordingClient {
            seen: std::sync::Mutex::new(String::new()),
        };
        analyze(&client, "odeme akisini guncelle", Some("PROJ-142")).unwrap();
        let sent = client.seen.lock().unwrap();
        assert!(sent.contains("Ticket: PROJ-142"));
        assert!(sent.contains("odeme akisini guncelle"));
    }

    #[test]
    fn missing_ticket_key_leaves_no_ticket_line() {
        let client = RecordingClient {
            seen: std::sync::Mutex::new(String::new()),
        };
        analyze(&client, "odeme akisini guncelle", None).unwrap();
        assert!(!client.seen.lock().unwrap().contains("Ticket:"));
    }

    #[test]
    fn fallback_query_is_text_head() {
        let long = "x".repeat(500);
        let features = heuristic_fallback(&long);
        assert_eq!(features.search_query.chars().count(), 200);
        assert_eq!(features.scope, "Unknown");
    }
}
