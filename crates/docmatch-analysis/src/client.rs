//! Blocking HTTP client for the completion API.

use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use docmatch_core::config::AnalysisConfig;
use docmatch_core::errors::AnalysisError;
use docmatch_core::traits::CompletionClient;

/// Messages-API shaped completion client.
pub struct HttpCompletionClient {
    http: reqwest::blocking::Client,
    api_url: String,
    model: String,
    timeout_secs: u64,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

impl HttpCompletionClient {
    pub fn new(config: &AnalysisConfig) -> Result<Self, AnalysisError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AnalysisError::Transport {
                reason: e.to_string(),
            })?;
        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            model: config.model.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    fn map_send_error(&self, e: reqwest::Error) -> AnalysisError {
        if e.is_timeout() {
            AnalysisError::Timeout {
                seconds: self.timeout_secs,
            }
        } else {
            AnalysisError::Transport {
                reason: e.to_string(),
            }
        }
    }
}

impl CompletionClient for HttpCompletionClient {
    fn complete(&self, system_prompt: &str, user_content: &str) -> Result<String, AnalysisError> {
        let body = json!({
            "model": self.model,
            "max_tokens": 1024,
            "system": system_prompt,
            "messages": [{ "role": "user", "content": user_content }],
        });

        debug!(model = %self.model, url = %self.api_url, "extraction request");
        let response = self
            .http
            .post(&self.api_url)
            .json(&body)
            .send()
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::Rejected {
                status: status.as_u16(),
            });
        }

        let parsed: CompletionResponse =
            response.json().map_err(|e| AnalysisError::Transport {
                reason: format!("malformed response envelope: {e}"),
            })?;

        Ok(parsed
            .content
            .first()
            .map(|block| block.text.clone())
            .unwrap_or_default())
    }
}
