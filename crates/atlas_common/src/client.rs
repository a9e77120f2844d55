//! Completion client abstraction.
//!
//! One trait, two implementations: `HttpCompletionClient` talks to an
//! OpenAI-compatible chat completions backend, `ScriptedClient` is the
//! deterministic double used by tests. Each call is independent and carries
//! the full instruction plus input; the backend is stateless from this
//! system's perspective. No retries and no caching at this layer.

use crate::config::AtlasConfig;
use crate::error::CompletionError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// A single request/response exchange with a text-completion backend.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Run one completion: `instruction` is the fixed role prompt,
    /// `input` is the subject text. Returns the raw completion text.
    async fn complete(&self, instruction: &str, input: &str) -> Result<String, CompletionError>;
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

/// HTTP client for an OpenAI-compatible chat completions endpoint.
pub struct HttpCompletionClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    timeout_secs: u64,
}

impl HttpCompletionClient {
    pub fn new(config: &AtlasConfig) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CompletionError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            timeout_secs: config.timeout_secs,
        })
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(&self, instruction: &str, input: &str) -> Result<String, CompletionError> {
        let url = format!("{}/chat/completions", self.endpoint);

        let request_body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: instruction.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: input.to_string(),
                },
            ],
            stream: false,
        };

        let mut request = self.client.post(&url).json(&request_body);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                CompletionError::Transport(format!(
                    "request timed out after {}s",
                    self.timeout_secs
                ))
            } else {
                CompletionError::Transport(format!("request failed: {}", e))
            }
        })?;

        if !response.status().is_success() {
            return Err(CompletionError::Upstream(format!(
                "HTTP {} from backend",
                response.status()
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Upstream(format!("unparseable response: {}", e)))?;

        let text = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(CompletionError::EmptyResponse)?;

        Ok(text)
    }
}

/// One recorded call against a `ScriptedClient`.
#[derive(Debug, Clone)]
pub struct CallRecord {
    /// The instruction the call carried.
    pub instruction: String,
    /// The input the call carried.
    pub input: String,
    /// When the call was observed.
    pub at: Instant,
}

struct ScriptRule {
    fragment: String,
    delay: Duration,
    response: Result<String, CompletionError>,
}

/// Scripted client for tests: responses are keyed by a fragment of the
/// instruction, so concurrent callers get deterministic answers regardless
/// of scheduling order. Every call is logged with a timestamp.
pub struct ScriptedClient {
    rules: Vec<ScriptRule>,
    calls: Mutex<Vec<CallRecord>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Register a response for any instruction containing `fragment`.
    /// Rules are checked in registration order; first match wins.
    pub fn on(self, fragment: &str, response: Result<String, CompletionError>) -> Self {
        self.on_delayed(fragment, Duration::ZERO, response)
    }

    /// Like `on`, but the response is held back for `delay` so tests can
    /// force completion order to differ from declaration order.
    pub fn on_delayed(
        mut self,
        fragment: &str,
        delay: Duration,
        response: Result<String, CompletionError>,
    ) -> Self {
        self.rules.push(ScriptRule {
            fragment: fragment.to_string(),
            delay,
            response,
        });
        self
    }

    /// Number of completions observed so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Snapshot of every call observed so far.
    pub fn calls(&self) -> Vec<CallRecord> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for ScriptedClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, instruction: &str, input: &str) -> Result<String, CompletionError> {
        self.calls.lock().unwrap().push(CallRecord {
            instruction: instruction.to_string(),
            input: input.to_string(),
            at: Instant::now(),
        });

        for rule in &self.rules {
            if instruction.contains(rule.fragment.as_str()) {
                if !rule.delay.is_zero() {
                    tokio::time::sleep(rule.delay).await;
                }
                return rule.response.clone();
            }
        }

        Err(CompletionError::Upstream(format!(
            "no scripted response for instruction: {}",
            instruction
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_client_matches_fragment() {
        let client = ScriptedClient::new()
            .on("CAPITAL", Ok("Islamabad".to_string()))
            .on("LANGUAGE", Err(CompletionError::EmptyResponse));

        let capital = client.complete("Return only the CAPITAL.", "Pakistan").await;
        assert_eq!(capital.unwrap(), "Islamabad");

        let language = client.complete("Return only the LANGUAGE.", "Pakistan").await;
        assert!(language.is_err());

        assert_eq!(client.call_count(), 2);
    }

    #[tokio::test]
    async fn test_scripted_client_unmatched_is_upstream_error() {
        let client = ScriptedClient::new();
        let result = client.complete("anything", "Pakistan").await;
        assert!(matches!(result, Err(CompletionError::Upstream(_))));
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_scripted_client_records_inputs() {
        let client = ScriptedClient::new().on("CAPITAL", Ok("Oslo".to_string()));
        client.complete("CAPITAL lookup", "Norway").await.unwrap();

        let calls = client.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].input, "Norway");
    }
}
