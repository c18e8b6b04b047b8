//! OpenAI-compatible chat-completion client with bounded retries

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::http_client::{HttpClientTrait, HttpResponse, TransportError};
use crate::domain::{ChatCompletion, ChatMessage, LlmError, LlmResult, Usage};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "mixtral-8x7b-32768";
pub const DEFAULT_MAX_RETRIES: u32 = 3;

const ERROR_BODY_PREVIEW_CHARS: usize = 200;

/// Settings for [`OpenAiCompatibleClient`]
#[derive(Debug, Clone)]
pub struct LlmClientConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// Total attempts per call, including the first
    pub max_retries: u32,
    /// Delay before the second attempt; doubles for each later one
    pub backoff_base: Duration,
}

impl Default for LlmClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_base: Duration::from_secs(1),
        }
    }
}

/// Why an attempt may be repeated
#[derive(Debug, Clone, PartialEq)]
enum RetryCause {
    Network(TransportError),
    Upstream(LlmError),
}

impl RetryCause {
    /// Error reported once no attempts remain
    fn into_terminal_error(self) -> LlmError {
        match self {
            Self::Upstream(LlmError::RateLimitedUpstream) => LlmError::RateLimitedUpstream,
            Self::Upstream(_) | Self::Network(_) => LlmError::Timeout,
        }
    }
}

#[derive(Debug)]
enum RetryState {
    Attempting { attempt: u32 },
    Retryable { attempt: u32, cause: RetryCause },
    Fatal(LlmError),
    Exhausted(RetryCause),
}

#[derive(Debug)]
enum AttemptFailure {
    Retry(RetryCause),
    Fatal(LlmError),
}

/// Client for any provider exposing `POST {base_url}/chat/completions`
#[derive(Debug)]
pub struct OpenAiCompatibleClient<C: HttpClientTrait> {
    client: C,
    auth_header: Option<String>,
    url: String,
    model: String,
    max_attempts: u32,
    backoff_base: Duration,
}

impl<C: HttpClientTrait> OpenAiCompatibleClient<C> {
    pub fn new(client: C, config: LlmClientConfig) -> Self {
        let auth_header = config
            .api_key
            .filter(|k| !k.trim().is_empty())
            .map(|k| format!("Bearer {}", k.trim()));
        let url = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));

        Self {
            client,
            auth_header,
            url,
            model: config.model,
            max_attempts: config.max_retries.max(1),
            backoff_base: config.backoff_base,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Delay after the given failed attempt: base * 2^(attempt-1)
    fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32 << attempt.saturating_sub(1).min(16);
        self.backoff_base.saturating_mul(factor)
    }

    fn build_request(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
        max_tokens: u32,
    ) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "messages": messages,
            "temperature": temperature,
            "max_tokens": max_tokens,
        })
    }

    async fn attempt(
        &self,
        auth_header: &str,
        body: &serde_json::Value,
    ) -> Result<LlmResult, AttemptFailure> {
        let headers = vec![
            ("Authorization", auth_header),
            ("Content-Type", "application/json"),
        ];

        match self.client.post_json(&self.url, headers, body).await {
            Ok(response) => self.classify(response),
            Err(e) => Err(AttemptFailure::Retry(RetryCause::Network(e))),
        }
    }

    fn classify(&self, response: HttpResponse) -> Result<LlmResult, AttemptFailure> {
        if response.is_success() {
            return self.parse_response(&response.body).map_err(AttemptFailure::Fatal);
        }

        match response.status {
            429 => Err(AttemptFailure::Retry(RetryCause::Upstream(
                LlmError::RateLimitedUpstream,
            ))),
            500 | 502 | 503 | 504 => Err(AttemptFailure::Retry(RetryCause::Upstream(
                LlmError::TransientServer {
                    status: response.status,
                },
            ))),
            status => Err(AttemptFailure::Fatal(LlmError::permanent(
                status,
                preview(&response.body),
            ))),
        }
    }

    fn parse_response(&self, body: &str) -> Result<LlmResult, LlmError> {
        let response: CompletionResponse = serde_json::from_str(body)
            .map_err(|e| LlmError::permanent(502, format!("Failed to parse response: {}", e)))?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| LlmError::permanent(502, "No choices in response"))?;

        let mut result = LlmResult::new(content.trim(), self.model.clone());
        if let Some(usage) = response.usage {
            result = result.with_usage(usage);
        }

        Ok(result)
    }
}

#[async_trait]
impl<C: HttpClientTrait> ChatCompletion for OpenAiCompatibleClient<C> {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<LlmResult, LlmError> {
        let Some(auth_header) = self.auth_header.as_deref() else {
            warn!("LLM call attempted without a configured API key");
            return Err(LlmError::NotConfigured);
        };

        let body = self.build_request(&messages, temperature, max_tokens);
        let mut state = RetryState::Attempting { attempt: 1 };

        loop {
            state = match state {
                RetryState::Attempting { attempt } => {
                    debug!(attempt, max_attempts = self.max_attempts, "Calling LLM provider");

                    match self.attempt(auth_header, &body).await {
                        Ok(result) => {
                            info!(
                                attempt,
                                model = %result.model(),
                                chars = result.content().len(),
                                "LLM call succeeded"
                            );
                            return Ok(result);
                        }
                        Err(AttemptFailure::Retry(cause)) => RetryState::Retryable { attempt, cause },
                        Err(AttemptFailure::Fatal(e)) => RetryState::Fatal(e),
                    }
                }
                RetryState::Retryable { attempt, cause } => {
                    if attempt >= self.max_attempts {
                        RetryState::Exhausted(cause)
                    } else {
                        let delay = self.backoff(attempt);
                        warn!(
                            attempt,
                            max_attempts = self.max_attempts,
                            cause = ?cause,
                            delay_ms = delay.as_millis() as u64,
                            "LLM attempt failed, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        RetryState::Attempting {
                            attempt: attempt + 1,
                        }
                    }
                }
                RetryState::Fatal(e) => {
                    warn!(status = e.status_code(), error = %e, "LLM call failed permanently");
                    return Err(e);
                }
                RetryState::Exhausted(cause) => {
                    warn!(
                        max_attempts = self.max_attempts,
                        cause = ?cause,
                        "LLM retries exhausted"
                    );
                    return Err(cause.into_terminal_error());
                }
            };
        }
    }

    fn is_configured(&self) -> bool {
        self.auth_header.is_some()
    }
}

fn preview(body: &str) -> String {
    body.chars().take(ERROR_BODY_PREVIEW_CHARS).collect()
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}
