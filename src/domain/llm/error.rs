//! Failure taxonomy for calls to the language-model provider

use thiserror::Error;

/// Errors surfaced by a chat-completion client.
///
/// Every variant knows the HTTP status it should be reported with and the
/// machine-readable code used in structured error bodies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LlmError {
    /// No credential configured; raised before any attempt is made
    #[error("LLM service is not configured. Set LLM_API_KEY in your environment.")]
    NotConfigured,

    /// The provider kept throttling us until the attempt budget ran out
    #[error("LLM rate limit exceeded. Please try again in a few seconds.")]
    RateLimitedUpstream,

    /// No successful response within the attempt budget
    #[error("LLM request timed out. Please try again.")]
    Timeout,

    /// Provider answered with a 5xx-class status
    #[error("LLM provider server error ({status})")]
    TransientServer { status: u16 },

    /// Any other non-success answer, never retried
    #[error("LLM provider error ({status})")]
    Permanent { status: u16, message: String },
}

impl LlmError {
    pub fn permanent(status: u16, message: impl Into<String>) -> Self {
        Self::Permanent {
            status,
            message: message.into(),
        }
    }

    /// Recommended transport status for this failure
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotConfigured => 503,
            Self::RateLimitedUpstream => 429,
            Self::Timeout => 504,
            Self::TransientServer { status } => *status,
            Self::Permanent { status, .. } => *status,
        }
    }

    /// Code placed in the `error` field of structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotConfigured => "llm_not_configured",
            Self::RateLimitedUpstream => "llm_rate_limited",
            Self::Timeout => "llm_timeout",
            Self::TransientServer { .. } | Self::Permanent { .. } => "llm_error",
        }
    }

    /// Whether another attempt may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimitedUpstream | Self::TransientServer { .. })
    }
}
