use thiserror::Error;

use crate::domain::llm::LlmError;

/// Outward rejection of a clarification request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClarifyError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Too many requests. Please wait a minute.")]
    RateLimitExceeded,

    #[error(transparent)]
    Llm(#[from] LlmError),
}

impl ClarifyError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest(_) => 400,
            Self::RateLimitExceeded => 429,
            Self::Llm(err) => err.status_code(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalid_request",
            Self::RateLimitExceeded => "rate_limit_exceeded",
            Self::Llm(err) => err.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_failures_map_to_outward_codes() {
        let cases = [
            (LlmError::NotConfigured, 503, "llm_not_configured"),
            (LlmError::RateLimitedUpstream, 429, "llm_rate_limited"),
            (LlmError::Timeout, 504, "llm_timeout"),
            (LlmError::permanent(400, "bad"), 400, "llm_error"),
        ];

        for (llm_error, status, code) in cases {
            let err = ClarifyError::from(llm_error);
            assert_eq!(err.status_code(), status);
            assert_eq!(err.error_code(), code);
        }
    }

    #[test]
    fn test_local_rate_limit() {
        let err = ClarifyError::RateLimitExceeded;
        assert_eq!(err.status_code(), 429);
        assert_eq!(err.error_code(), "rate_limit_exceeded");
        assert_eq!(err.to_string(), "Too many requests. Please wait a minute.");
    }
}
