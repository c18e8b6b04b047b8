//! Text simplification pipeline
//!
//! Admission control, then cache lookup, then the language model. Only
//! successful completions are cached.

use std::sync::Arc;

use tracing::{debug, info, warn};
use validator::{Validate, ValidationErrors};

use crate::domain::cache::ClarifyCacheKey;
use crate::domain::clarify::{ClarifyError, ClarifyOutcome, ClarifyRequest};
use crate::domain::llm::ChatCompletion;
use crate::domain::prompt::PromptBuilder;
use crate::infrastructure::cache::ResponseCache;
use crate::infrastructure::rate_limit::RateLimiter;

pub const CLARIFY_TEMPERATURE: f32 = 0.3;
pub const CLARIFY_MAX_TOKENS: u32 = 1024;

/// Orchestrates rate limiting, caching and the completion call
#[derive(Debug)]
pub struct ClarifyPipeline {
    limiter: Arc<RateLimiter>,
    cache: Arc<ResponseCache>,
    llm: Arc<dyn ChatCompletion>,
    prompts: Arc<dyn PromptBuilder>,
}

impl ClarifyPipeline {
    pub fn new(
        limiter: Arc<RateLimiter>,
        cache: Arc<ResponseCache>,
        llm: Arc<dyn ChatCompletion>,
        prompts: Arc<dyn PromptBuilder>,
    ) -> Self {
        Self {
            limiter,
            cache,
            llm,
            prompts,
        }
    }

    pub async fn clarify(
        &self,
        request: &ClarifyRequest,
        client_identity: &str,
    ) -> Result<ClarifyOutcome, ClarifyError> {
        request
            .validate()
            .map_err(|e| ClarifyError::InvalidRequest(first_message(&e)))?;

        let admission = self.limiter.check_and_record(client_identity).await;
        if !admission.allowed {
            warn!(
                identity = %client_identity,
                limit = admission.limit,
                reset_in_secs = admission.reset_in.as_secs(),
                "Clarify request rate limited"
            );
            return Err(ClarifyError::RateLimitExceeded);
        }

        let key = ClarifyCacheKey::derive(&request.text, request.language, request.mode);

        if let Some(simplified) = self.cache.get(key.as_str()).await {
            debug!(key_prefix = %key.prefix(), "Clarify cache hit");
            return Ok(self.outcome(request, simplified, true));
        }

        let messages = self
            .prompts
            .build(request.text.trim(), request.language, request.mode);

        let result = self
            .llm
            .complete(messages, CLARIFY_TEMPERATURE, CLARIFY_MAX_TOKENS)
            .await
            .inspect_err(|e| {
                warn!(
                    key_prefix = %key.prefix(),
                    error_code = e.error_code(),
                    error = %e,
                    "Clarify completion failed"
                )
            })?;

        let simplified = result.into_content();
        self.cache.put(key.as_str(), simplified.clone()).await;

        info!(
            key_prefix = %key.prefix(),
            language = request.language.as_str(),
            mode = request.mode.as_str(),
            input_chars = request.text.chars().count(),
            output_chars = simplified.chars().count(),
            "Clarify request completed"
        );

        Ok(self.outcome(request, simplified, false))
    }

    fn outcome(&self, request: &ClarifyRequest, simplified: String, cached: bool) -> ClarifyOutcome {
        ClarifyOutcome {
            simplified,
            language: request.language,
            mode: request.mode,
            cached,
        }
    }
}

/// Message of the first failing rule
fn first_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string())
}
