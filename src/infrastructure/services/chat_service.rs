//! Conversational pension assistant

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::llm::{ChatCompletion, ChatMessage, LlmError};
use crate::domain::prompt::ASSISTANT_SYSTEM_PROMPT;

pub const CHAT_TEMPERATURE: f32 = 0.7;
pub const CHAT_MAX_TOKENS: u32 = 512;
/// Most recent client messages forwarded upstream
pub const CHAT_HISTORY_LIMIT: usize = 10;

const NOT_CONFIGURED_REPLY: &str = "Chat service is not configured yet. Please ask the administrator to set the LLM_API_KEY in the environment.";
const UPSTREAM_TROUBLE_REPLY: &str =
    "I'm having trouble connecting to my brain right now. Please try again in a moment.";
const GENERIC_FAILURE_REPLY: &str = "Something went wrong on my end. Please try again shortly.";

/// Answers free-form questions; failures become a polite reply
#[derive(Debug)]
pub struct ChatService {
    llm: Arc<dyn ChatCompletion>,
}

impl ChatService {
    pub fn new(llm: Arc<dyn ChatCompletion>) -> Self {
        Self { llm }
    }

    pub async fn reply(&self, history: Vec<ChatMessage>) -> String {
        let skip = history.len().saturating_sub(CHAT_HISTORY_LIMIT);
        let mut messages = Vec::with_capacity(CHAT_HISTORY_LIMIT + 1);
        messages.push(ChatMessage::system(ASSISTANT_SYSTEM_PROMPT));
        messages.extend(history.into_iter().skip(skip));

        match self
            .llm
            .complete(messages, CHAT_TEMPERATURE, CHAT_MAX_TOKENS)
            .await
        {
            Ok(result) => {
                info!(chars = result.content().len(), "Chat reply generated");
                result.into_content()
            }
            Err(e) => {
                warn!(error_code = e.error_code(), error = %e, "Chat completion failed");
                fallback_reply(&e).to_string()
            }
        }
    }
}

fn fallback_reply(error: &LlmError) -> &'static str {
    match error {
        LlmError::NotConfigured => NOT_CONFIGURED_REPLY,
        LlmError::RateLimitedUpstream
        | LlmError::TransientServer { .. }
        | LlmError::Permanent { .. } => UPSTREAM_TROUBLE_REPLY,
        LlmError::Timeout => GENERIC_FAILURE_REPLY,
    }
}
