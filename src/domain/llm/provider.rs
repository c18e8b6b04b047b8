use async_trait::async_trait;
use std::fmt::Debug;

use super::{ChatMessage, LlmError, LlmResult};

/// Trait for chat-completion clients
#[async_trait]
pub trait ChatCompletion: Send + Sync + Debug {
    /// Run one logical completion. Implementations may retry internally but
    /// keep no state between invocations.
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<LlmResult, LlmError>;

    /// Whether a credential is present
    fn is_configured(&self) -> bool;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted completion client. Outcomes are consumed in order; the last
    /// one repeats once the script runs out.
    #[derive(Debug)]
    pub struct MockChatCompletion {
        script: Mutex<VecDeque<Result<LlmResult, LlmError>>>,
        last: Mutex<Option<Result<LlmResult, LlmError>>>,
        calls: AtomicUsize,
        seen: Mutex<Vec<Vec<ChatMessage>>>,
        configured: bool,
    }

    impl MockChatCompletion {
        pub fn new() -> Self {
            Self {
                script: Mutex::new(VecDeque::new()),
                last: Mutex::new(None),
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
                configured: true,
            }
        }

        pub fn with_reply(self, content: impl Into<String>) -> Self {
            self.with_outcome(Ok(LlmResult::new(content, "mock-model")))
        }

        pub fn with_error(self, error: LlmError) -> Self {
            self.with_outcome(Err(error))
        }

        pub fn with_outcome(self, outcome: Result<LlmResult, LlmError>) -> Self {
            self.script.lock().unwrap().push_back(outcome);
            self
        }

        pub fn unconfigured(mut self) -> Self {
            self.configured = false;
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn seen_messages(&self) -> Vec<Vec<ChatMessage>> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl Default for MockChatCompletion {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl ChatCompletion for MockChatCompletion {
        async fn complete(
            &self,
            messages: Vec<ChatMessage>,
            _temperature: f32,
            _max_tokens: u32,
        ) -> Result<LlmResult, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(messages);

            if !self.configured {
                return Err(LlmError::NotConfigured);
            }

            let next = self.script.lock().unwrap().pop_front();
            let mut last = self.last.lock().unwrap();

            match next {
                Some(outcome) => {
                    *last = Some(outcome.clone());
                    outcome
                }
                None => last
                    .clone()
                    .unwrap_or_else(|| Err(LlmError::permanent(500, "No mock outcome configured"))),
            }
        }

        fn is_configured(&self) -> bool {
            self.configured
        }
    }
}
