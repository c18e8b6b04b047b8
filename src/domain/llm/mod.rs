//! Language-model domain types and the completion seam

mod error;
mod message;
mod provider;
mod response;

pub use error::LlmError;
pub use message::{ChatMessage, MessageRole};
pub use provider::ChatCompletion;
pub use response::{LlmResult, Usage};

#[cfg(test)]
pub use provider::mock::MockChatCompletion;
