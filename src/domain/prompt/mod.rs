//! Prompt construction for outbound completion calls

mod templates;

pub use templates::{ASSISTANT_SYSTEM_PROMPT, PolicyPromptBuilder};

use std::fmt::Debug;

use crate::domain::clarify::{Language, Mode};
use crate::domain::llm::ChatMessage;

/// Turns a clarification request into the conversation sent upstream.
/// Implementations must be pure.
pub trait PromptBuilder: Send + Sync + Debug {
    fn build(&self, text: &str, language: Language, mode: Mode) -> Vec<ChatMessage>;
}
