//! Infrastructure services

mod chat_service;
mod clarify_pipeline;

pub use chat_service::{CHAT_HISTORY_LIMIT, CHAT_MAX_TOKENS, CHAT_TEMPERATURE, ChatService};
pub use clarify_pipeline::{CLARIFY_MAX_TOKENS, CLARIFY_TEMPERATURE, ClarifyPipeline};
