//! Domain layer - Core business logic and entities

pub mod cache;
pub mod clarify;
pub mod error;
pub mod fingerprint;
pub mod llm;
pub mod prompt;
pub mod user;

pub use cache::ClarifyCacheKey;
pub use clarify::{ClarifyError, ClarifyOutcome, ClarifyRequest, Language, Mode};
pub use error::DomainError;
pub use fingerprint::{FingerprintMatcher, similarity_ratio};
pub use llm::{ChatCompletion, ChatMessage, LlmError, LlmResult, MessageRole, Usage};
pub use prompt::{PolicyPromptBuilder, PromptBuilder};
pub use user::{EmergencyContact, UserRecord, UserStore};
