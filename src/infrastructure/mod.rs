//! Infrastructure layer - External service implementations

pub mod cache;
pub mod llm;
pub mod logging;
pub mod rate_limit;
pub mod services;
pub mod user;
