//! Rate limiting infrastructure

mod rate_limiter;

pub use rate_limiter::{
    DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW, RateLimitConfig, RateLimitResult, RateLimiter,
};
