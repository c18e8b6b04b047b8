//! Rate limiter implementation
//!
//! Provides sliding window admission control per client identity.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

pub const DEFAULT_MAX_REQUESTS: u32 = 20;
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// Limit applied to every identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_MAX_REQUESTS,
            window: DEFAULT_WINDOW,
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
        }
    }
}

/// Result of a rate limit check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitResult {
    /// Whether the request is allowed
    pub allowed: bool,
    /// Remaining requests in the current window
    pub remaining: u32,
    /// Total limit for the window
    pub limit: u32,
    /// Time until the oldest counted request leaves the window
    pub reset_in: Duration,
}

/// Sliding-window rate limiter keyed by client identity.
///
/// Identities are kept until the process exits; buckets are only pruned when
/// their identity is checked again.
#[derive(Debug)]
pub struct RateLimiter {
    buckets: Mutex<HashMap<String, VecDeque<Instant>>>,
    config: RateLimitConfig,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            buckets: Mutex::new(HashMap::new()),
            config,
        }
    }

    /// Admit and record a request, or reject it without recording
    pub async fn allow(&self, identity: &str) -> bool {
        self.check_and_record(identity).await.allowed
    }

    /// Check and record in one operation
    pub async fn check_and_record(&self, identity: &str) -> RateLimitResult {
        let now = Instant::now();
        let window = self.config.window;
        let limit = self.config.max_requests;

        let mut buckets = self.buckets.lock().await;
        let bucket = buckets.entry(identity.to_string()).or_default();

        while bucket
            .front()
            .is_some_and(|t| now.duration_since(*t) >= window)
        {
            bucket.pop_front();
        }

        let allowed = (bucket.len() as u64) < u64::from(limit);
        if allowed {
            bucket.push_back(now);
        }

        let reset_in = bucket
            .front()
            .map(|t| window.saturating_sub(now.duration_since(*t)))
            .unwrap_or(window);

        RateLimitResult {
            allowed,
            remaining: limit.saturating_sub(bucket.len() as u32),
            limit,
            reset_in,
        }
    }

    /// Number of identities seen so far
    pub async fn tracked_identities(&self) -> usize {
        self.buckets.lock().await.len()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}
