//! Bounded LRU cache with lazy TTL expiry for simplified responses

use std::num::NonZeroUsize;
use std::time::Duration;

use lru::LruCache;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

pub const DEFAULT_MAX_ENTRIES: usize = 128;
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Configuration for [`ResponseCache`]
#[derive(Debug, Clone)]
pub struct ResponseCacheConfig {
    /// Maximum number of entries; at least one is always kept
    pub max_entries: usize,
    /// Age at which an entry stops being served
    pub ttl: Duration,
}

impl Default for ResponseCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            ttl: DEFAULT_TTL,
        }
    }
}

impl ResponseCacheConfig {
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    stored_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() >= ttl
    }
}

/// Thread-safe response cache.
///
/// Reads refresh recency; an expired entry is dropped by the read that finds
/// it. Writes past capacity evict the least recently used entry.
#[derive(Debug)]
pub struct ResponseCache {
    entries: Mutex<LruCache<String, CacheEntry>>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::with_config(ResponseCacheConfig::default())
    }

    pub fn with_config(config: ResponseCacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_entries).unwrap_or(NonZeroUsize::MIN);

        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl: config.ttl,
        }
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock().await;

        let expired = entries.peek(key)?.is_expired(self.ttl);
        if expired {
            entries.pop(key);
            debug!(key_prefix = %prefix(key), "Cache entry expired");
            return None;
        }

        entries.get(key).map(|entry| entry.value.clone())
    }

    pub async fn put(&self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let mut entries = self.entries.lock().await;

        let entry = CacheEntry {
            value: value.into(),
            stored_at: Instant::now(),
        };

        if let Some((evicted, _)) = entries.push(key.clone(), entry) {
            if evicted != key {
                debug!(key_prefix = %prefix(&evicted), "Cache entry evicted");
            }
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

fn prefix(key: &str) -> &str {
    key.get(..12).unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_cache(max_entries: usize) -> ResponseCache {
        ResponseCache::with_config(ResponseCacheConfig::default().with_max_entries(max_entries))
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let cache = ResponseCache::new();

        cache.put("k1", "simplified text").await;

        assert_eq!(cache.get("k1").await.as_deref(), Some("simplified text"));
        assert_eq!(cache.get("missing").await, None);
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let cache = ResponseCache::new();

        cache.put("k1", "old").await;
        cache.put("k1", "new").await;

        assert_eq!(cache.get("k1").await.as_deref(), Some("new"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_overfill_evicts_least_recently_used() {
        let cache = small_cache(2);

        cache.put("a", "1").await;
        cache.put("b", "2").await;
        cache.put("c", "3").await;

        assert_eq!(cache.len().await, 2);
        assert_eq!(cache.get("a").await, None);
        assert!(cache.get("b").await.is_some());
        assert!(cache.get("c").await.is_some());
    }

    #[tokio::test]
    async fn test_get_refreshes_recency() {
        let cache = small_cache(2);

        cache.put("a", "1").await;
        cache.put("b", "2").await;
        assert!(cache.get("a").await.is_some());
        cache.put("c", "3").await;

        assert!(cache.get("a").await.is_some());
        assert_eq!(cache.get("b").await, None);
    }

    #[tokio::test]
    async fn test_zero_capacity_keeps_one_entry() {
        let cache = small_cache(0);

        cache.put("a", "1").await;
        cache.put("b", "2").await;

        assert_eq!(cache.len().await, 1);
        assert!(cache.get("b").await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let cache = ResponseCache::with_config(
            ResponseCacheConfig::default().with_ttl(Duration::from_secs(10)),
        );

        cache.put("k1", "v").await;

        tokio::time::advance(Duration::from_secs(9)).await;
        assert!(cache.get("k1").await.is_some());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(cache.get("k1").await, None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reads_do_not_extend_ttl() {
        let cache = ResponseCache::with_config(
            ResponseCacheConfig::default().with_ttl(Duration::from_secs(10)),
        );

        cache.put("k1", "v").await;
        tokio::time::advance(Duration::from_secs(6)).await;
        assert!(cache.get("k1").await.is_some());
        tokio::time::advance(Duration::from_secs(6)).await;

        assert_eq!(cache.get("k1").await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rewrite_resets_age() {
        let cache = ResponseCache::with_config(
            ResponseCacheConfig::default().with_ttl(Duration::from_secs(10)),
        );

        cache.put("k1", "v1").await;
        tokio::time::advance(Duration::from_secs(8)).await;
        cache.put("k1", "v2").await;
        tokio::time::advance(Duration::from_secs(8)).await;

        assert_eq!(cache.get("k1").await.as_deref(), Some("v2"));
    }

    #[test]
    fn test_key_prefix() {
        assert_eq!(prefix("0123456789abcdef"), "0123456789ab");
        assert_eq!(prefix("short"), "short");
    }
}
