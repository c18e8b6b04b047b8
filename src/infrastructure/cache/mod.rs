//! Cache infrastructure - Response cache implementation

mod response_cache;

pub use response_cache::{DEFAULT_MAX_ENTRIES, DEFAULT_TTL, ResponseCache, ResponseCacheConfig};
