//! Configuration loading

mod app_config;

pub use app_config::{
    AppConfig, CacheSettings, FingerprintSettings, LlmSettings, LogFormat, LoggingSettings,
    RateLimitSettings, ServerSettings, StorageSettings,
};
