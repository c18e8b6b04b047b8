//! SAMAAN Pension Assist backend
//!
//! Turns dense pension-policy text into plain language through an
//! OpenAI-compatible completion API, with:
//! - Bounded retry with exponential backoff on upstream failures
//! - Per-client sliding-window rate limiting
//! - An LRU + TTL response cache
//! - Password and device-fingerprint accounts

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use api::state::AppState;
use domain::fingerprint::FingerprintMatcher;
use domain::llm::ChatCompletion;
use domain::prompt::PolicyPromptBuilder;
use domain::user::UserStore;
use infrastructure::{
    cache::{ResponseCache, ResponseCacheConfig},
    llm::{HttpClient, LlmClientConfig, OpenAiCompatibleClient},
    rate_limit::{RateLimitConfig, RateLimiter},
    services::{ChatService, ClarifyPipeline},
    user::{Argon2Hasher, FileUserStore, InMemoryUserStore, UserService},
};
use tracing::{info, warn};

/// Create the application state with all services initialized
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let llm = create_llm_client(config)?;
    if !llm.is_configured() {
        warn!("LLM_API_KEY is not set; clarify requests will fail until it is configured");
    }

    let limiter = Arc::new(RateLimiter::new(RateLimitConfig::new(
        config.rate_limit.max_requests,
        Duration::from_secs(config.rate_limit.window_secs),
    )));
    let cache = Arc::new(ResponseCache::with_config(
        ResponseCacheConfig::default()
            .with_max_entries(config.cache.max_entries)
            .with_ttl(Duration::from_secs(config.cache.ttl_secs)),
    ));

    let store = create_user_store(config).await?;
    info!(backend = store.backend_name(), "User store ready");

    let user_service = UserService::new(
        store,
        Arc::new(Argon2Hasher::new()),
        FingerprintMatcher::new(config.fingerprint.threshold),
    );

    Ok(AppState {
        user_service: Arc::new(user_service),
        clarify_service: Arc::new(ClarifyPipeline::new(
            limiter,
            cache,
            llm.clone(),
            Arc::new(PolicyPromptBuilder::new()),
        )),
        chat_service: Arc::new(ChatService::new(llm.clone())),
        llm,
    })
}

fn create_llm_client(config: &AppConfig) -> anyhow::Result<Arc<dyn ChatCompletion>> {
    let settings = &config.llm;
    let http = HttpClient::with_timeout(settings.timeout())?;

    let client = OpenAiCompatibleClient::new(
        http,
        LlmClientConfig {
            api_key: settings.api_key.clone(),
            base_url: settings.base_url.clone(),
            model: settings.model.clone(),
            max_retries: settings.max_retries,
            backoff_base: Duration::from_millis(settings.backoff_base_ms),
        },
    );

    Ok(Arc::new(client))
}

async fn create_user_store(config: &AppConfig) -> anyhow::Result<Arc<dyn UserStore>> {
    match &config.storage.users_file {
        Some(path) => {
            info!(path = %path.display(), "Using file user store");
            Ok(Arc::new(FileUserStore::open(path.clone()).await?))
        }
        None => Ok(Arc::new(InMemoryUserStore::new())),
    }
}
