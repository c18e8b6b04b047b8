use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub llm: LlmSettings,
    pub cache: CacheSettings,
    pub rate_limit: RateLimitSettings,
    pub fingerprint: FingerprintSettings,
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Outbound language-model provider
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// Per-attempt timeout; fractional seconds are allowed
    pub timeout_secs: f64,
    /// Total attempts per call
    pub max_retries: u32,
    /// First backoff delay; doubles per attempt
    pub backoff_base_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub max_entries: usize,
    pub ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitSettings {
    pub max_requests: u32,
    pub window_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FingerprintSettings {
    pub threshold: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// JSON user file; users are kept in memory when unset
    pub users_file: Option<PathBuf>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "mixtral-8x7b-32768".to_string(),
            timeout_secs: 30.0,
            max_retries: 3,
            backoff_base_ms: 1000,
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_entries: 128,
            ttl_secs: 3600,
        }
    }
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            max_requests: 20,
            window_secs: 60,
        }
    }
}

impl Default for FingerprintSettings {
    fn default() -> Self {
        Self { threshold: 0.95 }
    }
}

impl LlmSettings {
    /// Falls back to 30 s when `timeout_secs` is not a valid duration
    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout_secs).unwrap_or(Duration::from_secs(30))
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut app_config: Self = config.try_deserialize()?;
        app_config.apply_legacy_env(|name| std::env::var(name).ok())?;
        app_config.validate()?;

        Ok(app_config)
    }

    /// Honour the bare `LLM_*` variables used by earlier deployments
    pub fn apply_legacy_env<F>(&mut self, lookup: F) -> Result<(), config::ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("LLM_API_KEY") {
            self.llm.api_key = Some(key);
        }
        if let Some(url) = lookup("LLM_BASE_URL") {
            self.llm.base_url = url;
        }
        if let Some(model) = lookup("LLM_MODEL") {
            self.llm.model = model;
        }
        if let Some(timeout) = lookup("LLM_TIMEOUT") {
            self.llm.timeout_secs = parse_number("LLM_TIMEOUT", &timeout)?;
        }
        if let Some(retries) = lookup("LLM_MAX_RETRIES") {
            self.llm.max_retries = parse_number("LLM_MAX_RETRIES", &retries)?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), config::ConfigError> {
        let threshold = self.fingerprint.threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(config::ConfigError::Message(format!(
                "fingerprint.threshold must be in (0, 1], got {}",
                threshold
            )));
        }

        let timeout = self.llm.timeout_secs;
        if !(timeout.is_finite() && timeout > 0.0) {
            return Err(config::ConfigError::Message(format!(
                "llm.timeout_secs must be a positive number of seconds, got {}",
                timeout
            )));
        }

        if self.rate_limit.window_secs == 0 {
            return Err(config::ConfigError::Message(
                "rate_limit.window_secs must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, config::ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| config::ConfigError::Message(format!("{} is not a valid number: {}", name, raw)))
}
