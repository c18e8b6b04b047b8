//! Language-model provider client

mod client;
mod http_client;

pub use client::{
    DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES, DEFAULT_MODEL, LlmClientConfig, OpenAiCompatibleClient,
};
pub use http_client::{HttpClient, HttpClientTrait, HttpResponse, TransportError};

#[cfg(test)]
pub use http_client::mock::MockHttpClient;
