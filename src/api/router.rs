use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::middleware::logging_middleware;
use super::state::AppState;
use super::{auth, chat, clarify, health, users};

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::banner))
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .route("/api/clarify", post(clarify::clarify))
        .route("/chat", post(chat::chat))
        // Account and fingerprint endpoints
        .merge(auth::create_auth_router())
        .route("/users", get(users::list_users))
        .route(
            "/users/{username}/emergency-contact",
            put(users::update_emergency_contact),
        )
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::domain::fingerprint::FingerprintMatcher;
    use crate::domain::llm::{ChatCompletion, LlmError, MockChatCompletion};
    use crate::domain::prompt::PolicyPromptBuilder;
    use crate::infrastructure::cache::ResponseCache;
    use crate::infrastructure::rate_limit::{RateLimitConfig, RateLimiter};
    use crate::infrastructure::services::{ChatService, ClarifyPipeline};
    use crate::infrastructure::user::{Argon2Hasher, InMemoryUserStore, UserService};

    const FINGERPRINT: &str = "fp-abcdefghijklmnopqrstuvwxyz0123456789";
    const FINGERPRINT_DRIFTED: &str = "fp-abcdefghijklmnopqrstuvwxyz012345678X";

    fn state_with(llm: MockChatCompletion, max_requests: u32) -> AppState {
        let llm: Arc<dyn ChatCompletion> = Arc::new(llm);
        let limiter = Arc::new(RateLimiter::new(RateLimitConfig::new(
            max_requests,
            Duration::from_secs(60),
        )));

        AppState {
            user_service: Arc::new(UserService::new(
                Arc::new(InMemoryUserStore::new()),
                Arc::new(Argon2Hasher::new()),
                FingerprintMatcher::default(),
            )),
            clarify_service: Arc::new(ClarifyPipeline::new(
                limiter,
                Arc::new(ResponseCache::new()),
                llm.clone(),
                Arc::new(PolicyPromptBuilder::new()),
            )),
            chat_service: Arc::new(ChatService::new(llm.clone())),
            llm,
        }
    }

    fn app(llm: MockChatCompletion) -> Router {
        create_router(state_with(llm, 20))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    #[tokio::test]
    async fn test_banner_and_health() {
        let app = app(MockChatCompletion::new());

        let (status, body) = send(&app, Method::GET, "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "SAMAAN Pension Assist API");
        assert_eq!(body["status"], "running");

        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_ready_is_degraded_without_llm_credential() {
        let app = app(MockChatCompletion::new().unconfigured());

        let (status, body) = send(&app, Method::GET, "/ready", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "degraded");
    }

    #[tokio::test]
    async fn test_clarify_then_cached() {
        let app = app(MockChatCompletion::new().with_reply("You get a pension every month."));
        let request = json!({"text": "Pension shall be disbursed monthly.", "language": "en", "mode": "prose"});

        let (status, first) = send(&app, Method::POST, "/api/clarify", Some(request.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["simplified"], "You get a pension every month.");
        assert_eq!(first["cached"], false);

        let (status, second) = send(&app, Method::POST, "/api/clarify", Some(request)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(second["simplified"], first["simplified"]);
        assert_eq!(second["cached"], true);
    }

    #[tokio::test]
    async fn test_clarify_rate_limited() {
        let app = create_router(state_with(MockChatCompletion::new().with_reply("ok"), 1));

        let (status, _) = send(&app, Method::POST, "/api/clarify", Some(json!({"text": "one"}))).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, Method::POST, "/api/clarify", Some(json!({"text": "two"}))).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["error"], "rate_limit_exceeded");
    }

    #[tokio::test]
    async fn test_clarify_rejects_bad_input() {
        let app = app(MockChatCompletion::new().with_reply("unused"));

        let (status, body) = send(&app, Method::POST, "/api/clarify", Some(json!({"text": "   "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_request");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/clarify",
            Some(json!({"text": "hi", "language": "fr"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_request");
    }

    #[tokio::test]
    async fn test_clarify_surfaces_llm_errors() {
        let app = app(MockChatCompletion::new().with_error(LlmError::Timeout));

        let (status, body) = send(&app, Method::POST, "/api/clarify", Some(json!({"text": "hello"}))).await;

        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body["error"], "llm_timeout");
    }

    #[tokio::test]
    async fn test_chat_falls_back_when_unconfigured() {
        let app = app(MockChatCompletion::new().unconfigured());
        let request = json!({"messages": [{"role": "user", "content": "When is my pension paid?"}]});

        let (status, body) = send(&app, Method::POST, "/chat", Some(request)).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["reply"].as_str().unwrap().contains("not configured"));
    }

    #[tokio::test]
    async fn test_password_signup_and_login() {
        let app = app(MockChatCompletion::new());
        let credentials = json!({"username": "ramesh", "password": "s3cret"});

        let (status, body) = send(&app, Method::POST, "/signup", Some(credentials.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["user"]["username"], "ramesh");

        let (status, body) = send(&app, Method::POST, "/signup", Some(credentials.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "user_exists");
        assert_eq!(body["detail"], "User already exists");

        let (status, body) = send(&app, Method::POST, "/login", Some(credentials)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "ramesh");

        let (status, body) = send(
            &app,
            Method::POST,
            "/login",
            Some(json!({"username": "ramesh", "password": "wrong"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["detail"], "Invalid username or password");
    }

    #[tokio::test]
    async fn test_fingerprint_flows() {
        let app = app(MockChatCompletion::new());

        let (status, body) = send(
            &app,
            Method::POST,
            "/register/fingerprint",
            Some(json!({"username": "sita", "fingerprint": FINGERPRINT})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "sita");

        let (status, body) = send(
            &app,
            Method::POST,
            "/login/fingerprint",
            Some(json!({"fingerprint": FINGERPRINT_DRIFTED})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["username"], "sita");

        let (status, body) = send(
            &app,
            Method::POST,
            "/verify/fingerprint",
            Some(json!({"username": "sita", "fingerprint": FINGERPRINT})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["match"], true);

        let (status, body) = send(
            &app,
            Method::POST,
            "/login/fingerprint",
            Some(json!({"fingerprint": "completely-different-device"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["detail"], "No account matches this fingerprint");
    }

    #[tokio::test]
    async fn test_attach_fingerprint_to_unknown_user() {
        let app = app(MockChatCompletion::new());

        let (status, body) = send(
            &app,
            Method::POST,
            "/signup/fingerprint",
            Some(json!({"username": "nobody", "fingerprint": FINGERPRINT})),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "user_not_found");
    }

    #[tokio::test]
    async fn test_emergency_contact_and_listing() {
        let app = app(MockChatCompletion::new());
        let contact = json!({"name": "Anil", "phone": "+91-9800000000", "relation": "son"});

        let (status, _) = send(
            &app,
            Method::PUT,
            "/users/ghost/emergency-contact",
            Some(contact.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        send(&app, Method::POST, "/signup", Some(json!({"username": "meera"}))).await;

        let (status, body) = send(
            &app,
            Method::PUT,
            "/users/meera/emergency-contact",
            Some(contact.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["emergency_contact"], contact);

        let (status, body) = send(&app, Method::GET, "/users", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["storage"], "memory");
        assert_eq!(body["users"], json!([{"username": "meera"}]));
    }
}
