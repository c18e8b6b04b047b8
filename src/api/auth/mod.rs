//! Account endpoints: password signup/login and fingerprint flows

use axum::{Router, extract::State, routing::post};
use tracing::info;

use crate::api::state::AppState;
use crate::api::types::{
    ApiError, AuthSuccessResponse, FingerprintLoginRequest, FingerprintMatchResponse,
    FingerprintRequest, Json, LoginRequest, SignupRequest, SignupResponse, UserSummary,
};
use crate::domain::DomainError;

/// Create the account router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/signup/fingerprint", post(attach_fingerprint))
        .route("/register/fingerprint", post(register_with_fingerprint))
        .route("/login/fingerprint", post(login_with_fingerprint))
        .route("/verify/fingerprint", post(verify_fingerprint))
}

fn user_exists(err: DomainError) -> ApiError {
    match err {
        DomainError::Conflict { .. } => {
            ApiError::bad_request("User already exists").with_code("user_exists")
        }
        other => other.into(),
    }
}

/// POST /signup
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<SignupResponse>, ApiError> {
    let user = state
        .user_service
        .signup(&request.username, request.password.as_deref())
        .await
        .map_err(user_exists)?;

    info!(username = %user.username(), "User signed up");

    Ok(Json(SignupResponse {
        success: true,
        user: UserSummary {
            username: user.username().to_string(),
        },
    }))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthSuccessResponse>, ApiError> {
    let user = state
        .user_service
        .login(&request.username, &request.password)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid username or password"))?;

    Ok(Json(AuthSuccessResponse::for_user(user.username())))
}

/// POST /signup/fingerprint
///
/// Attaches a fingerprint to an existing account.
pub async fn attach_fingerprint(
    State(state): State<AppState>,
    Json(request): Json<FingerprintRequest>,
) -> Result<Json<AuthSuccessResponse>, ApiError> {
    state
        .user_service
        .attach_fingerprint(&request.username, &request.fingerprint)
        .await
        .map_err(|err| match err {
            DomainError::NotFound { .. } => {
                ApiError::not_found("User not found").with_code("user_not_found")
            }
            other => other.into(),
        })?;

    Ok(Json(AuthSuccessResponse::ok()))
}

/// POST /register/fingerprint
///
/// Creates a password-less account bound to the fingerprint.
pub async fn register_with_fingerprint(
    State(state): State<AppState>,
    Json(request): Json<FingerprintRequest>,
) -> Result<Json<AuthSuccessResponse>, ApiError> {
    let user = state
        .user_service
        .register_with_fingerprint(&request.username, &request.fingerprint)
        .await
        .map_err(user_exists)?;

    Ok(Json(AuthSuccessResponse::for_user(user.username())))
}

/// POST /login/fingerprint
pub async fn login_with_fingerprint(
    State(state): State<AppState>,
    Json(request): Json<FingerprintLoginRequest>,
) -> Result<Json<AuthSuccessResponse>, ApiError> {
    let user = state
        .user_service
        .login_with_fingerprint(&request.fingerprint)
        .await?
        .ok_or_else(|| ApiError::unauthorized("No account matches this fingerprint"))?;

    Ok(Json(AuthSuccessResponse::for_user(user.username())))
}

/// POST /verify/fingerprint
pub async fn verify_fingerprint(
    State(state): State<AppState>,
    Json(request): Json<FingerprintRequest>,
) -> Result<Json<FingerprintMatchResponse>, ApiError> {
    let matched = state
        .user_service
        .verify_fingerprint(&request.username, &request.fingerprint)
        .await?;

    Ok(Json(FingerprintMatchResponse { matched }))
}
