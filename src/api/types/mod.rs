//! HTTP request and response types

pub mod auth;
pub mod chat;
pub mod error;
pub mod json;

pub use auth::{
    AuthSuccessResponse, EmergencyContactResponse, FingerprintLoginRequest,
    FingerprintMatchResponse, FingerprintRequest, LoginRequest, SignupRequest, SignupResponse,
    UserListResponse, UserSummary,
};
pub use chat::{ChatRequest, ChatResponse};
pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
