//! Account and fingerprint request/response bodies

use serde::{Deserialize, Serialize};

use crate::domain::user::EmergencyContact;

#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Username plus fingerprint, used by attach, register and verify
#[derive(Debug, Clone, Deserialize)]
pub struct FingerprintRequest {
    pub username: String,
    pub fingerprint: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FingerprintLoginRequest {
    pub fingerprint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    pub success: bool,
    pub user: UserSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSuccessResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl AuthSuccessResponse {
    pub fn for_user(username: impl Into<String>) -> Self {
        Self {
            success: true,
            username: Some(username.into()),
        }
    }

    pub fn ok() -> Self {
        Self {
            success: true,
            username: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FingerprintMatchResponse {
    #[serde(rename = "match")]
    pub matched: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyContactResponse {
    pub success: bool,
    pub emergency_contact: EmergencyContact,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<UserSummary>,
    pub storage: String,
}
