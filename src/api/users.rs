//! User listing and emergency contact endpoints

use axum::extract::{Path, State};

use crate::api::state::AppState;
use crate::api::types::{ApiError, EmergencyContactResponse, Json, UserListResponse, UserSummary};
use crate::domain::user::EmergencyContact;

/// GET /users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<UserListResponse>, ApiError> {
    let users = state
        .user_service
        .list_usernames()
        .await?
        .into_iter()
        .map(|username| UserSummary { username })
        .collect();

    Ok(Json(UserListResponse {
        users,
        storage: state.user_service.storage_backend().to_string(),
    }))
}

/// PUT /users/{username}/emergency-contact
pub async fn update_emergency_contact(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(contact): Json<EmergencyContact>,
) -> Result<Json<EmergencyContactResponse>, ApiError> {
    state
        .user_service
        .update_emergency_contact(&username, contact.clone())
        .await?;

    Ok(Json(EmergencyContactResponse {
        success: true,
        emergency_contact: contact,
    }))
}
