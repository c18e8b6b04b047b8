//! Policy text clarification endpoint

use axum::extract::State;

use crate::api::middleware::ClientIdentity;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{ClarifyOutcome, ClarifyRequest};

/// POST /api/clarify
pub async fn clarify(
    State(state): State<AppState>,
    identity: ClientIdentity,
    Json(request): Json<ClarifyRequest>,
) -> Result<Json<ClarifyOutcome>, ApiError> {
    let outcome = state
        .clarify_service
        .clarify(&request, identity.as_str())
        .await?;

    Ok(Json(outcome))
}
