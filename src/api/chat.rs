//! Conversational assistant endpoint

use axum::extract::State;

use crate::api::state::AppState;
use crate::api::types::{ChatRequest, ChatResponse, Json};

/// POST /chat
///
/// Always answers 200; upstream failures become a fallback reply.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let reply = state.chat_service.reply(request.messages).await;
    Json(ChatResponse { reply })
}
