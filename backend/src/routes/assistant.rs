//! Nutrition assistant routes

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::services::AssistantService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use quickcals_shared::types::{ChatHistoryQuery, ChatMessageResponse, ChatReply, ChatRequest};

pub fn assistant_routes() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chat))
        .route("/history", get(history))
}

/// POST /api/v1/ai/chat
async fn chat(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ChatRequest>,
) -> ApiResult<Json<ChatReply>> {
    if !state.config().ai.enabled {
        return Err(ApiError::ServiceUnavailable(
            "The AI assistant is not enabled".to_string(),
        ));
    }

    let reply = AssistantService::chat(state.db(), state.assistant(), auth.user_id, req).await?;
    Ok(Json(reply))
}

/// GET /api/v1/ai/history?conversation_id
async fn history(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ChatHistoryQuery>,
) -> ApiResult<Json<Vec<ChatMessageResponse>>> {
    let messages = AssistantService::history(state.db(), auth.user_id, query.conversation_id).await?;
    Ok(Json(messages))
}
