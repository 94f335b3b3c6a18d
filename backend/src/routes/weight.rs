//! Weight tracking API routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::WeightService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use quickcals_shared::summary::WeightTrend;
use quickcals_shared::types::{LogWeightRequest, WeightLogResponse};
use uuid::Uuid;

pub fn weight_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_weight_history).post(log_weight))
        .route("/trend", get(get_weight_trend))
        .route("/:id", delete(delete_weight_log))
}

/// POST /api/v1/weight
async fn log_weight(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<LogWeightRequest>,
) -> ApiResult<(StatusCode, Json<WeightLogResponse>)> {
    let log = WeightService::log_weight(state.db(), auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

/// GET /api/v1/weight
async fn get_weight_history(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<WeightLogResponse>>> {
    let logs = WeightService::history(state.db(), auth.user_id).await?;
    Ok(Json(logs))
}

/// GET /api/v1/weight/trend - `null` with fewer than two logs
async fn get_weight_trend(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Option<WeightTrend>>> {
    let trend = WeightService::trend(state.db(), auth.user_id).await?;
    Ok(Json(trend))
}

/// DELETE /api/v1/weight/:id
async fn delete_weight_log(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    WeightService::delete(state.db(), auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
