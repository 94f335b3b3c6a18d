//! Meal logging API routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::MealService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use chrono::Utc;
use quickcals_shared::summary::DailyNutrition;
use quickcals_shared::types::{
    CreateMealRequest, DailySummaryQuery, MealQuery, MealResponse, UpdateMealRequest,
};
use uuid::Uuid;

pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_meals).post(create_meal))
        .route("/summary", get(daily_summary))
        .route("/:id", put(update_meal).delete(delete_meal))
}

/// POST /api/v1/meals
async fn create_meal(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateMealRequest>,
) -> ApiResult<(StatusCode, Json<MealResponse>)> {
    let meal = MealService::create(state.db(), auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(meal)))
}

/// GET /api/v1/meals?date_start&date_end
async fn list_meals(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<MealQuery>,
) -> ApiResult<Json<Vec<MealResponse>>> {
    let meals = MealService::list(state.db(), auth.user_id, query).await?;
    Ok(Json(meals))
}

/// PUT /api/v1/meals/:id
async fn update_meal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateMealRequest>,
) -> ApiResult<Json<MealResponse>> {
    let meal = MealService::update(state.db(), auth.user_id, id, req).await?;
    Ok(Json(meal))
}

/// DELETE /api/v1/meals/:id
async fn delete_meal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    MealService::delete(state.db(), auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/meals/summary?date - today (UTC) by default
async fn daily_summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DailySummaryQuery>,
) -> ApiResult<Json<DailyNutrition>> {
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let base = state.config().targets.calorie_base;
    let summary = MealService::daily_summary(state.db(), auth.user_id, date, base).await?;
    Ok(Json(summary))
}
