//! Profile routes and the targets derived from the profile

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::ProfileService;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use quickcals_shared::types::{ProfileResponse, UpdateProfileRequest};
use quickcals_shared::{EnergySummary, MetabolicResult};

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_profile).put(update_profile))
        .route("/targets", get(get_targets))
        .route("/energy", get(get_energy))
}

/// GET /api/v1/profile
async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ProfileResponse>> {
    let profile = ProfileService::get_profile(state.db(), auth.user_id).await?;
    Ok(Json(profile))
}

/// PUT /api/v1/profile
async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    let profile = ProfileService::update_profile(state.db(), auth.user_id, req).await?;
    Ok(Json(profile))
}

/// GET /api/v1/profile/targets
///
/// 400 `INSUFFICIENT_PROFILE_DATA` with `details.missingFields` while age,
/// gender, height or weight is missing.
async fn get_targets(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<MetabolicResult>> {
    let base = state.config().targets.calorie_base;
    let targets = ProfileService::targets(state.db(), auth.user_id, base).await?;
    Ok(Json(targets))
}

/// GET /api/v1/profile/energy
async fn get_energy(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<EnergySummary>> {
    let energy = ProfileService::energy(state.db(), auth.user_id).await?;
    Ok(Json(energy))
}
