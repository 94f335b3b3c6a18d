//! Health and metrics endpoints
//!
//! - /health - Basic health check
//! - /health/ready - Readiness probe (pings the database)
//! - /health/live - Liveness probe
//! - /metrics - Prometheus text exposition

use crate::{config::AiConfig, db, state::AppState};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<ReadinessChecks>,
}

impl HealthResponse {
    fn bare(status: &'static str) -> Self {
        Self { status, version: VERSION, checks: None }
    }
}

#[derive(Serialize)]
pub struct ReadinessChecks {
    pub database: DatabaseCheck,
    /// Informational only; an unavailable assistant does not fail readiness
    pub assistant: AssistantCheck,
}

#[derive(Serialize)]
pub struct DatabaseCheck {
    pub reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssistantCheck {
    Disabled,
    MissingKey,
    Configured,
}

impl AssistantCheck {
    fn from_config(ai: &AiConfig) -> Self {
        match (ai.enabled, ai.has_api_key()) {
            (false, _) => Self::Disabled,
            (true, false) => Self::MissingKey,
            (true, true) => Self::Configured,
        }
    }
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::bare("healthy"))
}

/// Readiness probe; 503 while the database cannot be reached
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let database = match db::health_check(state.db()).await {
        Ok(()) => DatabaseCheck { reachable: true, error: None },
        Err(e) => DatabaseCheck { reachable: false, error: Some(e.to_string()) },
    };
    let ready = database.reachable;
    let checks = ReadinessChecks {
        database,
        assistant: AssistantCheck::from_config(&state.config().ai),
    };

    let (code, status) = if ready {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not_ready")
    };
    (
        code,
        Json(HealthResponse { status, version: VERSION, checks: Some(checks) }),
    )
}

pub async fn liveness_check() -> Json<HealthResponse> {
    Json(HealthResponse::bare("alive"))
}

/// Prometheus scrape endpoint; 404 when no recorder is installed
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[tokio::test]
    async fn test_health_and_liveness_report_version() {
        let health = health_check().await;
        assert_eq!(health.status, "healthy");
        assert!(!health.version.is_empty());
        assert_eq!(liveness_check().await.status, "alive");
    }

    #[test]
    fn test_assistant_check_from_config() {
        let mut ai = AiConfig::default();
        assert_eq!(AssistantCheck::from_config(&ai), AssistantCheck::Disabled);

        ai.enabled = true;
        assert_eq!(AssistantCheck::from_config(&ai), AssistantCheck::MissingKey);

        ai.api_key = Some(SecretString::new("sk-test".to_string()));
        assert_eq!(AssistantCheck::from_config(&ai), AssistantCheck::Configured);
    }
}
