//! Application error handling
//!
//! Every handler returns [`ApiResult`]; failures are rendered as
//! `{"error": {"code", "message", "field"?, "details"?}}` with a matching
//! HTTP status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use quickcals_shared::validation::ValidationError;
use quickcals_shared::MissingFieldsError;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Validation error on {}: {}", .0.field, .0.message)]
    InvalidField(ValidationError),

    #[error(transparent)]
    InsufficientProfileData(#[from] MissingFieldsError),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Upstream service error: {0}")]
    Upstream(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::InvalidField(err)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errs: validator::ValidationErrors) -> Self {
        ApiError::Validation(errs.to_string())
    }
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) | ApiError::InvalidField(_) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
            }
            ApiError::InsufficientProfileData(_) => {
                (StatusCode::BAD_REQUEST, "INSUFFICIENT_PROFILE_DATA")
            }
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
            ApiError::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let (message, field, details) = match self {
            ApiError::Validation(msg)
            | ApiError::NotFound(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Conflict(msg)
            | ApiError::BadRequest(msg)
            | ApiError::ServiceUnavailable(msg) => (msg, None, None),
            ApiError::InvalidField(err) => (err.user_message(), Some(err.field), None),
            ApiError::InsufficientProfileData(err) => (
                "Insufficient profile data for BMR calculation".to_string(),
                None,
                Some(json!({ "missingFields": err.missing })),
            ),
            ApiError::Upstream(msg) => {
                warn!("Upstream error: {}", msg);
                ("The AI assistant is temporarily unavailable".to_string(), None, None)
            }
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                ("An internal error occurred".to_string(), None, None)
            }
            ApiError::Database(err) => {
                error!("Database error: {:?}", err);
                ("A database error occurred".to_string(), None, None)
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                field,
                details,
            },
        });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use quickcals_shared::MissingFields;
    use rstest::rstest;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[rstest]
    #[case(ApiError::Validation("Invalid input".to_string()), StatusCode::BAD_REQUEST)]
    #[case(ApiError::NotFound("Meal not found".to_string()), StatusCode::NOT_FOUND)]
    #[case(ApiError::Unauthorized("Invalid token".to_string()), StatusCode::UNAUTHORIZED)]
    #[case(ApiError::Conflict("Email taken".to_string()), StatusCode::CONFLICT)]
    #[case(ApiError::ServiceUnavailable("AI disabled".to_string()), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(ApiError::Upstream("timeout".to_string()), StatusCode::BAD_GATEWAY)]
    #[case(ApiError::Internal(anyhow::anyhow!("boom")), StatusCode::INTERNAL_SERVER_ERROR)]
    fn test_error_status(#[case] error: ApiError, #[case] expected: StatusCode) {
        assert_eq!(error.into_response().status(), expected);
    }

    #[tokio::test]
    async fn test_insufficient_profile_data_body() {
        let error = ApiError::from(MissingFieldsError {
            missing: MissingFields {
                age: true,
                gender: false,
                height: true,
                weight: false,
            },
        });
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "INSUFFICIENT_PROFILE_DATA");
        assert_eq!(body["error"]["details"]["missingFields"]["age"], true);
        assert_eq!(body["error"]["details"]["missingFields"]["gender"], false);
        assert_eq!(body["error"]["details"]["missingFields"]["height"], true);
    }

    #[tokio::test]
    async fn test_field_error_body() {
        let error = ApiError::from(ValidationError::new("height", "Height must be at least 50 cm"));
        let body = body_json(error.into_response()).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["field"], "height");
        assert_eq!(body["error"]["message"], "Height: Height must be at least 50 cm");
    }

    #[tokio::test]
    async fn test_internal_error_hides_cause() {
        let error = ApiError::Internal(anyhow::anyhow!("connection string leaked"));
        let body = body_json(error.into_response()).await;
        assert_eq!(body["error"]["message"], "An internal error occurred");
    }
}
