//! API request and response types

use crate::metabolic::{ActivityLevel, Gender, Goal};
use crate::models::{ChatRole, MealType};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// ============================================================================
// Authentication
// ============================================================================

/// Authentication tokens response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration request, optionally carrying the first profile answers
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[serde(default)]
    #[validate(nested)]
    pub profile: Option<UpdateProfileRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Account summary returned by `/auth/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSummary {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Profile
// ============================================================================

/// Partial profile update; absent fields are left unchanged
///
/// Enumerated fields arrive as strings so that unknown labels produce a
/// field-level validation error instead of a body rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(range(min = 1, max = 150))]
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    /// cm (default), m, in or ft
    pub height_unit: Option<String>,
    pub weight: Option<f64>,
    /// kg (default), lbs or stone
    pub weight_unit: Option<String>,
    pub activity_level: Option<String>,
    pub goal: Option<String>,
}

/// Profile with onboarding progress
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user_id: String,
    pub email: String,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub goal: Option<Goal>,
    /// Technical names of fields still needed for targets
    pub missing_fields: Vec<String>,
    /// Display labels for `missing_fields`
    pub missing_field_labels: Vec<String>,
    pub setup_percentage: u8,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Weight
// ============================================================================

/// Weight log entry request (supports multiple units)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LogWeightRequest {
    /// Weight value in the specified unit (defaults to kg)
    pub weight: f64,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub notes: Option<String>,
    /// Also set the profile's current weight
    #[serde(default)]
    pub update_profile: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightLogResponse {
    pub id: String,
    pub weight_kg: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Meals
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateMealRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub meal_type: String,
    pub calories: f64,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    #[validate(url)]
    pub image_url: Option<String>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
    /// Defaults to now
    pub consumed_at: Option<DateTime<Utc>>,
}

/// Partial meal update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateMealRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub meal_type: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    #[validate(url)]
    pub image_url: Option<String>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
    pub consumed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealResponse {
    pub id: String,
    pub name: String,
    pub meal_type: MealType,
    pub calories: f64,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub image_url: Option<String>,
    pub notes: Option<String>,
    pub consumed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Meal listing filter; both bounds inclusive
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MealQuery {
    pub date_start: Option<DateTime<Utc>>,
    pub date_end: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailySummaryQuery {
    /// UTC calendar day, defaults to today
    pub date: Option<NaiveDate>,
}

// ============================================================================
// AI assistant
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(max = 4000))]
    pub message: Option<String>,
    pub conversation_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessageResponse {
    pub id: String,
    pub conversation_id: String,
    pub role: ChatRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub message: ChatMessageResponse,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatHistoryQuery {
    pub conversation_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            email: "sam@example.com".to_string(),
            password: "correct horse".to_string(),
            profile: None,
        };
        assert!(valid.validate().is_ok());

        let bad_email = RegisterRequest {
            email: "not-an-email".to_string(),
            ..valid.clone()
        };
        assert!(bad_email.validate().is_err());

        let bad_profile = RegisterRequest {
            profile: Some(UpdateProfileRequest {
                age: Some(0),
                ..Default::default()
            }),
            ..valid
        };
        assert!(bad_profile.validate().is_err());
    }

    #[test]
    fn test_update_profile_request_accepts_partial_body() {
        let req: UpdateProfileRequest =
            serde_json::from_str(r#"{"weight": 165, "weight_unit": "lbs"}"#).unwrap();
        assert_eq!(req.weight, Some(165.0));
        assert_eq!(req.weight_unit.as_deref(), Some("lbs"));
        assert!(req.age.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_log_weight_request_defaults() {
        let req: LogWeightRequest = serde_json::from_str(r#"{"weight": 80.2}"#).unwrap();
        assert!(!req.update_profile);
        assert!(req.unit.is_none());
    }

    #[test]
    fn test_meal_request_rejects_bad_image_url() {
        let req: CreateMealRequest = serde_json::from_str(
            r#"{"name": "Oats", "meal_type": "breakfast", "calories": 350, "image_url": "nope"}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_meal_query_parses_rfc3339() {
        let q: MealQuery =
            serde_json::from_str(r#"{"date_start": "2024-03-01T00:00:00Z"}"#).unwrap();
        assert!(q.date_start.is_some());
        assert!(q.date_end.is_none());
    }
}
