//! Profile service - onboarding answers and the targets derived from them

use crate::error::ApiError;
use crate::repositories::{
    decimal_to_f64, ProfileRecord, ProfileRepository, UpdateProfile, WeightRepository,
};
use metrics::counter;
use quickcals_shared::summary::{missing_profile_fields, setup_percentage};
use quickcals_shared::types::{ProfileResponse, UpdateProfileRequest};
use quickcals_shared::units::{height_to_cm, weight_to_kg};
use quickcals_shared::validation::{
    get_missing_fields_labels, on_field, parse_activity_level, parse_gender, parse_goal,
    validate_age, validate_height_cm, validate_name, validate_weight_kg,
};
use quickcals_shared::{
    calculate_targets, energy_summary, CalorieBase, EnergySummary, MetabolicResult,
    MissingFieldsError, ProfileSnapshot,
};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

pub struct ProfileService;

impl ProfileService {
    pub async fn get_profile(db: &PgPool, user_id: Uuid) -> Result<ProfileResponse, ApiError> {
        let record = Self::load(db, user_id).await?;
        Self::respond(db, record).await
    }

    /// Apply a partial update; height and weight are converted to metric first
    pub async fn update_profile(
        db: &PgPool,
        user_id: Uuid,
        req: UpdateProfileRequest,
    ) -> Result<ProfileResponse, ApiError> {
        let updates = Self::to_update(req)?;

        let record = ProfileRepository::update(db, user_id, updates)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?;

        debug!(user_id = %user_id, "Profile updated");
        Self::respond(db, record).await
    }

    /// Calorie and macro targets for the stored profile
    pub async fn targets(
        db: &PgPool,
        user_id: Uuid,
        base: CalorieBase,
    ) -> Result<MetabolicResult, ApiError> {
        let snapshot = Self::snapshot(db, user_id).await?;
        let result = calculate_targets(&snapshot, base).map_err(rejected)?;

        counter!("quickcals_targets_computed_total").increment(1);
        Ok(result)
    }

    /// Basal rate, TDEE and the loss / maintenance / gain presets
    pub async fn energy(db: &PgPool, user_id: Uuid) -> Result<EnergySummary, ApiError> {
        let snapshot = Self::snapshot(db, user_id).await?;
        energy_summary(&snapshot).map_err(rejected)
    }

    /// Calculator view of the stored profile
    pub async fn snapshot(db: &PgPool, user_id: Uuid) -> Result<ProfileSnapshot, ApiError> {
        let record = Self::load(db, user_id).await?;
        Ok(to_snapshot(&record))
    }

    /// Validate a request and convert it into repository input
    pub fn to_update(req: UpdateProfileRequest) -> Result<UpdateProfile, ApiError> {
        req.validate()?;

        if let Some(name) = &req.name {
            on_field("name", validate_name(name))?;
        }
        if let Some(age) = req.age {
            on_field("age", validate_age(age))?;
        }

        let height_cm = match req.height {
            Some(value) => {
                let cm = on_field("height_unit", height_to_cm(value, req.height_unit.as_deref()))?;
                on_field("height", validate_height_cm(cm))?;
                Some(cm)
            }
            None => None,
        };

        let weight_kg = match req.weight {
            Some(value) => {
                let kg = on_field("weight_unit", weight_to_kg(value, req.weight_unit.as_deref()))?;
                on_field("weight", validate_weight_kg(kg))?;
                Some(kg)
            }
            None => None,
        };

        let gender = req
            .gender
            .as_deref()
            .map(|g| on_field("gender", parse_gender(g)))
            .transpose()?;
        let activity_level = req
            .activity_level
            .as_deref()
            .map(|a| on_field("activity_level", parse_activity_level(a)))
            .transpose()?;
        let goal = req
            .goal
            .as_deref()
            .map(|g| on_field("goal", parse_goal(g)))
            .transpose()?;

        Ok(UpdateProfile {
            name: req.name.map(|n| n.trim().to_string()),
            age: req.age,
            gender: gender.map(|g| g.as_str().to_string()),
            height_cm,
            weight_kg,
            activity_level: activity_level.map(|a| a.as_str().to_string()),
            goal: goal.map(|g| g.as_str().to_string()),
        })
    }

    async fn load(db: &PgPool, user_id: Uuid) -> Result<ProfileRecord, ApiError> {
        ProfileRepository::get(db, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))
    }

    async fn respond(db: &PgPool, record: ProfileRecord) -> Result<ProfileResponse, ApiError> {
        let has_weight_log = WeightRepository::exists_for_user(db, record.user_id)
            .await
            .map_err(ApiError::Internal)?;
        Ok(to_response(record, has_weight_log))
    }
}

fn rejected(err: MissingFieldsError) -> ApiError {
    counter!("quickcals_missing_profile_data_total").increment(1);
    debug!(missing = %err.missing, "Targets requested for incomplete profile");
    ApiError::from(err)
}

/// Stored labels are constrained by the schema; unknown values read as absent
pub(crate) fn to_snapshot(record: &ProfileRecord) -> ProfileSnapshot {
    ProfileSnapshot {
        age: record.age,
        gender: record.gender.as_deref().and_then(|g| g.parse().ok()),
        height_cm: record.height_cm.as_ref().map(decimal_to_f64),
        weight_kg: record.weight_kg.as_ref().map(decimal_to_f64),
        activity_level: record.activity_level.as_deref().and_then(|a| a.parse().ok()),
        goal: record.goal.as_deref().and_then(|g| g.parse().ok()),
    }
}

fn to_response(record: ProfileRecord, has_weight_log: bool) -> ProfileResponse {
    let snapshot = to_snapshot(&record);
    let missing = missing_profile_fields(&snapshot);
    let has_name = record
        .name
        .as_deref()
        .map(|n| !n.trim().is_empty())
        .unwrap_or(false);

    ProfileResponse {
        user_id: record.user_id.to_string(),
        email: record.email,
        name: record.name,
        age: snapshot.age,
        gender: snapshot.gender,
        height_cm: snapshot.height_cm,
        weight_kg: snapshot.weight_kg,
        activity_level: snapshot.activity_level,
        goal: snapshot.goal,
        missing_field_labels: get_missing_fields_labels(&missing),
        missing_fields: missing.iter().map(|f| f.to_string()).collect(),
        setup_percentage: setup_percentage(&snapshot, has_name, has_weight_log),
        updated_at: record.updated_at,
    }
}
