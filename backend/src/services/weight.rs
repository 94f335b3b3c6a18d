//! Weight tracking service
//!
//! Weights are accepted in any supported unit and stored in kilograms. A log
//! can optionally become the profile's current weight in the same
//! transaction.

use crate::error::ApiError;
use crate::repositories::{decimal_to_f64, CreateWeightLog, WeightLogRecord, WeightRepository};
use quickcals_shared::summary::{weight_trend, WeightPoint, WeightTrend};
use quickcals_shared::types::{LogWeightRequest, WeightLogResponse};
use quickcals_shared::units::weight_to_kg;
use quickcals_shared::validation::{on_field, validate_weight_kg};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

pub struct WeightService;

impl WeightService {
    pub async fn log_weight(
        db: &PgPool,
        user_id: Uuid,
        req: LogWeightRequest,
    ) -> Result<WeightLogResponse, ApiError> {
        req.validate()?;
        let weight_kg = Self::to_kg(&req)?;

        let record = WeightRepository::create(
            db,
            CreateWeightLog {
                user_id,
                weight_kg,
                notes: req.notes,
                update_profile: req.update_profile,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        debug!(
            user_id = %user_id,
            update_profile = req.update_profile,
            "Weight logged"
        );
        Ok(to_response(record))
    }

    /// All logs, newest first
    pub async fn history(db: &PgPool, user_id: Uuid) -> Result<Vec<WeightLogResponse>, ApiError> {
        let records = WeightRepository::list(db, user_id)
            .await
            .map_err(ApiError::Internal)?;

        Ok(records.into_iter().map(to_response).collect())
    }

    pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        let deleted = WeightRepository::delete(db, id, user_id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound("Weight log not found".to_string()));
        }
        Ok(())
    }

    /// Change between the first and latest log, `None` with fewer than two
    pub async fn trend(db: &PgPool, user_id: Uuid) -> Result<Option<WeightTrend>, ApiError> {
        let records = WeightRepository::list(db, user_id)
            .await
            .map_err(ApiError::Internal)?;

        let points: Vec<WeightPoint> = records
            .iter()
            .map(|r| WeightPoint {
                weight_kg: decimal_to_f64(&r.weight_kg),
                recorded_at: r.created_at,
            })
            .collect();

        Ok(weight_trend(&points))
    }

    fn to_kg(req: &LogWeightRequest) -> Result<f64, ApiError> {
        let kg = on_field("unit", weight_to_kg(req.weight, req.unit.as_deref()))?;
        on_field("weight", validate_weight_kg(kg))?;
        Ok(kg)
    }
}

fn to_response(record: WeightLogRecord) -> WeightLogResponse {
    WeightLogResponse {
        id: record.id.to_string(),
        weight_kg: decimal_to_f64(&record.weight_kg),
        notes: record.notes,
        created_at: record.created_at,
    }
}
