//! Meal logging service

use crate::error::ApiError;
use crate::repositories::{decimal_to_f64, CreateMeal, MealRecord, MealRepository, UpdateMeal};
use crate::services::profile::ProfileService;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use quickcals_shared::summary::{daily_nutrition, DailyNutrition, MealNutrition};
use quickcals_shared::types::{CreateMealRequest, MealQuery, MealResponse, UpdateMealRequest};
use quickcals_shared::validation::{
    on_field, parse_meal_type, validate_macro_grams, validate_meal_calories,
};
use quickcals_shared::{calculate_targets, CalorieBase, MealType};
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;
use validator::Validate;

pub struct MealService;

impl MealService {
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        req: CreateMealRequest,
    ) -> Result<MealResponse, ApiError> {
        req.validate()?;
        let meal_type = on_field("meal_type", parse_meal_type(&req.meal_type))?;
        on_field("calories", validate_meal_calories(req.calories))?;
        validate_macros(req.protein, req.carbs, req.fat)?;

        let record = MealRepository::create(
            db,
            CreateMeal {
                user_id,
                name: req.name.trim().to_string(),
                meal_type: meal_type.as_str().to_string(),
                calories: req.calories,
                protein: req.protein,
                carbs: req.carbs,
                fat: req.fat,
                image_url: req.image_url,
                notes: req.notes,
                consumed_at: req.consumed_at.unwrap_or_else(Utc::now),
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        debug!(user_id = %user_id, meal_id = %record.id, "Meal logged");
        Ok(to_response(record))
    }

    /// Meals within the optional inclusive bounds, newest first
    pub async fn list(
        db: &PgPool,
        user_id: Uuid,
        query: MealQuery,
    ) -> Result<Vec<MealResponse>, ApiError> {
        if let (Some(start), Some(end)) = (query.date_start, query.date_end) {
            if start > end {
                return Err(ApiError::BadRequest(
                    "date_start must not be after date_end".to_string(),
                ));
            }
        }

        let records = MealRepository::list(db, user_id, query.date_start, query.date_end)
            .await
            .map_err(ApiError::Internal)?;

        Ok(records.into_iter().map(to_response).collect())
    }

    pub async fn update(
        db: &PgPool,
        user_id: Uuid,
        id: Uuid,
        req: UpdateMealRequest,
    ) -> Result<MealResponse, ApiError> {
        req.validate()?;
        let meal_type = req
            .meal_type
            .as_deref()
            .map(|t| on_field("meal_type", parse_meal_type(t)))
            .transpose()?;
        if let Some(calories) = req.calories {
            on_field("calories", validate_meal_calories(calories))?;
        }
        validate_macros(req.protein, req.carbs, req.fat)?;

        let updates = UpdateMeal {
            name: req.name.map(|n| n.trim().to_string()),
            meal_type: meal_type.map(|t| t.as_str().to_string()),
            calories: req.calories,
            protein: req.protein,
            carbs: req.carbs,
            fat: req.fat,
            image_url: req.image_url,
            notes: req.notes,
            consumed_at: req.consumed_at,
        };

        let record = MealRepository::update(db, id, user_id, updates)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Meal not found".to_string()))?;

        Ok(to_response(record))
    }

    pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        let deleted = MealRepository::delete(db, id, user_id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound("Meal not found".to_string()));
        }
        Ok(())
    }

    /// Totals for one UTC day against the profile's targets
    ///
    /// Targets are omitted, not rejected, while the profile is incomplete.
    pub async fn daily_summary(
        db: &PgPool,
        user_id: Uuid,
        date: NaiveDate,
        base: CalorieBase,
    ) -> Result<DailyNutrition, ApiError> {
        let (start, end) = day_bounds(date);
        let records = MealRepository::list(db, user_id, Some(start), Some(end))
            .await
            .map_err(ApiError::Internal)?;

        let snapshot = ProfileService::snapshot(db, user_id).await?;
        let targets = match calculate_targets(&snapshot, base) {
            Ok(result) => Some(result),
            Err(err) => {
                warn!(user_id = %user_id, missing = %err.missing, "Daily summary without targets");
                None
            }
        };

        let meals: Vec<MealNutrition> = records.iter().map(nutrition_of).collect();
        Ok(daily_nutrition(date, &meals, targets.as_ref()))
    }
}

fn validate_macros(
    protein: Option<f64>,
    carbs: Option<f64>,
    fat: Option<f64>,
) -> Result<(), ApiError> {
    for (field, grams) in [("protein", protein), ("carbs", carbs), ("fat", fat)] {
        if let Some(grams) = grams {
            on_field(field, validate_macro_grams(grams))?;
        }
    }
    Ok(())
}

/// First and last instant of a UTC calendar day
fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_time(chrono::NaiveTime::MIN).and_utc();
    let end = start + Duration::days(1) - Duration::microseconds(1);
    (start, end)
}

fn nutrition_of(record: &MealRecord) -> MealNutrition {
    MealNutrition {
        calories: decimal_to_f64(&record.calories),
        protein: record.protein.as_ref().map(decimal_to_f64),
        carbs: record.carbs.as_ref().map(decimal_to_f64),
        fat: record.fat.as_ref().map(decimal_to_f64),
    }
}

fn to_response(record: MealRecord) -> MealResponse {
    let nutrition = nutrition_of(&record);
    MealResponse {
        id: record.id.to_string(),
        name: record.name,
        // constrained by the schema's CHECK
        meal_type: record.meal_type.parse().unwrap_or(MealType::Snack),
        calories: nutrition.calories,
        protein: nutrition.protein,
        carbs: nutrition.carbs,
        fat: nutrition.fat,
        image_url: record.image_url,
        notes: record.notes,
        consumed_at: record.consumed_at,
        created_at: record.created_at,
    }
}
