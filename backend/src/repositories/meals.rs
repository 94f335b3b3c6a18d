//! Meal repository - database operations for logged meals

use super::to_decimal;
use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Meal record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MealRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub meal_type: String,
    pub calories: Decimal,
    pub protein: Option<Decimal>,
    pub carbs: Option<Decimal>,
    pub fat: Option<Decimal>,
    pub image_url: Option<String>,
    pub notes: Option<String>,
    pub consumed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Input for logging a meal
#[derive(Debug, Clone)]
pub struct CreateMeal {
    pub user_id: Uuid,
    pub name: String,
    pub meal_type: String,
    pub calories: f64,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub image_url: Option<String>,
    pub notes: Option<String>,
    pub consumed_at: DateTime<Utc>,
}

/// Meal fields to overwrite; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct UpdateMeal {
    pub name: Option<String>,
    pub meal_type: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub image_url: Option<String>,
    pub notes: Option<String>,
    pub consumed_at: Option<DateTime<Utc>>,
}

/// Meal repository
pub struct MealRepository;

impl MealRepository {
    /// Log a meal
    pub async fn create(db: &PgPool, input: CreateMeal) -> Result<MealRecord> {
        let meal = sqlx::query_as::<_, MealRecord>(
            r#"
            INSERT INTO meals (user_id, name, meal_type, calories, protein, carbs, fat,
                               image_url, notes, consumed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, user_id, name, meal_type, calories, protein, carbs, fat,
                      image_url, notes, consumed_at, created_at
            "#,
        )
        .bind(input.user_id)
        .bind(&input.name)
        .bind(&input.meal_type)
        .bind(to_decimal(input.calories))
        .bind(input.protein.map(to_decimal))
        .bind(input.carbs.map(to_decimal))
        .bind(input.fat.map(to_decimal))
        .bind(&input.image_url)
        .bind(&input.notes)
        .bind(input.consumed_at)
        .fetch_one(db)
        .await?;

        Ok(meal)
    }

    /// Meals consumed within the optional bounds (inclusive), newest first
    pub async fn list(
        db: &PgPool,
        user_id: Uuid,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<MealRecord>> {
        let meals = sqlx::query_as::<_, MealRecord>(
            r#"
            SELECT id, user_id, name, meal_type, calories, protein, carbs, fat,
                   image_url, notes, consumed_at, created_at
            FROM meals
            WHERE user_id = $1
              AND ($2::timestamptz IS NULL OR consumed_at >= $2)
              AND ($3::timestamptz IS NULL OR consumed_at <= $3)
            ORDER BY consumed_at DESC
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(db)
        .await?;

        Ok(meals)
    }

    /// Apply a partial update to a meal owned by the user
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        user_id: Uuid,
        updates: UpdateMeal,
    ) -> Result<Option<MealRecord>> {
        let meal = sqlx::query_as::<_, MealRecord>(
            r#"
            UPDATE meals SET
                name = COALESCE($3, name),
                meal_type = COALESCE($4, meal_type),
                calories = COALESCE($5, calories),
                protein = COALESCE($6, protein),
                carbs = COALESCE($7, carbs),
                fat = COALESCE($8, fat),
                image_url = COALESCE($9, image_url),
                notes = COALESCE($10, notes),
                consumed_at = COALESCE($11, consumed_at),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, name, meal_type, calories, protein, carbs, fat,
                      image_url, notes, consumed_at, created_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(updates.name)
        .bind(updates.meal_type)
        .bind(updates.calories.map(to_decimal))
        .bind(updates.protein.map(to_decimal))
        .bind(updates.carbs.map(to_decimal))
        .bind(updates.fat.map(to_decimal))
        .bind(updates.image_url)
        .bind(updates.notes)
        .bind(updates.consumed_at)
        .fetch_optional(db)
        .await?;

        Ok(meal)
    }

    /// Delete a meal owned by the user
    pub async fn delete(db: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM meals
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
