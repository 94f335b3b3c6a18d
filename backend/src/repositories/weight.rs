//! Weight log repository for database operations

use super::to_decimal;
use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Weight log record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WeightLogRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub weight_kg: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a weight log
#[derive(Debug, Clone)]
pub struct CreateWeightLog {
    pub user_id: Uuid,
    pub weight_kg: f64,
    pub notes: Option<String>,
    /// Also overwrite the profile's current weight
    pub update_profile: bool,
}

/// Weight repository for database operations
pub struct WeightRepository;

impl WeightRepository {
    /// Create a new weight log entry
    ///
    /// When `update_profile` is set, the log and the profile change commit
    /// together.
    pub async fn create(pool: &PgPool, input: CreateWeightLog) -> Result<WeightLogRecord> {
        let weight_kg = to_decimal(input.weight_kg);
        let mut tx = pool.begin().await?;

        let record = sqlx::query_as::<_, WeightLogRecord>(
            r#"
            INSERT INTO weight_logs (user_id, weight_kg, notes)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, weight_kg, notes, created_at
            "#,
        )
        .bind(input.user_id)
        .bind(weight_kg)
        .bind(&input.notes)
        .fetch_one(&mut *tx)
        .await?;

        if input.update_profile {
            sqlx::query(
                r#"
                UPDATE profiles SET weight_kg = $2, updated_at = NOW()
                WHERE user_id = $1
                "#,
            )
            .bind(input.user_id)
            .bind(weight_kg)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(record)
    }

    /// All weight logs for a user, newest first
    pub async fn list(pool: &PgPool, user_id: Uuid) -> Result<Vec<WeightLogRecord>> {
        let records = sqlx::query_as::<_, WeightLogRecord>(
            r#"
            SELECT id, user_id, weight_kg, notes, created_at
            FROM weight_logs
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Whether the user has logged any weight
    pub async fn exists_for_user(pool: &PgPool, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM weight_logs WHERE user_id = $1)
            "#,
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(result)
    }

    /// Delete a weight log owned by the user
    pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM weight_logs
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
