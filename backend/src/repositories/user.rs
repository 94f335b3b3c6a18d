//! User and profile repository for database operations

use super::to_decimal;
use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// User record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileRecord {
    pub user_id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub height_cm: Option<Decimal>,
    pub weight_kg: Option<Decimal>,
    pub activity_level: Option<String>,
    pub goal: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Profile fields to overwrite; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub activity_level: Option<String>,
    pub goal: Option<String>,
}

const PROFILE_COLUMNS: &str = r#"
    p.user_id, u.email, p.name, p.age, p.gender, p.height_cm, p.weight_kg,
    p.activity_level, p.goal, p.updated_at
"#;

/// User repository for database operations
pub struct UserRepository;

impl UserRepository {
    /// Create a user together with their profile row
    pub async fn create(
        pool: &PgPool,
        email: &str,
        password_hash: &str,
        profile: UpdateProfile,
    ) -> Result<UserRecord> {
        let mut tx = pool.begin().await?;

        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO profiles (user_id, name, age, gender, height_cm, weight_kg, activity_level, goal)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id)
        .bind(profile.name)
        .bind(profile.age)
        .bind(profile.gender)
        .bind(profile.height_cm.map(to_decimal))
        .bind(profile.weight_kg.map(to_decimal))
        .bind(profile.activity_level)
        .bind(profile.goal)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(user)
    }

    /// Find user by email
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, password_hash, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, password_hash, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Check if email exists
    pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)
            "#,
        )
        .bind(email)
        .fetch_one(pool)
        .await?;

        Ok(result)
    }
}

/// Profile repository for database operations
pub struct ProfileRepository;

impl ProfileRepository {
    /// Get a user's profile
    pub async fn get(pool: &PgPool, user_id: Uuid) -> Result<Option<ProfileRecord>> {
        let query = format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles p JOIN users u ON u.id = p.user_id WHERE p.user_id = $1"
        );
        let profile = sqlx::query_as::<_, ProfileRecord>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

        Ok(profile)
    }

    /// Apply a partial update and return the resulting profile
    pub async fn update(
        pool: &PgPool,
        user_id: Uuid,
        updates: UpdateProfile,
    ) -> Result<Option<ProfileRecord>> {
        let query = format!(
            r#"
            WITH p AS (
                UPDATE profiles SET
                    name = COALESCE($2, name),
                    age = COALESCE($3, age),
                    gender = COALESCE($4, gender),
                    height_cm = COALESCE($5, height_cm),
                    weight_kg = COALESCE($6, weight_kg),
                    activity_level = COALESCE($7, activity_level),
                    goal = COALESCE($8, goal),
                    updated_at = NOW()
                WHERE user_id = $1
                RETURNING *
            )
            SELECT {PROFILE_COLUMNS} FROM p JOIN users u ON u.id = p.user_id
            "#
        );
        let profile = sqlx::query_as::<_, ProfileRecord>(&query)
            .bind(user_id)
            .bind(updates.name)
            .bind(updates.age)
            .bind(updates.gender)
            .bind(updates.height_cm.map(to_decimal))
            .bind(updates.weight_kg.map(to_decimal))
            .bind(updates.activity_level)
            .bind(updates.goal)
            .fetch_optional(pool)
            .await?;

        Ok(profile)
    }
}
