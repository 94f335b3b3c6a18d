//! Chat message repository

use anyhow::Result;
use chrono::{DateTime, Utc};
use quickcals_shared::ChatRole;
use sqlx::PgPool;
use uuid::Uuid;

/// Chat message record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChatMessageRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub conversation_id: Uuid,
    pub role: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

pub struct ChatRepository;

impl ChatRepository {
    /// Append a message to a conversation
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        conversation_id: Uuid,
        role: ChatRole,
        content: &str,
    ) -> Result<ChatMessageRecord> {
        let message = sqlx::query_as::<_, ChatMessageRecord>(
            r#"
            INSERT INTO chat_messages (user_id, conversation_id, role, content)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, conversation_id, role, content, created_at
            "#,
        )
        .bind(user_id)
        .bind(conversation_id)
        .bind(role.as_str())
        .bind(content)
        .fetch_one(db)
        .await?;

        Ok(message)
    }

    /// Messages of one conversation, oldest first
    pub async fn history(
        db: &PgPool,
        user_id: Uuid,
        conversation_id: Uuid,
    ) -> Result<Vec<ChatMessageRecord>> {
        let messages = sqlx::query_as::<_, ChatMessageRecord>(
            r#"
            SELECT id, user_id, conversation_id, role, content, created_at
            FROM chat_messages
            WHERE user_id = $1 AND conversation_id = $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .bind(conversation_id)
        .fetch_all(db)
        .await?;

        Ok(messages)
    }
}
