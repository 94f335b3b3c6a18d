//! Nutrition assistant chat
//!
//! Each request is one synchronous completion: the user turn is stored, the
//! model is called with the system prompt and the user's profile, and the
//! reply is stored and returned. No earlier turns are sent to the model.

use crate::error::ApiError;
use crate::llm::{ChatCompletion, ChatTurn, LlmError};
use crate::repositories::{ChatMessageRecord, ChatRepository};
use crate::services::profile::ProfileService;
use metrics::{counter, histogram};
use quickcals_shared::types::{ChatMessageResponse, ChatReply, ChatRequest};
use quickcals_shared::{ChatRole, ProfileSnapshot};
use sqlx::PgPool;
use std::fmt::Display;
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

const SYSTEM_PROMPT: &str = "\
You are a helpful nutrition and fitness assistant for the QuickCals app.
Your role is to help users with their nutrition questions, meal planning, and fitness advice.

You can:
- Suggest recipes based on nutritional goals and preferences
- Explain nutritional concepts and macronutrients
- Provide general fitness advice appropriate for a nutrition app
- Help calculate calories and macros for given foods
- Give advice on weight management strategies

You should NOT:
- Provide medical advice or diagnoses
- Prescribe specific workout routines
- Recommend extreme diet plans or fasting protocols
- Suggest medications or supplements
- Make claims about curing any medical conditions

Always provide practical, evidence-based advice that's supportive of the user's health goals.";

/// Stored in place of an empty model reply
pub const FALLBACK_REPLY: &str = "I apologize, but I couldn't generate a response.";

const NOT_SPECIFIED: &str = "Not specified";

pub struct AssistantService;

impl AssistantService {
    pub async fn chat(
        db: &PgPool,
        assistant: &dyn ChatCompletion,
        user_id: Uuid,
        req: ChatRequest,
    ) -> Result<ChatReply, ApiError> {
        req.validate()?;
        let (message, conversation_id) = match (req.message.as_deref(), req.conversation_id) {
            (Some(message), Some(conversation_id)) if !message.trim().is_empty() => {
                (message.to_string(), conversation_id)
            }
            _ => {
                return Err(ApiError::BadRequest(
                    "Message and conversation ID are required".to_string(),
                ))
            }
        };

        let snapshot = ProfileService::snapshot(db, user_id).await?;

        ChatRepository::create(db, user_id, conversation_id, ChatRole::User, &message)
            .await
            .map_err(ApiError::Internal)?;

        let reply = Self::complete(assistant, build_messages(&snapshot, &message)).await?;

        let saved = ChatRepository::create(db, user_id, conversation_id, ChatRole::Assistant, &reply)
            .await
            .map_err(ApiError::Internal)?;

        info!(user_id = %user_id, conversation_id = %conversation_id, "Assistant replied");
        Ok(ChatReply {
            message: to_response(saved),
        })
    }

    /// Turns of one conversation, oldest first
    pub async fn history(
        db: &PgPool,
        user_id: Uuid,
        conversation_id: Option<Uuid>,
    ) -> Result<Vec<ChatMessageResponse>, ApiError> {
        let conversation_id = conversation_id
            .ok_or_else(|| ApiError::BadRequest("Conversation ID is required".to_string()))?;

        let records = ChatRepository::history(db, user_id, conversation_id)
            .await
            .map_err(ApiError::Internal)?;

        Ok(records.into_iter().map(to_response).collect())
    }

    async fn complete(
        assistant: &dyn ChatCompletion,
        messages: Vec<ChatTurn>,
    ) -> Result<String, ApiError> {
        let started = Instant::now();
        let result = assistant.complete(messages).await;
        histogram!("quickcals_chat_completion_seconds").record(started.elapsed().as_secs_f64());

        match result {
            Ok(Some(content)) => {
                counter!("quickcals_chat_completions_total", "outcome" => "ok").increment(1);
                Ok(content)
            }
            Ok(None) => {
                counter!("quickcals_chat_completions_total", "outcome" => "fallback").increment(1);
                warn!("Model returned no content, storing fallback reply");
                Ok(FALLBACK_REPLY.to_string())
            }
            Err(LlmError::Disabled) => Err(ApiError::ServiceUnavailable(
                "The AI assistant is not enabled".to_string(),
            )),
            Err(err) => {
                counter!("quickcals_chat_completions_total", "outcome" => "error").increment(1);
                Err(ApiError::Upstream(err.to_string()))
            }
        }
    }
}

/// System prompt followed by the profile block, then the user's message
pub fn build_messages(profile: &ProfileSnapshot, message: &str) -> Vec<ChatTurn> {
    vec![
        ChatTurn::system(format!("{}\n\n{}", SYSTEM_PROMPT, profile_context(profile))),
        ChatTurn::user(message),
    ]
}

fn profile_context(profile: &ProfileSnapshot) -> String {
    let weight = profile.weight_kg.map(|w| format!("{} kg", w));
    let height = profile.height_cm.map(|h| format!("{} cm", h));

    format!(
        "The user has the following profile information that may be relevant:\n\
         - Goal: {}\n\
         - Weight: {}\n\
         - Height: {}\n\
         - Age: {}\n\
         - Gender: {}\n\
         - Activity level: {}",
        or_unspecified(profile.goal),
        or_unspecified(weight),
        or_unspecified(height),
        or_unspecified(profile.age.filter(|a| *a != 0)),
        or_unspecified(profile.gender),
        or_unspecified(profile.activity_level),
    )
}

fn or_unspecified<T: Display>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_SPECIFIED.to_string())
}

fn to_response(record: ChatMessageRecord) -> ChatMessageResponse {
    ChatMessageResponse {
        id: record.id.to_string(),
        conversation_id: record.conversation_id.to_string(),
        // constrained by the schema's CHECK
        role: record.role.parse().unwrap_or(ChatRole::Assistant),
        content: record.content,
        created_at: record.created_at,
    }
}
