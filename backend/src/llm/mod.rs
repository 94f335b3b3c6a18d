//! Chat-completion client for the nutrition assistant
//!
//! Handlers depend on the [`ChatCompletion`] trait so that tests can swap in
//! a stub or point the real client at a mock server.

mod openai;

use crate::config::AiConfig;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

pub use openai::OpenAiClient;

/// Speaker of a chat turn sent to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    System,
    User,
}

/// One message in a completion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: TurnRole,
    pub content: String,
}

impl ChatTurn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("AI assistant is disabled")]
    Disabled,

    #[error("request to model endpoint failed: {0}")]
    Transport(String),

    #[error("model endpoint returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("unreadable model response: {0}")]
    Decode(String),
}

/// A model that answers a list of chat turns
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Text of the first choice; `Ok(None)` when the model returned no content
    async fn complete(&self, messages: Vec<ChatTurn>) -> Result<Option<String>, LlmError>;
}

/// Stand-in used when the assistant is switched off
pub struct DisabledAssistant;

#[async_trait]
impl ChatCompletion for DisabledAssistant {
    async fn complete(&self, _messages: Vec<ChatTurn>) -> Result<Option<String>, LlmError> {
        Err(LlmError::Disabled)
    }
}

/// Build the client selected by configuration
pub fn build_assistant(config: &AiConfig) -> Result<Arc<dyn ChatCompletion>> {
    if !config.enabled {
        info!("AI assistant disabled");
        return Ok(Arc::new(DisabledAssistant));
    }

    info!(model = %config.model, base_url = %config.base_url, "AI assistant enabled");
    Ok(Arc::new(OpenAiClient::new(config)?))
}
