//! Application state management
//!
//! Shared resources handed to every handler via Axum's state extraction.
//! Every field is cheap to clone and read-only during request handling.

use crate::auth::JwtService;
use crate::config::AppConfig;
use crate::llm::{ChatCompletion, DisabledAssistant};
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    /// Pre-initialized JWT service with cached keys
    pub jwt: JwtService,
    /// Model behind `/ai/chat`
    pub assistant: Arc<dyn ChatCompletion>,
    /// Renders `/metrics`; absent when no recorder was installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new application state with the assistant disabled
    ///
    /// Derives the JWT keys from the config secret; call once at startup.
    pub fn new(db: PgPool, config: AppConfig) -> Self {
        let jwt = JwtService::new(
            &config.jwt.secret,
            config.jwt.access_token_expiry_secs,
            config.jwt.refresh_token_expiry_secs,
        );

        Self {
            db,
            config: Arc::new(config),
            jwt,
            assistant: Arc::new(DisabledAssistant),
            metrics: None,
        }
    }

    pub fn with_assistant(mut self, assistant: Arc<dyn ChatCompletion>) -> Self {
        self.assistant = assistant;
        self
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    #[inline]
    pub fn db(&self) -> &PgPool {
        &self.db
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    #[inline]
    pub fn assistant(&self) -> &dyn ChatCompletion {
        self.assistant.as_ref()
    }
}
