//! User service for authentication and account management
//!
//! Password hashing and verification run on the blocking pool; token
//! issuing uses the keys pre-computed in [`JwtService`].

use crate::auth::{JwtService, PasswordService, TokenKind, TokenPair};
use crate::error::ApiError;
use crate::repositories::{UpdateProfile, UserRepository};
use crate::services::profile::ProfileService;
use metrics::counter;
use quickcals_shared::types::{AccountSummary, AuthTokens, RegisterRequest};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

pub struct UserService;

impl UserService {
    /// Register a new account, creating its profile row in the same transaction
    pub async fn register(
        pool: &PgPool,
        jwt_service: &JwtService,
        req: RegisterRequest,
    ) -> Result<AuthTokens, ApiError> {
        req.validate()?;

        let email = normalize_email(&req.email);
        let profile = match req.profile {
            Some(initial) => ProfileService::to_update(initial)?,
            None => UpdateProfile::default(),
        };

        if UserRepository::email_exists(pool, &email)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }

        let password_hash = PasswordService::hash(req.password)
            .await
            .map_err(ApiError::Internal)?;

        let user = UserRepository::create(pool, &email, &password_hash, profile)
            .await
            .map_err(ApiError::Internal)?;

        counter!("quickcals_users_registered_total").increment(1);
        info!(user_id = %user.id, "User registered");

        Self::tokens(jwt_service, user.id)
    }

    /// Login with email and password
    pub async fn login(
        pool: &PgPool,
        jwt_service: &JwtService,
        email: &str,
        password: &str,
    ) -> Result<AuthTokens, ApiError> {
        let user = UserRepository::find_by_email(pool, &normalize_email(email))
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

        let valid = PasswordService::verify(password.to_string(), user.password_hash)
            .await
            .map_err(ApiError::Internal)?;

        if !valid {
            counter!("quickcals_login_failures_total").increment(1);
            return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
        }

        Self::tokens(jwt_service, user.id)
    }

    /// Exchange a refresh token for a new pair
    pub async fn refresh_token(
        pool: &PgPool,
        jwt_service: &JwtService,
        refresh_token: &str,
    ) -> Result<AuthTokens, ApiError> {
        let claims = jwt_service
            .validate(refresh_token, TokenKind::Refresh)
            .map_err(|e| ApiError::Unauthorized(format!("Invalid refresh token: {}", e)))?;

        let user_id = claims
            .user_id()
            .map_err(|e| ApiError::Unauthorized(e.to_string()))?;

        UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))?;

        Self::tokens(jwt_service, user_id)
    }

    pub async fn account(pool: &PgPool, user_id: Uuid) -> Result<AccountSummary, ApiError> {
        let user = UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        Ok(AccountSummary {
            id: user.id.to_string(),
            email: user.email,
            created_at: user.created_at,
        })
    }

    fn tokens(jwt_service: &JwtService, user_id: Uuid) -> Result<AuthTokens, ApiError> {
        let TokenPair {
            access_token,
            refresh_token,
            expires_in,
        } = jwt_service.issue_pair(user_id).map_err(ApiError::Internal)?;

        Ok(AuthTokens {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
        })
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
