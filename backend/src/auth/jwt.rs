//! JWT token generation and validation
//!
//! Access and refresh tokens share one HMAC secret and differ only in their
//! `kind` claim and lifetime. Keys are derived once and shared via `Arc`.

use anyhow::{anyhow, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Which of the two tokens a claim set belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    pub kind: TokenKind,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|_| anyhow!("Invalid user ID in token"))
    }
}

/// A freshly issued access/refresh pair
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

/// JWT service for token operations
#[derive(Clone)]
pub struct JwtService {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl JwtService {
    /// Derive keys from the secret; call once at startup
    pub fn new(secret: &str, access_ttl_secs: i64, refresh_ttl_secs: i64) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
            access_ttl_secs,
            refresh_ttl_secs,
        }
    }

    /// Issue both tokens for a user
    pub fn issue_pair(&self, user_id: Uuid) -> Result<TokenPair> {
        Ok(TokenPair {
            access_token: self.issue(user_id, TokenKind::Access)?,
            refresh_token: self.issue(user_id, TokenKind::Refresh)?,
            expires_in: self.access_ttl_secs,
        })
    }

    pub fn issue(&self, user_id: Uuid, kind: TokenKind) -> Result<String> {
        let ttl = match kind {
            TokenKind::Access => self.access_ttl_secs,
            TokenKind::Refresh => self.refresh_ttl_secs,
        };
        let now = Utc::now();

        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + Duration::seconds(ttl)).timestamp(),
            iat: now.timestamp(),
            kind,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| anyhow!("Failed to generate {:?} token: {}", kind, e))
    }

    /// Validate signature and expiry, then require the given kind
    pub fn validate(&self, token: &str, expected: TokenKind) -> Result<Claims> {
        let claims = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|e| anyhow!("Invalid token: {}", e))?
            .claims;

        if claims.kind != expected {
            return Err(anyhow!("Expected a {:?} token", expected));
        }
        Ok(claims)
    }

    pub fn access_ttl_secs(&self) -> i64 {
        self.access_ttl_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test-secret", 3600, 604800)
    }

    #[test]
    fn test_issue_and_validate_pair() {
        let service = service();
        let user_id = Uuid::new_v4();

        let pair = service.issue_pair(user_id).unwrap();
        assert_eq!(pair.expires_in, 3600);

        let access = service.validate(&pair.access_token, TokenKind::Access).unwrap();
        assert_eq!(access.user_id().unwrap(), user_id);

        let refresh = service.validate(&pair.refresh_token, TokenKind::Refresh).unwrap();
        assert_eq!(refresh.kind, TokenKind::Refresh);
    }

    #[test]
    fn test_token_kinds_are_not_interchangeable() {
        let service = service();
        let pair = service.issue_pair(Uuid::new_v4()).unwrap();

        assert!(service.validate(&pair.access_token, TokenKind::Refresh).is_err());
        assert!(service.validate(&pair.refresh_token, TokenKind::Access).is_err());
    }

    #[test]
    fn test_foreign_signature_rejected() {
        let other = JwtService::new("another-secret", 3600, 604800);
        let token = other.issue(Uuid::new_v4(), TokenKind::Access).unwrap();

        assert!(service().validate(&token, TokenKind::Access).is_err());
        assert!(service().validate("invalid.token.here", TokenKind::Access).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        // Beyond the default 60 s leeway
        let service = JwtService::new("test-secret", -120, -120);
        let token = service.issue(Uuid::new_v4(), TokenKind::Access).unwrap();
        assert!(service.validate(&token, TokenKind::Access).is_err());
    }
}
