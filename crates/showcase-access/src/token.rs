//! Identity token validation
//!
//! The identity provider signs HS256 tokens carrying the user's subject and
//! groups. Tokens never carry the tier: that lives in the server-side store.

use chrono::Utc;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use showcase_types::UserId;

use crate::{AccessConfig, AccessError};

/// Group granting administrative tier changes
pub const ADMIN_GROUP: &str = "admin";

/// Claims extracted from an identity provider token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Subject (identity provider user ID)
    pub sub: String,
    /// Email address
    pub email: Option<String>,
    /// Groups assigned by the identity provider
    #[serde(default)]
    pub groups: Vec<String>,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
}

impl IdentityClaims {
    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    pub fn user_id(&self) -> UserId {
        UserId::new(self.sub.clone())
    }

    /// Check membership in a group
    pub fn has_group(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }

    pub fn is_admin(&self) -> bool {
        self.has_group(ADMIN_GROUP)
    }
}

/// Token validator for identity provider tokens
#[derive(Clone)]
pub struct TokenValidator {
    key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    /// Create a validator from the access configuration
    pub fn new(config: &AccessConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.token_issuer.as_str()]);
        validation.set_audience(&[config.token_audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

        Self {
            key: DecodingKey::from_secret(config.token_secret.as_bytes()),
            validation,
        }
    }

    /// Validate a token and return its claims
    pub fn validate(&self, token: &str) -> Result<IdentityClaims, AccessError> {
        let token_data = decode::<IdentityClaims>(token, &self.key, &self.validation).map_err(|e| {
            tracing::debug!("Token validation failed: {}", e);
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AccessError::TokenExpired,
                _ => AccessError::InvalidToken,
            }
        })?;

        let claims = token_data.claims;

        if claims.sub.trim().is_empty() {
            tracing::debug!("Token has empty subject");
            return Err(AccessError::InvalidToken);
        }

        Ok(claims)
    }
}

impl std::fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenValidator").finish_non_exhaustive()
    }
}
