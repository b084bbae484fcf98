//! Configuration types for the access service

use crate::AccessError;

/// Minimum length of the token signing secret
pub const MIN_TOKEN_SECRET_LEN: usize = 32;

/// Access service configuration
#[derive(Clone)]
pub struct AccessConfig {
    /// HMAC secret shared with the identity provider
    pub token_secret: String,
    /// Expected `iss` claim
    pub token_issuer: String,
    /// Expected `aud` claim
    pub token_audience: String,
    /// Whether users may move their own tier one step up or down
    pub self_service_tier_changes: bool,
}

impl AccessConfig {
    /// Create a new access config
    pub fn new(
        token_secret: impl Into<String>,
        token_issuer: impl Into<String>,
        token_audience: impl Into<String>,
    ) -> Self {
        Self {
            token_secret: token_secret.into(),
            token_issuer: token_issuer.into(),
            token_audience: token_audience.into(),
            self_service_tier_changes: false,
        }
    }

    /// Create a new access config, rejecting weak secrets
    pub fn try_new(
        token_secret: impl Into<String>,
        token_issuer: impl Into<String>,
        token_audience: impl Into<String>,
    ) -> Result<Self, AccessError> {
        let config = Self::new(token_secret, token_issuer, token_audience);
        if config.token_secret.len() < MIN_TOKEN_SECRET_LEN {
            return Err(AccessError::Configuration(format!(
                "token secret must be at least {MIN_TOKEN_SECRET_LEN} characters"
            )));
        }
        Ok(config)
    }

    /// Allow or forbid self-service tier changes
    pub fn with_self_service_tier_changes(mut self, enabled: bool) -> Self {
        self.self_service_tier_changes = enabled;
        self
    }
}

impl std::fmt::Debug for AccessConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessConfig")
            .field("token_secret", &"[redacted]")
            .field("token_issuer", &self.token_issuer)
            .field("token_audience", &self.token_audience)
            .field("self_service_tier_changes", &self.self_service_tier_changes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AccessConfig::new("secret", "issuer", "audience");
        assert!(!config.self_service_tier_changes);
        assert_eq!(config.token_audience, "audience");
    }

    #[test]
    fn test_try_new_rejects_short_secret() {
        assert!(AccessConfig::try_new("short", "iss", "aud").is_err());
        assert!(AccessConfig::try_new("x".repeat(MIN_TOKEN_SECRET_LEN), "iss", "aud").is_ok());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = AccessConfig::new("super-secret-value", "iss", "aud");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret-value"));
        assert!(debug.contains("[redacted]"));
    }
}
