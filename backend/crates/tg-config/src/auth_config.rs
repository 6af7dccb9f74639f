use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_ALGORITHM, DEFAULT_LEEWAY_SECS,
    DEFAULT_TOKEN_TTL_SECS, DevUser, MAX_LEEWAY_SECS, MAX_TOKEN_TTL_SECS, MIN_JWT_SECRET_LENGTH,
    MIN_TOKEN_TTL_SECS, SUPPORTED_ALGORITHMS,
};

use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;

/// Token signing and verification settings.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC signing secret; at least 32 characters when set
    pub jwt_secret: Option<String>,
    /// Fall back to the built-in development secret when no secret is set
    pub allow_dev_secret: bool,
    pub algorithm: String,
    /// Clock-skew tolerance applied to `exp`
    pub leeway_secs: u64,
    /// Lifetime of tokens issued by the login route
    pub token_ttl_secs: u64,
    /// Expected `aud` claim; unchecked when unset
    pub audience: Option<String>,
    pub dev_users: Vec<DevUser>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            allow_dev_secret: false,
            algorithm: String::from(DEFAULT_ALGORITHM),
            leeway_secs: DEFAULT_LEEWAY_SECS,
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            audience: None,
            dev_users: Vec::new(),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("allow_dev_secret", &self.allow_dev_secret)
            .field("algorithm", &self.algorithm)
            .field("leeway_secs", &self.leeway_secs)
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("audience", &self.audience)
            .field("dev_users", &self.dev_users)
            .finish()
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        match self.jwt_secret.as_deref().map(str::trim) {
            Some(secret) if !secret.is_empty() => {
                if secret.len() < MIN_JWT_SECRET_LENGTH {
                    return Err(ConfigError::auth(format!(
                        "auth.jwt_secret must be at least {} characters",
                        MIN_JWT_SECRET_LENGTH
                    )));
                }
            }
            _ if !self.allow_dev_secret => {
                return Err(ConfigError::auth(
                    "auth.jwt_secret is required (or set auth.allow_dev_secret for local development)",
                ));
            }
            _ => {}
        }

        if !SUPPORTED_ALGORITHMS
            .iter()
            .any(|alg| alg.eq_ignore_ascii_case(self.algorithm.trim()))
        {
            return Err(ConfigError::auth(format!(
                "auth.algorithm must be one of {}, got '{}'",
                SUPPORTED_ALGORITHMS.join(", "),
                self.algorithm
            )));
        }

        if self.leeway_secs > MAX_LEEWAY_SECS {
            return Err(ConfigError::auth(format!(
                "auth.leeway_secs must be 0-{}, got {}",
                MAX_LEEWAY_SECS, self.leeway_secs
            )));
        }

        if self.token_ttl_secs < MIN_TOKEN_TTL_SECS || self.token_ttl_secs > MAX_TOKEN_TTL_SECS {
            return Err(ConfigError::auth(format!(
                "auth.token_ttl_secs must be {}-{}, got {}",
                MIN_TOKEN_TTL_SECS, MAX_TOKEN_TTL_SECS, self.token_ttl_secs
            )));
        }

        if let Some(audience) = &self.audience
            && audience.trim().is_empty()
        {
            return Err(ConfigError::auth("auth.audience cannot be empty when set"));
        }

        let mut seen = HashSet::new();
        for user in &self.dev_users {
            if user.username.trim().is_empty() || user.password.is_empty() {
                return Err(ConfigError::auth(
                    "auth.dev_users entries need a username and a password",
                ));
            }
            if !seen.insert(user.username.to_ascii_lowercase()) {
                return Err(ConfigError::auth(format!(
                    "auth.dev_users contains duplicate username '{}'",
                    user.username
                )));
            }
        }

        Ok(())
    }

    /// Configured secret with surrounding whitespace removed; `None` when blank
    pub fn secret(&self) -> Option<&str> {
        self.jwt_secret
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }

    pub fn find_dev_user(&self, username: &str) -> Option<&DevUser> {
        self.dev_users
            .iter()
            .find(|user| user.username.eq_ignore_ascii_case(username.trim()))
    }
}
