use crate::{AuthError, Result as AuthErrorResult};

use std::fmt;
use std::panic::Location;

use error_location::ErrorLocation;

/// Built-in secret for local development only. Never valid in production:
/// callers can detect it through [`SigningSecret::is_development`].
const DEVELOPMENT_SECRET: &[u8] = b"tenant-gate-development-secret-not-for-production";

/// Symmetric key used to sign and verify bearer tokens
#[derive(Clone)]
pub enum SigningSecret {
    Configured(Vec<u8>),
    Development,
}

impl SigningSecret {
    /// Pick the configured secret, or the development default when allowed.
    ///
    /// Fails with `AuthError::Config` when no usable secret exists.
    #[track_caller]
    pub fn resolve(configured: Option<&str>, allow_development: bool) -> AuthErrorResult<Self> {
        match configured.map(str::trim) {
            Some(secret) if !secret.is_empty() => Ok(Self::Configured(secret.as_bytes().to_vec())),
            _ if allow_development => Ok(Self::Development),
            _ => Err(AuthError::Config {
                message: "no signing secret configured".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Configured(secret) => secret,
            Self::Development => DEVELOPMENT_SECRET,
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configured(_) => f.write_str("SigningSecret::Configured(<redacted>)"),
            Self::Development => f.write_str("SigningSecret::Development"),
        }
    }
}
