use crate::Role;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing bearer token {location}")]
    MissingToken { location: ErrorLocation },

    #[error("Invalid authorization scheme: expected 'Bearer' {location}")]
    InvalidScheme { location: ErrorLocation },

    #[error("Invalid token: {reason} {location}")]
    InvalidToken {
        reason: String,
        location: ErrorLocation,
    },

    #[error("Token expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("Invalid claim '{claim}': {message} {location}")]
    InvalidClaim {
        claim: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Token tenant mismatch: host resolves '{expected}', token carries '{actual}' {location}")]
    TenantMismatch {
        expected: String,
        actual: String,
        location: ErrorLocation,
    },

    #[error("Insufficient role: need '{required}', have '{actual}' {location}")]
    Forbidden {
        required: Role,
        actual: String,
        location: ErrorLocation,
    },

    #[error(
        "Rate limit exceeded: {limit} requests per {window_secs}s, retry after {retry_after_secs}s {location}"
    )]
    RateLimitExceeded {
        limit: u32,
        window_secs: u64,
        retry_after_secs: u64,
        location: ErrorLocation,
    },

    #[error("Auth configuration error: {message} {location}")]
    Config {
        message: String,
        location: ErrorLocation,
    },

    #[error("JWT encode failed: {source} {location}")]
    JwtEncode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },
}

impl AuthError {
    /// Stable machine-readable code, used in logs and metrics labels
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingToken { .. } => "MISSING_TOKEN",
            Self::InvalidScheme { .. } => "INVALID_AUTH_SCHEME",
            Self::InvalidToken { .. } => "INVALID_TOKEN",
            Self::TokenExpired { .. } => "TOKEN_EXPIRED",
            Self::InvalidClaim { .. } => "INVALID_CLAIM",
            Self::TenantMismatch { .. } => "TENANT_MISMATCH",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::RateLimitExceeded { .. } => "RATE_LIMITED",
            Self::Config { .. } => "AUTH_CONFIG",
            Self::JwtEncode { .. } => "JWT_ENCODE_FAILED",
        }
    }

    /// Client-facing reason for credential failures, without source locations.
    ///
    /// Returns `None` for errors that are not about the presented credential.
    pub fn token_reason(&self) -> Option<String> {
        match self {
            Self::InvalidScheme { .. } => Some("unsupported authorization scheme".to_string()),
            Self::InvalidToken { reason, .. } => Some(reason.clone()),
            Self::TokenExpired { .. } => Some("signature has expired".to_string()),
            Self::InvalidClaim { claim, message, .. } => Some(format!("{claim}: {message}")),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
