//! Terminal per-request failures of the gate and their HTTP mapping.

use std::panic::Location;

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::RETRY_AFTER},
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use tg_auth::{AuthError, Role};
use thiserror::Error;

/// JSON error body: `{"detail": "..."}`
#[derive(Debug, Serialize)]
pub struct RejectionBody {
    pub detail: String,
}

#[derive(Debug, Error)]
pub enum Rejection {
    /// No credential on a protected route (401)
    #[error("Missing token {location}")]
    MissingToken { location: ErrorLocation },

    /// Malformed, expired or badly signed credential (401)
    #[error("Invalid token: {reason} {location}")]
    InvalidToken {
        reason: String,
        location: ErrorLocation,
    },

    /// Token bound to another tenant (401)
    #[error("Token tenant mismatch: expected '{expected}', token carries '{actual}' {location}")]
    TenantMismatch {
        expected: String,
        actual: String,
        location: ErrorLocation,
    },

    /// Authenticated but below the route's minimum role (403)
    #[error("Insufficient role: need '{required}', have '{actual}' {location}")]
    Forbidden {
        required: Role,
        actual: String,
        location: ErrorLocation,
    },

    /// Quota exhausted (429)
    #[error("Rate limit exceeded, retry after {retry_after_secs}s {location}")]
    RateLimited {
        retry_after_secs: u64,
        location: ErrorLocation,
    },

    /// Route needs a tenant but the host names none (400)
    #[error("Tenant not provided {location}")]
    MissingTenant { location: ErrorLocation },

    /// Tenant label not registered or not active (404)
    #[error("Unknown tenant '{tenant}' {location}")]
    UnknownTenant {
        tenant: String,
        location: ErrorLocation,
    },

    /// Tenant directory failed or timed out (503)
    #[error("Tenant directory unavailable: {message} {location}")]
    TenantLookupUnavailable {
        message: String,
        location: ErrorLocation,
    },

    /// Login with unknown user or wrong password (401)
    #[error("Invalid credentials {location}")]
    InvalidCredentials { location: ErrorLocation },

    /// Any fault inside the gate itself (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl Rejection {
    #[track_caller]
    pub fn missing_token() -> Self {
        Self::MissingToken {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn missing_tenant() -> Self {
        Self::MissingTenant {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unknown_tenant(tenant: &str) -> Self {
        Self::UnknownTenant {
            tenant: tenant.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn lookup_unavailable<S: Into<String>>(message: S) -> Self {
        Self::TenantLookupUnavailable {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn rate_limited(retry_after_secs: u64) -> Self {
        Self::RateLimited {
            retry_after_secs: retry_after_secs.max(1),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingToken { .. }
            | Self::InvalidToken { .. }
            | Self::TenantMismatch { .. }
            | Self::InvalidCredentials { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::MissingTenant { .. } => StatusCode::BAD_REQUEST,
            Self::UnknownTenant { .. } => StatusCode::NOT_FOUND,
            Self::TenantLookupUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable label for metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingToken { .. } => "missing_token",
            Self::InvalidToken { .. } => "invalid_token",
            Self::TenantMismatch { .. } => "tenant_mismatch",
            Self::Forbidden { .. } => "forbidden",
            Self::RateLimited { .. } => "rate_limited",
            Self::MissingTenant { .. } => "missing_tenant",
            Self::UnknownTenant { .. } => "unknown_tenant",
            Self::TenantLookupUnavailable { .. } => "tenant_lookup_unavailable",
            Self::InvalidCredentials { .. } => "invalid_credentials",
            Self::Internal { .. } => "internal",
        }
    }

    /// Client-facing message; never includes source locations or internals
    pub fn detail(&self) -> String {
        match self {
            Self::MissingToken { .. } => "missing token".to_string(),
            Self::InvalidToken { reason, .. } => format!("invalid token: {reason}"),
            Self::TenantMismatch { .. } => "token tenant mismatch".to_string(),
            Self::Forbidden {
                required, actual, ..
            } => format!("insufficient role: need '{required}', have '{actual}'"),
            Self::RateLimited { .. } => "rate limit exceeded".to_string(),
            Self::MissingTenant { .. } => "tenant not provided".to_string(),
            Self::UnknownTenant { .. } => "unknown tenant".to_string(),
            Self::TenantLookupUnavailable { .. } => "tenant directory unavailable".to_string(),
            Self::InvalidCredentials { .. } => "invalid credentials".to_string(),
            Self::Internal { .. } => "internal server error".to_string(),
        }
    }
}

impl From<AuthError> for Rejection {
    #[track_caller]
    fn from(error: AuthError) -> Self {
        let location = ErrorLocation::from(Location::caller());

        if let Some(reason) = error.token_reason() {
            return Self::InvalidToken { reason, location };
        }

        match error {
            AuthError::MissingToken { .. } => Self::MissingToken { location },
            AuthError::TenantMismatch {
                expected, actual, ..
            } => Self::TenantMismatch {
                expected,
                actual,
                location,
            },
            AuthError::Forbidden {
                required, actual, ..
            } => Self::Forbidden {
                required,
                actual,
                location,
            },
            AuthError::RateLimitExceeded {
                retry_after_secs, ..
            } => Self::RateLimited {
                retry_after_secs: retry_after_secs.max(1),
                location,
            },
            other => {
                log::error!("Gate fault: {other}");
                Self::Internal {
                    message: other.error_code().to_string(),
                    location,
                }
            }
        }
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        if let Self::Internal { .. } = self {
            log::error!("{}", self);
        }

        let status = self.status();
        let body = Json(RejectionBody {
            detail: self.detail(),
        });
        let mut response = (status, body).into_response();

        if let Self::RateLimited {
            retry_after_secs, ..
        } = self
        {
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(retry_after_secs));
        }

        response
    }
}
