use crate::{AuthError, Result as AuthErrorResult, Role};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

const MAX_TENANT_LENGTH: usize = 128;

/// Decoded bearer token payload.
///
/// Wire names are fixed for interoperability: `sub`, `tid`, `role`, `iat`, `exp`.
/// `role` is required; a token without it fails to decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User identifier
    #[serde(rename = "sub")]
    pub subject: String,
    /// Tenant slug the token is bound to (empty = not bound)
    #[serde(rename = "tid")]
    pub tenant: String,
    pub role: String,
    /// Issued at (unix seconds)
    #[serde(rename = "iat")]
    pub issued_at: i64,
    /// Expiration (unix seconds)
    #[serde(rename = "exp")]
    pub expires_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

impl Claims {
    /// Validate claims after signature verification
    #[track_caller]
    pub fn validate(&self) -> AuthErrorResult<()> {
        if self.subject.trim().is_empty() {
            return Err(AuthError::InvalidClaim {
                claim: "sub".to_string(),
                message: "sub cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.tenant.len() > MAX_TENANT_LENGTH {
            return Err(AuthError::InvalidClaim {
                claim: "tid".to_string(),
                message: "tid exceeds maximum length".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.role.trim().is_empty() {
            return Err(AuthError::InvalidClaim {
                claim: "role".to_string(),
                message: "role cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.expires_at <= self.issued_at {
            return Err(AuthError::InvalidClaim {
                claim: "exp".to_string(),
                message: "exp must be later than iat".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// Whether the token carries a tenant binding
    pub fn is_tenant_bound(&self) -> bool {
        !self.tenant.trim().is_empty()
    }

    /// Soft tenant binding: a bound token must name `expected` (case-insensitive).
    ///
    /// Passes when `expected` is absent or empty, or when the token is unbound.
    #[track_caller]
    pub fn ensure_tenant(&self, expected: Option<&str>) -> AuthErrorResult<()> {
        if let Some(expected) = expected.map(str::trim).filter(|t| !t.is_empty())
            && self.is_tenant_bound()
            && !self.tenant.trim().eq_ignore_ascii_case(expected)
        {
            return Err(AuthError::TenantMismatch {
                expected: expected.to_string(),
                actual: self.tenant.clone(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// Rank of the carried role, `None` when the role is outside the hierarchy
    pub fn role_rank(&self) -> Option<Role> {
        Role::parse(&self.role)
    }
}
