use crate::{AuthError, Result as AuthErrorResult};

use std::fmt;
use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;

/// Closed role hierarchy, ordered by rank: `Analyst < Owner < Admin`.
///
/// The derived `Ord` follows declaration order, so "at least this role"
/// checks are plain comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Analyst,
    Owner,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Analyst, Role::Owner, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Analyst => "analyst",
            Role::Owner => "owner",
            Role::Admin => "admin",
        }
    }

    /// Case-insensitive lookup; unknown names yield `None`
    pub fn parse(value: &str) -> Option<Role> {
        let value = value.trim();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    #[track_caller]
    fn from_str(s: &str) -> AuthErrorResult<Self> {
        Role::parse(s).ok_or_else(|| AuthError::InvalidClaim {
            claim: "role".to_string(),
            message: format!("unknown role '{s}' (expected analyst, owner or admin)"),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
