use crate::{AuthError, Claims, Result as AuthErrorResult, Role};

use std::panic::Location;

use error_location::ErrorLocation;

/// Rank of a role name; `None` for names outside the hierarchy
pub fn rank(role: &str) -> Option<Role> {
    Role::parse(role)
}

/// True iff `rank(actual) >= rank(minimum)`.
///
/// An unknown `actual` satisfies nothing and an unknown `minimum` is
/// satisfied by nobody.
pub fn has_role(actual: &str, minimum: &str) -> bool {
    rank(minimum).is_some_and(|minimum| satisfies(actual, minimum))
}

/// Typed variant of [`has_role`] for call sites that hold a `Role`
pub fn satisfies(actual: &str, minimum: Role) -> bool {
    rank(actual) >= Some(minimum)
}

/// Require authenticated claims whose role is at least `minimum`.
///
/// Absent claims are `MissingToken` (401-class); an insufficient role is
/// `Forbidden` (403-class).
#[track_caller]
pub fn ensure_role(claims: Option<&Claims>, minimum: Role) -> AuthErrorResult<()> {
    let claims = claims.ok_or_else(|| AuthError::MissingToken {
        location: ErrorLocation::from(Location::caller()),
    })?;

    if satisfies(&claims.role, minimum) {
        Ok(())
    } else {
        Err(AuthError::Forbidden {
            required: minimum,
            actual: claims.role.clone(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
