use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;

const BEARER_SCHEME: &str = "bearer";

/// Extract the token from an `Authorization: Bearer <token>` header value.
///
/// The scheme is matched case-insensitively.
#[track_caller]
pub fn parse_bearer(header_value: &str) -> AuthErrorResult<&str> {
    let header_value = header_value.trim();
    let (scheme, token) = header_value
        .split_once(char::is_whitespace)
        .unwrap_or((header_value, ""));

    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(AuthError::InvalidScheme {
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::InvalidToken {
            reason: "empty bearer token".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(token)
}
