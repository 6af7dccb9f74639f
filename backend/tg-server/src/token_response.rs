use std::time::Duration;

use serde::Serialize;

pub const TOKEN_TYPE: &str = "bearer";

/// Body returned by the token-issuing routes
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Lifetime of `access_token` in seconds
    pub expires_in: u64,
}

impl TokenResponse {
    pub fn bearer(access_token: String, ttl: Duration) -> Self {
        Self {
            access_token,
            token_type: TOKEN_TYPE,
            expires_in: ttl.as_secs(),
        }
    }
}
