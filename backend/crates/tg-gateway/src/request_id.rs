use std::fmt;

use axum::http::HeaderMap;
use log::debug;
use uuid::Uuid;

pub const X_REQUEST_ID: &str = "x-request-id";

const MAX_REQUEST_ID_LENGTH: usize = 128;

/// Correlation id for one request, adopted from `X-Request-ID` or generated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Adopt a caller-supplied id when it is printable and reasonably short
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let Some(value) = headers.get(X_REQUEST_ID) else {
            return Self::generate();
        };

        match value.to_str().map(str::trim) {
            Ok(candidate) if is_acceptable(candidate) => Self(candidate.to_string()),
            _ => {
                let replacement = Self::generate();
                debug!(
                    "Replacing unusable {X_REQUEST_ID} ({} bytes) with {}",
                    value.len(),
                    replacement
                );
                replacement
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_acceptable(candidate: &str) -> bool {
    !candidate.is_empty()
        && candidate.len() <= MAX_REQUEST_ID_LENGTH
        && candidate.bytes().all(|b| b.is_ascii_graphic())
}
