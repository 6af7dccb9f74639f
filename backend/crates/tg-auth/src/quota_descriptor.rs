use crate::{AuthError, Result as AuthErrorResult};

use std::num::NonZeroU32;
use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;

pub const DEFAULT_QUOTA_REQUESTS: u32 = 10;
pub const DEFAULT_QUOTA_WINDOW_SECS: u64 = 60;

/// Request quota for one route class: `max_requests` per `window`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaDescriptor {
    pub max_requests: NonZeroU32,
    pub window: Duration,
}

impl QuotaDescriptor {
    #[track_caller]
    pub fn new(max_requests: u32, window_secs: u64) -> AuthErrorResult<Self> {
        let max_requests = NonZeroU32::new(max_requests).ok_or_else(|| AuthError::Config {
            message: "quota max_requests must be at least 1".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if window_secs == 0 {
            return Err(AuthError::Config {
                message: "quota window must be at least 1 second".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        })
    }

    pub fn window_secs(&self) -> u64 {
        self.window.as_secs()
    }
}

impl Default for QuotaDescriptor {
    fn default() -> Self {
        Self {
            max_requests: NonZeroU32::new(DEFAULT_QUOTA_REQUESTS).unwrap_or(NonZeroU32::MIN),
            window: Duration::from_secs(DEFAULT_QUOTA_WINDOW_SECS),
        }
    }
}
