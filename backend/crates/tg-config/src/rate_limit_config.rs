use crate::{ConfigError, ConfigErrorResult, RateClassConfig};

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

/// Name of the class built from the top-level `max_requests`/`window_secs`
pub const DEFAULT_RATE_CLASS_NAME: &str = "default";

const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 60;
const MIN_CLEANUP_INTERVAL_SECS: u64 = 1;
const MAX_CLEANUP_INTERVAL_SECS: u64 = 3600;

/// Per-(tenant, client) rate limiting.
///
/// ```toml
/// [rate_limit]
/// max_requests = 10
/// window_secs = 60
///
/// [rate_limit.classes.auth]
/// max_requests = 5
/// window_secs = 60
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window_secs: u64,
    /// Use the first `X-Forwarded-For` entry as client identity
    pub trust_forwarded_for: bool,
    pub cleanup_interval_secs: u64,
    pub classes: BTreeMap<String, RateClassConfig>,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        let default_class = RateClassConfig::default();
        Self {
            max_requests: default_class.max_requests,
            window_secs: default_class.window_secs,
            trust_forwarded_for: false,
            cleanup_interval_secs: DEFAULT_CLEANUP_INTERVAL_SECS,
            classes: BTreeMap::new(),
        }
    }
}

impl RateLimitConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.default_class().validate(DEFAULT_RATE_CLASS_NAME)?;

        for (name, class) in &self.classes {
            if name.trim().is_empty() {
                return Err(ConfigError::rate_limit("rate_limit class names cannot be empty"));
            }
            if name == DEFAULT_RATE_CLASS_NAME {
                return Err(ConfigError::rate_limit(
                    "rate_limit.classes.default is reserved; set rate_limit.max_requests/window_secs instead",
                ));
            }
            class.validate(name)?;
        }

        if self.cleanup_interval_secs < MIN_CLEANUP_INTERVAL_SECS
            || self.cleanup_interval_secs > MAX_CLEANUP_INTERVAL_SECS
        {
            return Err(ConfigError::rate_limit(format!(
                "rate_limit.cleanup_interval_secs must be {}-{}, got {}",
                MIN_CLEANUP_INTERVAL_SECS, MAX_CLEANUP_INTERVAL_SECS, self.cleanup_interval_secs
            )));
        }

        Ok(())
    }

    pub fn default_class(&self) -> RateClassConfig {
        RateClassConfig {
            max_requests: self.max_requests,
            window_secs: self.window_secs,
        }
    }

    /// Every configured class, `default` first
    pub fn all_classes(&self) -> Vec<(String, RateClassConfig)> {
        std::iter::once((DEFAULT_RATE_CLASS_NAME.to_string(), self.default_class()))
            .chain(
                self.classes
                    .iter()
                    .map(|(name, class)| (name.clone(), *class)),
            )
            .collect()
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }
}
