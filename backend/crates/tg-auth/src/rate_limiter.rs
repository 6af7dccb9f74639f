use crate::{
    AuthError, QuotaDescriptor, RateBucket, RateDecision, RateKey, Result as AuthErrorResult,
};

use std::collections::HashMap;
use std::panic::Location;
use std::time::Instant;

use dashmap::DashMap;
use error_location::ErrorLocation;
use log::debug;

/// Route class used when a call site does not name a stricter one
pub const DEFAULT_RATE_CLASS: &str = "default";

struct ClassLimiter {
    quota: QuotaDescriptor,
    buckets: DashMap<RateKey, RateBucket>,
}

/// Per-(tenant, client) fixed-window rate limiter, one bucket map per route class.
///
/// Buckets live in a sharded concurrent map. A check holds the write guard of
/// its key's shard for the whole read-compare-increment, so decisions are
/// linearizable per key while keys on other shards never contend.
pub struct RateLimiter {
    classes: HashMap<String, ClassLimiter>,
}

impl RateLimiter {
    #[track_caller]
    pub fn new<I, S>(quotas: I) -> AuthErrorResult<Self>
    where
        I: IntoIterator<Item = (S, QuotaDescriptor)>,
        S: Into<String>,
    {
        let classes: HashMap<String, ClassLimiter> = quotas
            .into_iter()
            .map(|(class, quota)| {
                let limiter = ClassLimiter {
                    quota,
                    buckets: DashMap::new(),
                };
                (class.into(), limiter)
            })
            .collect();

        if classes.is_empty() {
            return Err(AuthError::Config {
                message: "at least one rate class must be configured".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self { classes })
    }

    /// Limiter with a single `default` class
    #[track_caller]
    pub fn single(quota: QuotaDescriptor) -> AuthErrorResult<Self> {
        Self::new([(DEFAULT_RATE_CLASS, quota)])
    }

    pub fn quota(&self, class: &str) -> Option<QuotaDescriptor> {
        self.classes.get(class).map(|c| c.quota)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains_key(class)
    }

    /// Check and consume one slot of `key`'s bucket in `class`.
    ///
    /// An unknown class is a configuration fault and is reported as an error,
    /// never as an allowance.
    #[track_caller]
    pub fn check(&self, class: &str, key: &RateKey) -> AuthErrorResult<RateDecision> {
        self.check_at(class, key, Instant::now())
    }

    /// [`check`](Self::check) against an explicit clock reading
    #[track_caller]
    pub fn check_at(
        &self,
        class: &str,
        key: &RateKey,
        now: Instant,
    ) -> AuthErrorResult<RateDecision> {
        let class_limiter = self.classes.get(class).ok_or_else(|| AuthError::Config {
            message: format!("rate class '{class}' is not configured"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let decision = match class_limiter.buckets.get_mut(key) {
            Some(mut bucket) => bucket.try_acquire(&class_limiter.quota, now),
            None => class_limiter
                .buckets
                .entry(key.clone())
                .or_insert_with(|| RateBucket::new(now))
                .try_acquire(&class_limiter.quota, now),
        };

        if let RateDecision::Denied { retry_after_secs } = decision {
            debug!("Rate limit hit for {key} in class '{class}', retry after {retry_after_secs}s");
        }

        Ok(decision)
    }

    /// Like [`check`](Self::check) but maps a denial to `RateLimitExceeded`
    #[track_caller]
    pub fn enforce(&self, class: &str, key: &RateKey) -> AuthErrorResult<()> {
        match self.check(class, key)? {
            RateDecision::Allowed => Ok(()),
            RateDecision::Denied { retry_after_secs } => {
                let quota = self.quota(class).unwrap_or_default();
                Err(AuthError::RateLimitExceeded {
                    limit: quota.max_requests.get(),
                    window_secs: quota.window_secs(),
                    retry_after_secs,
                    location: ErrorLocation::from(Location::caller()),
                })
            }
        }
    }

    /// Drop buckets whose window has elapsed
    pub fn retain_recent(&self) {
        self.retain_recent_at(Instant::now());
    }

    pub fn retain_recent_at(&self, now: Instant) {
        for class in self.classes.values() {
            class
                .buckets
                .retain(|_, bucket| !bucket.is_expired(&class.quota, now));
            class.buckets.shrink_to_fit();
        }
    }

    /// Number of buckets currently tracked across all classes
    pub fn tracked_keys(&self) -> usize {
        self.classes.values().map(|c| c.buckets.len()).sum()
    }
}
