use crate::{QuotaDescriptor, RateDecision};

use std::time::Instant;

/// Fixed-window counter for one (tenant, client) pair
#[derive(Debug, Clone, Copy)]
pub struct RateBucket {
    window_start: Instant,
    count: u32,
}

impl RateBucket {
    pub fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            count: 0,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// True once the window that started at `window_start` has fully elapsed
    pub fn is_expired(&self, quota: &QuotaDescriptor, now: Instant) -> bool {
        now.saturating_duration_since(self.window_start) >= quota.window
    }

    /// Consume one slot, opening a fresh window first if the current one expired
    pub fn try_acquire(&mut self, quota: &QuotaDescriptor, now: Instant) -> RateDecision {
        if self.is_expired(quota, now) {
            *self = Self::new(now);
        }

        if self.count < quota.max_requests.get() {
            self.count += 1;
            return RateDecision::Allowed;
        }

        let elapsed = now.saturating_duration_since(self.window_start);
        let wait = quota.window.saturating_sub(elapsed);
        let retry_after_secs = (wait.as_secs() + u64::from(wait.subsec_nanos() > 0)).max(1);
        RateDecision::Denied { retry_after_secs }
    }
}
