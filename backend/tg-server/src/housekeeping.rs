use crate::ShutdownGuard;

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use tg_auth::RateLimiter;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Periodically drop rate buckets whose window elapsed until shutdown
pub fn spawn_rate_limit_housekeeping(
    limiter: Arc<RateLimiter>,
    every: Duration,
    mut shutdown: ShutdownGuard,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let before = limiter.tracked_keys();
                    limiter.retain_recent();
                    debug!(
                        "Rate bucket cleanup: {} -> {} keys",
                        before,
                        limiter.tracked_keys()
                    );
                }
                _ = shutdown.wait() => {
                    info!("Rate bucket housekeeping stopped");
                    break;
                }
            }
        }
    })
}
