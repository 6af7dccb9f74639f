use crate::{ShutdownCoordinator, spawn_rate_limit_housekeeping};

use std::sync::Arc;
use std::time::Duration;

use tg_auth::{QuotaDescriptor, RateKey, RateLimiter};

#[tokio::test]
async fn given_running_housekeeping_when_shutdown_triggered_then_task_stops() {
    // Given
    let limiter = Arc::new(RateLimiter::single(QuotaDescriptor::default()).unwrap());
    let shutdown = ShutdownCoordinator::new();
    let handle = spawn_rate_limit_housekeeping(
        limiter,
        Duration::from_millis(10),
        shutdown.subscribe_guard(),
    );

    // When
    tokio::time::sleep(Duration::from_millis(30)).await;
    shutdown.shutdown();

    // Then
    let joined = tokio::time::timeout(Duration::from_secs(2), handle).await;
    assert!(matches!(joined, Ok(Ok(()))));
}

#[tokio::test]
async fn given_elapsed_window_when_housekeeping_ticks_then_key_dropped() {
    let limiter = Arc::new(RateLimiter::single(QuotaDescriptor::new(5, 1).unwrap()).unwrap());
    limiter
        .check("default", &RateKey::new("tenant1", "10.0.0.1"))
        .unwrap();
    assert_eq!(limiter.tracked_keys(), 1);

    let shutdown = ShutdownCoordinator::new();
    let handle = spawn_rate_limit_housekeeping(
        limiter.clone(),
        Duration::from_millis(50),
        shutdown.subscribe_guard(),
    );

    tokio::time::sleep(Duration::from_millis(1300)).await;
    shutdown.shutdown();
    handle.await.unwrap();

    assert_eq!(limiter.tracked_keys(), 0);
}
