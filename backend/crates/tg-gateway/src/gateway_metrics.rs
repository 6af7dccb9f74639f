use std::time::Duration;

use metrics::{counter, histogram};

/// Metrics collector for gate decisions
#[derive(Clone)]
pub struct GatewayMetrics {
    prefix: &'static str,
}

impl GatewayMetrics {
    pub fn new() -> Self {
        Self {
            prefix: "tg_gateway",
        }
    }

    /// Record a request that passed every stage
    pub fn request_forwarded(&self) {
        counter!(format!("{}.requests.forwarded", self.prefix)).increment(1);
    }

    /// Record a rejection by kind
    pub fn request_rejected(&self, kind: &str) {
        counter!(format!("{}.requests.rejected", self.prefix)).increment(1);
        counter!(format!("{}.requests.rejected.{}", self.prefix, kind)).increment(1);
    }

    /// Record time spent in the gate
    pub fn gate_latency(&self, duration: Duration) {
        histogram!(format!("{}.requests.latency_ms", self.prefix))
            .record(duration.as_secs_f64() * 1000.0);
    }
}

impl Default for GatewayMetrics {
    fn default() -> Self {
        Self::new()
    }
}
