use crate::AuthGateway;

use std::sync::Arc;

/// Shared state for the gate middleware and gated handlers
#[derive(Clone)]
pub struct GatewayState {
    pub gateway: Arc<AuthGateway>,
    /// Take client identity from `X-Forwarded-For`
    pub trust_forwarded_for: bool,
}

impl GatewayState {
    pub fn new(gateway: Arc<AuthGateway>, trust_forwarded_for: bool) -> Self {
        Self {
            gateway,
            trust_forwarded_for,
        }
    }
}
