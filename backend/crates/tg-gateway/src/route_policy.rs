use crate::{AuthRequirement, TenantRequirement};

use tg_auth::{DEFAULT_RATE_CLASS, Role};

/// Per-route gate configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePolicy {
    pub auth: AuthRequirement,
    /// Rate limiter class; must be configured on the limiter
    pub rate_class: String,
    pub tenant: TenantRequirement,
}

impl RoutePolicy {
    pub fn public() -> Self {
        Self::new(AuthRequirement::Public)
    }

    pub fn authenticated() -> Self {
        Self::new(AuthRequirement::Authenticated)
    }

    pub fn role(minimum: Role) -> Self {
        Self::new(AuthRequirement::Role(minimum))
    }

    fn new(auth: AuthRequirement) -> Self {
        Self {
            auth,
            rate_class: DEFAULT_RATE_CLASS.to_string(),
            tenant: TenantRequirement::Optional,
        }
    }

    pub fn with_rate_class(mut self, rate_class: impl Into<String>) -> Self {
        self.rate_class = rate_class.into();
        self
    }

    pub fn with_tenant(mut self, tenant: TenantRequirement) -> Self {
        self.tenant = tenant;
        self
    }
}
