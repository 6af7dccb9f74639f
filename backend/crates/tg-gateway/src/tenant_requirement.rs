/// How strictly a route needs the host to name a tenant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TenantRequirement {
    /// Bare base domain is fine
    #[default]
    Optional,
    /// Host must carry a tenant label
    Required,
    /// Tenant label must exist in the tenant directory and be active
    Known,
}

impl TenantRequirement {
    pub fn requires_tenant(&self) -> bool {
        !matches!(self, Self::Optional)
    }
}
