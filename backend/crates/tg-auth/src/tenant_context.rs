use crate::TenantResolver;

/// Rate-limit scope used when the host resolves no tenant
pub const PUBLIC_TENANT_SCOPE: &str = "public";

/// Tenant derived once per request from the `Host` header.
/// Read-only after resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TenantContext {
    pub tenant_slug: Option<String>,
}

impl TenantContext {
    pub fn resolve(resolver: &TenantResolver, host: Option<&str>) -> Self {
        Self {
            tenant_slug: host.and_then(|h| resolver.resolve(h)),
        }
    }

    pub fn slug(&self) -> Option<&str> {
        self.tenant_slug.as_deref()
    }

    /// Tenant component of the rate-limit key
    pub fn rate_scope(&self) -> &str {
        self.slug().unwrap_or(PUBLIC_TENANT_SCOPE)
    }
}
