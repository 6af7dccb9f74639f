use std::fmt;

/// Pipeline states a request moves through, in order.
///
/// `TokenAbsent` and `TokenDecoded` are alternatives; `TenantVerified` is only
/// visited by routes that require a known tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GateStage {
    Start,
    TenantResolved,
    TokenAbsent,
    TokenDecoded,
    TenantChecked,
    TenantVerified,
    RoleChecked,
    RateChecked,
    Forwarded,
}

impl GateStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::TenantResolved => "tenant_resolved",
            Self::TokenAbsent => "token_absent",
            Self::TokenDecoded => "token_decoded",
            Self::TenantChecked => "tenant_checked",
            Self::TenantVerified => "tenant_verified",
            Self::RoleChecked => "role_checked",
            Self::RateChecked => "rate_checked",
            Self::Forwarded => "forwarded",
        }
    }
}

impl fmt::Display for GateStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
