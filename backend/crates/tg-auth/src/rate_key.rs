use std::fmt;

/// Rate bucket key: one bucket per (tenant, client identity) pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RateKey {
    pub tenant: String,
    pub client: String,
}

impl RateKey {
    pub fn new(tenant: impl Into<String>, client: impl Into<String>) -> Self {
        Self {
            tenant: tenant.into(),
            client: client.into(),
        }
    }
}

impl fmt::Display for RateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.tenant, self.client)
    }
}
