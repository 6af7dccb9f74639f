use tg_auth::{Claims, TenantContext};

/// Successful gate outcome, attached to the forwarded request
#[derive(Debug, Clone)]
pub struct Admission {
    pub tenant: TenantContext,
    pub claims: Option<Claims>,
    pub request_id: String,
}

impl Admission {
    /// Subject of the verified token, if any
    pub fn actor(&self) -> Option<&str> {
        self.claims.as_ref().map(|c| c.subject.as_str())
    }
}
