use tg_auth::Role;

/// Credential a route demands before it is forwarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRequirement {
    /// No token needed; a presented token is still verified
    Public,
    Authenticated,
    /// Authenticated with at least this role
    Role(Role),
}

impl AuthRequirement {
    pub fn requires_token(&self) -> bool {
        !matches!(self, Self::Public)
    }

    pub fn minimum_role(&self) -> Option<Role> {
        match self {
            Self::Role(role) => Some(*role),
            _ => None,
        }
    }
}
