use crate::error::{Result as ServerErrorResult, ServerError};

use tg_auth::Role;
use tg_config::DevUser;

/// Login account for local development, with its role already parsed
#[derive(Clone)]
pub struct DevAccount {
    pub username: String,
    password: String,
    pub role: Role,
}

impl DevAccount {
    pub fn new(username: &str, password: &str, role: Role) -> Self {
        Self {
            username: username.trim().to_string(),
            password: password.to_string(),
            role,
        }
    }

    /// Convert configured users, failing on a role outside the hierarchy
    pub fn from_config(users: &[DevUser]) -> ServerErrorResult<Vec<Self>> {
        users
            .iter()
            .map(|user| {
                let role = Role::parse(&user.role).ok_or_else(|| ServerError::DevUserRole {
                    username: user.username.clone(),
                    role: user.role.clone(),
                })?;
                Ok(Self::new(&user.username, &user.password, role))
            })
            .collect()
    }

    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username.eq_ignore_ascii_case(username.trim()) && self.password == password
    }
}

impl std::fmt::Debug for DevAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DevAccount")
            .field("username", &self.username)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}
