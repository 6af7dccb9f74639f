use serde::Deserialize;

/// Local development account accepted by `POST /auth/login`
#[derive(Clone, Deserialize)]
pub struct DevUser {
    pub username: String,
    pub password: String,
    pub role: String,
}

impl std::fmt::Debug for DevUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DevUser")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}
