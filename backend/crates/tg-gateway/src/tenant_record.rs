use crate::TenantStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantRecord {
    /// Lowercase host label
    pub slug: String,
    pub status: TenantStatus,
}

impl TenantRecord {
    pub fn active(slug: &str) -> Self {
        Self {
            slug: slug.trim().to_ascii_lowercase(),
            status: TenantStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == TenantStatus::Active
    }
}
