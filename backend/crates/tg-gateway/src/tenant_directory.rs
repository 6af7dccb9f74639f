use crate::{Result as GatewayErrorResult, TenantRecord};

use async_trait::async_trait;

/// Storage port for tenant existence checks.
///
/// Slugs are matched case-insensitively; implementations store them lowercase.
#[async_trait]
pub trait TenantDirectory: Send + Sync {
    async fn find(&self, slug: &str) -> GatewayErrorResult<Option<TenantRecord>>;

    async fn upsert(&self, record: TenantRecord) -> GatewayErrorResult<()>;

    /// Short label for logs
    fn kind(&self) -> &'static str;
}
