use crate::{Result as GatewayErrorResult, TenantDirectory, TenantRecord};

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

/// Process-local tenant directory, seeded at startup.
#[derive(Default)]
pub struct InMemoryTenantDirectory {
    tenants: RwLock<HashMap<String, TenantRecord>>,
}

impl InMemoryTenantDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory with every slug in `slugs` registered as active
    pub fn seeded<I, S>(slugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tenants = slugs
            .into_iter()
            .map(|slug| TenantRecord::active(slug.as_ref()))
            .map(|record| (record.slug.clone(), record))
            .collect();

        Self {
            tenants: RwLock::new(tenants),
        }
    }

    pub async fn len(&self) -> usize {
        self.tenants.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tenants.read().await.is_empty()
    }
}

#[async_trait]
impl TenantDirectory for InMemoryTenantDirectory {
    async fn find(&self, slug: &str) -> GatewayErrorResult<Option<TenantRecord>> {
        let key = slug.trim().to_ascii_lowercase();
        Ok(self.tenants.read().await.get(&key).cloned())
    }

    async fn upsert(&self, record: TenantRecord) -> GatewayErrorResult<()> {
        let record = TenantRecord {
            slug: record.slug.trim().to_ascii_lowercase(),
            ..record
        };
        self.tenants.write().await.insert(record.slug.clone(), record);
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "memory"
    }
}
