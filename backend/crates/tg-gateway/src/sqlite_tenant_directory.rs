use crate::{
    GatewayError, Result as GatewayErrorResult, TenantDirectory, TenantRecord, TenantStatus,
};

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use log::{info, warn};
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

const MAX_CONNECTIONS: u32 = 5;

/// SQLite-backed tenant directory; the `tenants` table is created on open.
pub struct SqliteTenantDirectory {
    pool: SqlitePool,
}

impl SqliteTenantDirectory {
    pub async fn open(path: &Path) -> GatewayErrorResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                GatewayError::directory(format!(
                    "Failed to create tenant directory folder {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(
                SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true)
                    .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                    .busy_timeout(Duration::from_secs(5)),
            )
            .await?;

        info!("Tenant directory opened: {}", path.display());
        Self::from_pool(pool).await
    }

    /// Wrap an existing pool, creating the schema if needed
    pub async fn from_pool(pool: SqlitePool) -> GatewayErrorResult<Self> {
        sqlx::query(
            r#"
              CREATE TABLE IF NOT EXISTS tenants (
                  slug TEXT PRIMARY KEY NOT NULL,
                  status TEXT NOT NULL DEFAULT 'active'
              )
              "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl TenantDirectory for SqliteTenantDirectory {
    async fn find(&self, slug: &str) -> GatewayErrorResult<Option<TenantRecord>> {
        let row = sqlx::query("SELECT slug, status FROM tenants WHERE slug = ?")
            .bind(slug.trim().to_ascii_lowercase())
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let slug: String = row.try_get("slug")?;
        let status: String = row.try_get("status")?;

        // An unreadable status never counts as active
        let status = status.parse().unwrap_or_else(|e| {
            warn!("Tenant '{slug}': {e}, treating as suspended");
            TenantStatus::Suspended
        });

        Ok(Some(TenantRecord { slug, status }))
    }

    async fn upsert(&self, record: TenantRecord) -> GatewayErrorResult<()> {
        sqlx::query(
            r#"
              INSERT INTO tenants (slug, status)
              VALUES (?, ?)
              ON CONFLICT(slug) DO UPDATE SET status = excluded.status
              "#,
        )
        .bind(record.slug.trim().to_ascii_lowercase())
        .bind(record.status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn kind(&self) -> &'static str {
        "sqlite"
    }
}
