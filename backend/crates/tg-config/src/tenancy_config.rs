use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_BASE_DOMAIN, DEFAULT_LOOKUP_TIMEOUT_MS,
    DEFAULT_TENANT_DATABASE_FILENAME, MAX_LOOKUP_TIMEOUT_MS, MIN_LOOKUP_TIMEOUT_MS,
    TenantDirectoryKind,
};

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TenancyConfig {
    /// Hosts of the form `<tenant>.<base_domain>` select a tenant
    pub base_domain: String,
    pub directory: TenantDirectoryKind,
    /// SQLite file, relative to the config directory
    pub database_path: String,
    /// Slugs registered as active in the in-memory directory at startup
    pub seed_tenants: Vec<String>,
    pub lookup_timeout_ms: u64,
}

impl Default for TenancyConfig {
    fn default() -> Self {
        Self {
            base_domain: String::from(DEFAULT_BASE_DOMAIN),
            directory: TenantDirectoryKind::default(),
            database_path: String::from(DEFAULT_TENANT_DATABASE_FILENAME),
            seed_tenants: Vec::new(),
            lookup_timeout_ms: DEFAULT_LOOKUP_TIMEOUT_MS,
        }
    }
}

impl TenancyConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let base = self.base_domain.trim().trim_matches('.');
        if base.is_empty() || base.contains(':') || base.contains('/') {
            return Err(ConfigError::tenancy(format!(
                "tenancy.base_domain must be a bare domain name, got '{}'",
                self.base_domain
            )));
        }

        // Escaping the config dir is never allowed
        if Path::new(&self.database_path).is_absolute() || self.database_path.contains("..") {
            return Err(ConfigError::tenancy(
                "tenancy.database_path must be relative and cannot contain '..'",
            ));
        }

        if self.lookup_timeout_ms < MIN_LOOKUP_TIMEOUT_MS
            || self.lookup_timeout_ms > MAX_LOOKUP_TIMEOUT_MS
        {
            return Err(ConfigError::tenancy(format!(
                "tenancy.lookup_timeout_ms must be {}-{}, got {}",
                MIN_LOOKUP_TIMEOUT_MS, MAX_LOOKUP_TIMEOUT_MS, self.lookup_timeout_ms
            )));
        }

        for slug in &self.seed_tenants {
            let valid = !slug.is_empty()
                && slug
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b == b'-');
            if !valid {
                return Err(ConfigError::tenancy(format!(
                    "tenancy.seed_tenants entry '{slug}' is not a valid host label"
                )));
            }
        }

        Ok(())
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }
}
