use crate::{
    AuthConfig, CONFIG_DIR_ENV, CONFIG_FILE_NAME, ConfigError, ConfigErrorResult,
    DEFAULT_CONFIG_DIR_NAME, LoggingConfig, RateLimitConfig, ServerConfig, TenancyConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub tenancy: TenancyConfig,
    pub rate_limit: RateLimitConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for TG_CONFIG_DIR env var, else use ./.tg/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply TG_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: TG_CONFIG_DIR env var > ./.tg/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR_NAME))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.auth.validate()?;
        self.tenancy.validate()?;
        self.rate_limit.validate()?;
        Ok(())
    }

    /// Absolute path of the SQLite tenant directory.
    pub fn tenant_database_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.tenancy.database_path))
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {}:{} (shutdown grace {}s)",
            self.server.host, self.server.port, self.server.shutdown_grace_secs
        );

        let secret_source = if self.auth.secret().is_some() {
            "configured secret"
        } else if self.auth.allow_dev_secret {
            "DEVELOPMENT secret"
        } else {
            "none"
        };
        info!(
            "  auth: {} ({}), leeway={}s, ttl={}s, audience={}, dev_users={}",
            self.auth.algorithm,
            secret_source,
            self.auth.leeway_secs,
            self.auth.token_ttl_secs,
            self.auth.audience.as_deref().unwrap_or("unchecked"),
            self.auth.dev_users.len()
        );

        info!(
            "  tenancy: *.{} via {} directory (lookup timeout {}ms)",
            self.tenancy.base_domain, self.tenancy.directory, self.tenancy.lookup_timeout_ms
        );

        let classes = self
            .rate_limit
            .all_classes()
            .into_iter()
            .map(|(name, class)| format!("{}={}/{}s", name, class.max_requests, class.window_secs))
            .collect::<Vec<_>>()
            .join(", ");
        info!(
            "  rate_limit: {} (forwarded-for {}, cleanup every {}s)",
            classes,
            if self.rate_limit.trust_forwarded_for {
                "trusted"
            } else {
                "ignored"
            },
            self.rate_limit.cleanup_interval_secs
        );

        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("TG_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("TG_SERVER_PORT", &mut self.server.port);
        Self::apply_env_parse(
            "TG_SERVER_SHUTDOWN_GRACE_SECS",
            &mut self.server.shutdown_grace_secs,
        );

        // Auth
        Self::apply_env_option_string("TG_AUTH_JWT_SECRET", &mut self.auth.jwt_secret);
        Self::apply_env_bool("TG_AUTH_ALLOW_DEV_SECRET", &mut self.auth.allow_dev_secret);
        Self::apply_env_string("TG_AUTH_ALGORITHM", &mut self.auth.algorithm);
        Self::apply_env_parse("TG_AUTH_LEEWAY_SECS", &mut self.auth.leeway_secs);
        Self::apply_env_parse("TG_AUTH_TOKEN_TTL_SECS", &mut self.auth.token_ttl_secs);
        Self::apply_env_option_string("TG_AUTH_AUDIENCE", &mut self.auth.audience);

        // Tenancy
        Self::apply_env_string("TG_TENANCY_BASE_DOMAIN", &mut self.tenancy.base_domain);
        Self::apply_env_parse("TG_TENANCY_DIRECTORY", &mut self.tenancy.directory);
        Self::apply_env_string("TG_TENANCY_DATABASE_PATH", &mut self.tenancy.database_path);
        Self::apply_env_parse(
            "TG_TENANCY_LOOKUP_TIMEOUT_MS",
            &mut self.tenancy.lookup_timeout_ms,
        );

        // Rate limit
        Self::apply_env_parse(
            "TG_RATE_LIMIT_MAX_REQUESTS",
            &mut self.rate_limit.max_requests,
        );
        Self::apply_env_parse(
            "TG_RATE_LIMIT_WINDOW_SECS",
            &mut self.rate_limit.window_secs,
        );
        Self::apply_env_bool(
            "TG_RATE_LIMIT_TRUST_FORWARDED_FOR",
            &mut self.rate_limit.trust_forwarded_for,
        );
        Self::apply_env_parse(
            "TG_RATE_LIMIT_CLEANUP_INTERVAL_SECS",
            &mut self.rate_limit.cleanup_interval_secs,
        );

        // Logging
        Self::apply_env_parse("TG_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("TG_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("TG_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
