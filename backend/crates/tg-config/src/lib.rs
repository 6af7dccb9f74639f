mod auth_config;
mod config;
mod dev_user;
mod error;
mod log_level;
mod logging_config;
mod rate_class_config;
mod rate_limit_config;
mod server_config;
mod tenancy_config;
mod tenant_directory_kind;

pub use auth_config::AuthConfig;
pub use config::Config;
pub use dev_user::DevUser;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use rate_class_config::RateClassConfig;
pub use rate_limit_config::{DEFAULT_RATE_CLASS_NAME, RateLimitConfig};
pub use server_config::ServerConfig;
pub use tenancy_config::TenancyConfig;
pub use tenant_directory_kind::TenantDirectoryKind;

#[cfg(test)]
mod tests;

const CONFIG_DIR_ENV: &str = "TG_CONFIG_DIR";
const DEFAULT_CONFIG_DIR_NAME: &str = ".tg";
const CONFIG_FILE_NAME: &str = "config.toml";

// Server
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const MIN_PORT: u16 = 1024;
const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 10;
const MAX_SHUTDOWN_GRACE_SECS: u64 = 300;

// Auth
const MIN_JWT_SECRET_LENGTH: usize = 32;
const DEFAULT_ALGORITHM: &str = "HS256";
const SUPPORTED_ALGORITHMS: [&str; 3] = ["HS256", "HS384", "HS512"];
const DEFAULT_LEEWAY_SECS: u64 = 60;
const MAX_LEEWAY_SECS: u64 = 300;
const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;
const MIN_TOKEN_TTL_SECS: u64 = 60;
const MAX_TOKEN_TTL_SECS: u64 = 86_400;

// Tenancy
const DEFAULT_BASE_DOMAIN: &str = "lvh.me";
const DEFAULT_TENANT_DATABASE_FILENAME: &str = "tenants.db";
const DEFAULT_LOOKUP_TIMEOUT_MS: u64 = 500;
const MIN_LOOKUP_TIMEOUT_MS: u64 = 1;
const MAX_LOOKUP_TIMEOUT_MS: u64 = 10_000;

// Logging
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_LOG_COLORED: bool = true;
