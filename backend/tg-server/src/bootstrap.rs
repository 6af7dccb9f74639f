//! Builds the shared services once from validated configuration.

use crate::error::Result as ServerErrorResult;
use crate::{AppState, DevAccount};

use std::sync::Arc;

use log::{info, warn};
use tg_auth::{
    QuotaDescriptor, RateLimiter, SigningAlgorithm, SigningSecret, TenantResolver, TokenCodec,
    TokenCodecConfig,
};
use tg_config::{Config, TenantDirectoryKind};
use tg_gateway::{
    AuthGateway, GatewayState, InMemoryTenantDirectory, SqliteTenantDirectory, TenantDirectory,
};

pub fn build_codec(config: &Config) -> ServerErrorResult<TokenCodec> {
    let secret = SigningSecret::resolve(config.auth.secret(), config.auth.allow_dev_secret)?;
    let mut codec_config = TokenCodecConfig::new(secret);
    codec_config.algorithm = config.auth.algorithm.parse::<SigningAlgorithm>()?;
    codec_config.leeway_secs = config.auth.leeway_secs;
    codec_config.audience = config.auth.audience.clone();

    let codec = TokenCodec::new(codec_config)?;
    if codec.uses_development_secret() {
        warn!("JWT: using the built-in DEVELOPMENT secret, never run this in production");
    }
    info!(
        "JWT: {} with {}s leeway",
        codec.algorithm(),
        codec.leeway_secs()
    );

    Ok(codec)
}

pub fn build_limiter(config: &Config) -> ServerErrorResult<RateLimiter> {
    let quotas = config
        .rate_limit
        .all_classes()
        .into_iter()
        .map(|(name, class)| -> ServerErrorResult<(String, QuotaDescriptor)> {
            Ok((name, QuotaDescriptor::new(class.max_requests, class.window_secs)?))
        })
        .collect::<ServerErrorResult<Vec<_>>>()?;

    Ok(RateLimiter::new(quotas)?)
}

pub async fn build_directory(config: &Config) -> ServerErrorResult<Arc<dyn TenantDirectory>> {
    match config.tenancy.directory {
        TenantDirectoryKind::Memory => {
            let directory = InMemoryTenantDirectory::seeded(&config.tenancy.seed_tenants);
            info!(
                "Tenant directory: memory ({} seeded)",
                directory.len().await
            );
            Ok(Arc::new(directory))
        }
        TenantDirectoryKind::Sqlite => {
            let path = config.tenant_database_path()?;
            let directory = SqliteTenantDirectory::open(&path).await?;
            for slug in &config.tenancy.seed_tenants {
                directory
                    .upsert(tg_gateway::TenantRecord::active(slug))
                    .await?;
            }
            Ok(Arc::new(directory))
        }
    }
}

/// Everything the router needs, plus the limiter for housekeeping
pub struct Services {
    pub state: AppState,
    pub limiter: Arc<RateLimiter>,
}

pub async fn build_services(config: &Config) -> ServerErrorResult<Services> {
    let codec = Arc::new(build_codec(config)?);
    let limiter = Arc::new(build_limiter(config)?);
    let directory = build_directory(config).await?;
    let dev_accounts = DevAccount::from_config(&config.auth.dev_users)?;

    if !dev_accounts.is_empty() {
        warn!(
            "Dev login enabled for {} account(s), not for production use",
            dev_accounts.len()
        );
    }

    let gateway = AuthGateway::new(
        TenantResolver::new(&config.tenancy.base_domain),
        codec,
        limiter.clone(),
        directory,
        config.tenancy.lookup_timeout(),
    );

    Ok(Services {
        state: AppState {
            gateway: GatewayState::new(Arc::new(gateway), config.rate_limit.trust_forwarded_for),
            dev_accounts: Arc::new(dev_accounts),
            token_ttl: config.auth.token_ttl(),
        },
        limiter,
    })
}
