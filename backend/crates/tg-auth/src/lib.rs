pub mod bearer_token;
pub mod claims;
pub mod error;
pub mod quota_descriptor;
pub mod rate_bucket;
pub mod rate_decision;
pub mod rate_key;
pub mod rate_limiter;
pub mod rbac;
pub mod role;
pub mod signing_algorithm;
pub mod signing_secret;
pub mod tenant_context;
pub mod tenant_resolver;
pub mod token_codec;
pub mod token_codec_config;

pub use bearer_token::parse_bearer;
pub use claims::Claims;
pub use error::{AuthError, Result};
pub use quota_descriptor::QuotaDescriptor;
pub use rate_bucket::RateBucket;
pub use rate_decision::RateDecision;
pub use rate_key::RateKey;
pub use rate_limiter::{DEFAULT_RATE_CLASS, RateLimiter};
pub use rbac::{ensure_role, has_role, rank, satisfies};
pub use role::Role;
pub use signing_algorithm::SigningAlgorithm;
pub use signing_secret::SigningSecret;
pub use tenant_context::{PUBLIC_TENANT_SCOPE, TenantContext};
pub use tenant_resolver::{TenantResolver, resolve_tenant};
pub use token_codec::TokenCodec;
pub use token_codec_config::{DEFAULT_LEEWAY_SECS, TokenCodecConfig};
