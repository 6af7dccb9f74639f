use crate::{
    Admission, AuthRequirement, GateRequest, GateStage, GatewayMetrics, Rejection, RoutePolicy,
    TenantDirectory, TenantRequirement,
};

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, warn};
use tg_auth::{
    Claims, RateDecision, RateKey, RateLimiter, TenantContext, TenantResolver, TokenCodec,
    ensure_role, parse_bearer,
};

/// Runs the per-request authorization pipeline.
///
/// Every stage either advances the request or produces a terminal
/// [`Rejection`]. The rate bucket is only touched once every earlier stage has
/// passed, so rejected requests never consume quota.
pub struct AuthGateway {
    resolver: TenantResolver,
    codec: Arc<TokenCodec>,
    limiter: Arc<RateLimiter>,
    directory: Arc<dyn TenantDirectory>,
    lookup_timeout: Duration,
    metrics: GatewayMetrics,
}

impl AuthGateway {
    pub fn new(
        resolver: TenantResolver,
        codec: Arc<TokenCodec>,
        limiter: Arc<RateLimiter>,
        directory: Arc<dyn TenantDirectory>,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            resolver,
            codec,
            limiter,
            directory,
            lookup_timeout,
            metrics: GatewayMetrics::new(),
        }
    }

    pub fn resolver(&self) -> &TenantResolver {
        &self.resolver
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    pub fn directory(&self) -> &dyn TenantDirectory {
        self.directory.as_ref()
    }

    /// Drive `request` through every stage `policy` asks for.
    pub async fn admit(
        &self,
        request: &GateRequest,
        policy: &RoutePolicy,
    ) -> Result<Admission, Rejection> {
        let started = Instant::now();
        let mut stage = GateStage::Start;

        let outcome = self.run(request, policy, &mut stage).await;
        self.metrics.gate_latency(started.elapsed());

        match &outcome {
            Ok(_) => {
                self.metrics.request_forwarded();
                debug!("[req={}] forwarded", request.request_id);
            }
            Err(rejection) => {
                self.metrics.request_rejected(rejection.kind());
                warn!(
                    "[req={}] rejected at {}: {}",
                    request.request_id, stage, rejection
                );
            }
        }

        outcome
    }

    /// Each step records the stage it is attempting, so a rejection is
    /// attributed to the transition that produced it.
    async fn run(
        &self,
        request: &GateRequest,
        policy: &RoutePolicy,
        stage: &mut GateStage,
    ) -> Result<Admission, Rejection> {
        *stage = GateStage::TenantResolved;
        let tenant = TenantContext::resolve(&self.resolver, request.host.as_deref());
        if policy.tenant.requires_tenant() && tenant.slug().is_none() {
            return Err(Rejection::missing_tenant());
        }

        let claims = match request.authorization.as_deref() {
            None => {
                *stage = GateStage::TokenAbsent;
                if policy.auth.requires_token() {
                    return Err(Rejection::missing_token());
                }
                None
            }
            Some(header) => {
                *stage = GateStage::TokenDecoded;
                let token = parse_bearer(header)?;
                Some(self.codec.decode(token, None)?)
            }
        };

        *stage = GateStage::TenantChecked;
        if let Some(claims) = &claims {
            claims.ensure_tenant(tenant.slug())?;
        }

        if policy.tenant == TenantRequirement::Known {
            *stage = GateStage::TenantVerified;
            self.verify_tenant(tenant.slug()).await?;
        }

        *stage = GateStage::RoleChecked;
        self.check_role(policy.auth, claims.as_ref())?;

        *stage = GateStage::RateChecked;
        let key = RateKey::new(tenant.rate_scope(), request.client.as_str());
        if let RateDecision::Denied { retry_after_secs } =
            self.limiter.check(&policy.rate_class, &key)?
        {
            return Err(Rejection::rate_limited(retry_after_secs));
        }

        *stage = GateStage::Forwarded;
        Ok(Admission {
            tenant,
            claims,
            request_id: request.request_id.clone(),
        })
    }

    /// Existence check against the tenant directory, bounded by the lookup timeout.
    /// Failures and timeouts reject; they never admit.
    async fn verify_tenant(&self, slug: Option<&str>) -> Result<(), Rejection> {
        let slug = slug.ok_or_else(Rejection::missing_tenant)?;

        match tokio::time::timeout(self.lookup_timeout, self.directory.find(slug)).await {
            Ok(Ok(Some(record))) if record.is_active() => Ok(()),
            Ok(Ok(_)) => Err(Rejection::unknown_tenant(slug)),
            Ok(Err(e)) => Err(Rejection::lookup_unavailable(e.to_string())),
            Err(_) => Err(Rejection::lookup_unavailable(format!(
                "{} directory lookup exceeded {}ms",
                self.directory.kind(),
                self.lookup_timeout.as_millis()
            ))),
        }
    }

    fn check_role(&self, auth: AuthRequirement, claims: Option<&Claims>) -> Result<(), Rejection> {
        match auth {
            AuthRequirement::Public => Ok(()),
            AuthRequirement::Authenticated => {
                claims.map(|_| ()).ok_or_else(Rejection::missing_token)
            }
            AuthRequirement::Role(minimum) => Ok(ensure_role(claims, minimum)?),
        }
    }
}
