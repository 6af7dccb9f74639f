mod gate_layer;
mod rejection;

use crate::{
    AuthGateway, GateContext, GateLayer, GatewayState, InMemoryTenantDirectory, RoutePolicy,
    TenantDirectory, TenantRequirement, audit as audit_middleware,
};

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    body::Body,
    http::{Request, Response, header},
    middleware,
    routing::get,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tg_auth::{
    QuotaDescriptor, RateLimiter, Role, SigningSecret, TenantResolver, TokenCodec,
    TokenCodecConfig,
};

pub(crate) const SECRET: &str = "gateway-test-secret-at-least-32-bytes";
pub(crate) const BASE_DOMAIN: &str = "lvh.me";
pub(crate) const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_millis(500);

pub(crate) fn codec() -> Arc<TokenCodec> {
    let config = TokenCodecConfig::new(SigningSecret::Configured(SECRET.as_bytes().to_vec()));
    Arc::new(TokenCodec::new(config).unwrap())
}

/// `default` class with `max_requests`/60s plus a stricter `auth` class
pub(crate) fn limiter(max_requests: u32) -> Arc<RateLimiter> {
    Arc::new(
        RateLimiter::new([
            ("default", QuotaDescriptor::new(max_requests, 60).unwrap()),
            ("auth", QuotaDescriptor::new(2, 60).unwrap()),
        ])
        .unwrap(),
    )
}

pub(crate) fn seeded_directory() -> Arc<dyn TenantDirectory> {
    Arc::new(InMemoryTenantDirectory::seeded(["tenant1", "tenant2"]))
}

pub(crate) fn gateway_with(
    directory: Arc<dyn TenantDirectory>,
    max_requests: u32,
    lookup_timeout: Duration,
) -> Arc<AuthGateway> {
    Arc::new(AuthGateway::new(
        TenantResolver::new(BASE_DOMAIN),
        codec(),
        limiter(max_requests),
        directory,
        lookup_timeout,
    ))
}

pub(crate) fn gateway() -> Arc<AuthGateway> {
    gateway_with(seeded_directory(), 10, DEFAULT_LOOKUP_TIMEOUT)
}

pub(crate) fn token(subject: &str, tenant: &str, role: &str) -> String {
    codec()
        .encode(subject, tenant, role, Duration::from_secs(600))
        .unwrap()
}

pub(crate) fn host(tenant: &str) -> String {
    format!("{tenant}.{BASE_DOMAIN}")
}

pub(crate) fn get_request(uri: &str, host: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri).header(header::HOST, host);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub(crate) async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn whoami(ctx: GateContext) -> Json<Value> {
    Json(json!({
        "user": ctx.claims.as_ref().map(|c| c.subject.clone()),
        "tenant": ctx.tenant,
        "role": ctx.claims.as_ref().map(|c| c.role.clone()),
        "request_id": ctx.request_id,
    }))
}

/// Router exercising every policy shape, wrapped in the audit middleware
pub(crate) fn router(state: GatewayState) -> Router {
    let gate = |policy: RoutePolicy| GateLayer::new(state.clone(), policy);

    Router::new()
        .route("/public", get(whoami).layer(gate(RoutePolicy::public())))
        .route("/api/me", get(whoami).layer(gate(RoutePolicy::authenticated())))
        .route(
            "/admin/health",
            get(whoami).layer(gate(RoutePolicy::role(Role::Owner))),
        )
        .route(
            "/known",
            get(whoami).layer(gate(
                RoutePolicy::public().with_tenant(TenantRequirement::Known),
            )),
        )
        .route(
            "/required",
            get(whoami).layer(gate(
                RoutePolicy::public().with_tenant(TenantRequirement::Required),
            )),
        )
        .route(
            "/login",
            get(whoami).layer(gate(
                RoutePolicy::public()
                    .with_rate_class("auth")
                    .with_tenant(TenantRequirement::Known),
            )),
        )
        .route(
            "/misconfigured",
            get(whoami).layer(gate(RoutePolicy::public().with_rate_class("missing"))),
        )
        .route("/ungated", get(whoami))
        .layer(middleware::from_fn_with_state(state.clone(), audit_middleware))
}

pub(crate) fn app() -> Router {
    router(GatewayState::new(gateway(), false))
}
