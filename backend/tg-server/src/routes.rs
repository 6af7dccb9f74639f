use crate::{AppState, api, health, login, refresh};

use std::any::Any;

use axum::{
    Router, middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use log::error;
use tg_auth::{DEFAULT_RATE_CLASS, Role};
use tg_gateway::{GateLayer, Rejection, RoutePolicy, TenantRequirement, audit};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
};

/// Stricter rate class for credential endpoints, when configured
pub const AUTH_RATE_CLASS: &str = "auth";

/// Build the application router.
///
/// Probes stay outside the gate; every other route carries its own policy.
pub fn build_router(state: AppState) -> Router {
    let gateway = state.gateway.clone();
    let gate = |policy: RoutePolicy| GateLayer::new(gateway.clone(), policy);

    let login_class = if gateway.gateway.limiter().has_class(AUTH_RATE_CLASS) {
        AUTH_RATE_CLASS
    } else {
        DEFAULT_RATE_CLASS
    };

    Router::new()
        // Infrastructure probes
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        // Gated endpoints
        .route(
            "/api/me",
            get(api::me).layer(gate(RoutePolicy::authenticated())),
        )
        .route(
            "/admin/health",
            get(api::admin_health).layer(gate(RoutePolicy::role(Role::Owner))),
        )
        .route(
            "/auth/login",
            post(login::login).layer(gate(
                RoutePolicy::public()
                    .with_rate_class(login_class)
                    .with_tenant(TenantRequirement::Known),
            )),
        )
        .route(
            "/auth/refresh",
            post(refresh::refresh).layer(gate(
                RoutePolicy::authenticated().with_rate_class(login_class),
            )),
        )
        .with_state(state.clone())
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn_with_state(state.gateway, audit))
        .layer(
            CorsLayer::new()
                .allow_origin(AnyOrigin)
                .allow_methods(AnyOrigin)
                .allow_headers(AnyOrigin),
        )
}

/// A panicking handler answers with the generic 500 body
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    error!("Handler panicked: {message}");
    Rejection::internal("handler panicked").into_response()
}
