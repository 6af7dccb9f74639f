//! Request/response audit middleware.
//!
//! Installed once around the whole router with
//! `axum::middleware::from_fn_with_state`. It runs before any [`crate::GateLayer`],
//! so the request id it settles on is the one the gate and the handler see.

use crate::{AuditRecord, GatewayState, RequestId, X_REQUEST_ID};

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Request, header},
    middleware::Next,
    response::Response,
};

/// Subject of the verified token, left on the response by the gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditActor(pub String);

pub async fn audit(
    State(state): State<GatewayState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let started = Instant::now();
    let request_id = RequestId::from_headers(req.headers());

    let tenant = req
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .and_then(|host| state.gateway.resolver().resolve(host));

    let record = AuditRecord::request(
        request_id.as_str(),
        tenant.as_deref(),
        req.method().as_str(),
        req.uri().path(),
        req.uri().query(),
    );
    record.emit();

    req.extensions_mut().insert(request_id.clone());
    let mut response = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(X_REQUEST_ID, value);
    }

    let actor = response
        .extensions()
        .get::<AuditActor>()
        .map(|AuditActor(actor)| actor.as_str());
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    record
        .response(actor, response.status().as_u16(), elapsed_ms)
        .emit();

    response
}
