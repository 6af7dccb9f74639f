//! Tower layer that puts one route behind the gate.

use crate::{
    AuditActor, GateContext, GateRequest, GatewayState, RequestId, RoutePolicy, client_identity,
};

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Request, header},
    response::{IntoResponse, Response},
};
use tower::{Layer, Service};
use tracing::{Instrument, info_span};

#[derive(Clone)]
pub struct GateLayer {
    state: GatewayState,
    policy: Arc<RoutePolicy>,
}

impl GateLayer {
    pub fn new(state: GatewayState, policy: RoutePolicy) -> Self {
        Self {
            state,
            policy: Arc::new(policy),
        }
    }
}

impl<S> Layer<S> for GateLayer {
    type Service = GateMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        GateMiddleware {
            inner,
            state: self.state.clone(),
            policy: self.policy.clone(),
        }
    }
}

#[derive(Clone)]
pub struct GateMiddleware<S> {
    inner: S,
    state: GatewayState,
    policy: Arc<RoutePolicy>,
}

impl<S> Service<Request<Body>> for GateMiddleware<S>
where
    S: Service<Request<Body>, Response = Response, Error = Infallible> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let state = self.state.clone();
        let policy = self.policy.clone();
        // Take the service that was driven to readiness
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let gate_request = gate_request(&req, state.trust_forwarded_for);

            let admission = match state.gateway.admit(&gate_request, &policy).await {
                Ok(admission) => admission,
                Err(rejection) => return Ok(rejection.into_response()),
            };

            let actor = admission.actor().map(str::to_string);
            let span = info_span!(
                "gate_request",
                request_id = %admission.request_id,
                tenant = %admission.tenant.rate_scope(),
                actor = %actor.as_deref().unwrap_or("-"),
            );

            req.extensions_mut().insert(GateContext::from(admission));
            let mut response = inner.call(req).instrument(span).await?;

            if let Some(actor) = actor {
                response.extensions_mut().insert(AuditActor(actor));
            }
            Ok(response)
        })
    }
}

fn gate_request(req: &Request<Body>, trust_forwarded_for: bool) -> GateRequest {
    let headers = req.headers();
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    let request_id = req
        .extensions()
        .get::<RequestId>()
        .cloned()
        .unwrap_or_else(|| RequestId::from_headers(headers));

    // Non-UTF-8 header values are treated as absent
    GateRequest::new(
        headers.get(header::HOST).and_then(|v| v.to_str().ok()),
        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok()),
        &client_identity(headers, peer, trust_forwarded_for),
    )
    .with_request_id(request_id.0)
}
