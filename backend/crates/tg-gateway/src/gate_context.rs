use crate::{Admission, Rejection};

use std::future::Future;

use axum::{extract::FromRequestParts, http::request::Parts};
use tg_auth::Claims;

/// What a forwarded request carries into its handler
#[derive(Debug, Clone)]
pub struct GateContext {
    pub tenant: Option<String>,
    pub claims: Option<Claims>,
    pub request_id: String,
}

impl From<Admission> for GateContext {
    fn from(admission: Admission) -> Self {
        Self {
            tenant: admission.tenant.tenant_slug,
            claims: admission.claims,
            request_id: admission.request_id,
        }
    }
}

impl<S> FromRequestParts<S> for GateContext
where
    S: Send + Sync,
{
    type Rejection = Rejection;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            // Only present when the route sits behind the gate
            parts
                .extensions
                .get::<GateContext>()
                .cloned()
                .ok_or_else(|| Rejection::internal("handler reached without passing the gate"))
        }
    }
}
