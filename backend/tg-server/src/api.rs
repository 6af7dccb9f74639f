//! Gated demonstration endpoints.

use axum::Json;
use serde::Serialize;
use tg_gateway::{GateContext, Rejection};

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: String,
    pub tenant: Option<String>,
    pub role: String,
    pub request_id: String,
}

#[derive(Debug, Serialize)]
pub struct AdminHealthResponse {
    pub ok: bool,
    pub tenant: Option<String>,
    pub role: String,
}

/// GET /api/me
pub async fn me(ctx: GateContext) -> Result<Json<MeResponse>, Rejection> {
    let claims = ctx.claims.ok_or_else(Rejection::missing_token)?;

    Ok(Json(MeResponse {
        user: claims.subject,
        tenant: ctx.tenant,
        role: claims.role,
        request_id: ctx.request_id,
    }))
}

/// GET /admin/health
pub async fn admin_health(ctx: GateContext) -> Result<Json<AdminHealthResponse>, Rejection> {
    let claims = ctx.claims.ok_or_else(Rejection::missing_token)?;

    Ok(Json(AdminHealthResponse {
        ok: true,
        tenant: ctx.tenant,
        role: claims.role,
    }))
}
