use crate::{AppState, TokenResponse};

use axum::{Json, extract::State};
use log::info;
use tg_gateway::{GateContext, Rejection};

/// POST /auth/refresh - exchange a bearer token for a fresh one.
///
/// The gate has already verified the presented token (expiry leeway
/// included) and its tenant binding. Subject and role carry over; an
/// unbound token is rebound to the host's tenant when there is one.
pub async fn refresh(
    ctx: GateContext,
    State(state): State<AppState>,
) -> Result<Json<TokenResponse>, Rejection> {
    let claims = ctx.claims.as_ref().ok_or_else(Rejection::missing_token)?;

    let tenant = if claims.tenant.trim().is_empty() {
        ctx.tenant.as_deref().unwrap_or_default()
    } else {
        claims.tenant.as_str()
    };

    let access_token = state.gateway.gateway.codec().encode(
        &claims.subject,
        tenant,
        &claims.role,
        state.token_ttl,
    )?;

    info!(
        "[req={}] refreshed token for '{}' on tenant '{}'",
        ctx.request_id, claims.subject, tenant
    );

    Ok(Json(TokenResponse::bearer(access_token, state.token_ttl)))
}
