use crate::{AppState, TokenResponse};

use axum::{Json, extract::State};
use log::info;
use serde::Deserialize;
use tg_gateway::{GateContext, Rejection};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /auth/login - issue a token bound to the host's tenant
pub async fn login(
    ctx: GateContext,
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, Rejection> {
    let tenant = ctx.tenant.ok_or_else(Rejection::missing_tenant)?;

    let account = state
        .find_account(&request.username, &request.password)
        .ok_or_else(Rejection::invalid_credentials)?;

    let access_token = state.gateway.gateway.codec().encode(
        &account.username,
        &tenant,
        account.role.as_str(),
        state.token_ttl,
    )?;

    info!(
        "[req={}] issued {} token for '{}' on tenant '{}'",
        ctx.request_id, account.role, account.username, tenant
    );

    Ok(Json(TokenResponse::bearer(access_token, state.token_ttl)))
}
