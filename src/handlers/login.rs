// handlers/login.rs - POST /api/v1/login handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::extract::json_body;
use crate::app::AppState;
use crate::error::ApiError;

pub const PATH: &str = "/api/v1/login";

/// `return_admin_token` is required and must be a JSON boolean
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub return_admin_token: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub admin: bool,
    pub token: String,
}

/// Issue a bearer token. No credentials are checked; the caller chooses
/// whether the token carries write access.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let request = json_body(body)?;
    let admin = request.return_admin_token;

    let token = state.issuer.issue(admin)?;
    info!(admin, "issued token");

    Ok(Json(TokenResponse { admin, token }))
}
