// handlers/health.rs - GET /health

use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::warn;

use crate::app::AppState;
use crate::error::ApiError;

pub const PATH: &str = "/health";

pub async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    state.store.ping().await.map_err(|e| {
        warn!(error = %e, "health check failed");
        ApiError::service_unavailable("Database unavailable")
    })?;
    Ok(Json(json!({ "status": "ok" })))
}
