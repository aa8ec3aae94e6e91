// handlers/languages.rs - /api/v1/languages handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Response,
    Json,
};

use super::extract::{allow, created, json_body, parse_id, Params, INVALID_FIELDS};
use crate::app::AppState;
use crate::database::models::Language;
use crate::error::ApiError;
use crate::middleware::AdminClaims;

pub const PATH: &str = "/api/v1/languages";
pub const COLLECTION_METHODS: &str = "GET, POST, OPTIONS";
pub const ITEM_METHODS: &str = "GET, PUT, DELETE, OPTIONS";

pub async fn list_languages(
    State(state): State<AppState>,
    Params(params): Params,
) -> Result<Json<Vec<Language>>, ApiError> {
    Ok(Json(state.store.list_languages(&params).await?))
}

pub async fn get_language(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Language>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.store.get_language(id).await?))
}

pub async fn create_language(
    _admin: AdminClaims,
    State(state): State<AppState>,
    body: Result<Json<Language>, JsonRejection>,
) -> Result<Response, ApiError> {
    let mut language = json_body(body)?;
    if !language.is_valid() {
        return Err(ApiError::bad_request(INVALID_FIELDS));
    }

    language.id = state.store.insert_language(&language).await?;
    Ok(created(format!("{PATH}/{}", language.id), language))
}

pub async fn replace_language(
    _admin: AdminClaims,
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Language>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    let language = json_body(body)?;
    if !language.is_valid() {
        return Err(ApiError::bad_request(INVALID_FIELDS));
    }

    state.store.replace_language(id, &language).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_language(
    _admin: AdminClaims,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.store.delete_language(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn collection_options() -> Response {
    allow(COLLECTION_METHODS)
}

pub async fn item_options() -> Response {
    allow(ITEM_METHODS)
}
