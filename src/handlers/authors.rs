// handlers/authors.rs - /api/v1/authors handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Response,
    Json,
};

use super::extract::{allow, created, json_body, parse_id, Params, INVALID_FIELDS};
use crate::app::AppState;
use crate::database::models::{Author, AuthorPatch};
use crate::error::ApiError;
use crate::middleware::AdminClaims;

pub const PATH: &str = "/api/v1/authors";
pub const COLLECTION_METHODS: &str = "GET, POST, OPTIONS";
pub const ITEM_METHODS: &str = "GET, PUT, PATCH, DELETE, OPTIONS";

pub async fn list_authors(
    State(state): State<AppState>,
    Params(params): Params,
) -> Result<Json<Vec<Author>>, ApiError> {
    Ok(Json(state.store.list_authors(&params).await?))
}

pub async fn get_author(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Author>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.store.get_author(id).await?))
}

pub async fn create_author(
    _admin: AdminClaims,
    State(state): State<AppState>,
    body: Result<Json<Author>, JsonRejection>,
) -> Result<Response, ApiError> {
    let mut author = json_body(body)?;
    if !author.is_valid() {
        return Err(ApiError::bad_request(INVALID_FIELDS));
    }

    author.id = state.store.insert_author(&author).await?;
    Ok(created(format!("{PATH}/{}", author.id), author))
}

pub async fn replace_author(
    _admin: AdminClaims,
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Author>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    let author = json_body(body)?;
    if !author.is_valid() {
        return Err(ApiError::bad_request(INVALID_FIELDS));
    }

    state.store.replace_author(id, &author).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn patch_author(
    _admin: AdminClaims,
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<AuthorPatch>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    let patch = json_body(body)?;

    state.store.patch_author(id, &patch).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Fails with a foreign key error while books still reference the author
pub async fn delete_author(
    _admin: AdminClaims,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.store.delete_author(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn collection_options() -> Response {
    allow(COLLECTION_METHODS)
}

pub async fn item_options() -> Response {
    allow(ITEM_METHODS)
}
