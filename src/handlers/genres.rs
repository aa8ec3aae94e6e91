// handlers/genres.rs - /api/v1/genres handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Response,
    Json,
};

use super::extract::{allow, created, json_body, parse_id, Params, INVALID_FIELDS};
use crate::app::AppState;
use crate::database::models::Genre;
use crate::error::ApiError;
use crate::middleware::AdminClaims;

pub const PATH: &str = "/api/v1/genres";
pub const COLLECTION_METHODS: &str = "GET, POST, OPTIONS";
pub const ITEM_METHODS: &str = "GET, PUT, DELETE, OPTIONS";

pub async fn list_genres(
    State(state): State<AppState>,
    Params(params): Params,
) -> Result<Json<Vec<Genre>>, ApiError> {
    Ok(Json(state.store.list_genres(&params).await?))
}

pub async fn get_genre(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Genre>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.store.get_genre(id).await?))
}

pub async fn create_genre(
    _admin: AdminClaims,
    State(state): State<AppState>,
    body: Result<Json<Genre>, JsonRejection>,
) -> Result<Response, ApiError> {
    let mut genre = json_body(body)?;
    if !genre.is_valid() {
        return Err(ApiError::bad_request(INVALID_FIELDS));
    }

    genre.id = state.store.insert_genre(&genre).await?;
    Ok(created(format!("{PATH}/{}", genre.id), genre))
}

pub async fn replace_genre(
    _admin: AdminClaims,
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Genre>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    let genre = json_body(body)?;
    if !genre.is_valid() {
        return Err(ApiError::bad_request(INVALID_FIELDS));
    }

    state.store.replace_genre(id, &genre).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_genre(
    _admin: AdminClaims,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.store.delete_genre(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn collection_options() -> Response {
    allow(COLLECTION_METHODS)
}

pub async fn item_options() -> Response {
    allow(ITEM_METHODS)
}
