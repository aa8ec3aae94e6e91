// handlers/books.rs - /api/v1/books handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Response,
    Json,
};

use super::extract::{allow, created, json_body, parse_id, Params, INVALID_FIELDS};
use crate::app::AppState;
use crate::database::models::{Book, BookListing, BookPatch, BookView};
use crate::error::ApiError;
use crate::middleware::AdminClaims;

pub const PATH: &str = "/api/v1/books";
pub const COLLECTION_METHODS: &str = "GET, POST, OPTIONS";
pub const ITEM_METHODS: &str = "GET, PUT, PATCH, DELETE, OPTIONS";

/// GET /api/v1/books - filtered listing; `extend=true` embeds related records
pub async fn list_books(
    State(state): State<AppState>,
    Params(params): Params,
) -> Result<Json<BookListing>, ApiError> {
    let view = BookView::from_params(&params);
    let books = state.store.list_books(&params, view).await?;
    Ok(Json(books))
}

/// GET /api/v1/books/:id
pub async fn get_book(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Book>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.store.get_book(id).await?))
}

/// POST /api/v1/books
pub async fn create_book(
    _admin: AdminClaims,
    State(state): State<AppState>,
    body: Result<Json<Book>, JsonRejection>,
) -> Result<Response, ApiError> {
    let mut book = json_body(body)?;
    if !book.is_valid() {
        return Err(ApiError::bad_request(INVALID_FIELDS));
    }

    book.id = state.store.insert_book(&book).await?;
    Ok(created(format!("{PATH}/{}", book.id), book))
}

/// PUT /api/v1/books/:id - replace every field
pub async fn replace_book(
    _admin: AdminClaims,
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Book>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    let book = json_body(body)?;
    if !book.is_valid() {
        return Err(ApiError::bad_request(INVALID_FIELDS));
    }

    state.store.replace_book(id, &book).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/books/:id - update only the supplied fields
pub async fn patch_book(
    _admin: AdminClaims,
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<BookPatch>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    let patch = json_body(body)?;

    state.store.patch_book(id, &patch).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/books/:id
pub async fn delete_book(
    _admin: AdminClaims,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.store.delete_book(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn collection_options() -> Response {
    allow(COLLECTION_METHODS)
}

pub async fn item_options() -> Response {
    allow(ITEM_METHODS)
}
