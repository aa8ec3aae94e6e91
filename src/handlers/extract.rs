// handlers/extract.rs - request parsing and response helpers shared by every resource

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequestParts},
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::filter::QueryParams;

pub const INVALID_ID: &str = "Provided incorrect identifier";
pub const INVALID_JSON: &str = "Invalid JSON in request body";
pub const INVALID_FIELDS: &str = "One or more required fields are missing or invalid";

/// Raw, multi-valued query parameters. Never rejects; validation happens in
/// the filter compiler.
#[derive(Debug, Clone, Default)]
pub struct Params(pub QueryParams);

#[async_trait]
impl<S> FromRequestParts<S> for Params
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Params(QueryParams::parse(parts.uri.query().unwrap_or_default())))
    }
}

/// Path ids must be base-10 integers
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse().map_err(|_| ApiError::bad_request(INVALID_ID))
}

/// Unwrap a JSON body, turning any rejection (syntax, types, content type)
/// into a 400 with a fixed message
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            debug!(error = %rejection.body_text(), "rejected request body");
            Err(ApiError::bad_request(INVALID_JSON))
        }
    }
}

/// 201 with a `Location` header pointing at the new record
pub fn created<T: Serialize>(location: String, body: T) -> Response {
    (StatusCode::CREATED, [(header::LOCATION, location)], Json(body)).into_response()
}

/// 204 with an `Allow` header listing the methods a path supports
pub fn allow(methods: &'static str) -> Response {
    (StatusCode::NO_CONTENT, [(header::ALLOW, methods)]).into_response()
}
