use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::auth::{AuthError, Claims};
use crate::error::ApiError;

const BEARER_PREFIX: &str = "Bearer ";

/// Rejects requests without a valid bearer token and stores the verified
/// [`Claims`] in the request extensions for later extractors
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers())?;
    let claims = state.verifier.verify(token)?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Extract the raw token from `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let header = headers.get(AUTHORIZATION).ok_or(AuthError::MissingToken)?;
    let value = header.to_str().map_err(|_| AuthError::MissingBearerPrefix)?;
    if value.is_empty() {
        return Err(AuthError::MissingToken);
    }

    value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::MissingBearerPrefix)
}

/// Admin check over the claims `authenticate` left behind
pub fn authorize(claims: Option<&Claims>) -> Result<&Claims, AuthError> {
    let claims = claims.ok_or(AuthError::MissingClaims)?;
    if !claims.is_admin() {
        return Err(AuthError::NotAdmin);
    }
    Ok(claims)
}

/// Extractor for write routes: succeeds only for verified admin tokens.
///
/// Place it before any body extractor so non-admins are refused before the
/// body is read.
#[derive(Debug, Clone)]
pub struct AdminClaims(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for AdminClaims
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = authorize(parts.extensions.get::<Claims>())?;
        Ok(AdminClaims(claims.clone()))
    }
}
