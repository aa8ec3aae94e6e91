//! Bearer token claims and the errors raised while issuing or checking them.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::error::ErrorKind;

pub mod token;

pub use token::{TokenIssuer, TokenVerifier};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    /// Only the JSON boolean `true` grants write access; anything else,
    /// including a missing claim, does not
    #[serde(default)]
    pub admin: Value,
}

impl Claims {
    pub const ISSUER: &'static str = "server";
    pub const SUBJECT: &'static str = "user";

    pub fn new(admin: bool, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            iss: Self::ISSUER.to_string(),
            sub: Self::SUBJECT.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            admin: Value::Bool(admin),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.admin, Value::Bool(true))
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No token provided")]
    MissingToken,

    #[error("No Bearer prefix in Authorization header")]
    MissingBearerPrefix,

    #[error("Malformed token")]
    Malformed,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token has expired")]
    Expired,

    #[error("Token could not be verified")]
    Verification(#[source] jsonwebtoken::errors::Error),

    #[error("Could not read token claims")]
    MissingClaims,

    #[error("You do not have sufficient permissions to access this resource")]
    NotAdmin,

    #[error("Failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("Token secret is empty")]
    EmptySecret,
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::NotAdmin => ErrorKind::Forbidden,
            AuthError::Signing(_) | AuthError::EmptySecret => ErrorKind::Internal,
            _ => ErrorKind::Unauthenticated,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind as Jwt;

        match err.kind() {
            Jwt::InvalidToken | Jwt::Base64(_) | Jwt::Json(_) | Jwt::Utf8(_) => AuthError::Malformed,
            Jwt::InvalidSignature => AuthError::InvalidSignature,
            Jwt::ExpiredSignature => AuthError::Expired,
            _ => AuthError::Verification(err),
        }
    }
}
