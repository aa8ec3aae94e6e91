pub mod auth;

pub use auth::{authenticate, authorize, bearer_token, AdminClaims};
