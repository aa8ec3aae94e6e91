//! Translation of driver errors into the catalog's error taxonomy.
//!
//! Every write path runs its failures through [`translate`] so there is a
//! single table of codes that mean "a referenced row is missing" or "this row
//! is still referenced".

use super::manager::DatabaseError;

/// SQLSTATE codes for referential-integrity failures
const FOREIGN_KEY_SQLSTATES: &[&str] = &["23503"];

pub fn is_foreign_key_code(code: &str) -> bool {
    FOREIGN_KEY_SQLSTATES.contains(&code)
}

pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .map(|code| is_foreign_key_code(&code))
        .unwrap_or(false)
}

/// Foreign key failures become [`DatabaseError::ForeignKeyViolation`];
/// anything else is an internal query error tagged with `context`
pub fn translate(err: sqlx::Error, context: &'static str) -> DatabaseError {
    if is_foreign_key_violation(&err) {
        DatabaseError::ForeignKeyViolation
    } else {
        DatabaseError::Query { context, source: err }
    }
}
