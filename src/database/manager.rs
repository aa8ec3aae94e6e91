use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::error::ErrorKind;
use crate::filter::FilterError;

/// Errors from the query and mutation executors
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("No resource found with id {0}")]
    NotFound(i64),

    #[error("Foreign key constraint error")]
    ForeignKeyViolation,

    #[error("Parameter error: {0}")]
    Param(#[from] FilterError),

    #[error("No columns to update")]
    NoColumnsToUpdate,

    #[error("{context}: {source}")]
    Query {
        context: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl DatabaseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DatabaseError::NotFound(_) => ErrorKind::NotFound,
            DatabaseError::ForeignKeyViolation => ErrorKind::ForeignKeyViolation,
            DatabaseError::Param(_) | DatabaseError::NoColumnsToUpdate => ErrorKind::ParamError,
            DatabaseError::Query { .. } => ErrorKind::Internal,
        }
    }

    /// Wrap a driver error with a short description of what was being attempted
    pub(crate) fn query(context: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| DatabaseError::Query { context, source }
    }
}

/// Shared handle to the relational store.
///
/// Cloning is cheap: the pool is reference counted and every clone talks to
/// the same set of connections.
#[derive(Clone, Debug)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Open the pool and verify the server is reachable before returning
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
            .connect(&config.url)
            .await
            .map_err(DatabaseError::query("failed to open database pool"))?;

        let db = Self { pool };
        db.health_check().await?;

        info!(
            max_connections = config.max_connections,
            "Connected to database"
        );
        Ok(db)
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Round trip to the server
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::query("failed to ping database"))?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }
}
