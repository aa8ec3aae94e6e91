use sqlx::postgres::PgRow;
use tracing::debug;

use super::bind::bind_all;
use super::manager::{Database, DatabaseError};
use crate::filter::{Filter, QueryParams, ResourceDescriptor};

impl Database {
    /// Run `base` with the filter, sort and paging compiled from `params`.
    ///
    /// `base` is a bare `SELECT ... FROM ...` (joins allowed, no WHERE).
    /// No matching rows yields an empty list, never an error.
    pub async fn list<T, F>(
        &self,
        base: &str,
        resource: &ResourceDescriptor,
        params: &QueryParams,
        scan: F,
    ) -> Result<Vec<T>, DatabaseError>
    where
        F: Fn(&PgRow) -> Result<T, sqlx::Error>,
    {
        let compiled = Filter::compile(params, resource)?;
        let sql = compiled.append_to(base);
        debug!(table = resource.table, sql = %sql, params = compiled.params.len(), "list");

        let rows = bind_all(sqlx::query(&sql), &compiled.params)
            .fetch_all(self.pool())
            .await
            .map_err(DatabaseError::query("failed to list records"))?;

        rows.iter()
            .map(scan)
            .collect::<Result<Vec<_>, _>>()
            .map_err(DatabaseError::query("failed to read listed record"))
    }

    /// Fetch the single row `sql` selects for `id` (bound as `$1`)
    pub async fn lookup_by_id<T, F>(&self, sql: &str, id: i64, scan: F) -> Result<T, DatabaseError>
    where
        F: Fn(&PgRow) -> Result<T, sqlx::Error>,
    {
        let row = sqlx::query(sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(DatabaseError::query("failed to look up record"))?
            .ok_or(DatabaseError::NotFound(id))?;

        scan(&row).map_err(DatabaseError::query("failed to read record"))
    }
}
