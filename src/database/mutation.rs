use sqlx::Row;
use tracing::debug;

use super::bind::bind_all;
use super::constraint::translate;
use super::manager::{Database, DatabaseError};
use crate::filter::SqlValue;

/// Column assignments for a partial update.
///
/// Absent values are skipped, and so are zero values (`0`, `""`): a field
/// that arrives empty is treated as "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignments {
    columns: Vec<(&'static str, SqlValue)>,
}

impl Assignments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<V: Into<SqlValue>>(mut self, column: &'static str, value: Option<V>) -> Self {
        if let Some(v) = value.map(Into::into) {
            if !v.is_zero() {
                self.columns.push((column, v));
            }
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|(c, _)| *c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &SqlValue)> + '_ {
        self.columns.iter().map(|(c, v)| (*c, v))
    }

    /// `UPDATE <table> SET a = $1, b = $2 WHERE id = $3` plus its bound values
    pub fn to_update_sql(&self, table: &str, id: i64) -> Result<(String, Vec<SqlValue>), DatabaseError> {
        if self.columns.is_empty() {
            return Err(DatabaseError::NoColumnsToUpdate);
        }

        let mut values = Vec::with_capacity(self.columns.len() + 1);
        let mut sets = Vec::with_capacity(self.columns.len());
        for (column, value) in &self.columns {
            values.push(value.clone());
            sets.push(format!("{} = ${}", column, values.len()));
        }
        values.push(SqlValue::Integer(id));

        let sql = format!("UPDATE {} SET {} WHERE id = ${}", table, sets.join(", "), values.len());
        Ok((sql, values))
    }
}

impl Database {
    /// Run an `INSERT ... RETURNING id` and hand back the new id
    pub async fn insert(&self, sql: &str, values: &[SqlValue]) -> Result<i64, DatabaseError> {
        debug!(sql, "insert");
        let row = bind_all(sqlx::query(sql), values)
            .fetch_one(self.pool())
            .await
            .map_err(|e| translate(e, "failed to insert record"))?;

        row.try_get::<i64, _>("id")
            .map_err(DatabaseError::query("failed to read inserted id"))
    }

    /// Replace every writable column of row `id`.
    ///
    /// `sql` binds `values` first and the id in the placeholder after them.
    pub async fn update_whole(&self, sql: &str, values: &[SqlValue], id: i64) -> Result<(), DatabaseError> {
        debug!(sql, id, "update");
        let result = bind_all(sqlx::query(sql), values)
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(|e| translate(e, "failed to update record"))?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(id));
        }
        Ok(())
    }

    /// Update only the columns present in `assignments`
    pub async fn update_partial(
        &self,
        table: &str,
        id: i64,
        assignments: &Assignments,
    ) -> Result<(), DatabaseError> {
        let (sql, values) = assignments.to_update_sql(table, id)?;
        debug!(sql = %sql, id, "partial update");

        let result = bind_all(sqlx::query(&sql), &values)
            .execute(self.pool())
            .await
            .map_err(|e| translate(e, "failed to update record"))?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(id));
        }
        Ok(())
    }

    /// Delete row `id` (bound as `$1`)
    pub async fn delete_by_id(&self, sql: &str, id: i64) -> Result<(), DatabaseError> {
        debug!(sql, id, "delete");
        let result = sqlx::query(sql)
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(|e| translate(e, "failed to delete record"))?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(id));
        }
        Ok(())
    }
}
