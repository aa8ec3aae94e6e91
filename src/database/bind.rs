use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::Postgres;

use crate::filter::{ColumnKind, SqlValue};

pub(crate) type PgQuery<'q> = Query<'q, Postgres, PgArguments>;

/// Bind one value; typed NULLs keep Postgres from guessing the parameter type
pub(crate) fn bind_value<'q>(q: PgQuery<'q>, v: &'q SqlValue) -> PgQuery<'q> {
    match v {
        SqlValue::Null(ColumnKind::Integer) => q.bind(None::<i64>),
        SqlValue::Null(ColumnKind::Text) => q.bind(None::<String>),
        SqlValue::Integer(i) => q.bind(*i),
        SqlValue::Text(s) => q.bind(s.as_str()),
    }
}

/// Bind values in placeholder order
pub(crate) fn bind_all<'q>(mut q: PgQuery<'q>, values: &'q [SqlValue]) -> PgQuery<'q> {
    for v in values {
        q = bind_value(q, v);
    }
    q
}
