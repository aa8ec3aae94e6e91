use super::error::FilterError;
use super::params::QueryParams;
use super::types::{
    ClauseValue, ColumnKind, Field, FilterClause, FilterOp, ResourceDescriptor, SqlValue,
};

/// Parameter names that control paging, sorting or the response shape and
/// never name a filter column
pub const RESERVED_PARAMS: [&str; 4] = ["limit", "offset", "sort_by", "extend"];

pub struct FilterWhere;

impl FilterWhere {
    /// Turn every non-reserved parameter into a clause against an allow-listed column
    pub fn parse(
        params: &QueryParams,
        resource: &ResourceDescriptor,
    ) -> Result<Vec<FilterClause>, FilterError> {
        let mut clauses = Vec::new();
        for (key, values) in params.iter() {
            if RESERVED_PARAMS.contains(&key) {
                continue;
            }

            let (name, op) = FilterOp::split_key(key);
            let field = resource
                .field(name)
                .ok_or_else(|| FilterError::UnknownParameter(name.to_string()))?;

            let raw = single_value(key, values)?;
            clauses.push(Self::clause(field, op, raw)?);
        }
        Ok(clauses)
    }

    fn clause(field: &Field, op: FilterOp, raw: &str) -> Result<FilterClause, FilterError> {
        if raw.eq_ignore_ascii_case("null") {
            if !matches!(op, FilterOp::Eq | FilterOp::Neq) {
                return Err(FilterError::NullOperator(field.name.to_string()));
            }
            return Ok(FilterClause { column: field.column, op, value: ClauseValue::Null });
        }

        let value = convert(field, raw)?;
        Ok(FilterClause { column: field.column, op, value: ClauseValue::Bound(value) })
    }

    /// Render one clause, pushing its bound value (if any) onto `params`
    pub fn generate(clause: &FilterClause, params: &mut Vec<SqlValue>) -> String {
        match &clause.value {
            ClauseValue::Null if clause.op == FilterOp::Eq => format!("{} IS NULL", clause.column),
            ClauseValue::Null => format!("{} IS NOT NULL", clause.column),
            ClauseValue::Bound(value) => {
                params.push(value.clone());
                format!("{} {} ${}", clause.column, clause.op.to_sql(), params.len())
            }
        }
    }
}

/// Exactly one non-empty value must be supplied for a key
pub(crate) fn single_value<'a>(key: &str, values: &'a [String]) -> Result<&'a str, FilterError> {
    match values {
        [] => Err(FilterError::EmptyValue(key.to_string())),
        [only] if only.is_empty() => Err(FilterError::EmptyValue(key.to_string())),
        [only] => Ok(only.as_str()),
        _ => Err(FilterError::TooManyValues(key.to_string())),
    }
}

fn convert(field: &Field, raw: &str) -> Result<SqlValue, FilterError> {
    match field.kind {
        ColumnKind::Text => Ok(SqlValue::Text(raw.to_string())),
        ColumnKind::Integer => raw
            .trim()
            .parse::<i64>()
            .map(SqlValue::Integer)
            .map_err(|_| FilterError::InvalidValue {
                param: field.name.to_string(),
                value: raw.to_string(),
            }),
    }
}
