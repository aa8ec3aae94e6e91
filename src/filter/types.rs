/// Comparison operators selected by a key suffix, e.g. `year.gte=1980`.
/// A key without a recognised suffix compares with `Eq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl FilterOp {
    const SUFFIXES: [(&'static str, FilterOp); 6] = [
        (".eq", FilterOp::Eq),
        (".neq", FilterOp::Neq),
        (".gt", FilterOp::Gt),
        (".gte", FilterOp::Gte),
        (".lt", FilterOp::Lt),
        (".lte", FilterOp::Lte),
    ];

    /// Split a raw parameter key into the field name and its operator.
    pub fn split_key(key: &str) -> (&str, FilterOp) {
        for (suffix, op) in Self::SUFFIXES {
            if let Some(field) = key.strip_suffix(suffix) {
                return (field, op);
            }
        }
        (key, FilterOp::Eq)
    }

    pub fn to_sql(&self) -> &'static str {
        match self {
            FilterOp::Eq => "=",
            FilterOp::Neq => "<>",
            FilterOp::Gt => ">",
            FilterOp::Gte => ">=",
            FilterOp::Lt => "<",
            FilterOp::Lte => "<=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Storage type of a column, used to convert raw query values before binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Text,
}

/// One allow-list entry: the client-facing name and the column it maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub column: &'static str,
    pub kind: ColumnKind,
}

impl Field {
    pub const fn integer(name: &'static str, column: &'static str) -> Self {
        Self { name, column, kind: ColumnKind::Integer }
    }

    pub const fn text(name: &'static str, column: &'static str) -> Self {
        Self { name, column, kind: ColumnKind::Text }
    }
}

/// A table plus the only fields a client may filter or sort on.
///
/// Descriptors are declared once per resource as `const` items; column names
/// in `fields` are the only identifiers the filter compiler ever writes into
/// SQL text.
#[derive(Debug, Clone, Copy)]
pub struct ResourceDescriptor {
    pub table: &'static str,
    pub fields: &'static [Field],
}

impl ResourceDescriptor {
    pub const fn new(table: &'static str, fields: &'static [Field]) -> Self {
        Self { table, fields }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A value sent to the driver separately from SQL text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Null(ColumnKind),
    Integer(i64),
    Text(String),
}

impl SqlValue {
    /// Zero values (`0`, empty string, NULL) count as "not provided" in partial updates
    pub fn is_zero(&self) -> bool {
        match self {
            SqlValue::Null(_) => true,
            SqlValue::Integer(i) => *i == 0,
            SqlValue::Text(s) => s.is_empty(),
        }
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Integer(v)
    }
}

impl From<Option<i64>> for SqlValue {
    fn from(v: Option<i64>) -> Self {
        v.map_or(SqlValue::Null(ColumnKind::Integer), SqlValue::Integer)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

/// Right-hand side of a filter clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClauseValue {
    Bound(SqlValue),
    Null,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterClause {
    pub column: &'static str,
    pub op: FilterOp,
    pub value: ClauseValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub column: &'static str,
    pub direction: SortDirection,
}

/// `offset` is only ever set together with `limit`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// SQL suffix (`WHERE ... ORDER BY ... LIMIT ... OFFSET ...`) and its bound
/// values, in placeholder order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledQuery {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl CompiledQuery {
    /// Append this suffix to a base statement such as `SELECT ... FROM books`
    pub fn append_to(&self, base: &str) -> String {
        if self.sql.is_empty() {
            base.trim_end().to_string()
        } else {
            format!("{} {}", base.trim_end(), self.sql)
        }
    }
}
