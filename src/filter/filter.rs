use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::filter_where::{single_value, FilterWhere};
use super::params::QueryParams;
use super::types::{CompiledQuery, FilterClause, Page, ResourceDescriptor, SortSpec, SqlValue};

pub const LIMIT_PARAM: &str = "limit";
pub const OFFSET_PARAM: &str = "offset";

/// Compiles raw query parameters into a parameterized SQL suffix.
///
/// Only allow-listed column names and fixed keywords are written into the
/// SQL text; every client value travels as a bound parameter.
pub struct Filter<'a> {
    resource: &'a ResourceDescriptor,
    clauses: Vec<FilterClause>,
    sort: Option<SortSpec>,
    page: Page,
}

impl<'a> Filter<'a> {
    pub fn new(resource: &'a ResourceDescriptor) -> Self {
        Self {
            resource,
            clauses: vec![],
            sort: None,
            page: Page::default(),
        }
    }

    /// Parse, validate and compile in one step
    pub fn compile(
        params: &QueryParams,
        resource: &'a ResourceDescriptor,
    ) -> Result<CompiledQuery, FilterError> {
        let mut filter = Self::new(resource);
        filter.assign(params)?;
        Ok(filter.to_sql())
    }

    pub fn assign(&mut self, params: &QueryParams) -> Result<&mut Self, FilterError> {
        self.page(params)?;
        self.where_clause(params)?;
        self.order(params)?;
        Ok(self)
    }

    pub fn where_clause(&mut self, params: &QueryParams) -> Result<&mut Self, FilterError> {
        self.clauses = FilterWhere::parse(params, self.resource)?;
        Ok(self)
    }

    pub fn order(&mut self, params: &QueryParams) -> Result<&mut Self, FilterError> {
        self.sort = FilterOrder::parse(params, self.resource)?;
        Ok(self)
    }

    pub fn page(&mut self, params: &QueryParams) -> Result<&mut Self, FilterError> {
        self.page = Self::parse_page(params)?;
        Ok(self)
    }

    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn paging(&self) -> Page {
        self.page
    }

    pub fn to_sql(&self) -> CompiledQuery {
        let mut params: Vec<SqlValue> = Vec::new();

        let where_clause = if self.clauses.is_empty() {
            String::new()
        } else {
            let conditions: Vec<String> = self
                .clauses
                .iter()
                .map(|c| FilterWhere::generate(c, &mut params))
                .collect();
            format!("WHERE {}", conditions.join(" AND "))
        };
        let order_clause = FilterOrder::generate(self.sort.as_ref());
        let limit_clause = Self::build_limit_clause(&self.page, &mut params);

        let sql = [where_clause, order_clause, limit_clause]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        CompiledQuery { sql, params }
    }

    fn parse_page(params: &QueryParams) -> Result<Page, FilterError> {
        let limit = params.get_all(LIMIT_PARAM);
        let offset = params.get_all(OFFSET_PARAM);

        if limit.is_none() && offset.is_some() {
            return Err(FilterError::OffsetWithoutLimit);
        }

        let limit = match limit {
            Some(values) => {
                let raw = single_value(LIMIT_PARAM, values)?;
                match raw.trim().parse::<i64>() {
                    Ok(n) if n > 0 => Some(n),
                    _ => return Err(FilterError::InvalidLimit(raw.to_string())),
                }
            }
            None => None,
        };

        let offset = match offset {
            Some(values) => {
                let raw = single_value(OFFSET_PARAM, values)?;
                match raw.trim().parse::<i64>() {
                    Ok(n) if n >= 0 => Some(n),
                    _ => return Err(FilterError::InvalidOffset(raw.to_string())),
                }
            }
            None => None,
        };

        Ok(Page { limit, offset })
    }

    fn build_limit_clause(page: &Page, params: &mut Vec<SqlValue>) -> String {
        let mut parts = Vec::new();
        if let Some(limit) = page.limit {
            params.push(SqlValue::Integer(limit));
            parts.push(format!("LIMIT ${}", params.len()));
        }
        if let Some(offset) = page.offset {
            params.push(SqlValue::Integer(offset));
            parts.push(format!("OFFSET ${}", params.len()));
        }
        parts.join(" ")
    }
}
