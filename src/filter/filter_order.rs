use super::error::FilterError;
use super::filter_where::single_value;
use super::params::QueryParams;
use super::types::{ResourceDescriptor, SortDirection, SortSpec};

pub const SORT_PARAM: &str = "sort_by";

pub struct FilterOrder;

impl FilterOrder {
    /// `sort_by=year` sorts ascending, `sort_by=-year` descending
    pub fn parse(
        params: &QueryParams,
        resource: &ResourceDescriptor,
    ) -> Result<Option<SortSpec>, FilterError> {
        let Some(values) = params.get_all(SORT_PARAM) else {
            return Ok(None);
        };
        let raw = single_value(SORT_PARAM, values)?;

        let (name, direction) = match raw.strip_prefix('-') {
            Some(rest) => (rest, SortDirection::Desc),
            None => (raw, SortDirection::Asc),
        };

        let field = resource
            .field(name)
            .ok_or_else(|| FilterError::UnknownSortColumn(name.to_string()))?;

        Ok(Some(SortSpec { column: field.column, direction }))
    }

    pub fn generate(sort: Option<&SortSpec>) -> String {
        match sort {
            Some(s) => format!("ORDER BY {} {}", s.column, s.direction.to_sql()),
            None => String::new(),
        }
    }
}
