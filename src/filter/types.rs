use std::collections::HashMap;

use crate::database::models::TableDef;
use crate::database::record::SqlValue;

use super::error::FilterError;

/// Query-string keys that are not column filters.
pub const RESERVED_PARAMS: &[&str] = &["lang", "search", "order", "limit", "offset"];

/// List request parameters, validated against a table definition.
#[derive(Debug, Clone, Default)]
pub struct FilterData {
    /// Equality conditions, ANDed together
    pub where_eq: Vec<(String, SqlValue)>,
    /// Case-insensitive substring matched against the table's searchable columns
    pub search: Option<String>,
    /// e.g. `created_at desc, title_en asc`
    pub order: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl FilterData {
    /// Build from raw query parameters. Unknown keys are rejected rather than
    /// ignored so that a typo never silently widens a result set.
    pub fn from_query(table: &TableDef, params: &HashMap<String, String>) -> Result<Self, FilterError> {
        let mut data = FilterData::default();

        let mut keys: Vec<&String> = params.keys().collect();
        keys.sort();

        for key in keys {
            let raw = &params[key];
            match key.as_str() {
                "search" => {
                    let trimmed = raw.trim();
                    if !trimmed.is_empty() {
                        data.search = Some(trimmed.to_string());
                    }
                }
                "order" => data.order = Some(raw.clone()),
                "limit" => {
                    data.limit = Some(
                        raw.parse()
                            .map_err(|_| FilterError::InvalidLimit(format!("'{}' is not an integer", raw)))?,
                    )
                }
                "offset" => {
                    data.offset = Some(
                        raw.parse()
                            .map_err(|_| FilterError::InvalidOffset(format!("'{}' is not an integer", raw)))?,
                    )
                }
                reserved if RESERVED_PARAMS.contains(&reserved) => {}
                column => {
                    if !table.filterable.contains(&column) {
                        return Err(FilterError::NotFilterable(column.to_string()));
                    }
                    let ty = table
                        .column_type(column)
                        .ok_or_else(|| FilterError::InvalidColumn(column.to_string()))?;
                    data.where_eq.push((column.to_string(), SqlValue::from_param(column, ty, raw)?));
                }
            }
        }

        Ok(data)
    }

    /// Add a condition fixed by the route (e.g. `logo_id` for `/logos/:id/layers`).
    pub fn with_eq(mut self, column: impl Into<String>, value: SqlValue) -> Self {
        self.where_eq.push((column.into(), value));
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
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

#[derive(Debug, Clone, PartialEq)]
pub struct FilterOrderInfo {
    pub column: String,
    pub sort: SortDirection,
}

#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<SqlValue>,
}
