use crate::config::CONFIG;
use crate::database::models::TableDef;

use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::filter_where::FilterWhere;
use super::types::{FilterData, FilterOrderInfo, SqlResult};

/// A validated list query over one table.
pub struct Filter {
    table: &'static TableDef,
    data: FilterData,
    order_data: Vec<FilterOrderInfo>,
    limit: i64,
    offset: i64,
}

impl Filter {
    pub fn new(table: &'static TableDef, data: FilterData) -> Result<Self, FilterError> {
        let order_spec = data.order.clone().unwrap_or_else(|| table.default_order.to_string());
        let order_data = FilterOrder::validate_and_parse(table, &order_spec)?;

        let limit = data.limit.unwrap_or(CONFIG.api.default_page_size);
        if limit < 0 {
            return Err(FilterError::InvalidLimit("Limit must be non-negative".to_string()));
        }
        let offset = data.offset.unwrap_or(0);
        if offset < 0 {
            return Err(FilterError::InvalidOffset("Offset must be non-negative".to_string()));
        }

        let max_limit = CONFIG.api.max_page_size;
        let limit = if limit > max_limit {
            tracing::debug!("Limit {} exceeds max {}, capping to max", limit, max_limit);
            max_limit
        } else {
            limit
        };

        Ok(Self {
            table,
            data,
            order_data,
            limit,
            offset,
        })
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// `SELECT row_to_json(t) AS row FROM (SELECT * FROM ... ) t`
    pub fn to_sql(&self) -> SqlResult {
        let (where_clause, params) = FilterWhere::generate(self.table, &self.data);

        let inner = [
            format!("SELECT * FROM \"{}\"", self.table.table),
            if where_clause.is_empty() { String::new() } else { format!("WHERE {}", where_clause) },
            FilterOrder::generate(&self.order_data),
            format!("LIMIT {} OFFSET {}", self.limit, self.offset),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

        SqlResult {
            query: format!("SELECT row_to_json(t) AS row FROM ({}) t", inner),
            params,
        }
    }

    pub fn to_count_sql(&self) -> SqlResult {
        let (where_clause, params) = FilterWhere::generate(self.table, &self.data);
        let query = if where_clause.is_empty() {
            format!("SELECT COUNT(*) AS count FROM \"{}\"", self.table.table)
        } else {
            format!("SELECT COUNT(*) AS count FROM \"{}\" WHERE {}", self.table.table, where_clause)
        };
        SqlResult { query, params }
    }
}
