use crate::database::models::{ColumnType, TableDef};
use crate::database::record::SqlValue;

use super::types::FilterData;

/// Builds the WHERE clause and its positional parameters.
pub struct FilterWhere {
    params: Vec<SqlValue>,
    conditions: Vec<String>,
}

impl FilterWhere {
    pub fn generate(table: &TableDef, data: &FilterData) -> (String, Vec<SqlValue>) {
        let mut filter_where = Self {
            params: vec![],
            conditions: vec![],
        };
        filter_where.build(table, data);
        let clause = filter_where.conditions.join(" AND ");
        (clause, filter_where.params)
    }

    fn build(&mut self, table: &TableDef, data: &FilterData) {
        for (column, value) in &data.where_eq {
            if value.is_null() {
                self.conditions.push(format!("\"{}\" IS NULL", column));
            } else {
                let placeholder = self.push_param(value.clone());
                self.conditions.push(format!("\"{}\" = {}", column, placeholder));
            }
        }

        if let Some(search) = &data.search {
            let pattern = format!("%{}%", escape_like(search));
            let placeholder = self.push_param(SqlValue::Text(Some(pattern)));
            let matches: Vec<String> = table
                .searchable
                .iter()
                .map(|column| match table.column_type(column) {
                    Some(ColumnType::TextArray) => {
                        format!("array_to_string(\"{}\", ' ') ILIKE {}", column, placeholder)
                    }
                    _ => format!("\"{}\" ILIKE {}", column, placeholder),
                })
                .collect();
            if !matches.is_empty() {
                self.conditions.push(format!("({})", matches.join(" OR ")));
            }
        }
    }

    fn push_param(&mut self, value: SqlValue) -> String {
        self.params.push(value);
        format!("${}", self.params.len())
    }
}

/// `%` and `_` in user input match literally.
fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
