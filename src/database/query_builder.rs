use serde_json::Value;
use sqlx::{postgres::PgArguments, PgPool, Postgres, Row};
use std::time::Instant;
use uuid::Uuid;

use crate::config;
use crate::database::manager::DatabaseError;
use crate::database::models::TableDef;
use crate::database::record::{Row as JsonRow, SqlValue, WriteSet};
use crate::filter::filter_order::FilterOrder;
use crate::filter::{FilterError, SqlResult};

/// SQL text for single-row statements. Every statement returns the affected
/// row as one JSON column named `row`.
pub struct QueryBuilder;

impl QueryBuilder {
    pub fn select_by_id(table: &TableDef, id: Uuid) -> SqlResult {
        SqlResult {
            query: format!(
                "SELECT row_to_json(t) AS row FROM (SELECT * FROM \"{}\" WHERE \"id\" = $1) t",
                table.table
            ),
            params: vec![SqlValue::Uuid(Some(id))],
        }
    }

    /// All rows matching one foreign key, without LIMIT or OFFSET.
    pub fn select_where(table: &TableDef, column: &str, id: Uuid) -> Result<SqlResult, FilterError> {
        if !table.is_known_column(column) {
            return Err(FilterError::InvalidColumn(column.to_string()));
        }
        let order = FilterOrder::generate(&FilterOrder::validate_and_parse(table, table.default_order)?);
        Ok(SqlResult {
            query: format!(
                "SELECT row_to_json(t) AS row FROM (SELECT * FROM \"{}\" WHERE \"{}\" = $1 {}) t",
                table.table, column, order
            ),
            params: vec![SqlValue::Uuid(Some(id))],
        })
    }

    pub fn insert(set: &WriteSet) -> SqlResult {
        let table = set.table().table;
        let mut columns = Vec::new();
        let mut placeholders = Vec::new();
        let mut params = Vec::new();

        for (column, value) in set.iter() {
            params.push(value.clone());
            columns.push(format!("\"{}\"", column));
            placeholders.push(format!("${}", params.len()));
        }

        let query = if columns.is_empty() {
            format!("INSERT INTO \"{0}\" DEFAULT VALUES RETURNING row_to_json(\"{0}\".*) AS row", table)
        } else {
            format!(
                "INSERT INTO \"{0}\" ({1}) VALUES ({2}) RETURNING row_to_json(\"{0}\".*) AS row",
                table,
                columns.join(", "),
                placeholders.join(", ")
            )
        };

        SqlResult { query, params }
    }

    pub fn update(set: &WriteSet, id: Uuid) -> SqlResult {
        let table = set.table().table;
        let mut assignments = Vec::new();
        let mut params = Vec::new();

        for (column, value) in set.iter() {
            params.push(value.clone());
            assignments.push(format!("\"{}\" = ${}", column, params.len()));
        }
        assignments.push("\"updated_at\" = now()".to_string());
        params.push(SqlValue::Uuid(Some(id)));

        SqlResult {
            query: format!(
                "UPDATE \"{0}\" SET {1} WHERE \"id\" = ${2} RETURNING row_to_json(\"{0}\".*) AS row",
                table,
                assignments.join(", "),
                params.len()
            ),
            params,
        }
    }

    pub fn delete(table: &TableDef, id: Uuid) -> SqlResult {
        SqlResult {
            query: format!(
                "DELETE FROM \"{0}\" WHERE \"id\" = $1 RETURNING row_to_json(\"{0}\".*) AS row",
                table.table
            ),
            params: vec![SqlValue::Uuid(Some(id))],
        }
    }
}

fn bind_param<'q>(
    q: sqlx::query::Query<'q, Postgres, PgArguments>,
    v: &SqlValue,
) -> sqlx::query::Query<'q, Postgres, PgArguments> {
    match v.clone() {
        SqlValue::Text(v) => q.bind(v),
        SqlValue::Integer(v) => q.bind(v),
        SqlValue::Float(v) => q.bind(v),
        SqlValue::Boolean(v) => q.bind(v),
        SqlValue::Uuid(v) => q.bind(v),
        SqlValue::TextArray(v) => q.bind(v),
        SqlValue::Json(v) => q.bind(v.map(sqlx::types::Json)),
    }
}

fn log_timing(sql: &SqlResult, started: Instant) {
    let settings = &config::config().database;
    let elapsed = started.elapsed();
    if settings.enable_query_logging {
        tracing::debug!(elapsed_ms = elapsed.as_millis() as u64, "{}", sql.query);
    }
    if settings.enable_slow_query_warning && elapsed.as_millis() as u64 > settings.slow_query_threshold_ms {
        tracing::warn!(elapsed_ms = elapsed.as_millis() as u64, "Slow query: {}", sql.query);
    }
}

fn row_object(row: &sqlx::postgres::PgRow) -> Result<JsonRow, DatabaseError> {
    match row.try_get::<Value, _>("row")? {
        Value::Object(map) => Ok(map),
        other => Err(DatabaseError::QueryError(format!("expected JSON object row, got {}", other))),
    }
}

/// Run a statement returning `row` JSON columns.
pub async fn fetch_rows(pool: &PgPool, sql: &SqlResult) -> Result<Vec<JsonRow>, DatabaseError> {
    let started = Instant::now();
    let mut q = sqlx::query(&sql.query);
    for p in sql.params.iter() {
        q = bind_param(q, p);
    }
    let rows = q.fetch_all(pool).await?;
    log_timing(sql, started);
    rows.iter().map(row_object).collect()
}

pub async fn fetch_optional(pool: &PgPool, sql: &SqlResult) -> Result<Option<JsonRow>, DatabaseError> {
    let started = Instant::now();
    let mut q = sqlx::query(&sql.query);
    for p in sql.params.iter() {
        q = bind_param(q, p);
    }
    let row = q.fetch_optional(pool).await?;
    log_timing(sql, started);
    row.as_ref().map(row_object).transpose()
}

pub async fn fetch_count(pool: &PgPool, sql: &SqlResult) -> Result<i64, DatabaseError> {
    let started = Instant::now();
    let mut q = sqlx::query(&sql.query);
    for p in sql.params.iter() {
        q = bind_param(q, p);
    }
    let row = q.fetch_one(pool).await?;
    log_timing(sql, started);
    Ok(row.try_get("count")?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{LAYERS, LOGOS};
    use crate::i18n::Locale;
    use serde_json::json;

    #[test]
    fn insert_lists_columns_in_order() {
        let set = WriteSet::from_input(
            &LOGOS,
            json!({ "title": "Logo", "canvas_width": 512 }),
            Locale::default(),
        )
        .unwrap();
        let sql = QueryBuilder::insert(&set);
        assert_eq!(
            sql.query,
            "INSERT INTO \"logos\" (\"canvas_width\", \"title_en\") VALUES ($1, $2) RETURNING row_to_json(\"logos\".*) AS row"
        );
        assert_eq!(sql.params[0], SqlValue::Integer(Some(512)));
    }

    #[test]
    fn update_touches_updated_at_and_binds_id_last() {
        let id = Uuid::new_v4();
        let set = WriteSet::from_input(&LAYERS, json!({ "visible": false }), Locale::default()).unwrap();
        let sql = QueryBuilder::update(&set, id);
        assert_eq!(
            sql.query,
            "UPDATE \"layers\" SET \"visible\" = $1, \"updated_at\" = now() WHERE \"id\" = $2 RETURNING row_to_json(\"layers\".*) AS row"
        );
        assert_eq!(sql.params.last(), Some(&SqlValue::Uuid(Some(id))));
    }

    #[test]
    fn child_rows_are_not_paged() {
        let logo_id = Uuid::new_v4();
        let sql = QueryBuilder::select_where(&LAYERS, "logo_id", logo_id).unwrap();
        assert_eq!(
            sql.query,
            "SELECT row_to_json(t) AS row FROM (SELECT * FROM \"layers\" WHERE \"logo_id\" = $1 ORDER BY \"z_index\" ASC) t"
        );
        assert!(!sql.query.contains("LIMIT"));
        assert_eq!(sql.params, vec![SqlValue::Uuid(Some(logo_id))]);
    }

    #[test]
    fn child_query_rejects_unknown_columns() {
        let err = QueryBuilder::select_where(&LAYERS, "logo_id\"; --", Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, FilterError::InvalidColumn(_)));
    }

    #[test]
    fn select_and_delete_by_id() {
        let id = Uuid::new_v4();
        assert!(QueryBuilder::select_by_id(&LOGOS, id).query.contains("FROM \"logos\" WHERE \"id\" = $1"));
        assert!(QueryBuilder::delete(&LOGOS, id).query.starts_with("DELETE FROM \"logos\""));
    }
}
