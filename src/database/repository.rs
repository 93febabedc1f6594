use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::TableDef;
use crate::database::query_builder::{fetch_count, fetch_optional, fetch_rows, QueryBuilder};
use crate::database::record::{Row, WriteSet};
use crate::filter::{Filter, FilterData, FilterError};

/// CRUD over one table, rows returned as JSON objects.
pub struct Repository {
    table: &'static TableDef,
    pool: PgPool,
}

/// One page of a list query.
#[derive(Debug)]
pub struct Page {
    pub rows: Vec<Row>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Either the list parameters were invalid or the query failed.
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl Repository {
    pub fn new(table: &'static TableDef, pool: PgPool) -> Self {
        Self { table, pool }
    }

    pub async fn select_page(&self, filter_data: FilterData) -> Result<Page, ListError> {
        let filter = Filter::new(self.table, filter_data)?;
        let rows = fetch_rows(&self.pool, &filter.to_sql()).await?;
        let total = fetch_count(&self.pool, &filter.to_count_sql()).await?;
        Ok(Page {
            rows,
            total,
            limit: filter.limit(),
            offset: filter.offset(),
        })
    }

    /// Every row where `column = id`, in the table's default order. Not paged.
    pub async fn select_where(&self, column: &str, id: Uuid) -> Result<Vec<Row>, ListError> {
        let sql = QueryBuilder::select_where(self.table, column, id)?;
        Ok(fetch_rows(&self.pool, &sql).await?)
    }

    pub async fn select_one(&self, id: Uuid) -> Result<Option<Row>, DatabaseError> {
        fetch_optional(&self.pool, &QueryBuilder::select_by_id(self.table, id)).await
    }

    pub async fn select_404(&self, id: Uuid) -> Result<Row, DatabaseError> {
        self.select_one(id)
            .await?
            .ok_or_else(|| self.not_found(id))
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, DatabaseError> {
        Ok(self.select_one(id).await?.is_some())
    }

    pub async fn insert(&self, set: WriteSet) -> Result<Row, DatabaseError> {
        let row = fetch_optional(&self.pool, &QueryBuilder::insert(&set)).await?;
        let row = row.ok_or_else(|| DatabaseError::QueryError("INSERT returned no row".to_string()))?;
        tracing::info!(table = self.table.table, id = ?row.get("id"), "Created {}", self.table.entity);
        Ok(row)
    }

    pub async fn update_404(&self, id: Uuid, set: WriteSet) -> Result<Row, DatabaseError> {
        let row = fetch_optional(&self.pool, &QueryBuilder::update(&set, id))
            .await?
            .ok_or_else(|| self.not_found(id))?;
        tracing::info!(table = self.table.table, %id, "Updated {}", self.table.entity);
        Ok(row)
    }

    pub async fn delete_404(&self, id: Uuid) -> Result<Row, DatabaseError> {
        let row = fetch_optional(&self.pool, &QueryBuilder::delete(self.table, id))
            .await?
            .ok_or_else(|| self.not_found(id))?;
        tracing::info!(table = self.table.table, %id, "Deleted {}", self.table.entity);
        Ok(row)
    }

    fn not_found(&self, id: Uuid) -> DatabaseError {
        DatabaseError::NotFound(format!("{} {} not found", self.table.entity, id))
    }
}
