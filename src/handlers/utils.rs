use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequestParts, Query,
    },
    http::{request::Parts, Uri},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::{collections::HashMap, convert::Infallible};
use uuid::Uuid;

use crate::database::models::TableDef;
use crate::database::{DatabaseManager, Page, Repository, Row, SqlValue, WriteSet};
use crate::error::ApiError;
use crate::filter::FilterData;
use crate::i18n::{Locale, ResolvedView};
use crate::shape::Shape;

#[derive(Debug, Default, Deserialize)]
struct LangParam {
    lang: Option<String>,
}

/// The request locale from `?lang=`. Never rejects: a query string that does
/// not yield exactly one `lang` value selects the default locale.
#[derive(Debug, Default, Clone, Copy)]
pub struct LangQuery(Locale);

impl LangQuery {
    pub fn from_uri(uri: &Uri) -> Self {
        let param = Query::<LangParam>::try_from_uri(uri)
            .map(|Query(param)| param)
            .unwrap_or_default();
        LangQuery(Locale::select(param.lang.as_deref()))
    }

    pub fn locale(&self) -> Locale {
        self.0
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for LangQuery {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(LangQuery::from_uri(&parts.uri))
    }
}

pub fn query_params(
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<HashMap<String, String>, ApiError> {
    let Query(params) = query?;
    Ok(params)
}

/// Path ids are validated before any database work.
pub fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(format!("Invalid UUID: {}", raw)))
}

pub fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    let Json(body) = payload?;
    Ok(body)
}

pub async fn repository(table: &'static TableDef) -> Result<Repository, ApiError> {
    let pool = DatabaseManager::pool().await?;
    Ok(Repository::new(table, pool))
}

pub fn resolve(table: &'static TableDef, row: &Row, locale: Locale) -> ResolvedView {
    ResolvedView::resolve(table.entity, table.localized, row, locale)
}

/// Localized tables come back in canonical shape, the others as stored.
pub fn present(table: &'static TableDef, row: Row, locale: Locale) -> Value {
    if table.is_localized() {
        Shape::Canonical.formatter().format(&resolve(table, &row, locale))
    } else {
        Value::Object(row)
    }
}

pub fn page_data(table: &'static TableDef, page: Page, locale: Locale) -> Value {
    let items: Vec<Value> = page.rows.into_iter().map(|row| present(table, row, locale)).collect();
    json!({
        "items": items,
        "total": page.total,
        "limit": page.limit,
        "offset": page.offset,
    })
}

/// Every row of `table` where `column = id`. Not paged.
pub async fn children(table: &'static TableDef, column: &str, id: Uuid) -> Result<Vec<Row>, ApiError> {
    Ok(repository(table).await?.select_where(column, id).await?)
}

pub async fn list_rows(
    table: &'static TableDef,
    params: &HashMap<String, String>,
    scope: Option<(&str, Uuid)>,
    locale: Locale,
) -> Result<Value, ApiError> {
    let mut data = FilterData::from_query(table, params)?;
    if let Some((column, id)) = scope {
        data = data.with_eq(column, SqlValue::Uuid(Some(id)));
    }
    let page = repository(table).await?.select_page(data).await?;
    Ok(page_data(table, page, locale))
}

pub async fn get_row(table: &'static TableDef, raw_id: &str, locale: Locale) -> Result<Value, ApiError> {
    let id = parse_id(raw_id)?;
    let row = repository(table).await?.select_404(id).await?;
    Ok(present(table, row, locale))
}

pub async fn create_row(table: &'static TableDef, set: WriteSet, locale: Locale) -> Result<Value, ApiError> {
    set.require(table.required)?;
    let row = repository(table).await?.insert(set).await?;
    Ok(present(table, row, locale))
}

pub async fn update_row(table: &'static TableDef, id: Uuid, set: WriteSet, locale: Locale) -> Result<Value, ApiError> {
    set.ensure_not_empty()?;
    let row = repository(table).await?.update_404(id, set).await?;
    Ok(present(table, row, locale))
}

pub async fn delete_row(table: &'static TableDef, raw_id: &str, locale: Locale) -> Result<Value, ApiError> {
    let id = parse_id(raw_id)?;
    let row = repository(table).await?.delete_404(id).await?;
    Ok(present(table, row, locale))
}

/// 404 unless `id` exists in `table`. Used before touching child rows.
pub async fn ensure_exists(table: &'static TableDef, id: Uuid) -> Result<(), ApiError> {
    if repository(table).await?.exists(id).await? {
        Ok(())
    } else {
        Err(ApiError::not_found(format!("{} {} not found", table.entity, id)))
    }
}
