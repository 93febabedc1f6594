use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query,
    },
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

use crate::database::models::{CATEGORIES, LOGOS};
use crate::database::WriteSet;
use crate::middleware::{ApiResponse, ApiResult};
use crate::shape::{self, Shape};

use super::utils::{self, LangQuery};

/// GET /api/categories - List categories by sort order
pub async fn list(
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
    lang: LangQuery,
) -> ApiResult<Value> {
    let params = utils::query_params(query)?;
    Ok(ApiResponse::success(utils::list_rows(&CATEGORIES, &params, None, lang.locale()).await?))
}

/// POST /api/categories
pub async fn create(
    lang: LangQuery,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let locale = lang.locale();
    let set = WriteSet::from_input(&CATEGORIES, utils::json_body(payload)?, locale)?;
    Ok(ApiResponse::created(utils::create_row(&CATEGORIES, set, locale).await?))
}

/// GET /api/categories/:id
pub async fn get(Path(id): Path<String>, lang: LangQuery) -> ApiResult<Value> {
    Ok(ApiResponse::success(utils::get_row(&CATEGORIES, &id, lang.locale()).await?))
}

/// GET /api/categories/:id/legacy
pub async fn legacy(Path(id): Path<String>, lang: LangQuery) -> ApiResult<Value> {
    let id = utils::parse_id(&id)?;
    let row = utils::repository(&CATEGORIES).await?.select_one(id).await?;
    let view = row.map(|row| utils::resolve(&CATEGORIES, &row, lang.locale()));
    Ok(ApiResponse::success(shape::render(Shape::Legacy, CATEGORIES.entity, id, view)?))
}

/// GET /api/categories/:id/logos - Logos in a category
pub async fn logos(
    Path(id): Path<String>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
    lang: LangQuery,
) -> ApiResult<Value> {
    let id = utils::parse_id(&id)?;
    let params = utils::query_params(query)?;
    utils::ensure_exists(&CATEGORIES, id).await?;
    let data = utils::list_rows(&LOGOS, &params, Some(("category_id", id)), lang.locale()).await?;
    Ok(ApiResponse::success(data))
}

/// PUT /api/categories/:id
pub async fn update(
    Path(id): Path<String>,
    lang: LangQuery,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let id = utils::parse_id(&id)?;
    let locale = lang.locale();
    let set = WriteSet::from_input(&CATEGORIES, utils::json_body(payload)?, locale)?;
    Ok(ApiResponse::success(utils::update_row(&CATEGORIES, id, set, locale).await?))
}

/// DELETE /api/categories/:id
pub async fn delete(Path(id): Path<String>, lang: LangQuery) -> ApiResult<Value> {
    Ok(ApiResponse::success(utils::delete_row(&CATEGORIES, &id, lang.locale()).await?))
}
