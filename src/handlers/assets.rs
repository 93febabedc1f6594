use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query,
    },
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

use crate::database::models::ASSETS;
use crate::database::WriteSet;
use crate::i18n::Locale;
use crate::middleware::{ApiResponse, ApiResult};

use super::utils::{self, LangQuery};

/// GET /api/assets - Filter by `owner_id` or `kind`
pub async fn list(
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
    lang: LangQuery,
) -> ApiResult<Value> {
    let params = utils::query_params(query)?;
    Ok(ApiResponse::success(utils::list_rows(&ASSETS, &params, None, lang.locale()).await?))
}

/// POST /api/assets - Register an asset by URL
pub async fn create(payload: Result<Json<Value>, JsonRejection>) -> ApiResult<Value> {
    let set = WriteSet::from_input(&ASSETS, utils::json_body(payload)?, Locale::default())?;
    Ok(ApiResponse::created(utils::create_row(&ASSETS, set, Locale::default()).await?))
}

/// GET /api/assets/:id
pub async fn get(Path(id): Path<String>) -> ApiResult<Value> {
    Ok(ApiResponse::success(utils::get_row(&ASSETS, &id, Locale::default()).await?))
}

/// DELETE /api/assets/:id
pub async fn delete(Path(id): Path<String>) -> ApiResult<Value> {
    Ok(ApiResponse::success(utils::delete_row(&ASSETS, &id, Locale::default()).await?))
}
