use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query,
    },
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

use crate::database::models::{LAYERS, LOGOS};
use crate::database::{SqlValue, WriteSet};
use crate::middleware::{ApiResponse, ApiResult};

use super::utils::{self, LangQuery};

/// GET /api/logos/:id/layers - Layers of one logo, lowest z_index first
pub async fn list_for_logo(
    Path(logo_id): Path<String>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
    lang: LangQuery,
) -> ApiResult<Value> {
    let logo_id = utils::parse_id(&logo_id)?;
    let params = utils::query_params(query)?;
    utils::ensure_exists(&LOGOS, logo_id).await?;
    let data = utils::list_rows(&LAYERS, &params, Some(("logo_id", logo_id)), lang.locale()).await?;
    Ok(ApiResponse::success(data))
}

/// POST /api/logos/:id/layers - Add a layer; `logo_id` comes from the path
pub async fn create_for_logo(
    Path(logo_id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let logo_id = utils::parse_id(&logo_id)?;
    let body = utils::json_body(payload)?;
    let set = WriteSet::from_input(&LAYERS, body, Default::default())?
        .assign("logo_id", SqlValue::Uuid(Some(logo_id)));
    utils::ensure_exists(&LOGOS, logo_id).await?;
    Ok(ApiResponse::created(utils::create_row(&LAYERS, set, Default::default()).await?))
}

/// PUT /api/layers/:id
pub async fn update(Path(id): Path<String>, payload: Result<Json<Value>, JsonRejection>) -> ApiResult<Value> {
    let id = utils::parse_id(&id)?;
    let set = WriteSet::from_input(&LAYERS, utils::json_body(payload)?, Default::default())?;
    Ok(ApiResponse::success(utils::update_row(&LAYERS, id, set, Default::default()).await?))
}

/// DELETE /api/layers/:id
pub async fn delete(Path(id): Path<String>) -> ApiResult<Value> {
    Ok(ApiResponse::success(utils::delete_row(&LAYERS, &id, Default::default()).await?))
}
