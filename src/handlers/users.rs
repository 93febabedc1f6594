use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query,
    },
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

use crate::database::models::{LOGOS, USERS};
use crate::database::{RecordError, SqlValue, WriteSet};
use crate::i18n::{Locale, LocaleRegistry};
use crate::middleware::{ApiResponse, ApiResult};

use super::utils::{self, LangQuery};

/// `preferred_language` must name a supported locale.
fn user_input(body: Value) -> Result<WriteSet, RecordError> {
    let set = WriteSet::from_input(&USERS, body, Locale::default())?;
    if let Some(SqlValue::Text(Some(code))) = set.get("preferred_language") {
        if !LocaleRegistry::is_supported(code) {
            let allowed: Vec<_> = LocaleRegistry::all().iter().map(|l| l.code).collect();
            return Err(RecordError::NotAllowed {
                field: "preferred_language".to_string(),
                allowed: allowed.join(", "),
            });
        }
    }
    Ok(set)
}

/// GET /api/users
pub async fn list(
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
    lang: LangQuery,
) -> ApiResult<Value> {
    let params = utils::query_params(query)?;
    Ok(ApiResponse::success(utils::list_rows(&USERS, &params, None, lang.locale()).await?))
}

/// POST /api/users - Profile only; no credentials are accepted
pub async fn create(payload: Result<Json<Value>, JsonRejection>) -> ApiResult<Value> {
    let set = user_input(utils::json_body(payload)?)?;
    Ok(ApiResponse::created(utils::create_row(&USERS, set, Locale::default()).await?))
}

/// GET /api/users/:id
pub async fn get(Path(id): Path<String>) -> ApiResult<Value> {
    Ok(ApiResponse::success(utils::get_row(&USERS, &id, Locale::default()).await?))
}

/// GET /api/users/:id/logos - Logos owned by a user
pub async fn logos(
    Path(id): Path<String>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
    lang: LangQuery,
) -> ApiResult<Value> {
    let id = utils::parse_id(&id)?;
    let params = utils::query_params(query)?;
    utils::ensure_exists(&USERS, id).await?;
    let data = utils::list_rows(&LOGOS, &params, Some(("owner_id", id)), lang.locale()).await?;
    Ok(ApiResponse::success(data))
}

/// PUT /api/users/:id
pub async fn update(Path(id): Path<String>, payload: Result<Json<Value>, JsonRejection>) -> ApiResult<Value> {
    let id = utils::parse_id(&id)?;
    let set = user_input(utils::json_body(payload)?)?;
    Ok(ApiResponse::success(utils::update_row(&USERS, id, set, Locale::default()).await?))
}

/// DELETE /api/users/:id
pub async fn delete(Path(id): Path<String>) -> ApiResult<Value> {
    Ok(ApiResponse::success(utils::delete_row(&USERS, &id, Locale::default()).await?))
}
