use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query,
    },
    Json,
};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

use crate::database::models::{LAYERS, LOGOS};
use crate::database::WriteSet;
use crate::error::ApiError;
use crate::i18n::{Locale, ResolvedView};
use crate::middleware::{ApiResponse, ApiResult};
use crate::shape::{self, Shape};

use super::utils::{self, LangQuery};

/// Logo with its layers attached, or `None` when the logo does not exist.
async fn logo_view(id: Uuid, locale: Locale) -> Result<Option<ResolvedView>, ApiError> {
    let Some(row) = utils::repository(&LOGOS).await?.select_one(id).await? else {
        return Ok(None);
    };
    let layers = utils::children(&LAYERS, "logo_id", id).await?;
    let layers = Value::Array(layers.into_iter().map(Value::Object).collect());
    Ok(Some(utils::resolve(&LOGOS, &row, locale).with_related("layers", layers)))
}

async fn shaped(shape: Shape, raw_id: &str, lang: &LangQuery) -> ApiResult<Value> {
    let id = utils::parse_id(raw_id)?;
    let view = logo_view(id, lang.locale()).await?;
    Ok(ApiResponse::success(shape::render(shape, LOGOS.entity, id, view)?))
}

/// GET /api/logos - List logos
pub async fn list(
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
    lang: LangQuery,
) -> ApiResult<Value> {
    let params = utils::query_params(query)?;
    Ok(ApiResponse::success(utils::list_rows(&LOGOS, &params, None, lang.locale()).await?))
}

/// POST /api/logos - Create a logo; base-name text goes to the `?lang` column
pub async fn create(
    lang: LangQuery,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let locale = lang.locale();
    let set = WriteSet::from_input(&LOGOS, utils::json_body(payload)?, locale)?;
    Ok(ApiResponse::created(utils::create_row(&LOGOS, set, locale).await?))
}

/// GET /api/logos/:id - Canonical logo with layers
pub async fn get(Path(id): Path<String>, lang: LangQuery) -> ApiResult<Value> {
    shaped(Shape::Canonical, &id, &lang).await
}

/// GET /api/logos/:id/legacy
pub async fn legacy(Path(id): Path<String>, lang: LangQuery) -> ApiResult<Value> {
    shaped(Shape::Legacy, &id, &lang).await
}

/// GET /api/logos/:id/mobile
pub async fn mobile(Path(id): Path<String>, lang: LangQuery) -> ApiResult<Value> {
    shaped(Shape::Mobile, &id, &lang).await
}

/// GET /api/logos/:id/mobile-structured
pub async fn mobile_structured(Path(id): Path<String>, lang: LangQuery) -> ApiResult<Value> {
    shaped(Shape::MobileStructured, &id, &lang).await
}

/// PUT /api/logos/:id - Partial update
pub async fn update(
    Path(id): Path<String>,
    lang: LangQuery,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let id = utils::parse_id(&id)?;
    let locale = lang.locale();
    let set = WriteSet::from_input(&LOGOS, utils::json_body(payload)?, locale)?;
    Ok(ApiResponse::success(utils::update_row(&LOGOS, id, set, locale).await?))
}

/// DELETE /api/logos/:id - Hard delete, returns the deleted logo
pub async fn delete(Path(id): Path<String>, lang: LangQuery) -> ApiResult<Value> {
    Ok(ApiResponse::success(utils::delete_row(&LOGOS, &id, lang.locale()).await?))
}
