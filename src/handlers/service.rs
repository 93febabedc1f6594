use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::DatabaseManager;
use crate::i18n::LocaleRegistry;
use crate::middleware::{ApiResponse, ApiResult};
use crate::shape::Shape;

/// GET / - Service descriptor
pub async fn root() -> ApiResult<Value> {
    let shapes: Vec<_> = Shape::ALL.iter().map(Shape::name).collect();
    Ok(ApiResponse::success(json!({
        "name": "Logo Studio API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Logo design backend with localized content",
        "languages": LocaleRegistry::all().iter().map(|l| l.code).collect::<Vec<_>>(),
        "shapes": shapes,
        "endpoints": {
            "logos": "/api/logos[/:id[/legacy|/mobile|/mobile-structured|/layers]]",
            "layers": "/api/layers/:id",
            "categories": "/api/categories[/:id[/logos|/legacy]]",
            "users": "/api/users[/:id[/logos]]",
            "assets": "/api/assets[/:id]",
            "languages": "/api/languages",
            "health": "/health",
        },
    })))
}

/// GET /health - 503 when the database cannot be reached
pub async fn health() -> impl IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": {
                        "message": "Database unavailable",
                        "code": "SERVICE_UNAVAILABLE"
                    },
                    "data": {
                        "status": "degraded",
                        "timestamp": now,
                        "database": "unavailable"
                    }
                })),
            )
        }
    }
}

/// GET /api/languages - Supported locales
pub async fn languages() -> ApiResult<Value> {
    Ok(ApiResponse::success(json!(LocaleRegistry::all())))
}
