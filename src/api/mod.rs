//! Router assembly.

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{self, SecurityConfig};
use crate::handlers::{assets, categories, layers, logos, service, users};

pub fn app() -> Router {
    let settings = config::config();

    let mut router = Router::new()
        // Public
        .route("/", get(service::root))
        .route("/health", get(service::health))
        .route("/api/languages", get(service::languages))
        .merge(logo_routes())
        .merge(category_routes())
        .merge(user_routes())
        .merge(asset_routes())
        .layer(DefaultBodyLimit::max(settings.api.max_request_size_bytes));

    if let Some(cors) = cors_layer(&settings.security) {
        router = router.layer(cors);
    }
    if settings.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

fn logo_routes() -> Router {
    Router::new()
        .route("/api/logos", get(logos::list).post(logos::create))
        .route(
            "/api/logos/:id",
            get(logos::get).put(logos::update).delete(logos::delete),
        )
        .route("/api/logos/:id/legacy", get(logos::legacy))
        .route("/api/logos/:id/mobile", get(logos::mobile))
        .route("/api/logos/:id/mobile-structured", get(logos::mobile_structured))
        .route(
            "/api/logos/:id/layers",
            get(layers::list_for_logo).post(layers::create_for_logo),
        )
        .route("/api/layers/:id", put(layers::update).delete(layers::delete))
}

fn category_routes() -> Router {
    Router::new()
        .route("/api/categories", get(categories::list).post(categories::create))
        .route(
            "/api/categories/:id",
            get(categories::get).put(categories::update).delete(categories::delete),
        )
        .route("/api/categories/:id/logos", get(categories::logos))
        .route("/api/categories/:id/legacy", get(categories::legacy))
}

fn user_routes() -> Router {
    Router::new()
        .route("/api/users", get(users::list).post(users::create))
        .route(
            "/api/users/:id",
            get(users::get).put(users::update).delete(users::delete),
        )
        .route("/api/users/:id/logos", get(users::logos))
}

fn asset_routes() -> Router {
    Router::new()
        .route("/api/assets", get(assets::list).post(assets::create))
        .route("/api/assets/:id", get(assets::get).delete(assets::delete))
}

/// `*` allows any origin; otherwise only the listed origins that parse as
/// header values.
fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if security.cors_origins.iter().any(|origin| origin == "*") {
        return Some(layer.allow_origin(Any));
    }
    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    Some(layer.allow_origin(AllowOrigin::list(origins)))
}
