// HTTP API Error Types
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::database::{DatabaseError, ListError, RecordError};
use crate::filter::FilterError;
use crate::shape::ShapeError;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    ValidationError {
        message: String,
        field_errors: Option<HashMap<String, String>>,
    },
    InvalidJson(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict
    Conflict(String),

    // 413 Payload Too Large
    PayloadTooLarge(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::ValidationError { message, .. } => message,
            ApiError::InvalidJson(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::Conflict(msg) => msg,
            ApiError::PayloadTooLarge(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::ValidationError { .. } => "VALIDATION_ERROR",
            ApiError::InvalidJson(_) => "INVALID_JSON",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        let mut error = json!({
            "message": self.message(),
            "code": self.error_code(),
        });
        if let ApiError::ValidationError {
            field_errors: Some(field_errors),
            ..
        } = self
        {
            error["field_errors"] = json!(field_errors);
        }
        json!({
            "success": false,
            "error": error,
        })
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn validation_error(message: impl Into<String>, field_errors: Option<HashMap<String, String>>) -> Self {
        ApiError::ValidationError {
            message: message.into(),
            field_errors,
        }
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::InvalidJson(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn payload_too_large(message: impl Into<String>) -> Self {
        ApiError::PayloadTooLarge(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

impl From<RecordError> for ApiError {
    fn from(err: RecordError) -> Self {
        match &err {
            RecordError::InvalidJson(msg) => ApiError::invalid_json(msg.clone()),
            RecordError::NoFields => ApiError::bad_request(err.to_string()),
            other => {
                let field_errors = other
                    .field()
                    .map(|field| HashMap::from([(field.to_string(), other.to_string())]));
                let message = match other {
                    RecordError::MissingRequiredField(_) => "Missing required fields",
                    RecordError::SystemFieldNotAllowed(_) | RecordError::UnknownField { .. } => "Unknown or read-only field",
                    _ => "Invalid field format",
                };
                ApiError::validation_error(message, field_errors)
            }
        }
    }
}

impl From<FilterError> for ApiError {
    fn from(err: FilterError) -> Self {
        match err {
            FilterError::InvalidValue(record) => record.into(),
            other => ApiError::bad_request(other.to_string()),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(msg) => ApiError::not_found(msg),
            unconfigured @ (DatabaseError::ConfigMissing(_) | DatabaseError::InvalidDatabaseUrl) => {
                tracing::error!("Database is not configured: {}", unconfigured);
                ApiError::service_unavailable("Database temporarily unavailable")
            }
            DatabaseError::QueryError(msg) => {
                // Don't expose internal SQL errors to clients
                tracing::error!("Database query error: {}", msg);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
            DatabaseError::Sqlx(sqlx_err) => sqlx_err.into(),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                Some("23505") => ApiError::conflict("A record with the same unique value already exists"),
                Some("23503") => ApiError::bad_request("Referenced record does not exist"),
                Some("23502") => ApiError::validation_error("Missing required fields", None),
                _ => {
                    tracing::error!("SQLx error: {}", err);
                    ApiError::internal_server_error("Database error occurred")
                }
            },
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                tracing::error!("Database unavailable: {}", err);
                ApiError::service_unavailable("Database temporarily unavailable")
            }
            _ => {
                // Log the real error but return generic message
                tracing::error!("SQLx error: {}", err);
                ApiError::internal_server_error("Database error occurred")
            }
        }
    }
}

impl From<ListError> for ApiError {
    fn from(err: ListError) -> Self {
        match err {
            ListError::Filter(e) => e.into(),
            ListError::Database(e) => e.into(),
        }
    }
}

impl From<ShapeError> for ApiError {
    fn from(err: ShapeError) -> Self {
        ApiError::not_found(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        // Over DefaultBodyLimit the body is never parsed
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::payload_too_large(rejection.body_text())
        } else {
            ApiError::invalid_json(rejection.body_text())
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_uses_failure_envelope() {
        let body = ApiError::not_found("logo 1 not found").to_json();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["message"], "logo 1 not found");
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert!(body["error"].get("field_errors").is_none());
    }

    #[test]
    fn record_errors_carry_field_errors() {
        let err: ApiError = RecordError::InvalidType {
            field: "canvas_width".to_string(),
            expected: "integer",
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let body = err.to_json();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["field_errors"]["canvas_width"]
            .as_str()
            .unwrap()
            .contains("integer"));
    }

    #[test]
    fn system_fields_are_validation_errors() {
        let err: ApiError = RecordError::SystemFieldNotAllowed("id".to_string()).into();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn not_found_maps_to_404_from_every_layer() {
        let shaped: ApiError = ShapeError::NotFound {
            entity: "logo",
            id: "x".to_string(),
        }
        .into();
        let db: ApiError = DatabaseError::NotFound("logo x not found".to_string()).into();
        assert_eq!(shaped.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(db.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unconfigured_database_is_unavailable() {
        let err: ApiError = DatabaseError::ConfigMissing("DATABASE_URL").into();
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(!err.message().contains("DATABASE_URL"));
    }

    #[test]
    fn pool_timeouts_are_unavailable() {
        let err: ApiError = DatabaseError::Sqlx(sqlx::Error::PoolTimedOut).into();
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn oversized_bodies_use_the_failure_envelope() {
        let err = ApiError::payload_too_large("Request body too large");
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.to_json()["error"]["code"], "PAYLOAD_TOO_LARGE");
    }

    #[test]
    fn filter_errors_are_bad_requests() {
        let err: ApiError = FilterError::NotFilterable("title".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "BAD_REQUEST");
    }
}
