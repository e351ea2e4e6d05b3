//! Shared API types
//!
//! Common types used across all API endpoints: error responses and the plain
//! message acknowledgement returned by create endpoints.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::data::DataError;
use crate::domain::filters::BindError;

/// Standard API error response
#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    NotFound { code: String, message: String },
    Unauthorized { code: String, message: String },
    Conflict { code: String, message: String },
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn unauthorized(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unauthorized {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn conflict(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conflict {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Store failure, prefixed with what the handler was doing
    pub fn from_data(context: &str, e: DataError) -> Self {
        match e {
            DataError::Conflict(msg) => Self::conflict("CONFLICT", msg),
            e => {
                if e.is_transient() {
                    tracing::warn!(error = %e, backend = e.backend(), "{}", context);
                } else {
                    tracing::error!(error = %e, backend = e.backend(), "{}", context);
                }
                Self::Internal {
                    message: format!("{context}: {e}"),
                }
            }
        }
    }

    /// Filter binding failure
    ///
    /// A bad parameter value is the caller's fault; an unsupported field type
    /// means the filter table itself is wrong.
    pub fn from_bind(e: BindError) -> Self {
        if e.is_configuration_error() {
            tracing::error!(error = %e, "Filter table misconfigured");
            return Self::internal(format!("Error reading filters: {e}"));
        }
        Self::bad_request("INVALID_FILTER", format!("Error reading filters: {e}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, code, message) = match self {
            Self::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, "bad_request", code, message)
            }
            Self::NotFound { code, message } => (StatusCode::NOT_FOUND, "not_found", code, message),
            Self::Unauthorized { code, message } => {
                (StatusCode::UNAUTHORIZED, "unauthorized", code, message)
            }
            Self::Conflict { code, message } => (StatusCode::CONFLICT, "conflict", code, message),
            Self::Internal { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "INTERNAL".to_string(),
                message,
            ),
        };
        (
            status,
            Json(serde_json::json!({
                "error": error_type,
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}

/// Acknowledgement returned by create endpoints
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_error_status() {
        let err = ApiError::from_bind(BindError::InvalidParameterValue {
            name: "picture".into(),
            value: "maybe".into(),
        });
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);

        let err = ApiError::from_bind(BindError::UnsupportedFilterType {
            type_name: "map",
            field_name: "extra",
        });
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_data_error_context() {
        let err = ApiError::from_data(
            "Error reading wods",
            DataError::Sqlite(sqlx::Error::PoolTimedOut),
        );
        match err {
            ApiError::Internal { message } => {
                assert!(message.starts_with("Error reading wods: SQLite error"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_conflict_maps_to_409() {
        let err = ApiError::from_data("Error creating user", DataError::Conflict("dup".into()));
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }
}
