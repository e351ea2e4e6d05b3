//! Path, filter and validation extractors for API routes

use std::collections::HashMap;
use std::ops::Deref;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::types::ApiError;
use crate::domain::filters::{FilterSpec, RawQueryParams, bind};

/// Raw path extractor for WOD routes (internal use)
#[derive(Debug, Deserialize)]
struct WodPathRaw {
    id: i64,
}

/// WOD id from the URL path
///
/// Non-numeric ids are rejected with 400 before the handler runs.
#[derive(Debug)]
pub struct WodIdPath {
    pub id: i64,
}

impl<S> FromRequestParts<S> for WodIdPath
where
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<WodPathRaw>::from_request_parts(parts, state)
            .await
            .map_err(ValidationRejection::Path)?;
        Ok(Self { id: raw.id })
    }
}

/// Filter bound from the query string through its [`FilterSpec`] table
///
/// Repeated parameters keep their first occurrence.
#[derive(Debug)]
pub struct FilterQuery<F>(pub F);

impl<S, F> FromRequestParts<S> for FilterQuery<F>
where
    S: Send + Sync,
    F: FilterSpec,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|e| ValidationRejection::Query(e).into_response())?;

        let mut params = HashMap::new();
        for (key, value) in pairs {
            params.entry(key).or_insert(value);
        }

        bind::<F>(&RawQueryParams::new(params))
            .map(Self)
            .map_err(|e| ApiError::from_bind(e).into_response())
    }
}

/// Validation rejection with structured error response
pub enum ValidationRejection {
    /// Failed to parse path parameters
    Path(PathRejection),
    /// Failed to parse query string
    Query(QueryRejection),
    /// Failed to parse JSON body
    Json(JsonRejection),
    /// Validation constraints not satisfied
    Validation(validator::ValidationErrors),
}

impl IntoResponse for ValidationRejection {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::Path(rejection) => (
                StatusCode::BAD_REQUEST,
                "PATH_PARSE_ERROR",
                rejection.body_text(),
            ),
            Self::Query(rejection) => (
                StatusCode::BAD_REQUEST,
                "QUERY_PARSE_ERROR",
                rejection.body_text(),
            ),
            Self::Json(rejection) => (
                StatusCode::BAD_REQUEST,
                "JSON_PARSE_ERROR",
                rejection.body_text(),
            ),
            Self::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                format_validation_errors(&errors),
            ),
        };
        (
            status,
            Json(serde_json::json!({
                "error": "bad_request",
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}

fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{}: validation failed", field))
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

/// JSON body extractor with automatic validation.
///
/// Deserializes JSON body and validates it using the `validator` crate.
/// Returns a `ValidationRejection` on parse or validation failure.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ValidationRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidationRejection::Json)?;
        value.validate().map_err(ValidationRejection::Validation)?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filters::WodFilter;
    use axum::body::Body;
    use axum::http::Request as HttpRequest;

    async fn filter_from(uri: &str) -> Result<WodFilter, Response> {
        let (mut parts, _) = HttpRequest::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap()
            .into_parts();
        FilterQuery::<WodFilter>::from_request_parts(&mut parts, &())
            .await
            .map(|FilterQuery(f)| f)
    }

    #[tokio::test]
    async fn test_filter_query_binds() {
        let filter = filter_from("/WODs?type=Hero&picture=1").await.unwrap();
        assert_eq!(filter.wod_type, "Hero");
        assert_eq!(filter.picture, Some(true));
    }

    #[tokio::test]
    async fn test_filter_query_first_occurrence_wins() {
        let filter = filter_from("/WODs?type=Hero&type=Girls").await.unwrap();
        assert_eq!(filter.wod_type, "Hero");
    }

    #[tokio::test]
    async fn test_filter_query_decodes_exercise_twice() {
        let filter = filter_from("/WODs?exercise=wall%2520ball,row")
            .await
            .unwrap();
        assert_eq!(filter.exercise, vec!["wall ball", "row"]);
    }

    #[tokio::test]
    async fn test_filter_query_bad_value_is_400() {
        let response = filter_from("/WODs?tried=perhaps").await.unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_format_validation_errors_uses_messages() {
        let mut errors = validator::ValidationErrors::new();
        errors.add(
            "date",
            validator::ValidationError::new("required").with_message("Please provide a date".into()),
        );
        assert_eq!(format_validation_errors(&errors), "Please provide a date");
    }
}
