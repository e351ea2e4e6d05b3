//! WOD API endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError, ValidationErrors};

use super::activities::ActivityDto;
use crate::api::auth::AuthContext;
use crate::api::extractors::{FilterQuery, ValidatedJson, WodIdPath};
use crate::api::types::{ApiError, MessageResponse};
use crate::data::TransactionalService;
use crate::data::types::{NewActivity, NewWod, WodRow, WodStatsRow, WodWithActivities};
use crate::domain::filters::WodFilter;

/// WOD fields shared by list, detail and embedded views
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WodSummaryDto {
    pub id: i64,
    pub source: Option<String>,
    /// Unix seconds
    pub creation_t: i64,
    pub exercise: Option<String>,
    pub picture: Option<String>,
    #[serde(rename = "type")]
    pub wod_type: String,
}

impl From<WodRow> for WodSummaryDto {
    fn from(row: WodRow) -> Self {
        Self {
            id: row.id,
            source: row.source,
            creation_t: row.creation_t,
            exercise: row.exercise,
            picture: row.picture,
            wod_type: row.wod_type,
        }
    }
}

/// WOD with the caller's attempt statistics
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WodDto {
    #[serde(flatten)]
    pub wod: WodSummaryDto,
    pub attempts: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_time: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub activities: Vec<ActivityDto>,
}

impl From<WodStatsRow> for WodDto {
    fn from(row: WodStatsRow) -> Self {
        Self {
            wod: row.wod.into(),
            attempts: row.attempts,
            best_time: row.best_time,
            activities: Vec::new(),
        }
    }
}

impl From<WodWithActivities> for WodDto {
    fn from(detail: WodWithActivities) -> Self {
        Self {
            activities: detail
                .activities
                .into_iter()
                .map(ActivityDto::from)
                .collect(),
            ..detail.stats.into()
        }
    }
}

/// Body for `POST /WOD`
///
/// Activity fields sit beside the WOD fields; sending any of them records a
/// first attempt along with the WOD.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWodRequest {
    pub source: Option<String>,
    #[serde(default)]
    pub creation_t: i64,
    pub exercise: Option<String>,
    pub picture: Option<String>,
    #[serde(rename = "type", default)]
    pub wod_type: String,
    pub date: Option<i64>,
    pub time_taken: Option<i64>,
    pub meps: Option<i64>,
    pub exertion: Option<i64>,
    pub notes: Option<String>,
}

impl CreateWodRequest {
    fn has_activity(&self) -> bool {
        self.date.is_some()
            || self.time_taken.is_some()
            || self.meps.is_some()
            || self.exertion.is_some()
            || self.notes.is_some()
    }

    fn wod(&self) -> NewWod {
        NewWod {
            source: self.source.clone(),
            creation_t: self.creation_t,
            exercise: self.exercise.clone(),
            picture: self.picture.clone(),
            wod_type: self.wod_type.clone(),
        }
    }

    fn activity(&self) -> Option<NewActivity> {
        self.has_activity().then(|| NewActivity {
            date: self.date.unwrap_or_default(),
            time_taken: self.time_taken.unwrap_or_default(),
            meps: self.meps,
            exertion: self.exertion,
            notes: self.notes.clone(),
        })
    }
}

fn required(field: &'static str, message: &'static str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(
        field,
        ValidationError::new("required").with_message(message.into()),
    );
    errors
}

impl Validate for CreateWodRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        if self.wod_type.is_empty() {
            return Err(required(
                "type",
                "Please provide a Type (e.g. WOD, Girls, Hero)",
            ));
        }
        if self.has_activity() {
            if self.date.unwrap_or_default() == 0 {
                return Err(required("date", "Please provide a date for activity"));
            }
            if self.time_taken.unwrap_or_default() == 0 {
                return Err(required(
                    "timeTaken",
                    "Please provide a time taken for activity",
                ));
            }
        }
        Ok(())
    }
}

/// Query parameters documented for `GET /WODs`
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct WodListParams {
    /// Case-insensitive substring of the source
    pub source: Option<String>,
    /// RFC 3339 lower bound on creation time
    pub start_date: Option<String>,
    /// RFC 3339 upper bound on creation time
    pub end_date: Option<String>,
    /// Comma-separated substrings, all must match
    pub exercise: Option<String>,
    /// Require (true) or exclude (false) a picture
    pub picture: Option<bool>,
    /// Case-insensitive substring of the type
    #[serde(rename = "type")]
    pub wod_type: Option<String>,
    /// Attempted (true) or not yet attempted (false) by the caller
    pub tried: Option<bool>,
}

#[derive(Clone)]
pub struct WodRoutesState {
    pub database: Arc<TransactionalService>,
}

/// Create WOD routes (all require authentication)
pub fn routes(database: Arc<TransactionalService>) -> Router {
    Router::new()
        .route("/WOD/{id}", get(get_wod))
        .route("/WOD", post(create_wod))
        .route("/WODs", get(list_wods))
        .with_state(WodRoutesState { database })
}

/// Get one WOD with the caller's attempts at it
#[utoipa::path(
    get,
    path = "/WOD/{id}",
    tag = "wods",
    params(("id" = i64, Path, description = "WOD id")),
    responses(
        (status = 200, description = "WOD with activities", body = WodDto),
        (status = 400, description = "Non-numeric id"),
        (status = 404, description = "WOD not found or not visible")
    ),
    security(("bearer" = []))
)]
pub async fn get_wod(
    State(state): State<WodRoutesState>,
    auth: AuthContext,
    path: WodIdPath,
) -> Result<Json<WodDto>, ApiError> {
    let detail = state
        .database
        .repository()
        .get_wod(path.id, auth.user_id)
        .await
        .map_err(|e| ApiError::from_data("Error reading wod", e))?
        .ok_or_else(|| ApiError::not_found("WOD_NOT_FOUND", "WOD not found"))?;

    Ok(Json(detail.into()))
}

/// List WODs visible to the caller
#[utoipa::path(
    get,
    path = "/WODs",
    tag = "wods",
    params(WodListParams),
    responses(
        (status = 200, description = "Up to 10 WODs", body = Vec<WodDto>),
        (status = 400, description = "Invalid filter value")
    ),
    security(("bearer" = []))
)]
pub async fn list_wods(
    State(state): State<WodRoutesState>,
    auth: AuthContext,
    FilterQuery(filter): FilterQuery<WodFilter>,
) -> Result<Json<Vec<WodDto>>, ApiError> {
    tracing::debug!(user_id = auth.user_id, ?filter, "Listing WODs");
    let rows = state
        .database
        .repository()
        .list_wods(&filter, auth.user_id)
        .await
        .map_err(|e| ApiError::from_data("Error reading wods", e))?;

    Ok(Json(rows.into_iter().map(WodDto::from).collect()))
}

/// Create a WOD, optionally with a first activity
#[utoipa::path(
    post,
    path = "/WOD",
    tag = "wods",
    request_body = CreateWodRequest,
    responses(
        (status = 200, description = "WOD created", body = MessageResponse),
        (status = 400, description = "Missing required field")
    ),
    security(("bearer" = []))
)]
pub async fn create_wod(
    State(state): State<WodRoutesState>,
    auth: AuthContext,
    ValidatedJson(request): ValidatedJson<CreateWodRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let activity = request.activity();
    let wod_id = state
        .database
        .repository()
        .create_wod(&request.wod(), activity.as_ref(), auth.user_id)
        .await
        .map_err(|e| ApiError::from_data("Error creating WOD", e))?;

    tracing::info!(wod_id, user_id = auth.user_id, "WOD created");
    let message = match activity {
        Some(_) => "Added a WOD and Activity",
        None => "Added a WOD",
    };
    Ok(Json(MessageResponse::new(message)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(body: serde_json::Value) -> CreateWodRequest {
        serde_json::from_value(body).unwrap()
    }

    fn first_message(errors: ValidationErrors) -> String {
        errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .next()
            .unwrap()
    }

    #[test]
    fn test_type_required_first() {
        let req = request(serde_json::json!({ "date": 0 }));
        assert_eq!(
            first_message(req.validate().unwrap_err()),
            "Please provide a Type (e.g. WOD, Girls, Hero)"
        );
    }

    #[test]
    fn test_activity_needs_date_then_time() {
        let req = request(serde_json::json!({ "type": "Hero", "timeTaken": 600 }));
        assert_eq!(
            first_message(req.validate().unwrap_err()),
            "Please provide a date for activity"
        );

        let req = request(serde_json::json!({ "type": "Hero", "date": 1_700_000_000 }));
        assert_eq!(
            first_message(req.validate().unwrap_err()),
            "Please provide a time taken for activity"
        );
    }

    #[test]
    fn test_wod_without_activity() {
        let req = request(serde_json::json!({ "type": "Girls", "exercise": "21-15-9" }));
        assert!(req.validate().is_ok());
        assert!(req.activity().is_none());
        assert_eq!(req.wod().exercise.as_deref(), Some("21-15-9"));
    }

    #[test]
    fn test_dto_skips_empty_fields() {
        let dto = WodDto::from(WodStatsRow {
            wod: WodRow {
                id: 1,
                source: None,
                creation_t: 10,
                exercise: None,
                picture: None,
                wod_type: "WOD".to_string(),
            },
            attempts: 0,
            best_time: None,
        });
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["type"], "WOD");
        assert_eq!(json["creationT"], 10);
        assert_eq!(json["attempts"], 0);
        assert!(json.get("bestTime").is_none());
        assert!(json.get("activities").is_none());
        assert!(json["source"].is_null());
    }
}
