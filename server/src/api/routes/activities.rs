//! Activity API endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError, ValidationErrors};

use super::wods::WodSummaryDto;
use crate::api::auth::AuthContext;
use crate::api::extractors::{FilterQuery, ValidatedJson};
use crate::api::types::{ApiError, MessageResponse};
use crate::data::TransactionalService;
use crate::data::types::{ActivityRow, ActivityWithWod, NewActivity};
use crate::domain::filters::ActivityFilter;

/// Activity as returned by the API
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDto {
    pub id: i64,
    /// Unix seconds
    pub date: i64,
    #[serde(rename = "wodID")]
    pub wod_id: i64,
    /// Seconds
    pub time_taken: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meps: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exertion: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wod: Option<WodSummaryDto>,
}

impl From<ActivityRow> for ActivityDto {
    fn from(row: ActivityRow) -> Self {
        Self {
            id: row.id,
            date: row.date,
            wod_id: row.wod_id,
            time_taken: row.time_taken,
            meps: row.meps,
            exertion: row.exertion,
            notes: row.notes,
            wod: None,
        }
    }
}

impl From<ActivityWithWod> for ActivityDto {
    fn from(row: ActivityWithWod) -> Self {
        Self {
            wod: Some(row.wod.into()),
            ..row.activity.into()
        }
    }
}

/// Body for `POST /Activity`
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityRequest {
    #[serde(rename = "wodID")]
    pub wod_id: Option<i64>,
    #[serde(default)]
    pub date: i64,
    #[serde(default)]
    pub time_taken: i64,
    pub meps: Option<i64>,
    pub exertion: Option<i64>,
    pub notes: Option<String>,
}

impl Validate for CreateActivityRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let missing = if self.wod_id.is_none() {
            Some(("wodID", "Please provide a WOD ID"))
        } else if self.date == 0 {
            Some(("date", "Please provide a date"))
        } else if self.time_taken == 0 {
            Some(("timeTaken", "Please provide a time taken"))
        } else {
            None
        };

        match missing {
            Some((field, message)) => {
                let mut errors = ValidationErrors::new();
                errors.add(
                    field,
                    ValidationError::new("required").with_message(message.into()),
                );
                Err(errors)
            }
            None => Ok(()),
        }
    }
}

/// Query parameters documented for `GET /Activities`
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct ActivityListParams {
    /// Exact WOD id
    #[serde(rename = "wodID")]
    pub wod_id: Option<String>,
    /// RFC 3339 lower bound on the activity date
    pub start_date: Option<String>,
    /// RFC 3339 upper bound on the activity date
    pub end_date: Option<String>,
}

#[derive(Clone)]
pub struct ActivityRoutesState {
    pub database: Arc<TransactionalService>,
}

/// Create activity routes (all require authentication)
pub fn routes(database: Arc<TransactionalService>) -> Router {
    Router::new()
        .route("/Activities", get(list_activities))
        .route("/Activity", post(create_activity))
        .with_state(ActivityRoutesState { database })
}

/// List the caller's activities
#[utoipa::path(
    get,
    path = "/Activities",
    tag = "activities",
    params(ActivityListParams),
    responses(
        (status = 200, description = "Up to 10 activities with their WODs", body = Vec<ActivityDto>),
        (status = 400, description = "Invalid filter value")
    ),
    security(("bearer" = []))
)]
pub async fn list_activities(
    State(state): State<ActivityRoutesState>,
    auth: AuthContext,
    FilterQuery(filter): FilterQuery<ActivityFilter>,
) -> Result<Json<Vec<ActivityDto>>, ApiError> {
    let rows = state
        .database
        .repository()
        .list_activities(&filter, auth.user_id)
        .await
        .map_err(|e| ApiError::from_data("Error reading activities", e))?;

    Ok(Json(rows.into_iter().map(ActivityDto::from).collect()))
}

/// Record an attempt at a WOD
#[utoipa::path(
    post,
    path = "/Activity",
    tag = "activities",
    request_body = CreateActivityRequest,
    responses(
        (status = 201, description = "Activity created", body = MessageResponse),
        (status = 400, description = "Missing required field")
    ),
    security(("bearer" = []))
)]
pub async fn create_activity(
    State(state): State<ActivityRoutesState>,
    auth: AuthContext,
    ValidatedJson(request): ValidatedJson<CreateActivityRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Some(wod_id) = request.wod_id else {
        return Err(ApiError::bad_request(
            "VALIDATION_ERROR",
            "Please provide a WOD ID",
        ));
    };
    let activity = NewActivity {
        date: request.date,
        time_taken: request.time_taken,
        meps: request.meps,
        exertion: request.exertion,
        notes: request.notes,
    };

    let activity_id = state
        .database
        .repository()
        .create_activity(wod_id, &activity, auth.user_id)
        .await
        .map_err(|e| ApiError::from_data("Error creating activity", e))?;

    tracing::info!(activity_id, wod_id, user_id = auth.user_id, "Activity created");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Added an Activity")),
    ))
}
