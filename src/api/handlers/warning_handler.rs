//! Warning handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::{CreateWarning, UpdateWarning, Warning, WarningFilter};
use crate::errors::AppResult;
use crate::types::ApiResponse;

/// Warning routes (token required)
pub fn warning_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_warnings).post(create_warning))
        .route("/generate", post(generate_warnings))
        .route(
            "/:id",
            get(get_warning).put(update_warning).delete(delete_warning),
        )
}

/// Warning list query parameters; "all" disables the kind filter.
#[derive(Debug, Default, Deserialize)]
pub struct WarningQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl From<WarningQuery> for WarningFilter {
    fn from(query: WarningQuery) -> Self {
        WarningFilter {
            kind: query
                .kind
                .filter(|k| k != "all")
                .map(|k| crate::domain::WarningKind::from(k.as_str())),
            status: query
                .status
                .map(|s| crate::domain::WarningStatus::from(s.as_str())),
            start_date: query.start_date,
            end_date: query.end_date,
        }
    }
}

/// List warnings, soonest due date first
#[utoipa::path(
    get,
    path = "/api/warnings",
    tag = "Warnings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Warnings matching the filter", body = [Warning])
    )
)]
pub async fn list_warnings(
    State(state): State<AppState>,
    Query(query): Query<WarningQuery>,
) -> AppResult<Json<ApiResponse<Vec<Warning>>>> {
    let warnings = state.warning_service.list_warnings(query.into()).await?;
    Ok(Json(ApiResponse::success(warnings)))
}

/// One warning
#[utoipa::path(
    get,
    path = "/api/warnings/{id}",
    tag = "Warnings",
    params(("id" = Uuid, Path, description = "Warning identifier")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The requested warning", body = Warning),
        (status = 404, description = "Warning not found")
    )
)]
pub async fn get_warning(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Warning>>> {
    let warning = state.warning_service.get_warning(id).await?;
    Ok(Json(ApiResponse::success(warning)))
}

/// Create a warning manually
#[utoipa::path(
    post,
    path = "/api/warnings",
    tag = "Warnings",
    request_body = CreateWarning,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Warning created", body = Warning),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_warning(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateWarning>,
) -> AppResult<(StatusCode, Json<ApiResponse<Warning>>)> {
    let warning = state.warning_service.create_warning(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(warning))))
}

/// Update a warning's processing state and note
#[utoipa::path(
    put,
    path = "/api/warnings/{id}",
    tag = "Warnings",
    params(("id" = Uuid, Path, description = "Warning identifier")),
    request_body = UpdateWarning,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Warning updated", body = Warning),
        (status = 404, description = "Warning not found")
    )
)]
pub async fn update_warning(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateWarning>,
) -> AppResult<Json<ApiResponse<Warning>>> {
    let warning = state.warning_service.update_warning(id, payload).await?;
    Ok(Json(ApiResponse::success(warning)))
}

/// Delete a warning
#[utoipa::path(
    delete,
    path = "/api/warnings/{id}",
    tag = "Warnings",
    params(("id" = Uuid, Path, description = "Warning identifier")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Warning deleted"),
        (status = 404, description = "Warning not found")
    )
)]
pub async fn delete_warning(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.warning_service.delete_warning(id).await?;
    Ok(Json(ApiResponse::message("Warning deleted")))
}

/// Trigger warning generation (admin only; reserved extension point)
#[utoipa::path(
    post,
    path = "/api/warnings/generate",
    tag = "Warnings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Acknowledgement that generation is not yet implemented"),
        (status = 403, description = "Caller is not an administrator")
    )
)]
pub async fn generate_warnings(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<()>>> {
    require_admin(&current_user)?;
    Ok(Json(ApiResponse::message(
        state.warning_service.generate_warnings(),
    )))
}
