//! Generic master-data handlers.
//!
//! The path tag picks the reference table; an unrecognized tag fails before
//! any service call.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Extension, Router,
};
use serde_json::json;
use uuid::Uuid;

use crate::api::extractors::{ClientMeta, ValidatedJson};
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::config::{ACTION_CREATE, ACTION_DELETE, ACTION_UPDATE, SCREEN_MASTER_DATA};
use crate::domain::{MasterDataKind, MasterPayload, MasterRecord};
use crate::errors::AppResult;
use crate::infra::AuditEntry;
use crate::types::ApiResponse;

/// Master-data routes (token required; mutation is admin only)
pub fn master_data_routes() -> Router<AppState> {
    Router::new()
        .route("/:kind", get(list_items).post(create_item))
        .route(
            "/:kind/:id",
            get(get_item).put(update_item).delete(delete_item),
        )
}

fn parse_kind(tag: &str) -> AppResult<MasterDataKind> {
    tag.parse()
}

/// List every row of one master-data table
#[utoipa::path(
    get,
    path = "/api/master-data/{kind}",
    tag = "Master data",
    params(("kind" = String, Path, description = "Type tag, e.g. customers, suppliers, contract-types")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All rows of the table", body = [MasterRecord]),
        (status = 400, description = "Unknown type tag")
    )
)]
pub async fn list_items(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<MasterRecord>>>> {
    let kind = parse_kind(&kind)?;
    let items = state.master_data_service.list(kind).await?;
    Ok(Json(ApiResponse::success(items)))
}

/// One master-data row
#[utoipa::path(
    get,
    path = "/api/master-data/{kind}/{id}",
    tag = "Master data",
    params(
        ("kind" = String, Path, description = "Type tag"),
        ("id" = Uuid, Path, description = "Row identifier")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The requested row", body = MasterRecord),
        (status = 400, description = "Unknown type tag"),
        (status = 404, description = "Row not found")
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, Uuid)>,
) -> AppResult<Json<ApiResponse<MasterRecord>>> {
    let kind = parse_kind(&kind)?;
    let item = state.master_data_service.get(kind, id).await?;
    Ok(Json(ApiResponse::success(item)))
}

/// Create a master-data row (admin only)
#[utoipa::path(
    post,
    path = "/api/master-data/{kind}",
    tag = "Master data",
    params(("kind" = String, Path, description = "Type tag")),
    request_body = MasterPayload,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Row created", body = MasterRecord),
        (status = 400, description = "Unknown type tag or validation error"),
        (status = 403, description = "Caller is not an administrator")
    )
)]
pub async fn create_item(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    meta: ClientMeta,
    Path(kind): Path<String>,
    ValidatedJson(payload): ValidatedJson<MasterPayload>,
) -> AppResult<(StatusCode, Json<ApiResponse<MasterRecord>>)> {
    require_admin(&current_user)?;
    let kind = parse_kind(&kind)?;

    let item = state.master_data_service.create(kind, payload).await?;

    state
        .audit
        .record(
            AuditEntry::new(current_user.id, SCREEN_MASTER_DATA, ACTION_CREATE)
                .with_details(json!({ "type": kind.as_tag(), "id": item.id }))
                .with_client(meta.ip_address, meta.user_agent),
        )
        .await;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(item))))
}

/// Update a master-data row (admin only)
#[utoipa::path(
    put,
    path = "/api/master-data/{kind}/{id}",
    tag = "Master data",
    params(
        ("kind" = String, Path, description = "Type tag"),
        ("id" = Uuid, Path, description = "Row identifier")
    ),
    request_body = MasterPayload,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Row updated", body = MasterRecord),
        (status = 400, description = "Unknown type tag or validation error"),
        (status = 403, description = "Caller is not an administrator"),
        (status = 404, description = "Row not found")
    )
)]
pub async fn update_item(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    meta: ClientMeta,
    Path((kind, id)): Path<(String, Uuid)>,
    ValidatedJson(payload): ValidatedJson<MasterPayload>,
) -> AppResult<Json<ApiResponse<MasterRecord>>> {
    require_admin(&current_user)?;
    let kind = parse_kind(&kind)?;

    let item = state.master_data_service.update(kind, id, payload).await?;

    state
        .audit
        .record(
            AuditEntry::new(current_user.id, SCREEN_MASTER_DATA, ACTION_UPDATE)
                .with_details(json!({ "type": kind.as_tag(), "id": item.id }))
                .with_client(meta.ip_address, meta.user_agent),
        )
        .await;

    Ok(Json(ApiResponse::success(item)))
}

/// Delete a master-data row (admin only)
#[utoipa::path(
    delete,
    path = "/api/master-data/{kind}/{id}",
    tag = "Master data",
    params(
        ("kind" = String, Path, description = "Type tag"),
        ("id" = Uuid, Path, description = "Row identifier")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Row deleted"),
        (status = 400, description = "Unknown type tag"),
        (status = 403, description = "Caller is not an administrator"),
        (status = 404, description = "Row not found")
    )
)]
pub async fn delete_item(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    meta: ClientMeta,
    Path((kind, id)): Path<(String, Uuid)>,
) -> AppResult<Json<ApiResponse<()>>> {
    require_admin(&current_user)?;
    let kind = parse_kind(&kind)?;

    state.master_data_service.delete(kind, id).await?;

    state
        .audit
        .record(
            AuditEntry::new(current_user.id, SCREEN_MASTER_DATA, ACTION_DELETE)
                .with_details(json!({ "type": kind.as_tag(), "id": id }))
                .with_client(meta.ip_address, meta.user_agent),
        )
        .await;

    Ok(Json(ApiResponse::message("Item deleted")))
}
