//! Administration handlers. Every route requires the admin role.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Extension, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::extractors::{ClientMeta, ValidatedJson};
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::config::{
    ACTION_CREATE_GROUP, ACTION_DELETE_USER, ACTION_UPDATE_PERMISSIONS_BULK, ACTION_UPDATE_USER,
    SCREEN_ADMIN,
};
use crate::domain::{
    AuditLog, AuditLogFilter, CreateGroup, Permission, PermissionGrant, SystemConfig, UpdateGroup,
    UpdateUser, UserGroup, UserResponse,
};
use crate::errors::AppResult;
use crate::infra::AuditEntry;
use crate::types::ApiResponse;

/// Administration routes (token required; every handler re-checks the role)
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/:id", put(update_user).delete(delete_user))
        .route("/groups", get(list_groups).post(create_group))
        .route("/groups/:id", put(update_group).delete(delete_group))
        // GET reads a group's permissions, PUT updates one permission row;
        // the id segment is a group id for GET and a permission id for PUT.
        .route("/permissions/:id", get(get_permissions).put(update_permission))
        .route("/permissions-bulk", put(update_permissions_bulk))
        .route("/logs", get(get_logs).post(create_log))
        .route("/configs", get(get_configs))
        .route("/configs/:id", put(update_config))
}

// =============================================================================
// Users
// =============================================================================

/// List all user accounts
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "Administration",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All users", body = [UserResponse]),
        (status = 403, description = "Caller is not an administrator")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<Vec<UserResponse>>>> {
    require_admin(&current_user)?;

    let users = state.admin_service.list_users().await?;
    Ok(Json(ApiResponse::success(
        users.into_iter().map(UserResponse::from).collect(),
    )))
}

/// Update any user account
#[utoipa::path(
    put,
    path = "/api/admin/users/{id}",
    tag = "Administration",
    params(("id" = Uuid, Path, description = "User identifier")),
    request_body = UpdateUser,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    meta: ClientMeta,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUser>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    require_admin(&current_user)?;

    let user = state.admin_service.update_user(id, payload).await?;

    state
        .audit
        .record(
            AuditEntry::new(current_user.id, SCREEN_ADMIN, ACTION_UPDATE_USER)
                .with_details(json!({ "targetUserId": user.id }))
                .with_client(meta.ip_address, meta.user_agent),
        )
        .await;

    Ok(Json(ApiResponse::success(UserResponse::from(user))))
}

/// Delete a user account
#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    tag = "Administration",
    params(("id" = Uuid, Path, description = "User identifier")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    meta: ClientMeta,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    require_admin(&current_user)?;

    state.admin_service.delete_user(id).await?;

    state
        .audit
        .record(
            AuditEntry::new(current_user.id, SCREEN_ADMIN, ACTION_DELETE_USER)
                .with_details(json!({ "targetUserId": id }))
                .with_client(meta.ip_address, meta.user_agent),
        )
        .await;

    Ok(Json(ApiResponse::message("User deleted")))
}

// =============================================================================
// Groups
// =============================================================================

/// List permission groups
#[utoipa::path(
    get,
    path = "/api/admin/groups",
    tag = "Administration",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "All groups", body = [UserGroup]))
)]
pub async fn list_groups(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<Vec<UserGroup>>>> {
    require_admin(&current_user)?;

    let groups = state.admin_service.list_groups().await?;
    Ok(Json(ApiResponse::success(groups)))
}

/// Create a permission group
#[utoipa::path(
    post,
    path = "/api/admin/groups",
    tag = "Administration",
    request_body = CreateGroup,
    security(("bearer_auth" = [])),
    responses((status = 201, description = "Group created", body = UserGroup))
)]
pub async fn create_group(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    meta: ClientMeta,
    ValidatedJson(payload): ValidatedJson<CreateGroup>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserGroup>>)> {
    require_admin(&current_user)?;

    let group = state.admin_service.create_group(payload).await?;

    state
        .audit
        .record(
            AuditEntry::new(current_user.id, SCREEN_ADMIN, ACTION_CREATE_GROUP)
                .with_details(json!({ "groupId": group.id, "name": group.name }))
                .with_client(meta.ip_address, meta.user_agent),
        )
        .await;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(group))))
}

/// Update a permission group
#[utoipa::path(
    put,
    path = "/api/admin/groups/{id}",
    tag = "Administration",
    params(("id" = Uuid, Path, description = "Group identifier")),
    request_body = UpdateGroup,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Group updated", body = UserGroup),
        (status = 404, description = "Group not found")
    )
)]
pub async fn update_group(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateGroup>,
) -> AppResult<Json<ApiResponse<UserGroup>>> {
    require_admin(&current_user)?;

    let group = state.admin_service.update_group(id, payload).await?;
    Ok(Json(ApiResponse::success(group)))
}

/// Delete a permission group
#[utoipa::path(
    delete,
    path = "/api/admin/groups/{id}",
    tag = "Administration",
    params(("id" = Uuid, Path, description = "Group identifier")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Group deleted"),
        (status = 404, description = "Group not found")
    )
)]
pub async fn delete_group(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    require_admin(&current_user)?;

    state.admin_service.delete_group(id).await?;
    Ok(Json(ApiResponse::message("Group deleted")))
}

// =============================================================================
// Permissions
// =============================================================================

/// Permissions for one group, seeding the default catalog on first read
#[utoipa::path(
    get,
    path = "/api/admin/permissions/{group_id}",
    tag = "Administration",
    params(("group_id" = Uuid, Path, description = "Group identifier")),
    security(("bearer_auth" = [])),
    responses((status = 200, description = "The group's permissions", body = [Permission]))
)]
pub async fn get_permissions(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(group_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Vec<Permission>>>> {
    require_admin(&current_user)?;

    let permissions = state.admin_service.permissions_for_group(group_id).await?;
    Ok(Json(ApiResponse::success(permissions)))
}

/// Update one permission row
#[utoipa::path(
    put,
    path = "/api/admin/permissions/{id}",
    tag = "Administration",
    params(("id" = Uuid, Path, description = "Permission identifier")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Permission updated", body = Permission),
        (status = 404, description = "Permission not found")
    )
)]
pub async fn update_permission(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<GrantBody>,
) -> AppResult<Json<ApiResponse<Permission>>> {
    require_admin(&current_user)?;

    let permission = state
        .admin_service
        .update_permission(PermissionGrant {
            id,
            can_view: payload.can_view,
            can_add: payload.can_add,
            can_edit: payload.can_edit,
            can_delete: payload.can_delete,
        })
        .await?;

    Ok(Json(ApiResponse::success(permission)))
}

/// Grant flags without the row id (taken from the path)
#[derive(Debug, Deserialize, ToSchema)]
pub struct GrantBody {
    pub can_view: Option<bool>,
    pub can_add: Option<bool>,
    pub can_edit: Option<bool>,
    pub can_delete: Option<bool>,
}

/// Bulk permission update body
#[derive(Debug, Deserialize, ToSchema)]
pub struct BulkGrantsRequest {
    pub permissions: Vec<PermissionGrant>,
}

/// Apply many grant tuples; each is an independent write
#[utoipa::path(
    put,
    path = "/api/admin/permissions-bulk",
    tag = "Administration",
    request_body = BulkGrantsRequest,
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Grants applied"))
)]
pub async fn update_permissions_bulk(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    meta: ClientMeta,
    Json(payload): Json<BulkGrantsRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    require_admin(&current_user)?;

    let count = state
        .admin_service
        .update_permissions_bulk(payload.permissions)
        .await?;

    state
        .audit
        .record(
            AuditEntry::new(current_user.id, SCREEN_ADMIN, ACTION_UPDATE_PERMISSIONS_BULK)
                .with_details(json!({ "count": count }))
                .with_client(meta.ip_address, meta.user_agent),
        )
        .await;

    Ok(Json(ApiResponse::message("Permissions updated successfully")))
}

// =============================================================================
// Audit log
// =============================================================================

/// Audit log query parameters
#[derive(Debug, Default, Deserialize)]
pub struct LogQuery {
    pub screen: Option<String>,
    pub action: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: Option<u64>,
}

/// Query the audit log, newest first
#[utoipa::path(
    get,
    path = "/api/admin/logs",
    tag = "Administration",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Matching audit entries", body = [AuditLog]))
)]
pub async fn get_logs(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Query(query): Query<LogQuery>,
) -> AppResult<Json<ApiResponse<Vec<AuditLog>>>> {
    require_admin(&current_user)?;

    let logs = state
        .admin_service
        .list_logs(AuditLogFilter {
            screen: query.screen,
            action: query.action,
            start_date: query.start_date,
            end_date: query.end_date,
            limit: query.limit,
        })
        .await?;

    Ok(Json(ApiResponse::success(logs)))
}

/// Client-submitted audit entry
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLogRequest {
    pub screen: String,
    pub action: String,
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
}

/// Record an audit entry on behalf of the caller
#[utoipa::path(
    post,
    path = "/api/admin/logs",
    tag = "Administration",
    request_body = CreateLogRequest,
    security(("bearer_auth" = [])),
    responses((status = 201, description = "Entry recorded"))
)]
pub async fn create_log(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    meta: ClientMeta,
    Json(payload): Json<CreateLogRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<()>>)> {
    let mut entry = AuditEntry::new(current_user.id, &payload.screen, &payload.action)
        .with_client(meta.ip_address, meta.user_agent);
    if let Some(details) = payload.details {
        entry = entry.with_details(details);
    }

    state.audit.record(entry).await;

    Ok((StatusCode::CREATED, Json(ApiResponse::message("Log recorded"))))
}

// =============================================================================
// System configuration
// =============================================================================

/// Config list query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ConfigQuery {
    pub category: Option<String>,
}

/// List configuration rows
#[utoipa::path(
    get,
    path = "/api/admin/configs",
    tag = "Administration",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Configuration rows", body = [SystemConfig]))
)]
pub async fn get_configs(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Query(query): Query<ConfigQuery>,
) -> AppResult<Json<ApiResponse<Vec<SystemConfig>>>> {
    require_admin(&current_user)?;

    let configs = state.admin_service.list_configs(query.category).await?;
    Ok(Json(ApiResponse::success(configs)))
}

/// Config value update body
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateConfigRequest {
    pub value: Option<String>,
}

/// Update one configuration value; locked rows are rejected
#[utoipa::path(
    put,
    path = "/api/admin/configs/{id}",
    tag = "Administration",
    params(("id" = Uuid, Path, description = "Config identifier")),
    request_body = UpdateConfigRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Config updated", body = SystemConfig),
        (status = 403, description = "Row is not editable"),
        (status = 404, description = "Config not found")
    )
)]
pub async fn update_config(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateConfigRequest>,
) -> AppResult<Json<ApiResponse<SystemConfig>>> {
    require_admin(&current_user)?;

    let config = state.admin_service.update_config(id, payload.value).await?;
    Ok(Json(ApiResponse::success(config)))
}
