//! Contract aggregate handlers.

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
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::config::{ACTION_CREATE, ACTION_DELETE, ACTION_UPDATE, SCREEN_CONTRACT};
use crate::domain::{ContractSummary, ContractView, CreateContract, UpdateContract};
use crate::errors::AppResult;
use crate::infra::AuditEntry;
use crate::types::ApiResponse;

/// Contract routes (token required)
pub fn contract_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_contracts).post(create_contract))
        .route(
            "/:id",
            get(get_contract).put(update_contract).delete(delete_contract),
        )
}

/// List all contracts with resolved references
#[utoipa::path(
    get,
    path = "/api/contracts",
    tag = "Contracts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All contracts, newest first", body = [ContractSummary]),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list_contracts(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<ContractSummary>>>> {
    let contracts = state.contract_service.list_contracts().await?;
    Ok(Json(ApiResponse::success(contracts)))
}

/// One contract with every nested collection
#[utoipa::path(
    get,
    path = "/api/contracts/{id}",
    tag = "Contracts",
    params(("id" = Uuid, Path, description = "Contract identifier")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Full contract aggregate", body = ContractView),
        (status = 404, description = "Contract not found")
    )
)]
pub async fn get_contract(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ContractView>>> {
    let view = state.contract_service.get_contract(id).await?;
    Ok(Json(ApiResponse::success(view)))
}

/// Create a contract with its nested collections
#[utoipa::path(
    post,
    path = "/api/contracts",
    tag = "Contracts",
    request_body = CreateContract,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Contract created", body = ContractView),
        (status = 400, description = "Validation error or invalid reference")
    )
)]
pub async fn create_contract(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    meta: ClientMeta,
    ValidatedJson(payload): ValidatedJson<CreateContract>,
) -> AppResult<(StatusCode, Json<ApiResponse<ContractView>>)> {
    let view = state
        .contract_service
        .create_contract(payload, Some(current_user.id))
        .await?;

    state
        .audit
        .record(
            AuditEntry::new(current_user.id, SCREEN_CONTRACT, ACTION_CREATE)
                .with_details(json!({
                    "contractId": view.contract.id,
                    "code": view.contract.code,
                }))
                .with_client(meta.ip_address, meta.user_agent),
        )
        .await;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(view))))
}

/// Reconcile a contract with a submitted snapshot
#[utoipa::path(
    put,
    path = "/api/contracts/{id}",
    tag = "Contracts",
    params(("id" = Uuid, Path, description = "Contract identifier")),
    request_body = UpdateContract,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Updated aggregate, reloaded after the write", body = ContractView),
        (status = 404, description = "Contract not found"),
        (status = 409, description = "Version conflict")
    )
)]
pub async fn update_contract(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    meta: ClientMeta,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateContract>,
) -> AppResult<Json<ApiResponse<ContractView>>> {
    let view = state.contract_service.update_contract(id, payload).await?;

    state
        .audit
        .record(
            AuditEntry::new(current_user.id, SCREEN_CONTRACT, ACTION_UPDATE)
                .with_details(json!({
                    "contractId": view.contract.id,
                    "code": view.contract.code,
                }))
                .with_client(meta.ip_address, meta.user_agent),
        )
        .await;

    Ok(Json(ApiResponse::success(view)))
}

/// Delete a contract and everything it owns
#[utoipa::path(
    delete,
    path = "/api/contracts/{id}",
    tag = "Contracts",
    params(("id" = Uuid, Path, description = "Contract identifier")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Contract and owned rows removed"),
        (status = 404, description = "Contract not found")
    )
)]
pub async fn delete_contract(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    meta: ClientMeta,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    let removed = state.contract_service.delete_contract(id).await?;

    state
        .audit
        .record(
            AuditEntry::new(current_user.id, SCREEN_CONTRACT, ACTION_DELETE)
                .with_details(json!({
                    "contractId": removed.id,
                    "code": removed.code,
                }))
                .with_client(meta.ip_address, meta.user_agent),
        )
        .await;

    Ok(Json(ApiResponse::message("Contract deleted")))
}
