//! Dashboard read handlers.

use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::api::AppState;
use crate::errors::AppResult;
use crate::infra::TopCustomer;
use crate::services::DashboardKpis;
use crate::types::ApiResponse;

const DEFAULT_TOP_CUSTOMERS: u64 = 5;

/// Dashboard routes (token required)
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/kpis", get(kpis))
        .route("/top-customers", get(top_customers))
}

#[derive(Debug, Default, Deserialize)]
pub struct TopCustomersQuery {
    pub limit: Option<u64>,
}

/// Headline figures
#[utoipa::path(
    get,
    path = "/api/dashboard/kpis",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Aggregate counters and sums", body = DashboardKpis)
    )
)]
pub async fn kpis(State(state): State<AppState>) -> AppResult<Json<ApiResponse<DashboardKpis>>> {
    let kpis = state.dashboard_service.kpis().await?;
    Ok(Json(ApiResponse::success(kpis)))
}

/// Customers ranked by summed post-VAT contract value
#[utoipa::path(
    get,
    path = "/api/dashboard/top-customers",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Top customers by revenue", body = [TopCustomer])
    )
)]
pub async fn top_customers(
    State(state): State<AppState>,
    Query(query): Query<TopCustomersQuery>,
) -> AppResult<Json<ApiResponse<Vec<TopCustomer>>>> {
    let top = state
        .dashboard_service
        .top_customers(query.limit.unwrap_or(DEFAULT_TOP_CUSTOMERS))
        .await?;
    Ok(Json(ApiResponse::success(top)))
}
