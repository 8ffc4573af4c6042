//! Dashboard service: read-only aggregates over contracts, expenses, and
//! warnings.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::container::parallel;
use crate::errors::AppResult;
use crate::infra::{TopCustomer, UnitOfWork};

/// Headline figures for the dashboard.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardKpis {
    pub total_contracts: u64,
    /// Contracts carrying a status reference
    pub contracts_in_progress: u64,
    /// Sum of post-VAT contract values
    pub total_revenue: i64,
    /// Sum of booked expense amounts
    pub total_expenses: i64,
    pub unresolved_warnings: u64,
}

#[async_trait]
pub trait DashboardService: Send + Sync {
    async fn kpis(&self) -> AppResult<DashboardKpis>;

    async fn top_customers(&self, limit: u64) -> AppResult<Vec<TopCustomer>>;
}

pub struct DashboardReader<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> DashboardReader<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> DashboardService for DashboardReader<U> {
    async fn kpis(&self) -> AppResult<DashboardKpis> {
        let contracts = self.uow.contracts();
        let warnings = self.uow.warnings();

        // Independent counts run concurrently.
        let (total_contracts, contracts_in_progress, total_revenue, total_expenses) =
            parallel::join4(
                contracts.count(),
                contracts.count_in_progress(),
                contracts.total_revenue(),
                contracts.total_expenses(),
            )
            .await?;
        let unresolved_warnings = warnings.count_unresolved().await?;

        Ok(DashboardKpis {
            total_contracts,
            contracts_in_progress,
            total_revenue,
            total_expenses,
            unresolved_warnings,
        })
    }

    async fn top_customers(&self, limit: u64) -> AppResult<Vec<TopCustomer>> {
        self.uow.contracts().top_customers(limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::repositories::{MockContractRepository, MockWarningRepository};
    use crate::services::testing::StubUow;

    #[tokio::test]
    async fn kpis_aggregate_all_sources() {
        let mut contracts = MockContractRepository::new();
        contracts.expect_count().returning(|| Ok(12));
        contracts.expect_count_in_progress().returning(|| Ok(7));
        contracts.expect_total_revenue().returning(|| Ok(5_000_000));
        contracts.expect_total_expenses().returning(|| Ok(1_250_000));

        let mut warnings = MockWarningRepository::new();
        warnings.expect_count_unresolved().returning(|| Ok(3));

        let mut uow = StubUow::with_contracts(contracts);
        uow.warnings = Some(Arc::new(warnings));

        let service = DashboardReader::new(Arc::new(uow));
        let kpis = service.kpis().await.unwrap();

        assert_eq!(kpis.total_contracts, 12);
        assert_eq!(kpis.contracts_in_progress, 7);
        assert_eq!(kpis.total_revenue, 5_000_000);
        assert_eq!(kpis.total_expenses, 1_250_000);
        assert_eq!(kpis.unresolved_warnings, 3);
    }
}
