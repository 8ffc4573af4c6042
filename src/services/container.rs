//! Service container: centralized construction and access for all
//! application services, plus small parallel-execution helpers.

use std::future::Future;
use std::sync::Arc;

use super::audit::{AuditRecorder, AuditSink};
use super::{
    AdminManager, AdminService, AuthService, Authenticator, ContractManager, ContractService,
    DashboardReader, DashboardService, MasterDataManager, MasterDataService, WarningManager,
    WarningService,
};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Persistence;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn contracts(&self) -> Arc<dyn ContractService>;

    fn master_data(&self) -> Arc<dyn MasterDataService>;

    fn warnings(&self) -> Arc<dyn WarningService>;

    fn admin(&self) -> Arc<dyn AdminService>;

    fn dashboard(&self) -> Arc<dyn DashboardService>;

    fn audit(&self) -> Arc<dyn AuditSink>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    contract_service: Arc<dyn ContractService>,
    master_data_service: Arc<dyn MasterDataService>,
    warning_service: Arc<dyn WarningService>,
    admin_service: Arc<dyn AdminService>,
    dashboard_service: Arc<dyn DashboardService>,
    audit_sink: Arc<dyn AuditSink>,
}

impl Services {
    /// Build every service over one shared Unit of Work.
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            contract_service: Arc::new(ContractManager::new(uow.clone())),
            master_data_service: Arc::new(MasterDataManager::new(uow.clone())),
            warning_service: Arc::new(WarningManager::new(uow.clone())),
            admin_service: Arc::new(AdminManager::new(uow.clone())),
            dashboard_service: Arc::new(DashboardReader::new(uow.clone())),
            audit_sink: Arc::new(AuditRecorder::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn contracts(&self) -> Arc<dyn ContractService> {
        self.contract_service.clone()
    }

    fn master_data(&self) -> Arc<dyn MasterDataService> {
        self.master_data_service.clone()
    }

    fn warnings(&self) -> Arc<dyn WarningService> {
        self.warning_service.clone()
    }

    fn admin(&self) -> Arc<dyn AdminService> {
        self.admin_service.clone()
    }

    fn dashboard(&self) -> Arc<dyn DashboardService> {
        self.dashboard_service.clone()
    }

    fn audit(&self) -> Arc<dyn AuditSink> {
        self.audit_sink.clone()
    }
}

/// Helpers for running independent fallible operations concurrently.
pub mod parallel {
    use super::*;
    use tokio::try_join;

    /// Run two independent operations concurrently.
    pub async fn join2<F1, F2, T1, T2>(f1: F1, f2: F2) -> AppResult<(T1, T2)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
    {
        try_join!(f1, f2)
    }

    /// Run four independent operations concurrently.
    pub async fn join4<F1, F2, F3, F4, T1, T2, T3, T4>(
        f1: F1,
        f2: F2,
        f3: F3,
        f4: F4,
    ) -> AppResult<(T1, T2, T3, T4)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
        F3: Future<Output = AppResult<T3>>,
        F4: Future<Output = AppResult<T4>>,
    {
        try_join!(f1, f2, f3, f4)
    }

    /// Run a collection of homogeneous operations concurrently, preserving
    /// input order in the result.
    pub async fn join_all<F, T>(futures: Vec<F>) -> AppResult<Vec<T>>
    where
        F: Future<Output = AppResult<T>>,
    {
        let results = futures::future::join_all(futures).await;
        results.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn parallel_join2() {
        async fn op1() -> AppResult<i32> {
            Ok(1)
        }
        async fn op2() -> AppResult<i32> {
            Ok(2)
        }

        let (a, b) = parallel::join2(op1(), op2()).await.unwrap();
        assert_eq!(a, 1);
        assert_eq!(b, 2);
    }

    #[tokio::test]
    async fn parallel_join_all_preserves_order() {
        let futures: Vec<_> = (0..5)
            .map(|i| async move { Ok(i) as AppResult<i32> })
            .collect();
        let results = parallel::join_all(futures).await.unwrap();
        assert_eq!(results, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn parallel_join_all_fails_on_first_error() {
        let futures: Vec<_> = (0..3)
            .map(|i| async move {
                if i == 1 {
                    Err(crate::errors::AppError::internal("boom"))
                } else {
                    Ok(i)
                }
            })
            .collect();

        assert!(parallel::join_all(futures).await.is_err());
    }
}
