//! Application services layer: use cases orchestrating domain logic and
//! infrastructure behind dependency-inverted traits.

mod admin_service;
mod audit;
mod auth_service;
pub mod container;
mod contract_service;
mod dashboard_service;
mod master_data_service;
mod warning_service;

pub use admin_service::{AdminManager, AdminService};
pub use audit::{AuditRecorder, AuditSink};
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use container::{parallel, ServiceContainer, Services};
pub use contract_service::{ContractManager, ContractService};
pub use dashboard_service::{DashboardKpis, DashboardReader, DashboardService};
pub use master_data_service::{MasterDataManager, MasterDataService};
pub use warning_service::{WarningManager, WarningService};

#[cfg(test)]
pub(crate) mod testing {
    //! Shared test doubles for service unit tests.

    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::errors::{AppError, AppResult};
    use crate::infra::repositories::{
        MockAuditLogRepository, MockContractRepository, MockGroupRepository,
        MockMasterDataRepository, MockPermissionRepository, MockSystemConfigRepository,
        MockUserRepository, MockWarningRepository,
    };
    use crate::infra::{
        AuditLogRepository, ContractRepository, GroupRepository, MasterDataRepository,
        PermissionRepository, SystemConfigRepository, TransactionContext, UnitOfWork,
        UserRepository, WarningRepository,
    };

    /// Unit-of-work stub: repositories are supplied per test, transactions
    /// always fail so tests can prove a path never reaches the write side.
    #[derive(Default)]
    pub(crate) struct StubUow {
        pub contracts: Option<Arc<MockContractRepository>>,
        pub master_data: Option<Arc<MockMasterDataRepository>>,
        pub users: Option<Arc<MockUserRepository>>,
        pub groups: Option<Arc<MockGroupRepository>>,
        pub permissions: Option<Arc<MockPermissionRepository>>,
        pub warnings: Option<Arc<MockWarningRepository>>,
        pub audit_logs: Option<Arc<MockAuditLogRepository>>,
        pub configs: Option<Arc<MockSystemConfigRepository>>,
    }

    impl StubUow {
        pub fn with_contracts(repo: MockContractRepository) -> Self {
            Self {
                contracts: Some(Arc::new(repo)),
                ..Default::default()
            }
        }

        pub fn with_master_data(repo: MockMasterDataRepository) -> Self {
            Self {
                master_data: Some(Arc::new(repo)),
                ..Default::default()
            }
        }

        pub fn with_users(repo: MockUserRepository) -> Self {
            Self {
                users: Some(Arc::new(repo)),
                ..Default::default()
            }
        }

        pub fn with_permissions(repo: MockPermissionRepository) -> Self {
            Self {
                permissions: Some(Arc::new(repo)),
                ..Default::default()
            }
        }

        pub fn with_warnings(repo: MockWarningRepository) -> Self {
            Self {
                warnings: Some(Arc::new(repo)),
                ..Default::default()
            }
        }

        pub fn with_configs(repo: MockSystemConfigRepository) -> Self {
            Self {
                configs: Some(Arc::new(repo)),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl UnitOfWork for StubUow {
        fn contracts(&self) -> Arc<dyn ContractRepository> {
            self.contracts.clone().expect("contract repository not stubbed")
        }

        fn master_data(&self) -> Arc<dyn MasterDataRepository> {
            self.master_data
                .clone()
                .expect("master data repository not stubbed")
        }

        fn users(&self) -> Arc<dyn UserRepository> {
            self.users.clone().expect("user repository not stubbed")
        }

        fn groups(&self) -> Arc<dyn GroupRepository> {
            self.groups.clone().expect("group repository not stubbed")
        }

        fn permissions(&self) -> Arc<dyn PermissionRepository> {
            self.permissions
                .clone()
                .expect("permission repository not stubbed")
        }

        fn warnings(&self) -> Arc<dyn WarningRepository> {
            self.warnings.clone().expect("warning repository not stubbed")
        }

        fn audit_logs(&self) -> Arc<dyn AuditLogRepository> {
            self.audit_logs
                .clone()
                .expect("audit log repository not stubbed")
        }

        fn configs(&self) -> Arc<dyn SystemConfigRepository> {
            self.configs.clone().expect("config repository not stubbed")
        }

        async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
        where
            F: for<'a> FnOnce(
                    TransactionContext<'a>,
                ) -> std::pin::Pin<
                    Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
                > + Send,
            T: Send,
        {
            Err(AppError::internal("transactions not supported in stub"))
        }
    }
}
