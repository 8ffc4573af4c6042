//! Application state: the dependency injection container handed to every
//! handler.

use std::sync::Arc;

use crate::infra::{Cache, Database};
use crate::services::{
    AdminService, AuditSink, AuthService, ContractService, DashboardService, MasterDataService,
    ServiceContainer, Services, WarningService,
};

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub contract_service: Arc<dyn ContractService>,
    pub master_data_service: Arc<dyn MasterDataService>,
    pub warning_service: Arc<dyn WarningService>,
    pub admin_service: Arc<dyn AdminService>,
    pub dashboard_service: Arc<dyn DashboardService>,
    pub audit: Arc<dyn AuditSink>,
    pub cache: Arc<Cache>,
    pub database: Arc<Database>,
}

impl AppState {
    /// Build the state from live infrastructure via the service container.
    pub fn from_config(
        database: Arc<Database>,
        cache: Arc<Cache>,
        config: crate::config::Config,
    ) -> Self {
        let container = Services::from_connection(database.get_connection(), config);

        Self {
            auth_service: container.auth(),
            contract_service: container.contracts(),
            master_data_service: container.master_data(),
            warning_service: container.warnings(),
            admin_service: container.admin(),
            dashboard_service: container.dashboard(),
            audit: container.audit(),
            cache,
            database,
        }
    }
}
