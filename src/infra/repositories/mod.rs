//! Repository layer: data access behind per-aggregate traits.

mod admin_repository;
mod contract_repository;
mod master_data_repository;
mod user_repository;
mod warning_repository;

pub(crate) mod entities;

pub use admin_repository::{
    AuditEntry, AuditLogRepository, AuditLogStore, GroupRepository, GroupStore, PermissionSeed,
    PermissionRepository, PermissionStore, SystemConfigRepository, SystemConfigStore,
};
pub use contract_repository::{ContractRepository, ContractStore, TopCustomer};
pub use master_data_repository::{MasterDataRepository, MasterDataStore};
pub use user_repository::{UserRepository, UserStore};
pub use warning_repository::{WarningRepository, WarningStore};

pub(crate) use contract_repository::queries;

#[cfg(test)]
pub use admin_repository::{
    MockAuditLogRepository, MockGroupRepository, MockPermissionRepository,
    MockSystemConfigRepository,
};
#[cfg(test)]
pub use contract_repository::MockContractRepository;
#[cfg(test)]
pub use master_data_repository::MockMasterDataRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
#[cfg(test)]
pub use warning_repository::MockWarningRepository;
