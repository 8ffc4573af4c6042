//! Infrastructure layer: database, repositories, cache, and the Unit of
//! Work transaction boundary.

pub mod cache;
pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use cache::Cache;
pub use db::{Database, Migrator};
pub use repositories::{
    AuditEntry, AuditLogRepository, ContractRepository, GroupRepository, MasterDataRepository,
    PermissionRepository, SystemConfigRepository, TopCustomer, UserRepository, WarningRepository,
};
pub use unit_of_work::{Persistence, TransactionContext, TxContractRepository, UnitOfWork};
