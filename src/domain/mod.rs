//! Domain layer: business entities, value objects, and the nested-collection
//! synchronization algorithm, independent of infrastructure concerns.

pub mod admin;
pub mod contract;
pub mod master_data;
pub mod password;
pub mod sync;
pub mod user;
pub mod warning;

pub use admin::{
    AuditLog, AuditLogFilter, ConfigValueType, CreateGroup, Permission, PermissionGrant,
    SystemConfig, UpdateGroup, UserGroup, DEFAULT_PERMISSIONS,
};
pub use contract::{
    AttachmentInput, Contract, ContractAttachment, ContractPatch, ContractSummary,
    ContractTypeRef, ContractView, CreateContract, CustomerRef, Expense, ExpenseInput,
    ExpenseView, InvoiceStatus, PaymentStatus, PaymentTerm, PaymentTermInput, ProjectMember,
    ProjectMemberInput, SoftwareRef, StatusRef, SupplierRef, UpdateContract, UserRef,
};
pub use master_data::{ActiveStatus, MasterDataKind, MasterPayload, MasterRecord};
pub use password::Password;
pub use sync::{plan_sync, ExistingItem, SyncItem, SyncPlan};
pub use user::{UpdateUser, User, UserResponse, UserRole, UserStatus};
pub use warning::{
    CreateWarning, UpdateWarning, Warning, WarningFilter, WarningKind, WarningStatus,
};
