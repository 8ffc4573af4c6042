//! OpenAPI documentation configuration.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    admin_handler, auth_handler, contract_handler, dashboard_handler, master_data_handler,
    warning_handler,
};
use crate::domain::{
    ActiveStatus, AttachmentInput, AuditLog, ConfigValueType, Contract, ContractAttachment,
    ContractPatch, ContractSummary, ContractTypeRef, ContractView, CreateContract, CreateGroup,
    CreateWarning, CustomerRef, Expense, ExpenseInput, ExpenseView, InvoiceStatus,
    MasterDataKind, MasterPayload, MasterRecord, PaymentStatus, PaymentTerm, PaymentTermInput,
    Permission, PermissionGrant, ProjectMember, ProjectMemberInput, SoftwareRef, StatusRef,
    SupplierRef, SystemConfig, UpdateContract, UpdateGroup, UpdateUser, UpdateWarning, UserGroup,
    UserResponse, UserRef, UserRole, UserStatus, Warning, WarningKind, WarningStatus,
};
use crate::services::{DashboardKpis, TokenResponse};

/// OpenAPI document for the contract ledger API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Contract Ledger API",
        version = "0.1.0",
        description = "Contract lifecycle record-keeping: contracts with payment \
                       installments, expenses, staffing and attachments, master data, \
                       warnings, dashboards, and administration.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        auth_handler::register,
        auth_handler::login,
        auth_handler::me,
        auth_handler::update_profile,
        contract_handler::list_contracts,
        contract_handler::get_contract,
        contract_handler::create_contract,
        contract_handler::update_contract,
        contract_handler::delete_contract,
        master_data_handler::list_items,
        master_data_handler::get_item,
        master_data_handler::create_item,
        master_data_handler::update_item,
        master_data_handler::delete_item,
        warning_handler::list_warnings,
        warning_handler::get_warning,
        warning_handler::create_warning,
        warning_handler::update_warning,
        warning_handler::delete_warning,
        warning_handler::generate_warnings,
        dashboard_handler::kpis,
        dashboard_handler::top_customers,
        admin_handler::list_users,
        admin_handler::update_user,
        admin_handler::delete_user,
        admin_handler::list_groups,
        admin_handler::create_group,
        admin_handler::update_group,
        admin_handler::delete_group,
        admin_handler::get_permissions,
        admin_handler::update_permission,
        admin_handler::update_permissions_bulk,
        admin_handler::get_logs,
        admin_handler::create_log,
        admin_handler::get_configs,
        admin_handler::update_config,
    ),
    components(
        schemas(
            UserRole,
            UserStatus,
            UserResponse,
            UpdateUser,
            TokenResponse,
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            auth_handler::UpdateProfileRequest,
            Contract,
            ContractSummary,
            ContractView,
            ContractPatch,
            CreateContract,
            UpdateContract,
            PaymentTerm,
            PaymentTermInput,
            Expense,
            ExpenseInput,
            ExpenseView,
            ProjectMember,
            ProjectMemberInput,
            ContractAttachment,
            AttachmentInput,
            InvoiceStatus,
            PaymentStatus,
            CustomerRef,
            StatusRef,
            ContractTypeRef,
            SoftwareRef,
            SupplierRef,
            UserRef,
            ActiveStatus,
            MasterDataKind,
            MasterRecord,
            MasterPayload,
            Warning,
            WarningKind,
            WarningStatus,
            CreateWarning,
            UpdateWarning,
            DashboardKpis,
            crate::infra::TopCustomer,
            UserGroup,
            CreateGroup,
            UpdateGroup,
            Permission,
            PermissionGrant,
            admin_handler::GrantBody,
            admin_handler::BulkGrantsRequest,
            admin_handler::CreateLogRequest,
            admin_handler::UpdateConfigRequest,
            AuditLog,
            SystemConfig,
            ConfigValueType,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login, registration, and profile"),
        (name = "Contracts", description = "Contract aggregate operations"),
        (name = "Master data", description = "Reference table CRUD"),
        (name = "Warnings", description = "Milestone warnings"),
        (name = "Dashboard", description = "Read-only aggregates"),
        (name = "Administration", description = "Users, groups, permissions, logs, configuration")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}
