//! Administration domain: user groups, per-group permissions, audit log
//! entries, and system configuration rows.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::master_data::ActiveStatus;

/// A named group of users sharing one permission set.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserGroup {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub note: Option<String>,
    pub status: ActiveStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateGroup {
    #[validate(length(min = 1, message = "Group code is required"))]
    pub code: String,
    #[validate(length(min = 1, message = "Group name is required"))]
    pub name: String,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateGroup {
    pub code: Option<String>,
    pub name: Option<String>,
    pub note: Option<String>,
    pub status: Option<ActiveStatus>,
}

/// One screen/feature grant row for a group.
///
/// `parent_id` is reserved for hierarchical grouping; the seeder leaves it
/// null and only flags section headings via `is_parent`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Permission {
    pub id: Uuid,
    pub group_id: Uuid,
    pub code: String,
    pub name: String,
    pub is_parent: bool,
    pub parent_id: Option<Uuid>,
    pub can_view: bool,
    pub can_add: bool,
    pub can_edit: bool,
    pub can_delete: bool,
}

/// One entry of the bulk grant update; grants not supplied stay unchanged.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PermissionGrant {
    pub id: Uuid,
    pub can_view: Option<bool>,
    pub can_add: Option<bool>,
    pub can_edit: Option<bool>,
    pub can_delete: Option<bool>,
}

/// The fixed catalog seeded for a group on first read: screen code, display
/// name, and whether the entry is a section heading.
pub const DEFAULT_PERMISSIONS: &[(&str, &str, bool)] = &[
    ("DASHBOARD", "Dashboard", false),
    ("CONTRACT", "Contract management", true),
    ("CONTRACT_LIST", "Contract list", false),
    ("CONTRACT_ADD", "New contract", false),
    ("CUSTOMER", "Customer management", false),
    ("SUPPLIER", "Supplier management", false),
    ("REPORTS", "Reports", false),
    ("ADMIN", "System administration", true),
    ("ADMIN_USERS", "User management", false),
    ("ADMIN_GROUPS", "Permission groups", false),
    ("ADMIN_LOGS", "Activity log", false),
];

/// Append-only audit record of who did what.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuditLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub screen: String,
    pub action: String,
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Query filter for the audit log list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditLogFilter {
    pub screen: Option<String>,
    pub action: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: Option<u64>,
}

/// Declared value type of a configuration row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ConfigValueType {
    String,
    Number,
    Boolean,
    Json,
}

impl From<&str> for ConfigValueType {
    fn from(s: &str) -> Self {
        match s {
            "number" => ConfigValueType::Number,
            "boolean" => ConfigValueType::Boolean,
            "json" => ConfigValueType::Json,
            _ => ConfigValueType::String,
        }
    }
}

impl std::fmt::Display for ConfigValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ConfigValueType::String => "string",
            ConfigValueType::Number => "number",
            ConfigValueType::Boolean => "boolean",
            ConfigValueType::Json => "json",
        };
        write!(f, "{}", s)
    }
}

/// Flat key/value configuration row. Only rows with `is_editable` set may be
/// mutated through the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SystemConfig {
    pub id: Uuid,
    pub key: String,
    pub value: Option<String>,
    pub value_type: ConfigValueType,
    pub category: Option<String>,
    pub description: Option<String>,
    pub is_editable: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
