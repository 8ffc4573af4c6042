//! Master data: flat, childless reference tables edited through a single
//! generic CRUD surface.
//!
//! The type tag is a closed enum so an unrecognized tag is rejected at the
//! edge and every dispatch site is an exhaustive match.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::errors::AppError;

/// Active/inactive flag shared by several reference tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActiveStatus {
    Active,
    Inactive,
}

impl Default for ActiveStatus {
    fn default() -> Self {
        ActiveStatus::Active
    }
}

impl From<&str> for ActiveStatus {
    fn from(s: &str) -> Self {
        match s {
            "inactive" => ActiveStatus::Inactive,
            _ => ActiveStatus::Active,
        }
    }
}

impl std::fmt::Display for ActiveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActiveStatus::Active => write!(f, "active"),
            ActiveStatus::Inactive => write!(f, "inactive"),
        }
    }
}

/// The closed set of master-data tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum MasterDataKind {
    Customers,
    Suppliers,
    Software,
    Status,
    ContractTypes,
    Units,
    Personnel,
}

impl MasterDataKind {
    pub fn as_tag(&self) -> &'static str {
        match self {
            MasterDataKind::Customers => "customers",
            MasterDataKind::Suppliers => "suppliers",
            MasterDataKind::Software => "software",
            MasterDataKind::Status => "status",
            MasterDataKind::ContractTypes => "contract-types",
            MasterDataKind::Units => "units",
            MasterDataKind::Personnel => "personnel",
        }
    }
}

impl FromStr for MasterDataKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customers" => Ok(MasterDataKind::Customers),
            "suppliers" => Ok(MasterDataKind::Suppliers),
            "software" => Ok(MasterDataKind::Software),
            "status" => Ok(MasterDataKind::Status),
            "contract-types" => Ok(MasterDataKind::ContractTypes),
            "units" => Ok(MasterDataKind::Units),
            "personnel" => Ok(MasterDataKind::Personnel),
            other => Err(AppError::invalid_reference(format!(
                "unknown master data type '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for MasterDataKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

/// One master-data row, as a superset of the per-kind columns.
///
/// Fields that do not apply to a kind are `None` and never stored.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MasterRecord {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Business field/sector (customers, suppliers)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_code: Option<String>,
    /// Classification group (customers) or department (personnel)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Display color classes (statuses)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ActiveStatus>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update payload for any master-data kind. Kind-irrelevant fields
/// are ignored by the store.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct MasterPayload {
    #[validate(length(min = 1, max = 50, message = "Code is required"))]
    pub code: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub field: Option<String>,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub address: Option<String>,
    pub tax_code: Option<String>,
    pub group: Option<String>,
    pub color: Option<String>,
    pub status: Option<ActiveStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_parse() {
        assert_eq!(
            "contract-types".parse::<MasterDataKind>().unwrap(),
            MasterDataKind::ContractTypes
        );
        assert_eq!(
            "customers".parse::<MasterDataKind>().unwrap(),
            MasterDataKind::Customers
        );
    }

    #[test]
    fn unknown_tag_is_an_invalid_reference() {
        let err = "projects".parse::<MasterDataKind>().unwrap_err();
        assert!(matches!(err, AppError::InvalidReference(_)));
    }

    #[test]
    fn tag_roundtrip() {
        for kind in [
            MasterDataKind::Customers,
            MasterDataKind::Suppliers,
            MasterDataKind::Software,
            MasterDataKind::Status,
            MasterDataKind::ContractTypes,
            MasterDataKind::Units,
            MasterDataKind::Personnel,
        ] {
            assert_eq!(kind.as_tag().parse::<MasterDataKind>().unwrap(), kind);
        }
    }
}
