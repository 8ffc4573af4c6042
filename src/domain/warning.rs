//! Warning records: denormalized alerts for upcoming or overdue contract
//! milestones.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Kind of milestone a warning flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    AcceptanceUpcoming,
    AcceptanceOverdue,
    PaymentUpcoming,
    PaymentOverdue,
    ContractExpired,
}

impl From<&str> for WarningKind {
    fn from(s: &str) -> Self {
        match s {
            "acceptance_upcoming" => WarningKind::AcceptanceUpcoming,
            "acceptance_overdue" => WarningKind::AcceptanceOverdue,
            "payment_upcoming" => WarningKind::PaymentUpcoming,
            "payment_overdue" => WarningKind::PaymentOverdue,
            _ => WarningKind::ContractExpired,
        }
    }
}

impl std::fmt::Display for WarningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            WarningKind::AcceptanceUpcoming => "acceptance_upcoming",
            WarningKind::AcceptanceOverdue => "acceptance_overdue",
            WarningKind::PaymentUpcoming => "payment_upcoming",
            WarningKind::PaymentOverdue => "payment_overdue",
            WarningKind::ContractExpired => "contract_expired",
        };
        write!(f, "{}", s)
    }
}

/// Processing state of a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WarningStatus {
    Pending,
    Processing,
    Resolved,
}

impl From<&str> for WarningStatus {
    fn from(s: &str) -> Self {
        match s {
            "processing" => WarningStatus::Processing,
            "resolved" => WarningStatus::Resolved,
            _ => WarningStatus::Pending,
        }
    }
}

impl std::fmt::Display for WarningStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            WarningStatus::Pending => "pending",
            WarningStatus::Processing => "processing",
            WarningStatus::Resolved => "resolved",
        };
        write!(f, "{}", s)
    }
}

/// A warning row. Contract code and customer name are captured at creation
/// time so the row stays readable if the contract's display fields change.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Warning {
    pub id: Uuid,
    pub kind: WarningKind,
    pub contract_id: Uuid,
    pub contract_code: String,
    pub customer_name: String,
    pub due_date: NaiveDate,
    /// Signed day count to the due date; negative means overdue.
    pub days_diff: i32,
    pub amount: Option<i64>,
    pub pic: Option<String>,
    pub status: WarningStatus,
    pub note: Option<String>,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Manual warning creation payload.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateWarning {
    pub kind: WarningKind,
    pub contract_id: Uuid,
    #[validate(length(min = 1, message = "Contract code is required"))]
    pub contract_code: String,
    #[validate(length(min = 1, message = "Customer name is required"))]
    pub customer_name: String,
    pub due_date: NaiveDate,
    pub days_diff: i32,
    pub amount: Option<i64>,
    pub pic: Option<String>,
    pub status: Option<WarningStatus>,
    pub note: Option<String>,
    pub details: Option<String>,
}

/// Only the processing state and note are mutable after creation.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateWarning {
    pub status: Option<WarningStatus>,
    pub note: Option<String>,
}

/// Query filter for the warning list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WarningFilter {
    pub kind: Option<WarningKind>,
    pub status: Option<WarningStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
