//! Contract aggregate: the parent record, its owned collections, and the
//! request/response shapes for the contract API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::sync::SyncItem;

/// Invoice state of a payment installment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Exported,
    NotExported,
}

impl From<&str> for InvoiceStatus {
    fn from(s: &str) -> Self {
        match s {
            "exported" => InvoiceStatus::Exported,
            _ => InvoiceStatus::NotExported,
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvoiceStatus::Exported => write!(f, "exported"),
            InvoiceStatus::NotExported => write!(f, "not_exported"),
        }
    }
}

/// Settlement state of an expense towards its supplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Unpaid,
}

impl From<&str> for PaymentStatus {
    fn from(s: &str) -> Self {
        match s {
            "paid" => PaymentStatus::Paid,
            _ => PaymentStatus::Unpaid,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Paid => write!(f, "paid"),
            PaymentStatus::Unpaid => write!(f, "unpaid"),
        }
    }
}

/// Contract parent record.
///
/// The three monetary fields are stored independently; post-VAT is expected
/// to equal pre-VAT plus VAT but is not recomputed or checked here.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Contract {
    pub id: Uuid,
    /// Human-readable contract code, unique (e.g. "HD-2025-001")
    pub code: String,
    pub sign_date: NaiveDate,
    pub content: Option<String>,
    pub customer_id: Uuid,
    pub contract_type_id: Option<Uuid>,
    pub value_pre_vat: i64,
    pub vat: i64,
    pub value_post_vat: i64,
    /// Execution duration label (e.g. "12 months")
    pub duration: Option<String>,
    pub status_id: Option<Uuid>,
    pub acceptance_date: Option<NaiveDate>,
    pub created_by: Option<Uuid>,
    /// Optimistic-concurrency counter, incremented on every update.
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One payment installment of a contract.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaymentTerm {
    pub id: Uuid,
    pub contract_id: Uuid,
    /// Installment label (e.g. "Batch 1")
    pub batch: String,
    pub content: Option<String>,
    /// Percentage of the contract value
    pub ratio: f64,
    pub value: i64,
    pub is_collected: bool,
    pub collection_date: Option<NaiveDate>,
    pub invoice_status: InvoiceStatus,
}

/// One expense booked against a contract.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Expense {
    pub id: Uuid,
    pub contract_id: Uuid,
    pub supplier_id: Option<Uuid>,
    pub category: String,
    pub description: Option<String>,
    pub total_amount: i64,
    /// Free-text state of the contract with the supplier
    pub supplier_contract_status: Option<String>,
    pub payment_status: PaymentStatus,
    /// Person in charge
    pub pic: Option<String>,
    pub note: Option<String>,
}

/// One person staffed on a contract. Name and role are denormalized free
/// text, not references into the personnel catalog.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProjectMember {
    pub id: Uuid,
    pub contract_id: Uuid,
    pub member_code: Option<String>,
    pub name: String,
    pub role: Option<String>,
}

/// Stored metadata of an uploaded contract document.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ContractAttachment {
    pub id: Uuid,
    pub contract_id: Uuid,
    pub name: String,
    pub size: Option<String>,
    pub file_type: Option<String>,
    pub upload_date: Option<NaiveDate>,
    pub file_path: Option<String>,
}

// =============================================================================
// Resolved reference snippets embedded in views
// =============================================================================

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CustomerRef {
    pub id: Uuid,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatusRef {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ContractTypeRef {
    pub id: Uuid,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SoftwareRef {
    pub id: Uuid,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SupplierRef {
    pub id: Uuid,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserRef {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Expense with its supplier reference resolved.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ExpenseView {
    #[serde(flatten)]
    pub expense: Expense,
    pub supplier: Option<SupplierRef>,
}

/// List-level view: parent fields plus resolved references, no children.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ContractSummary {
    #[serde(flatten)]
    pub contract: Contract,
    pub customer: Option<CustomerRef>,
    pub status: Option<StatusRef>,
    pub contract_type: Option<ContractTypeRef>,
    pub software_types: Vec<SoftwareRef>,
    pub user: Option<UserRef>,
}

/// The full aggregate returned by every contract read and write.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ContractView {
    #[serde(flatten)]
    pub contract: Contract,
    pub customer: Option<CustomerRef>,
    pub status: Option<StatusRef>,
    pub contract_type: Option<ContractTypeRef>,
    pub software_types: Vec<SoftwareRef>,
    pub payment_terms: Vec<PaymentTerm>,
    pub expenses: Vec<ExpenseView>,
    pub members: Vec<ProjectMember>,
    pub attachments: Vec<ContractAttachment>,
    pub user: Option<UserRef>,
}

// =============================================================================
// Request payloads
// =============================================================================

/// Field values for a payment installment, without identity.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PaymentTermInput {
    pub batch: String,
    pub content: Option<String>,
    pub ratio: f64,
    pub value: i64,
    #[serde(default)]
    pub is_collected: bool,
    pub collection_date: Option<NaiveDate>,
    pub invoice_status: Option<InvoiceStatus>,
}

/// Field values for an expense, without identity.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ExpenseInput {
    pub category: String,
    pub description: Option<String>,
    pub supplier_id: Option<Uuid>,
    pub total_amount: i64,
    pub supplier_contract_status: Option<String>,
    pub payment_status: Option<PaymentStatus>,
    pub pic: Option<String>,
    pub note: Option<String>,
}

/// Field values for a project member, without identity.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProjectMemberInput {
    pub member_code: Option<String>,
    pub name: String,
    pub role: Option<String>,
}

/// Attachment metadata supplied at contract creation.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AttachmentInput {
    pub name: String,
    pub size: Option<String>,
    pub file_type: Option<String>,
    pub upload_date: Option<NaiveDate>,
    pub file_path: Option<String>,
}

/// Contract creation payload.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateContract {
    #[validate(length(min = 1, max = 100, message = "Contract code is required"))]
    #[schema(example = "HD-2025-001")]
    pub code: String,
    pub sign_date: NaiveDate,
    pub customer_id: Uuid,
    pub content: Option<String>,
    pub contract_type_id: Option<Uuid>,
    #[serde(default)]
    pub value_pre_vat: i64,
    #[serde(default)]
    pub vat: i64,
    #[serde(default)]
    pub value_post_vat: i64,
    pub duration: Option<String>,
    pub status_id: Option<Uuid>,
    pub acceptance_date: Option<NaiveDate>,
    /// Initial software catalog associations
    pub software_ids: Option<Vec<Uuid>>,
    #[serde(default)]
    pub payment_terms: Vec<PaymentTermInput>,
    #[serde(default)]
    pub expenses: Vec<ExpenseInput>,
    #[serde(default)]
    pub members: Vec<ProjectMemberInput>,
    #[serde(default)]
    pub attachments: Vec<AttachmentInput>,
}

/// Scalar-field patch for the contract parent row. Absent fields are left
/// unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ContractPatch {
    pub code: Option<String>,
    pub sign_date: Option<NaiveDate>,
    pub customer_id: Option<Uuid>,
    pub content: Option<String>,
    pub contract_type_id: Option<Uuid>,
    pub value_pre_vat: Option<i64>,
    pub vat: Option<i64>,
    pub value_post_vat: Option<i64>,
    pub duration: Option<String>,
    pub status_id: Option<Uuid>,
    pub acceptance_date: Option<NaiveDate>,
}

/// Contract update payload.
///
/// Omitting a collection leaves it untouched; an empty array deletes every
/// row in that collection. Each element is tagged `new` or `existing`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateContract {
    #[serde(flatten)]
    pub patch: ContractPatch,
    /// When set, the update fails with a conflict unless the stored version
    /// matches.
    pub expected_version: Option<i64>,
    /// Full replacement of the software catalog associations
    pub software_ids: Option<Vec<Uuid>>,
    #[schema(value_type = Option<Vec<Object>>)]
    pub payment_terms: Option<Vec<SyncItem<PaymentTermInput>>>,
    #[schema(value_type = Option<Vec<Object>>)]
    pub expenses: Option<Vec<SyncItem<ExpenseInput>>>,
    #[schema(value_type = Option<Vec<Object>>)]
    pub members: Option<Vec<SyncItem<ProjectMemberInput>>>,
}
