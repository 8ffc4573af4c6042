//! API surface tests: error mapping, response envelopes, type-tag parsing,
//! and role gating, using mock services where a service is needed.

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use uuid::Uuid;

use contract_ledger::api::middleware::{require_admin, CurrentUser};
use contract_ledger::domain::{
    Contract, ContractSummary, ContractView, CreateContract, MasterDataKind, UpdateContract,
    UserRole,
};
use contract_ledger::errors::{AppError, AppResult};
use contract_ledger::services::ContractService;
use contract_ledger::types::ApiResponse;

// =============================================================================
// Mock services
// =============================================================================

/// Contract service over a single in-memory aggregate.
struct MockContractService {
    known_id: Uuid,
}

fn sample_contract(id: Uuid) -> Contract {
    Contract {
        id,
        code: "HD-2025-001".to_string(),
        sign_date: chrono::NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        content: None,
        customer_id: Uuid::new_v4(),
        contract_type_id: None,
        value_pre_vat: 1_000_000,
        vat: 100_000,
        value_post_vat: 1_100_000,
        duration: Some("12 months".to_string()),
        status_id: None,
        acceptance_date: None,
        created_by: None,
        version: 0,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn sample_view(id: Uuid) -> ContractView {
    ContractView {
        contract: sample_contract(id),
        customer: None,
        status: None,
        contract_type: None,
        software_types: vec![],
        payment_terms: vec![],
        expenses: vec![],
        members: vec![],
        attachments: vec![],
        user: None,
    }
}

#[async_trait]
impl ContractService for MockContractService {
    async fn list_contracts(&self) -> AppResult<Vec<ContractSummary>> {
        Ok(vec![])
    }

    async fn get_contract(&self, id: Uuid) -> AppResult<ContractView> {
        if id == self.known_id {
            Ok(sample_view(id))
        } else {
            Err(AppError::NotFound)
        }
    }

    async fn create_contract(
        &self,
        _input: CreateContract,
        _creator: Option<Uuid>,
    ) -> AppResult<ContractView> {
        Ok(sample_view(self.known_id))
    }

    async fn update_contract(&self, id: Uuid, _input: UpdateContract) -> AppResult<ContractView> {
        if id == self.known_id {
            Ok(sample_view(id))
        } else {
            Err(AppError::NotFound)
        }
    }

    async fn delete_contract(&self, id: Uuid) -> AppResult<Contract> {
        if id == self.known_id {
            Ok(sample_contract(id))
        } else {
            Err(AppError::NotFound)
        }
    }
}

// =============================================================================
// Error mapping
// =============================================================================

#[test]
fn error_kinds_map_to_stable_status_codes() {
    let cases = [
        (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
        (AppError::Forbidden, StatusCode::FORBIDDEN),
        (AppError::NotFound, StatusCode::NOT_FOUND),
        (
            AppError::conflict("Contract was modified by another request"),
            StatusCode::CONFLICT,
        ),
        (
            AppError::validation("Code is required"),
            StatusCode::BAD_REQUEST,
        ),
        (
            AppError::invalid_reference("unknown master data type 'projects'"),
            StatusCode::BAD_REQUEST,
        ),
    ];

    for (error, expected) in cases {
        let response = error.into_response();
        assert_eq!(response.status(), expected);
    }
}

// =============================================================================
// Response envelope
// =============================================================================

#[test]
fn success_envelope_carries_data_and_omits_message() {
    let response = ApiResponse::success(vec![1, 2, 3]);
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["success"], true);
    assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
    assert!(json.get("message").is_none());
}

#[test]
fn message_envelope_omits_data() {
    let response = ApiResponse::message("Contract deleted");
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Contract deleted");
    assert!(json.get("data").is_none());
}

// =============================================================================
// Master data type tags
// =============================================================================

#[test]
fn every_known_type_tag_resolves() {
    for tag in [
        "customers",
        "suppliers",
        "software",
        "status",
        "contract-types",
        "units",
        "personnel",
    ] {
        assert!(tag.parse::<MasterDataKind>().is_ok(), "tag {} failed", tag);
    }
}

#[test]
fn unknown_type_tag_is_rejected_up_front() {
    let err = "warehouses".parse::<MasterDataKind>().unwrap_err();
    assert!(matches!(err, AppError::InvalidReference(_)));
}

// =============================================================================
// Role gating
// =============================================================================

#[test]
fn admin_gate_rejects_non_admin_roles() {
    let admin = CurrentUser {
        id: Uuid::new_v4(),
        email: "admin@example.com".to_string(),
        role: UserRole::Admin,
    };
    let manager = CurrentUser {
        id: Uuid::new_v4(),
        email: "manager@example.com".to_string(),
        role: UserRole::Manager,
    };
    let user = CurrentUser {
        id: Uuid::new_v4(),
        email: "user@example.com".to_string(),
        role: UserRole::User,
    };

    assert!(require_admin(&admin).is_ok());
    assert!(matches!(require_admin(&manager), Err(AppError::Forbidden)));
    assert!(matches!(require_admin(&user), Err(AppError::Forbidden)));
}

// =============================================================================
// Service contract behavior through the trait object
// =============================================================================

#[tokio::test]
async fn unknown_aggregate_ids_surface_as_not_found() {
    let known = Uuid::new_v4();
    let service: Box<dyn ContractService> = Box::new(MockContractService { known_id: known });

    assert!(service.get_contract(known).await.is_ok());

    let missing = Uuid::new_v4();
    assert!(matches!(
        service.get_contract(missing).await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        service.update_contract(missing, UpdateContract::default()).await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        service.delete_contract(missing).await,
        Err(AppError::NotFound)
    ));
}

#[tokio::test]
async fn deleting_returns_the_removed_record_for_auditing() {
    let known = Uuid::new_v4();
    let service = MockContractService { known_id: known };

    let removed = service.delete_contract(known).await.unwrap();
    assert_eq!(removed.id, known);
    assert_eq!(removed.code, "HD-2025-001");
}

// =============================================================================
// View serialization
// =============================================================================

#[test]
fn contract_view_flattens_parent_fields() {
    let view = sample_view(Uuid::new_v4());
    let json = serde_json::to_value(&view).unwrap();

    // Parent fields sit at the top level next to the nested collections.
    assert_eq!(json["code"], "HD-2025-001");
    assert_eq!(json["value_post_vat"], 1_100_000);
    assert!(json["payment_terms"].as_array().unwrap().is_empty());
    assert!(json["software_types"].as_array().unwrap().is_empty());
}
