//! Contract repository: aggregate reads plus the query helpers shared with
//! the transaction-scoped repository.
//!
//! Write operations live on the transaction context (`TxContractRepository`)
//! so the parent patch, join replace, and nested syncs always commit
//! together.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use sea_orm::sea_query::{Alias, Expr};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::entities::{
    contract, contract_attachment, contract_software, contract_type, customer, expense,
    payment_term, project_member, software, status, supplier, user,
};
use crate::domain::{
    Contract, ContractSummary, ContractTypeRef, ContractView, CustomerRef, ExpenseView,
    SoftwareRef, StatusRef, SupplierRef, UserRef,
};
use crate::errors::{AppError, AppResult};

/// One row of the top-customers dashboard read.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TopCustomer {
    pub customer: CustomerRef,
    pub total_revenue: i64,
}

/// Read-side contract repository.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContractRepository: Send + Sync {
    /// Parent row only, no references resolved
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Contract>>;

    /// Full aggregate with children and resolved references
    async fn find_view(&self, id: Uuid) -> AppResult<Option<ContractView>>;

    /// All contracts with references resolved, newest first
    async fn list(&self) -> AppResult<Vec<ContractSummary>>;

    async fn count(&self) -> AppResult<u64>;

    /// Contracts carrying a status reference
    async fn count_in_progress(&self) -> AppResult<u64>;

    /// Sum of post-VAT values across all contracts
    async fn total_revenue(&self) -> AppResult<i64>;

    /// Sum of expense amounts across all contracts
    async fn total_expenses(&self) -> AppResult<i64>;

    async fn top_customers(&self, limit: u64) -> AppResult<Vec<TopCustomer>>;
}

/// Concrete implementation backed by a database connection.
pub struct ContractStore {
    db: DatabaseConnection,
}

impl ContractStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContractRepository for ContractStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Contract>> {
        let model = contract::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(model.map(Contract::from))
    }

    async fn find_view(&self, id: Uuid) -> AppResult<Option<ContractView>> {
        queries::load_view(&self.db, id).await
    }

    async fn list(&self) -> AppResult<Vec<ContractSummary>> {
        queries::list_summaries(&self.db).await
    }

    async fn count(&self) -> AppResult<u64> {
        contract::Entity::find()
            .count(&self.db)
            .await
            .map_err(Into::into)
    }

    async fn count_in_progress(&self) -> AppResult<u64> {
        contract::Entity::find()
            .filter(contract::Column::StatusId.is_not_null())
            .count(&self.db)
            .await
            .map_err(Into::into)
    }

    async fn total_revenue(&self) -> AppResult<i64> {
        let total: Option<Option<i64>> = contract::Entity::find()
            .select_only()
            .column_as(
                Expr::col(contract::Column::ValuePostVat)
                    .sum()
                    .cast_as(Alias::new("BIGINT")),
                "total",
            )
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(total.flatten().unwrap_or(0))
    }

    async fn total_expenses(&self) -> AppResult<i64> {
        let total: Option<Option<i64>> = expense::Entity::find()
            .select_only()
            .column_as(
                Expr::col(expense::Column::TotalAmount)
                    .sum()
                    .cast_as(Alias::new("BIGINT")),
                "total",
            )
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(total.flatten().unwrap_or(0))
    }

    async fn top_customers(&self, limit: u64) -> AppResult<Vec<TopCustomer>> {
        let rows: Vec<(Uuid, Option<i64>)> = contract::Entity::find()
            .select_only()
            .column(contract::Column::CustomerId)
            .column_as(
                Expr::col(contract::Column::ValuePostVat)
                    .sum()
                    .cast_as(Alias::new("BIGINT")),
                "total",
            )
            .group_by(contract::Column::CustomerId)
            .order_by_desc(Expr::col(Alias::new("total")))
            .limit(limit)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        let customer_ids: Vec<Uuid> = rows.iter().map(|(id, _)| *id).collect();
        let customers: HashMap<Uuid, CustomerRef> = customer::Entity::find()
            .filter(customer::Column::Id.is_in(customer_ids))
            .all(&self.db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|m| (m.id, CustomerRef::from(m)))
            .collect();

        Ok(rows
            .into_iter()
            .filter_map(|(id, total)| {
                customers.get(&id).map(|customer| TopCustomer {
                    customer: customer.clone(),
                    total_revenue: total.unwrap_or(0),
                })
            })
            .collect())
    }
}

/// Query helpers shared by the store and the transaction-scoped repository.
pub(crate) mod queries {
    use super::*;

    /// Load the full aggregate: parent, children, join rows, and resolved
    /// reference snippets.
    pub(crate) async fn load_view<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> AppResult<Option<ContractView>> {
        let Some(parent) = contract::Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(AppError::from)?
        else {
            return Ok(None);
        };

        let customer = customer::Entity::find_by_id(parent.customer_id)
            .one(db)
            .await
            .map_err(AppError::from)?
            .map(CustomerRef::from);

        let status = match parent.status_id {
            Some(sid) => status::Entity::find_by_id(sid)
                .one(db)
                .await
                .map_err(AppError::from)?
                .map(StatusRef::from),
            None => None,
        };

        let contract_type = match parent.contract_type_id {
            Some(tid) => contract_type::Entity::find_by_id(tid)
                .one(db)
                .await
                .map_err(AppError::from)?
                .map(ContractTypeRef::from),
            None => None,
        };

        let created_by = match parent.created_by {
            Some(uid) => user::Entity::find_by_id(uid)
                .one(db)
                .await
                .map_err(AppError::from)?
                .map(|u| UserRef {
                    id: u.id,
                    name: u.name,
                    email: u.email,
                }),
            None => None,
        };

        let software_types = software_refs(db, id).await?;

        let payment_terms = payment_term::Entity::find()
            .filter(payment_term::Column::ContractId.eq(id))
            .order_by_asc(payment_term::Column::CreatedAt)
            .all(db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(Into::into)
            .collect();

        let expense_models = expense::Entity::find()
            .filter(expense::Column::ContractId.eq(id))
            .order_by_asc(expense::Column::CreatedAt)
            .all(db)
            .await
            .map_err(AppError::from)?;

        let supplier_ids: Vec<Uuid> = expense_models
            .iter()
            .filter_map(|e| e.supplier_id)
            .collect();
        let suppliers: HashMap<Uuid, SupplierRef> = supplier::Entity::find()
            .filter(supplier::Column::Id.is_in(supplier_ids))
            .all(db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|m| (m.id, SupplierRef::from(m)))
            .collect();

        let expenses = expense_models
            .into_iter()
            .map(|m| {
                let supplier = m.supplier_id.and_then(|sid| suppliers.get(&sid).cloned());
                ExpenseView {
                    expense: m.into(),
                    supplier,
                }
            })
            .collect();

        let members = project_member::Entity::find()
            .filter(project_member::Column::ContractId.eq(id))
            .order_by_asc(project_member::Column::CreatedAt)
            .all(db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(Into::into)
            .collect();

        let attachments = contract_attachment::Entity::find()
            .filter(contract_attachment::Column::ContractId.eq(id))
            .order_by_asc(contract_attachment::Column::CreatedAt)
            .all(db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(Some(ContractView {
            contract: Contract::from(parent),
            customer,
            status,
            contract_type,
            software_types,
            payment_terms,
            expenses,
            members,
            attachments,
            user: created_by,
        }))
    }

    /// Software catalog references associated with one contract.
    pub(crate) async fn software_refs<C: ConnectionTrait>(
        db: &C,
        contract_id: Uuid,
    ) -> AppResult<Vec<SoftwareRef>> {
        let software_ids: Vec<Uuid> = contract_software::Entity::find()
            .filter(contract_software::Column::ContractId.eq(contract_id))
            .all(db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|row| row.software_id)
            .collect();

        if software_ids.is_empty() {
            return Ok(Vec::new());
        }

        Ok(software::Entity::find()
            .filter(software::Column::Id.is_in(software_ids))
            .all(db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(SoftwareRef::from)
            .collect())
    }

    /// All contracts with their reference snippets, newest first.
    pub(crate) async fn list_summaries<C: ConnectionTrait>(
        db: &C,
    ) -> AppResult<Vec<ContractSummary>> {
        let parents = contract::Entity::find()
            .order_by_desc(contract::Column::CreatedAt)
            .all(db)
            .await
            .map_err(AppError::from)?;

        let customer_ids: HashSet<Uuid> = parents.iter().map(|c| c.customer_id).collect();
        let status_ids: HashSet<Uuid> = parents.iter().filter_map(|c| c.status_id).collect();
        let type_ids: HashSet<Uuid> = parents.iter().filter_map(|c| c.contract_type_id).collect();
        let user_ids: HashSet<Uuid> = parents.iter().filter_map(|c| c.created_by).collect();
        let contract_ids: Vec<Uuid> = parents.iter().map(|c| c.id).collect();

        let customers: HashMap<Uuid, CustomerRef> = customer::Entity::find()
            .filter(customer::Column::Id.is_in(customer_ids))
            .all(db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|m| (m.id, CustomerRef::from(m)))
            .collect();

        let statuses: HashMap<Uuid, StatusRef> = status::Entity::find()
            .filter(status::Column::Id.is_in(status_ids))
            .all(db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|m| (m.id, StatusRef::from(m)))
            .collect();

        let types: HashMap<Uuid, ContractTypeRef> = contract_type::Entity::find()
            .filter(contract_type::Column::Id.is_in(type_ids))
            .all(db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|m| (m.id, ContractTypeRef::from(m)))
            .collect();

        let users: HashMap<Uuid, UserRef> = user::Entity::find()
            .filter(user::Column::Id.is_in(user_ids))
            .all(db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|u| {
                (
                    u.id,
                    UserRef {
                        id: u.id,
                        name: u.name,
                        email: u.email,
                    },
                )
            })
            .collect();

        let join_rows = contract_software::Entity::find()
            .filter(contract_software::Column::ContractId.is_in(contract_ids))
            .all(db)
            .await
            .map_err(AppError::from)?;

        let software_ids: HashSet<Uuid> = join_rows.iter().map(|r| r.software_id).collect();
        let software_map: HashMap<Uuid, SoftwareRef> = software::Entity::find()
            .filter(software::Column::Id.is_in(software_ids))
            .all(db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|m| (m.id, SoftwareRef::from(m)))
            .collect();

        let mut software_by_contract: HashMap<Uuid, Vec<SoftwareRef>> = HashMap::new();
        for row in join_rows {
            if let Some(sw) = software_map.get(&row.software_id) {
                software_by_contract
                    .entry(row.contract_id)
                    .or_default()
                    .push(sw.clone());
            }
        }

        Ok(parents
            .into_iter()
            .map(|parent| {
                let customer = customers.get(&parent.customer_id).cloned();
                let status = parent.status_id.and_then(|sid| statuses.get(&sid).cloned());
                let contract_type = parent
                    .contract_type_id
                    .and_then(|tid| types.get(&tid).cloned());
                let user = parent.created_by.and_then(|uid| users.get(&uid).cloned());
                let software_types = software_by_contract.remove(&parent.id).unwrap_or_default();

                ContractSummary {
                    contract: Contract::from(parent),
                    customer,
                    status,
                    contract_type,
                    software_types,
                    user,
                }
            })
            .collect())
    }
}
