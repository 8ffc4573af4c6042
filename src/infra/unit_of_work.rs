//! Unit of Work: centralized repository access and transaction management.
//!
//! Multi-table mutations (contract parent plus its nested collections and
//! join rows) go through `transaction`, which commits everything together or
//! rolls everything back. Single-row operations use the plain repositories.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, IsolationLevel, QueryFilter, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use super::repositories::{
    entities::{contract, contract_attachment, contract_software, expense, payment_term, project_member},
    queries, AuditLogRepository, AuditLogStore, ContractRepository, ContractStore,
    GroupRepository, GroupStore, MasterDataRepository, MasterDataStore, PermissionRepository,
    PermissionStore, SystemConfigRepository, SystemConfigStore, UserRepository, UserStore,
    WarningRepository, WarningStore,
};
use crate::domain::{
    AttachmentInput, ContractPatch, ContractView, CreateContract, ExpenseInput, InvoiceStatus,
    PaymentStatus, PaymentTermInput, ProjectMemberInput,
};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Generic methods keep this trait out of trait-object position; services
/// are generic over it instead.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn contracts(&self) -> Arc<dyn ContractRepository>;

    fn master_data(&self) -> Arc<dyn MasterDataRepository>;

    fn users(&self) -> Arc<dyn UserRepository>;

    fn groups(&self) -> Arc<dyn GroupRepository>;

    fn permissions(&self) -> Arc<dyn PermissionRepository>;

    fn warnings(&self) -> Arc<dyn WarningRepository>;

    fn audit_logs(&self) -> Arc<dyn AuditLogRepository>;

    fn configs(&self) -> Arc<dyn SystemConfigRepository>;

    /// Execute a closure within a transaction.
    ///
    /// Commits on success, rolls back on error: partial writes are never
    /// observable.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                TransactionContext<'a>,
            ) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Repository access scoped to one open transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Contract aggregate operations within this transaction
    pub fn contracts(&self) -> TxContractRepository<'_> {
        TxContractRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    contract_repo: Arc<ContractStore>,
    master_data_repo: Arc<MasterDataStore>,
    user_repo: Arc<UserStore>,
    group_repo: Arc<GroupStore>,
    permission_repo: Arc<PermissionStore>,
    warning_repo: Arc<WarningStore>,
    audit_log_repo: Arc<AuditLogStore>,
    config_repo: Arc<SystemConfigStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            contract_repo: Arc::new(ContractStore::new(db.clone())),
            master_data_repo: Arc::new(MasterDataStore::new(db.clone())),
            user_repo: Arc::new(UserStore::new(db.clone())),
            group_repo: Arc::new(GroupStore::new(db.clone())),
            permission_repo: Arc::new(PermissionStore::new(db.clone())),
            warning_repo: Arc::new(WarningStore::new(db.clone())),
            audit_log_repo: Arc::new(AuditLogStore::new(db.clone())),
            config_repo: Arc::new(SystemConfigStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn contracts(&self) -> Arc<dyn ContractRepository> {
        self.contract_repo.clone()
    }

    fn master_data(&self) -> Arc<dyn MasterDataRepository> {
        self.master_data_repo.clone()
    }

    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn groups(&self) -> Arc<dyn GroupRepository> {
        self.group_repo.clone()
    }

    fn permissions(&self) -> Arc<dyn PermissionRepository> {
        self.permission_repo.clone()
    }

    fn warnings(&self) -> Arc<dyn WarningRepository> {
        self.warning_repo.clone()
    }

    fn audit_logs(&self) -> Arc<dyn AuditLogRepository> {
        self.audit_log_repo.clone()
    }

    fn configs(&self) -> Arc<dyn SystemConfigRepository> {
        self.config_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                TransactionContext<'a>,
            ) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::ReadCommitted),
                Some(AccessMode::ReadWrite),
            )
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Transaction-scoped contract aggregate repository.
///
/// Carries every write the reconciler issues, so one invocation's parent
/// patch, join replace, and child syncs share a single commit.
pub struct TxContractRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxContractRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub async fn find_parent(&self, id: Uuid) -> AppResult<Option<contract::Model>> {
        contract::Entity::find_by_id(id)
            .one(self.txn)
            .await
            .map_err(AppError::from)
    }

    /// Insert the parent row from the creation payload's scalar fields.
    pub async fn insert_parent(
        &self,
        input: &CreateContract,
        creator: Option<Uuid>,
    ) -> AppResult<contract::Model> {
        let now = Utc::now();
        let active = contract::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(input.code.clone()),
            sign_date: Set(input.sign_date),
            content: Set(input.content.clone()),
            customer_id: Set(input.customer_id),
            contract_type_id: Set(input.contract_type_id),
            value_pre_vat: Set(input.value_pre_vat),
            vat: Set(input.vat),
            value_post_vat: Set(input.value_post_vat),
            duration: Set(input.duration.clone()),
            status_id: Set(input.status_id),
            acceptance_date: Set(input.acceptance_date),
            created_by: Set(creator),
            version: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        };

        active.insert(self.txn).await.map_err(AppError::from)
    }

    /// Apply the scalar patch to the parent row and bump its version.
    pub async fn apply_patch(
        &self,
        model: contract::Model,
        patch: &ContractPatch,
    ) -> AppResult<contract::Model> {
        let next_version = model.version + 1;
        let mut active: contract::ActiveModel = model.into();

        if let Some(code) = &patch.code {
            active.code = Set(code.clone());
        }
        if let Some(sign_date) = patch.sign_date {
            active.sign_date = Set(sign_date);
        }
        if let Some(customer_id) = patch.customer_id {
            active.customer_id = Set(customer_id);
        }
        if patch.content.is_some() {
            active.content = Set(patch.content.clone());
        }
        if patch.contract_type_id.is_some() {
            active.contract_type_id = Set(patch.contract_type_id);
        }
        if let Some(value_pre_vat) = patch.value_pre_vat {
            active.value_pre_vat = Set(value_pre_vat);
        }
        if let Some(vat) = patch.vat {
            active.vat = Set(vat);
        }
        if let Some(value_post_vat) = patch.value_post_vat {
            active.value_post_vat = Set(value_post_vat);
        }
        if patch.duration.is_some() {
            active.duration = Set(patch.duration.clone());
        }
        if patch.status_id.is_some() {
            active.status_id = Set(patch.status_id);
        }
        if patch.acceptance_date.is_some() {
            active.acceptance_date = Set(patch.acceptance_date);
        }
        active.version = Set(next_version);
        active.updated_at = Set(Utc::now());

        active.update(self.txn).await.map_err(AppError::from)
    }

    /// Delete the parent row; children and join rows cascade at the store
    /// level. Returns false when nothing was deleted.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = contract::Entity::delete_by_id(id)
            .exec(self.txn)
            .await
            .map_err(AppError::from)?;
        Ok(result.rows_affected > 0)
    }

    /// Replace the whole software association with exactly the given list.
    pub async fn set_software(&self, contract_id: Uuid, software_ids: &[Uuid]) -> AppResult<()> {
        contract_software::Entity::delete_many()
            .filter(contract_software::Column::ContractId.eq(contract_id))
            .exec(self.txn)
            .await
            .map_err(AppError::from)?;

        let mut seen = HashSet::new();
        let rows: Vec<contract_software::ActiveModel> = software_ids
            .iter()
            .filter(|id| seen.insert(**id))
            .map(|software_id| contract_software::ActiveModel {
                contract_id: Set(contract_id),
                software_id: Set(*software_id),
            })
            .collect();

        if !rows.is_empty() {
            contract_software::Entity::insert_many(rows)
                .exec(self.txn)
                .await
                .map_err(AppError::from)?;
        }

        Ok(())
    }

    /// Reload the full aggregate inside this transaction, so the returned
    /// snapshot reflects every write issued so far.
    pub async fn load_view(&self, id: Uuid) -> AppResult<Option<ContractView>> {
        queries::load_view(self.txn, id).await
    }

    // -------------------------------------------------------------------------
    // Payment terms
    // -------------------------------------------------------------------------

    pub async fn payment_term_ids(&self, contract_id: Uuid) -> AppResult<HashSet<Uuid>> {
        let ids: Vec<Uuid> = payment_term::Entity::find()
            .select_only()
            .column(payment_term::Column::Id)
            .filter(payment_term::Column::ContractId.eq(contract_id))
            .into_tuple()
            .all(self.txn)
            .await
            .map_err(AppError::from)?;
        Ok(ids.into_iter().collect())
    }

    pub async fn delete_payment_terms(&self, ids: &[Uuid]) -> AppResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        payment_term::Entity::delete_many()
            .filter(payment_term::Column::Id.is_in(ids.to_vec()))
            .exec(self.txn)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    pub async fn update_payment_term(&self, id: Uuid, input: PaymentTermInput) -> AppResult<()> {
        let active = payment_term::ActiveModel {
            id: Set(id),
            batch: Set(input.batch),
            content: Set(input.content),
            ratio: Set(input.ratio),
            value: Set(input.value),
            is_collected: Set(input.is_collected),
            collection_date: Set(input.collection_date),
            invoice_status: Set(input
                .invoice_status
                .unwrap_or(InvoiceStatus::NotExported)
                .to_string()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        active.update(self.txn).await.map_err(AppError::from)?;
        Ok(())
    }

    pub async fn insert_payment_terms(
        &self,
        contract_id: Uuid,
        inputs: Vec<PaymentTermInput>,
    ) -> AppResult<()> {
        if inputs.is_empty() {
            return Ok(());
        }
        let now = Utc::now();
        let rows = inputs.into_iter().map(|input| payment_term::ActiveModel {
            id: Set(Uuid::new_v4()),
            contract_id: Set(contract_id),
            batch: Set(input.batch),
            content: Set(input.content),
            ratio: Set(input.ratio),
            value: Set(input.value),
            is_collected: Set(input.is_collected),
            collection_date: Set(input.collection_date),
            invoice_status: Set(input
                .invoice_status
                .unwrap_or(InvoiceStatus::NotExported)
                .to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        });

        payment_term::Entity::insert_many(rows)
            .exec(self.txn)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Expenses
    // -------------------------------------------------------------------------

    pub async fn expense_ids(&self, contract_id: Uuid) -> AppResult<HashSet<Uuid>> {
        let ids: Vec<Uuid> = expense::Entity::find()
            .select_only()
            .column(expense::Column::Id)
            .filter(expense::Column::ContractId.eq(contract_id))
            .into_tuple()
            .all(self.txn)
            .await
            .map_err(AppError::from)?;
        Ok(ids.into_iter().collect())
    }

    pub async fn delete_expenses(&self, ids: &[Uuid]) -> AppResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        expense::Entity::delete_many()
            .filter(expense::Column::Id.is_in(ids.to_vec()))
            .exec(self.txn)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    pub async fn update_expense(&self, id: Uuid, input: ExpenseInput) -> AppResult<()> {
        let active = expense::ActiveModel {
            id: Set(id),
            supplier_id: Set(input.supplier_id),
            category: Set(input.category),
            description: Set(input.description),
            total_amount: Set(input.total_amount),
            supplier_contract_status: Set(input.supplier_contract_status),
            payment_status: Set(input
                .payment_status
                .unwrap_or(PaymentStatus::Unpaid)
                .to_string()),
            pic: Set(input.pic),
            note: Set(input.note),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        active.update(self.txn).await.map_err(AppError::from)?;
        Ok(())
    }

    pub async fn insert_expenses(
        &self,
        contract_id: Uuid,
        inputs: Vec<ExpenseInput>,
    ) -> AppResult<()> {
        if inputs.is_empty() {
            return Ok(());
        }
        let now = Utc::now();
        let rows = inputs.into_iter().map(|input| expense::ActiveModel {
            id: Set(Uuid::new_v4()),
            contract_id: Set(contract_id),
            supplier_id: Set(input.supplier_id),
            category: Set(input.category),
            description: Set(input.description),
            total_amount: Set(input.total_amount),
            supplier_contract_status: Set(input.supplier_contract_status),
            payment_status: Set(input
                .payment_status
                .unwrap_or(PaymentStatus::Unpaid)
                .to_string()),
            pic: Set(input.pic),
            note: Set(input.note),
            created_at: Set(now),
            updated_at: Set(now),
        });

        expense::Entity::insert_many(rows)
            .exec(self.txn)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Project members
    // -------------------------------------------------------------------------

    pub async fn member_ids(&self, contract_id: Uuid) -> AppResult<HashSet<Uuid>> {
        let ids: Vec<Uuid> = project_member::Entity::find()
            .select_only()
            .column(project_member::Column::Id)
            .filter(project_member::Column::ContractId.eq(contract_id))
            .into_tuple()
            .all(self.txn)
            .await
            .map_err(AppError::from)?;
        Ok(ids.into_iter().collect())
    }

    pub async fn delete_members(&self, ids: &[Uuid]) -> AppResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        project_member::Entity::delete_many()
            .filter(project_member::Column::Id.is_in(ids.to_vec()))
            .exec(self.txn)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    pub async fn update_member(&self, id: Uuid, input: ProjectMemberInput) -> AppResult<()> {
        let active = project_member::ActiveModel {
            id: Set(id),
            member_code: Set(input.member_code),
            name: Set(input.name),
            role: Set(input.role),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        active.update(self.txn).await.map_err(AppError::from)?;
        Ok(())
    }

    pub async fn insert_members(
        &self,
        contract_id: Uuid,
        inputs: Vec<ProjectMemberInput>,
    ) -> AppResult<()> {
        if inputs.is_empty() {
            return Ok(());
        }
        let now = Utc::now();
        let rows = inputs
            .into_iter()
            .map(|input| project_member::ActiveModel {
                id: Set(Uuid::new_v4()),
                contract_id: Set(contract_id),
                member_code: Set(input.member_code),
                name: Set(input.name),
                role: Set(input.role),
                created_at: Set(now),
                updated_at: Set(now),
            });

        project_member::Entity::insert_many(rows)
            .exec(self.txn)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Attachments (created with the contract, never synced)
    // -------------------------------------------------------------------------

    pub async fn insert_attachments(
        &self,
        contract_id: Uuid,
        inputs: Vec<AttachmentInput>,
    ) -> AppResult<()> {
        if inputs.is_empty() {
            return Ok(());
        }
        let now = Utc::now();
        let rows = inputs
            .into_iter()
            .map(|input| contract_attachment::ActiveModel {
                id: Set(Uuid::new_v4()),
                contract_id: Set(contract_id),
                name: Set(input.name),
                size: Set(input.size),
                file_type: Set(input.file_type),
                upload_date: Set(input.upload_date),
                file_path: Set(input.file_path),
                created_at: Set(now),
                updated_at: Set(now),
            });

        contract_attachment::Entity::insert_many(rows)
            .exec(self.txn)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }
}
