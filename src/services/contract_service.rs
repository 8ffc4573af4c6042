//! Contract service: aggregate reads and the reconciliation of submitted
//! snapshots against stored state.
//!
//! An update carries the full desired state of the aggregate. Inside one
//! transaction the parent patch is applied, the software association is
//! replaced when supplied, and each submitted collection is reconciled with
//! `plan_sync`: delete dropped rows, update kept rows, insert new rows, in
//! that order. The reloaded aggregate is returned so callers always see
//! authoritative post-write state.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    plan_sync, Contract, ContractSummary, ContractView, CreateContract, UpdateContract,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait ContractService: Send + Sync {
    async fn list_contracts(&self) -> AppResult<Vec<ContractSummary>>;

    async fn get_contract(&self, id: Uuid) -> AppResult<ContractView>;

    /// Insert the parent plus every supplied nested row and association.
    async fn create_contract(
        &self,
        input: CreateContract,
        creator: Option<Uuid>,
    ) -> AppResult<ContractView>;

    /// Reconcile stored state with the submitted snapshot. Collections
    /// omitted from the submission are left untouched; an empty array
    /// deletes every row in that collection.
    async fn update_contract(&self, id: Uuid, input: UpdateContract) -> AppResult<ContractView>;

    /// Cascade-delete the aggregate; returns the removed parent record.
    async fn delete_contract(&self, id: Uuid) -> AppResult<Contract>;
}

/// Concrete implementation over the Unit of Work.
pub struct ContractManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ContractManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ContractService for ContractManager<U> {
    async fn list_contracts(&self) -> AppResult<Vec<ContractSummary>> {
        self.uow.contracts().list().await
    }

    async fn get_contract(&self, id: Uuid) -> AppResult<ContractView> {
        self.uow.contracts().find_view(id).await?.ok_or_not_found()
    }

    async fn create_contract(
        &self,
        input: CreateContract,
        creator: Option<Uuid>,
    ) -> AppResult<ContractView> {
        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let repo = ctx.contracts();

                    let parent = repo.insert_parent(&input, creator).await?;

                    if let Some(software_ids) = &input.software_ids {
                        repo.set_software(parent.id, software_ids).await?;
                    }

                    repo.insert_payment_terms(parent.id, input.payment_terms).await?;
                    repo.insert_expenses(parent.id, input.expenses).await?;
                    repo.insert_members(parent.id, input.members).await?;
                    repo.insert_attachments(parent.id, input.attachments).await?;

                    repo.load_view(parent.id)
                        .await?
                        .ok_or_else(|| AppError::internal("created contract vanished"))
                })
            })
            .await
    }

    async fn update_contract(&self, id: Uuid, input: UpdateContract) -> AppResult<ContractView> {
        // Missing aggregate fails before any write is attempted.
        self.uow
            .contracts()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        let UpdateContract {
            patch,
            expected_version,
            software_ids,
            payment_terms,
            expenses,
            members,
        } = input;

        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let repo = ctx.contracts();

                    let parent = repo.find_parent(id).await?.ok_or(AppError::NotFound)?;

                    if let Some(expected) = expected_version {
                        if parent.version != expected {
                            return Err(AppError::conflict(
                                "Contract was modified by another request",
                            ));
                        }
                    }

                    repo.apply_patch(parent, &patch).await?;

                    if let Some(software_ids) = &software_ids {
                        repo.set_software(id, software_ids).await?;
                    }

                    if let Some(items) = payment_terms {
                        let existing = repo.payment_term_ids(id).await?;
                        let plan = plan_sync(&existing, items);
                        repo.delete_payment_terms(&plan.delete).await?;
                        for (term_id, fields) in plan.update {
                            repo.update_payment_term(term_id, fields).await?;
                        }
                        repo.insert_payment_terms(id, plan.create).await?;
                    }

                    if let Some(items) = expenses {
                        let existing = repo.expense_ids(id).await?;
                        let plan = plan_sync(&existing, items);
                        repo.delete_expenses(&plan.delete).await?;
                        for (expense_id, fields) in plan.update {
                            repo.update_expense(expense_id, fields).await?;
                        }
                        repo.insert_expenses(id, plan.create).await?;
                    }

                    if let Some(items) = members {
                        let existing = repo.member_ids(id).await?;
                        let plan = plan_sync(&existing, items);
                        repo.delete_members(&plan.delete).await?;
                        for (member_id, fields) in plan.update {
                            repo.update_member(member_id, fields).await?;
                        }
                        repo.insert_members(id, plan.create).await?;
                    }

                    repo.load_view(id).await?.ok_or(AppError::NotFound)
                })
            })
            .await
    }

    async fn delete_contract(&self, id: Uuid) -> AppResult<Contract> {
        let contract = self
            .uow
            .contracts()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    // Children and join rows cascade with the parent row.
                    if !ctx.contracts().delete(id).await? {
                        return Err(AppError::NotFound);
                    }
                    Ok(())
                })
            })
            .await?;

        Ok(contract)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::repositories::MockContractRepository;
    use crate::services::testing::StubUow;

    #[tokio::test]
    async fn update_of_missing_contract_is_not_found_without_writes() {
        let mut repo = MockContractRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        // The stub unit of work fails any transaction attempt, so reaching
        // the write path would fail the test with a different error.
        let service = ContractManager::new(Arc::new(StubUow::with_contracts(repo)));
        let result = service
            .update_contract(Uuid::new_v4(), UpdateContract::default())
            .await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn delete_of_missing_contract_is_not_found() {
        let mut repo = MockContractRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = ContractManager::new(Arc::new(StubUow::with_contracts(repo)));
        let result = service.delete_contract(Uuid::new_v4()).await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn get_contract_maps_missing_view_to_not_found() {
        let mut repo = MockContractRepository::new();
        repo.expect_find_view().returning(|_| Ok(None));

        let service = ContractManager::new(Arc::new(StubUow::with_contracts(repo)));
        let result = service.get_contract(Uuid::new_v4()).await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn list_passes_through() {
        let mut repo = MockContractRepository::new();
        repo.expect_list().returning(|| Ok(vec![]));

        let service = ContractManager::new(Arc::new(StubUow::with_contracts(repo)));
        let result = service.list_contracts().await.unwrap();

        assert!(result.is_empty());
    }
}
