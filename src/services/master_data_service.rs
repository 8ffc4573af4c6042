//! Master-data service: one CRUD surface for every reference table.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{MasterDataKind, MasterPayload, MasterRecord};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait MasterDataService: Send + Sync {
    async fn list(&self, kind: MasterDataKind) -> AppResult<Vec<MasterRecord>>;

    async fn get(&self, kind: MasterDataKind, id: Uuid) -> AppResult<MasterRecord>;

    async fn create(&self, kind: MasterDataKind, payload: MasterPayload)
        -> AppResult<MasterRecord>;

    async fn update(
        &self,
        kind: MasterDataKind,
        id: Uuid,
        payload: MasterPayload,
    ) -> AppResult<MasterRecord>;

    async fn delete(&self, kind: MasterDataKind, id: Uuid) -> AppResult<()>;
}

pub struct MasterDataManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> MasterDataManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> MasterDataService for MasterDataManager<U> {
    async fn list(&self, kind: MasterDataKind) -> AppResult<Vec<MasterRecord>> {
        self.uow.master_data().list(kind).await
    }

    async fn get(&self, kind: MasterDataKind, id: Uuid) -> AppResult<MasterRecord> {
        self.uow
            .master_data()
            .find_by_id(kind, id)
            .await?
            .ok_or_not_found()
    }

    async fn create(
        &self,
        kind: MasterDataKind,
        payload: MasterPayload,
    ) -> AppResult<MasterRecord> {
        self.uow.master_data().create(kind, payload).await
    }

    async fn update(
        &self,
        kind: MasterDataKind,
        id: Uuid,
        payload: MasterPayload,
    ) -> AppResult<MasterRecord> {
        self.uow.master_data().update(kind, id, payload).await
    }

    async fn delete(&self, kind: MasterDataKind, id: Uuid) -> AppResult<()> {
        self.uow.master_data().delete(kind, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::infra::repositories::MockMasterDataRepository;
    use crate::services::testing::StubUow;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn get_maps_missing_row_to_not_found() {
        let mut repo = MockMasterDataRepository::new();
        repo.expect_find_by_id()
            .with(eq(MasterDataKind::Customers), mockall::predicate::always())
            .returning(|_, _| Ok(None));

        let service = MasterDataManager::new(Arc::new(StubUow::with_master_data(repo)));
        let result = service.get(MasterDataKind::Customers, Uuid::new_v4()).await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn list_dispatches_on_kind() {
        let mut repo = MockMasterDataRepository::new();
        repo.expect_list()
            .with(eq(MasterDataKind::Units))
            .returning(|_| Ok(vec![]));

        let service = MasterDataManager::new(Arc::new(StubUow::with_master_data(repo)));
        let result = service.list(MasterDataKind::Units).await.unwrap();

        assert!(result.is_empty());
    }
}
