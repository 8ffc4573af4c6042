//! Warning service: manual alert CRUD.
//!
//! Periodic generation from contracts and payment terms is reserved as an
//! extension point; the endpoint acknowledges without scanning.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{CreateWarning, UpdateWarning, Warning, WarningFilter};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait WarningService: Send + Sync {
    async fn list_warnings(&self, filter: WarningFilter) -> AppResult<Vec<Warning>>;

    async fn get_warning(&self, id: Uuid) -> AppResult<Warning>;

    async fn create_warning(&self, input: CreateWarning) -> AppResult<Warning>;

    async fn update_warning(&self, id: Uuid, changes: UpdateWarning) -> AppResult<Warning>;

    async fn delete_warning(&self, id: Uuid) -> AppResult<()>;

    /// Placeholder for scheduled generation; returns the acknowledgement
    /// message shown to callers.
    fn generate_warnings(&self) -> &'static str;
}

pub struct WarningManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> WarningManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> WarningService for WarningManager<U> {
    async fn list_warnings(&self, filter: WarningFilter) -> AppResult<Vec<Warning>> {
        self.uow.warnings().list(filter).await
    }

    async fn get_warning(&self, id: Uuid) -> AppResult<Warning> {
        self.uow.warnings().find_by_id(id).await?.ok_or_not_found()
    }

    async fn create_warning(&self, input: CreateWarning) -> AppResult<Warning> {
        self.uow.warnings().create(input).await
    }

    async fn update_warning(&self, id: Uuid, changes: UpdateWarning) -> AppResult<Warning> {
        self.uow.warnings().update(id, changes).await
    }

    async fn delete_warning(&self, id: Uuid) -> AppResult<()> {
        self.uow.warnings().delete(id).await
    }

    fn generate_warnings(&self) -> &'static str {
        "Warning generation is not yet implemented. Use manual warning creation for now."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::infra::repositories::MockWarningRepository;
    use crate::services::testing::StubUow;

    #[tokio::test]
    async fn get_maps_missing_row_to_not_found() {
        let mut repo = MockWarningRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = WarningManager::new(Arc::new(StubUow::with_warnings(repo)));
        let result = service.get_warning(Uuid::new_v4()).await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn list_forwards_the_filter() {
        let mut repo = MockWarningRepository::new();
        repo.expect_list().returning(|_| Ok(vec![]));

        let service = WarningManager::new(Arc::new(StubUow::with_warnings(repo)));
        let result = service
            .list_warnings(WarningFilter::default())
            .await
            .unwrap();

        assert!(result.is_empty());
    }
}
