//! Warning repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::warning::{self, Entity as WarningEntity};
use crate::domain::{CreateWarning, UpdateWarning, Warning, WarningFilter, WarningStatus};
use crate::errors::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WarningRepository: Send + Sync {
    /// Warnings matching the filter, soonest due date first
    async fn list(&self, filter: WarningFilter) -> AppResult<Vec<Warning>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Warning>>;

    async fn create(&self, input: CreateWarning) -> AppResult<Warning>;

    /// Only the processing state and note are mutable.
    async fn update(&self, id: Uuid, changes: UpdateWarning) -> AppResult<Warning>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Warnings not yet resolved, for the dashboard
    async fn count_unresolved(&self) -> AppResult<u64>;
}

pub struct WarningStore {
    db: DatabaseConnection,
}

impl WarningStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl WarningRepository for WarningStore {
    async fn list(&self, filter: WarningFilter) -> AppResult<Vec<Warning>> {
        let mut query = WarningEntity::find();

        if let Some(kind) = filter.kind {
            query = query.filter(warning::Column::Kind.eq(kind.to_string()));
        }
        if let Some(status) = filter.status {
            query = query.filter(warning::Column::Status.eq(status.to_string()));
        }
        if let Some(start) = filter.start_date {
            query = query.filter(warning::Column::DueDate.gte(start));
        }
        if let Some(end) = filter.end_date {
            query = query.filter(warning::Column::DueDate.lte(end));
        }

        let models = query
            .order_by_asc(warning::Column::DueDate)
            .order_by_desc(warning::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Warning::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Warning>> {
        let model = WarningEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(model.map(Warning::from))
    }

    async fn create(&self, input: CreateWarning) -> AppResult<Warning> {
        let now = Utc::now();
        let active = warning::ActiveModel {
            id: Set(Uuid::new_v4()),
            kind: Set(input.kind.to_string()),
            contract_id: Set(input.contract_id),
            contract_code: Set(input.contract_code),
            customer_name: Set(input.customer_name),
            due_date: Set(input.due_date),
            days_diff: Set(input.days_diff),
            amount: Set(input.amount),
            pic: Set(input.pic),
            status: Set(input.status.unwrap_or(WarningStatus::Pending).to_string()),
            note: Set(input.note),
            details: Set(input.details),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Warning::from(model))
    }

    async fn update(&self, id: Uuid, changes: UpdateWarning) -> AppResult<Warning> {
        let model = WarningEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound)?;

        let mut active: warning::ActiveModel = model.into();
        if let Some(status) = changes.status {
            active.status = Set(status.to_string());
        }
        if changes.note.is_some() {
            active.note = Set(changes.note);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Warning::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = WarningEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn count_unresolved(&self) -> AppResult<u64> {
        WarningEntity::find()
            .filter(warning::Column::Status.ne(WarningStatus::Resolved.to_string()))
            .count(&self.db)
            .await
            .map_err(Into::into)
    }
}
