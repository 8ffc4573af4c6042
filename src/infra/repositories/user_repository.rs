//! User repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::user::{self, Entity as UserEntity};
use crate::domain::{UpdateUser, User, UserRole};
use crate::errors::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn create(
        &self,
        email: String,
        password_hash: String,
        name: String,
        role: UserRole,
    ) -> AppResult<User>;

    /// Applies the supplied fields; `password_hash` must already be hashed.
    async fn update(
        &self,
        id: Uuid,
        changes: UpdateUser,
        password_hash: Option<String>,
    ) -> AppResult<User>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;

    async fn list(&self) -> AppResult<Vec<User>>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create(
        &self,
        email: String,
        password_hash: String,
        name: String,
        role: UserRole,
    ) -> AppResult<User> {
        let now = Utc::now();
        let active = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email),
            password_hash: Set(password_hash),
            name: Set(name),
            role: Set(role.to_string()),
            status: Set("active".to_string()),
            group_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active.insert(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn update(
        &self,
        id: Uuid,
        changes: UpdateUser,
        password_hash: Option<String>,
    ) -> AppResult<User> {
        let model = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound)?;

        let mut active: user::ActiveModel = model.into();

        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(role) = changes.role {
            active.role = Set(role.to_string());
        }
        if let Some(status) = changes.status {
            active.status = Set(status.to_string());
        }
        if let Some(group_id) = changes.group_id {
            active.group_id = Set(Some(group_id));
        }
        if let Some(hash) = password_hash {
            active.password_hash = Set(hash);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_desc(user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }
}
