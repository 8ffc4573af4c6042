//! Administration service: user accounts, permission groups, lazily seeded
//! permissions, audit log queries, and guarded configuration updates.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::container::parallel;
use crate::domain::{
    AuditLog, AuditLogFilter, CreateGroup, Password, Permission, PermissionGrant, SystemConfig,
    UpdateGroup, UpdateUser, User, UserGroup, DEFAULT_PERMISSIONS,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait AdminService: Send + Sync {
    // Users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    async fn update_user(&self, id: Uuid, changes: UpdateUser) -> AppResult<User>;

    async fn delete_user(&self, id: Uuid) -> AppResult<()>;

    // Groups
    async fn list_groups(&self) -> AppResult<Vec<UserGroup>>;

    async fn create_group(&self, input: CreateGroup) -> AppResult<UserGroup>;

    async fn update_group(&self, id: Uuid, changes: UpdateGroup) -> AppResult<UserGroup>;

    async fn delete_group(&self, id: Uuid) -> AppResult<()>;

    // Permissions
    async fn permissions_for_group(&self, group_id: Uuid) -> AppResult<Vec<Permission>>;

    async fn update_permission(&self, grant: PermissionGrant) -> AppResult<Permission>;

    async fn update_permissions_bulk(&self, grants: Vec<PermissionGrant>) -> AppResult<usize>;

    // Audit log
    async fn list_logs(&self, filter: AuditLogFilter) -> AppResult<Vec<AuditLog>>;

    // System configuration
    async fn list_configs(&self, category: Option<String>) -> AppResult<Vec<SystemConfig>>;

    async fn update_config(&self, id: Uuid, value: Option<String>) -> AppResult<SystemConfig>;
}

pub struct AdminManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> AdminManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> AdminService for AdminManager<U> {
    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.uow.users().list().await
    }

    async fn update_user(&self, id: Uuid, mut changes: UpdateUser) -> AppResult<User> {
        let password_hash = match changes.password.take() {
            Some(plain) => Some(Password::new(&plain)?.into_string()),
            None => None,
        };

        self.uow.users().update(id, changes, password_hash).await
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        self.uow.users().delete(id).await
    }

    async fn list_groups(&self) -> AppResult<Vec<UserGroup>> {
        self.uow.groups().list().await
    }

    async fn create_group(&self, input: CreateGroup) -> AppResult<UserGroup> {
        self.uow.groups().create(input).await
    }

    async fn update_group(&self, id: Uuid, changes: UpdateGroup) -> AppResult<UserGroup> {
        self.uow.groups().update(id, changes).await
    }

    async fn delete_group(&self, id: Uuid) -> AppResult<()> {
        self.uow.groups().delete(id).await
    }

    /// First read for a group materializes the default catalog with every
    /// grant false; later reads return stored rows unchanged.
    async fn permissions_for_group(&self, group_id: Uuid) -> AppResult<Vec<Permission>> {
        let repo = self.uow.permissions();

        let permissions = repo.list_by_group(group_id).await?;
        if !permissions.is_empty() {
            return Ok(permissions);
        }

        repo.seed_for_group(group_id, DEFAULT_PERMISSIONS).await?;
        repo.list_by_group(group_id).await
    }

    async fn update_permission(&self, grant: PermissionGrant) -> AppResult<Permission> {
        self.uow.permissions().apply_grant(grant).await
    }

    /// Grants are applied as independent writes; a failing tuple does not
    /// roll back the others.
    async fn update_permissions_bulk(&self, grants: Vec<PermissionGrant>) -> AppResult<usize> {
        let repo = self.uow.permissions();
        let count = grants.len();

        let updates: Vec<_> = grants
            .into_iter()
            .map(|grant| repo.apply_grant(grant))
            .collect();
        parallel::join_all(updates).await?;

        Ok(count)
    }

    async fn list_logs(&self, filter: AuditLogFilter) -> AppResult<Vec<AuditLog>> {
        self.uow.audit_logs().list(filter).await
    }

    async fn list_configs(&self, category: Option<String>) -> AppResult<Vec<SystemConfig>> {
        self.uow.configs().list(category).await
    }

    async fn update_config(&self, id: Uuid, value: Option<String>) -> AppResult<SystemConfig> {
        let config = self
            .uow
            .configs()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        if !config.is_editable {
            return Err(AppError::Forbidden);
        }

        self.uow.configs().update_value(id, value).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::repositories::{MockPermissionRepository, MockSystemConfigRepository};
    use crate::services::testing::StubUow;
    use chrono::Utc;
    use mockall::Sequence;

    fn seeded_rows(group_id: Uuid) -> Vec<Permission> {
        DEFAULT_PERMISSIONS
            .iter()
            .map(|(code, name, is_parent)| Permission {
                id: Uuid::new_v4(),
                group_id,
                code: (*code).to_string(),
                name: (*name).to_string(),
                is_parent: *is_parent,
                parent_id: None,
                can_view: false,
                can_add: false,
                can_edit: false,
                can_delete: false,
            })
            .collect()
    }

    #[tokio::test]
    async fn first_permission_read_seeds_the_default_catalog() {
        let group_id = Uuid::new_v4();
        let mut repo = MockPermissionRepository::new();
        let mut seq = Sequence::new();

        repo.expect_list_by_group()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(vec![]));
        repo.expect_seed_for_group()
            .times(1)
            .in_sequence(&mut seq)
            .withf(move |gid, catalog| *gid == group_id && catalog.len() == DEFAULT_PERMISSIONS.len())
            .returning(|_, _| Ok(()));
        repo.expect_list_by_group()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |gid| Ok(seeded_rows(gid)));

        let service = AdminManager::new(Arc::new(StubUow::with_permissions(repo)));
        let permissions = service.permissions_for_group(group_id).await.unwrap();

        assert_eq!(permissions.len(), DEFAULT_PERMISSIONS.len());
        assert!(permissions
            .iter()
            .all(|p| !p.can_view && !p.can_add && !p.can_edit && !p.can_delete));
        assert!(permissions.iter().all(|p| p.parent_id.is_none()));
    }

    #[tokio::test]
    async fn second_permission_read_does_not_reseed() {
        let group_id = Uuid::new_v4();
        let mut repo = MockPermissionRepository::new();

        repo.expect_list_by_group()
            .times(1)
            .returning(move |gid| Ok(seeded_rows(gid)));
        // No expectation for seed_for_group: a call would fail the test.

        let service = AdminManager::new(Arc::new(StubUow::with_permissions(repo)));
        let permissions = service.permissions_for_group(group_id).await.unwrap();

        assert_eq!(permissions.len(), DEFAULT_PERMISSIONS.len());
    }

    #[tokio::test]
    async fn bulk_update_applies_each_grant_independently() {
        let mut repo = MockPermissionRepository::new();
        repo.expect_apply_grant().times(3).returning(|grant| {
            Ok(Permission {
                id: grant.id,
                group_id: Uuid::new_v4(),
                code: "DASHBOARD".to_string(),
                name: "Dashboard".to_string(),
                is_parent: false,
                parent_id: None,
                can_view: grant.can_view.unwrap_or(false),
                can_add: false,
                can_edit: false,
                can_delete: false,
            })
        });

        let grants: Vec<PermissionGrant> = (0..3)
            .map(|_| PermissionGrant {
                id: Uuid::new_v4(),
                can_view: Some(true),
                can_add: None,
                can_edit: None,
                can_delete: None,
            })
            .collect();

        let service = AdminManager::new(Arc::new(StubUow::with_permissions(repo)));
        let applied = service.update_permissions_bulk(grants).await.unwrap();

        assert_eq!(applied, 3);
    }

    #[tokio::test]
    async fn locked_config_rows_cannot_be_updated() {
        let config_id = Uuid::new_v4();
        let mut repo = MockSystemConfigRepository::new();
        repo.expect_find_by_id().returning(move |id| {
            Ok(Some(SystemConfig {
                id,
                key: "system_name".to_string(),
                value: Some("Contract Ledger".to_string()),
                value_type: crate::domain::ConfigValueType::String,
                category: None,
                description: None,
                is_editable: false,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }))
        });
        // update_value must not be reached for a locked row.

        let service = AdminManager::new(Arc::new(StubUow::with_configs(repo)));
        let result = service
            .update_config(config_id, Some("Renamed".to_string()))
            .await;

        assert!(matches!(result, Err(AppError::Forbidden)));
    }
}
