//! Administration repositories: user groups, permissions, audit log,
//! system configuration.

use async_trait::async_trait;
use chrono::{NaiveTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use super::entities::{audit_log, permission, system_config, user_group};
use crate::domain::{
    AuditLog, AuditLogFilter, CreateGroup, Permission, PermissionGrant, SystemConfig, UpdateGroup,
    UserGroup,
};
use crate::errors::{AppError, AppResult};

// =============================================================================
// User groups
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<UserGroup>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<UserGroup>>;

    async fn create(&self, input: CreateGroup) -> AppResult<UserGroup>;

    async fn update(&self, id: Uuid, changes: UpdateGroup) -> AppResult<UserGroup>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct GroupStore {
    db: DatabaseConnection,
}

impl GroupStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GroupRepository for GroupStore {
    async fn list(&self) -> AppResult<Vec<UserGroup>> {
        let models = user_group::Entity::find()
            .order_by_desc(user_group::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(UserGroup::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<UserGroup>> {
        let model = user_group::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(model.map(UserGroup::from))
    }

    async fn create(&self, input: CreateGroup) -> AppResult<UserGroup> {
        let now = Utc::now();
        let active = user_group::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(input.code),
            name: Set(input.name),
            note: Set(input.note),
            status: Set("active".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active.insert(&self.db).await.map_err(AppError::from)?;
        Ok(UserGroup::from(model))
    }

    async fn update(&self, id: Uuid, changes: UpdateGroup) -> AppResult<UserGroup> {
        let model = user_group::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound)?;

        let mut active: user_group::ActiveModel = model.into();
        if let Some(code) = changes.code {
            active.code = Set(code);
        }
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if changes.note.is_some() {
            active.note = Set(changes.note);
        }
        if let Some(status) = changes.status {
            active.status = Set(status.to_string());
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(UserGroup::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = user_group::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}

// =============================================================================
// Permissions
// =============================================================================

/// One catalog entry to seed: screen code, display name, section flag.
pub type PermissionSeed = (&'static str, &'static str, bool);

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PermissionRepository: Send + Sync {
    /// Stored grants for a group, in insertion order
    async fn list_by_group(&self, group_id: Uuid) -> AppResult<Vec<Permission>>;

    /// Bulk-create catalog rows for a group with all grants false
    async fn seed_for_group(&self, group_id: Uuid, catalog: &[PermissionSeed]) -> AppResult<()>;

    /// Applies one grant tuple; absent grants stay unchanged.
    async fn apply_grant(&self, grant: PermissionGrant) -> AppResult<Permission>;
}

pub struct PermissionStore {
    db: DatabaseConnection,
}

impl PermissionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PermissionRepository for PermissionStore {
    async fn list_by_group(&self, group_id: Uuid) -> AppResult<Vec<Permission>> {
        let models = permission::Entity::find()
            .filter(permission::Column::GroupId.eq(group_id))
            .order_by_asc(permission::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Permission::from).collect())
    }

    async fn seed_for_group(&self, group_id: Uuid, catalog: &[PermissionSeed]) -> AppResult<()> {
        if catalog.is_empty() {
            return Ok(());
        }

        let now = Utc::now();
        let rows = catalog.iter().map(|(code, name, is_parent)| {
            permission::ActiveModel {
                id: Set(Uuid::new_v4()),
                group_id: Set(group_id),
                code: Set((*code).to_string()),
                name: Set((*name).to_string()),
                is_parent: Set(*is_parent),
                // Hierarchy linking is left to callers.
                parent_id: Set(None),
                can_view: Set(false),
                can_add: Set(false),
                can_edit: Set(false),
                can_delete: Set(false),
                created_at: Set(now),
                updated_at: Set(now),
            }
        });

        permission::Entity::insert_many(rows)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(())
    }

    async fn apply_grant(&self, grant: PermissionGrant) -> AppResult<Permission> {
        let model = permission::Entity::find_by_id(grant.id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound)?;

        let mut active: permission::ActiveModel = model.into();
        if let Some(v) = grant.can_view {
            active.can_view = Set(v);
        }
        if let Some(v) = grant.can_add {
            active.can_add = Set(v);
        }
        if let Some(v) = grant.can_edit {
            active.can_edit = Set(v);
        }
        if let Some(v) = grant.can_delete {
            active.can_delete = Set(v);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Permission::from(model))
    }
}

// =============================================================================
// Audit log
// =============================================================================

/// Everything recorded for one audit entry.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub user_id: Uuid,
    pub screen: String,
    pub action: String,
    pub details: Option<serde_json::Value>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Append one entry; the log is never updated or deleted.
    async fn insert(&self, entry: AuditEntry) -> AppResult<()>;

    async fn list(&self, filter: AuditLogFilter) -> AppResult<Vec<AuditLog>>;
}

pub struct AuditLogStore {
    db: DatabaseConnection,
}

impl AuditLogStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuditLogRepository for AuditLogStore {
    async fn insert(&self, entry: AuditEntry) -> AppResult<()> {
        let active = audit_log::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(entry.user_id),
            screen: Set(entry.screen),
            action: Set(entry.action),
            details: Set(entry.details),
            ip_address: Set(entry.ip_address),
            user_agent: Set(entry.user_agent),
            created_at: Set(Utc::now()),
        };

        active.insert(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }

    async fn list(&self, filter: AuditLogFilter) -> AppResult<Vec<AuditLog>> {
        use crate::config::DEFAULT_AUDIT_LOG_LIMIT;

        let mut query = audit_log::Entity::find();

        if let Some(screen) = filter.screen {
            query = query.filter(audit_log::Column::Screen.eq(screen));
        }
        if let Some(action) = filter.action {
            query = query.filter(audit_log::Column::Action.eq(action));
        }
        if let Some(start) = filter.start_date {
            let start = start.and_time(NaiveTime::MIN).and_utc();
            query = query.filter(audit_log::Column::CreatedAt.gte(start));
        }
        if let Some(end) = filter.end_date {
            let end = end
                .and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN))
                .and_utc();
            query = query.filter(audit_log::Column::CreatedAt.lte(end));
        }

        let models = query
            .order_by_desc(audit_log::Column::CreatedAt)
            .limit(filter.limit.unwrap_or(DEFAULT_AUDIT_LOG_LIMIT))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(AuditLog::from).collect())
    }
}

// =============================================================================
// System configuration
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SystemConfigRepository: Send + Sync {
    /// Config rows, optionally restricted to one category
    async fn list(&self, category: Option<String>) -> AppResult<Vec<SystemConfig>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<SystemConfig>>;

    async fn update_value(&self, id: Uuid, value: Option<String>) -> AppResult<SystemConfig>;
}

pub struct SystemConfigStore {
    db: DatabaseConnection,
}

impl SystemConfigStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SystemConfigRepository for SystemConfigStore {
    async fn list(&self, category: Option<String>) -> AppResult<Vec<SystemConfig>> {
        let mut query = system_config::Entity::find();
        if let Some(category) = category {
            query = query.filter(system_config::Column::Category.eq(category));
        }

        let models = query
            .order_by_asc(system_config::Column::Category)
            .order_by_asc(system_config::Column::Key)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(SystemConfig::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<SystemConfig>> {
        let model = system_config::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(model.map(SystemConfig::from))
    }

    async fn update_value(&self, id: Uuid, value: Option<String>) -> AppResult<SystemConfig> {
        let model = system_config::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound)?;

        let mut active: system_config::ActiveModel = model.into();
        active.value = Set(value);
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(SystemConfig::from(model))
    }
}
