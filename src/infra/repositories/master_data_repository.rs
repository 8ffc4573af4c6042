//! Master-data repository: one CRUD surface over the closed set of
//! reference tables.
//!
//! Dispatch is an exhaustive match on `MasterDataKind`; there is no runtime
//! type registry to miss.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use super::entities::{contract_type, customer, personnel, software, status, supplier, unit};
use crate::domain::{MasterDataKind, MasterPayload, MasterRecord};
use crate::errors::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MasterDataRepository: Send + Sync {
    async fn list(&self, kind: MasterDataKind) -> AppResult<Vec<MasterRecord>>;

    async fn find_by_id(&self, kind: MasterDataKind, id: Uuid) -> AppResult<Option<MasterRecord>>;

    async fn create(&self, kind: MasterDataKind, payload: MasterPayload)
        -> AppResult<MasterRecord>;

    /// Applies the supplied fields to the stored row; absent fields are left
    /// unchanged. Fails with NotFound when the id does not resolve.
    async fn update(
        &self,
        kind: MasterDataKind,
        id: Uuid,
        payload: MasterPayload,
    ) -> AppResult<MasterRecord>;

    async fn delete(&self, kind: MasterDataKind, id: Uuid) -> AppResult<()>;
}

pub struct MasterDataStore {
    db: DatabaseConnection,
}

impl MasterDataStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn require(field: Option<String>, name: &str) -> AppResult<String> {
        field.ok_or_else(|| AppError::validation(format!("{} is required", name)))
    }
}

/// The per-kind CRUD bodies differ only in entity types and column subsets;
/// this macro expands the shared shape once per table.
macro_rules! master_crud {
    ($self:ident, $entity:ident, list) => {{
        Ok($entity::Entity::find()
            .order_by_desc($entity::Column::CreatedAt)
            .all(&$self.db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(MasterRecord::from)
            .collect())
    }};
    ($self:ident, $entity:ident, find, $id:ident) => {{
        Ok($entity::Entity::find_by_id($id)
            .one(&$self.db)
            .await
            .map_err(AppError::from)?
            .map(MasterRecord::from))
    }};
    ($self:ident, $entity:ident, insert, $active:expr) => {{
        Ok(MasterRecord::from(
            $active.insert(&$self.db).await.map_err(AppError::from)?,
        ))
    }};
    ($self:ident, $entity:ident, delete, $id:ident) => {{
        let result = $entity::Entity::delete_by_id($id)
            .exec(&$self.db)
            .await
            .map_err(AppError::from)?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }};
}

#[async_trait]
impl MasterDataRepository for MasterDataStore {
    async fn list(&self, kind: MasterDataKind) -> AppResult<Vec<MasterRecord>> {
        match kind {
            MasterDataKind::Customers => master_crud!(self, customer, list),
            MasterDataKind::Suppliers => master_crud!(self, supplier, list),
            MasterDataKind::Software => master_crud!(self, software, list),
            MasterDataKind::Status => master_crud!(self, status, list),
            MasterDataKind::ContractTypes => master_crud!(self, contract_type, list),
            MasterDataKind::Units => master_crud!(self, unit, list),
            MasterDataKind::Personnel => master_crud!(self, personnel, list),
        }
    }

    async fn find_by_id(&self, kind: MasterDataKind, id: Uuid) -> AppResult<Option<MasterRecord>> {
        match kind {
            MasterDataKind::Customers => master_crud!(self, customer, find, id),
            MasterDataKind::Suppliers => master_crud!(self, supplier, find, id),
            MasterDataKind::Software => master_crud!(self, software, find, id),
            MasterDataKind::Status => master_crud!(self, status, find, id),
            MasterDataKind::ContractTypes => master_crud!(self, contract_type, find, id),
            MasterDataKind::Units => master_crud!(self, unit, find, id),
            MasterDataKind::Personnel => master_crud!(self, personnel, find, id),
        }
    }

    async fn create(
        &self,
        kind: MasterDataKind,
        payload: MasterPayload,
    ) -> AppResult<MasterRecord> {
        let now = Utc::now();
        let id = Uuid::new_v4();
        let code = Self::require(payload.code, "Code")?;
        let name = Self::require(payload.name, "Name")?;
        let status = payload.status.unwrap_or_default().to_string();

        match kind {
            MasterDataKind::Customers => {
                let active = customer::ActiveModel {
                    id: Set(id),
                    code: Set(code),
                    name: Set(name),
                    field: Set(payload.field),
                    contact_person: Set(payload.contact_person),
                    phone: Set(payload.phone),
                    email: Set(payload.email),
                    address: Set(payload.address),
                    tax_code: Set(payload.tax_code),
                    group: Set(payload.group),
                    status: Set(status),
                    created_at: Set(now),
                    updated_at: Set(now),
                };
                master_crud!(self, customer, insert, active)
            }
            MasterDataKind::Suppliers => {
                let active = supplier::ActiveModel {
                    id: Set(id),
                    code: Set(code),
                    name: Set(name),
                    field: Set(payload.field),
                    tax_code: Set(payload.tax_code),
                    contact_person: Set(payload.contact_person),
                    phone: Set(payload.phone),
                    email: Set(payload.email),
                    address: Set(payload.address),
                    status: Set(status),
                    created_at: Set(now),
                    updated_at: Set(now),
                };
                master_crud!(self, supplier, insert, active)
            }
            MasterDataKind::Software => {
                let active = software::ActiveModel {
                    id: Set(id),
                    code: Set(code),
                    name: Set(name),
                    description: Set(payload.description),
                    created_at: Set(now),
                    updated_at: Set(now),
                };
                master_crud!(self, software, insert, active)
            }
            MasterDataKind::Status => {
                let active = status::ActiveModel {
                    id: Set(id),
                    code: Set(code),
                    name: Set(name),
                    description: Set(payload.description),
                    color: Set(payload.color),
                    created_at: Set(now),
                    updated_at: Set(now),
                };
                master_crud!(self, status, insert, active)
            }
            MasterDataKind::ContractTypes => {
                let active = contract_type::ActiveModel {
                    id: Set(id),
                    code: Set(code),
                    name: Set(name),
                    description: Set(payload.description),
                    created_at: Set(now),
                    updated_at: Set(now),
                };
                master_crud!(self, contract_type, insert, active)
            }
            MasterDataKind::Units => {
                let active = unit::ActiveModel {
                    id: Set(id),
                    code: Set(code),
                    name: Set(name),
                    description: Set(payload.description),
                    created_at: Set(now),
                    updated_at: Set(now),
                };
                master_crud!(self, unit, insert, active)
            }
            MasterDataKind::Personnel => {
                let active = personnel::ActiveModel {
                    id: Set(id),
                    code: Set(code),
                    name: Set(name),
                    description: Set(payload.description),
                    group: Set(payload.group),
                    email: Set(payload.email),
                    phone: Set(payload.phone),
                    status: Set(status),
                    created_at: Set(now),
                    updated_at: Set(now),
                };
                master_crud!(self, personnel, insert, active)
            }
        }
    }

    async fn update(
        &self,
        kind: MasterDataKind,
        id: Uuid,
        payload: MasterPayload,
    ) -> AppResult<MasterRecord> {
        let now = Utc::now();

        macro_rules! apply_common {
            ($active:ident, $payload:ident) => {
                if let Some(code) = $payload.code {
                    $active.code = Set(code);
                }
                if let Some(name) = $payload.name {
                    $active.name = Set(name);
                }
                $active.updated_at = Set(now);
            };
        }

        macro_rules! apply_opt {
            ($active:ident, $payload:ident, $($field:ident),+) => {
                $(
                    if $payload.$field.is_some() {
                        $active.$field = Set($payload.$field);
                    }
                )+
            };
        }

        macro_rules! apply_status {
            ($active:ident, $payload:ident) => {
                if let Some(status) = $payload.status {
                    $active.status = Set(status.to_string());
                }
            };
        }

        match kind {
            MasterDataKind::Customers => {
                let model = customer::Entity::find_by_id(id)
                    .one(&self.db)
                    .await
                    .map_err(AppError::from)?
                    .ok_or(AppError::NotFound)?;
                let mut active: customer::ActiveModel = model.into();
                apply_common!(active, payload);
                apply_opt!(
                    active, payload, field, contact_person, phone, email, address, tax_code, group
                );
                apply_status!(active, payload);
                Ok(MasterRecord::from(
                    active.update(&self.db).await.map_err(AppError::from)?,
                ))
            }
            MasterDataKind::Suppliers => {
                let model = supplier::Entity::find_by_id(id)
                    .one(&self.db)
                    .await
                    .map_err(AppError::from)?
                    .ok_or(AppError::NotFound)?;
                let mut active: supplier::ActiveModel = model.into();
                apply_common!(active, payload);
                apply_opt!(
                    active, payload, field, tax_code, contact_person, phone, email, address
                );
                apply_status!(active, payload);
                Ok(MasterRecord::from(
                    active.update(&self.db).await.map_err(AppError::from)?,
                ))
            }
            MasterDataKind::Software => {
                let model = software::Entity::find_by_id(id)
                    .one(&self.db)
                    .await
                    .map_err(AppError::from)?
                    .ok_or(AppError::NotFound)?;
                let mut active: software::ActiveModel = model.into();
                apply_common!(active, payload);
                apply_opt!(active, payload, description);
                Ok(MasterRecord::from(
                    active.update(&self.db).await.map_err(AppError::from)?,
                ))
            }
            MasterDataKind::Status => {
                let model = status::Entity::find_by_id(id)
                    .one(&self.db)
                    .await
                    .map_err(AppError::from)?
                    .ok_or(AppError::NotFound)?;
                let mut active: status::ActiveModel = model.into();
                apply_common!(active, payload);
                apply_opt!(active, payload, description, color);
                Ok(MasterRecord::from(
                    active.update(&self.db).await.map_err(AppError::from)?,
                ))
            }
            MasterDataKind::ContractTypes => {
                let model = contract_type::Entity::find_by_id(id)
                    .one(&self.db)
                    .await
                    .map_err(AppError::from)?
                    .ok_or(AppError::NotFound)?;
                let mut active: contract_type::ActiveModel = model.into();
                apply_common!(active, payload);
                apply_opt!(active, payload, description);
                Ok(MasterRecord::from(
                    active.update(&self.db).await.map_err(AppError::from)?,
                ))
            }
            MasterDataKind::Units => {
                let model = unit::Entity::find_by_id(id)
                    .one(&self.db)
                    .await
                    .map_err(AppError::from)?
                    .ok_or(AppError::NotFound)?;
                let mut active: unit::ActiveModel = model.into();
                apply_common!(active, payload);
                apply_opt!(active, payload, description);
                Ok(MasterRecord::from(
                    active.update(&self.db).await.map_err(AppError::from)?,
                ))
            }
            MasterDataKind::Personnel => {
                let model = personnel::Entity::find_by_id(id)
                    .one(&self.db)
                    .await
                    .map_err(AppError::from)?
                    .ok_or(AppError::NotFound)?;
                let mut active: personnel::ActiveModel = model.into();
                apply_common!(active, payload);
                apply_opt!(active, payload, description, group, email, phone);
                apply_status!(active, payload);
                Ok(MasterRecord::from(
                    active.update(&self.db).await.map_err(AppError::from)?,
                ))
            }
        }
    }

    async fn delete(&self, kind: MasterDataKind, id: Uuid) -> AppResult<()> {
        match kind {
            MasterDataKind::Customers => master_crud!(self, customer, delete, id),
            MasterDataKind::Suppliers => master_crud!(self, supplier, delete, id),
            MasterDataKind::Software => master_crud!(self, software, delete, id),
            MasterDataKind::Status => master_crud!(self, status, delete, id),
            MasterDataKind::ContractTypes => master_crud!(self, contract_type, delete, id),
            MasterDataKind::Units => master_crud!(self, unit, delete, id),
            MasterDataKind::Personnel => master_crud!(self, personnel, delete, id),
        }
    }
}
