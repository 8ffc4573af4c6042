//! Supplier reference entity.

use sea_orm::entity::prelude::*;

use crate::domain::{ActiveStatus, MasterRecord, SupplierRef};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "suppliers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub field: Option<String>,
    pub tax_code: Option<String>,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for MasterRecord {
    fn from(model: Model) -> Self {
        MasterRecord {
            id: model.id,
            code: model.code,
            name: model.name,
            description: None,
            field: model.field,
            contact_person: model.contact_person,
            phone: model.phone,
            email: model.email,
            address: model.address,
            tax_code: model.tax_code,
            group: None,
            color: None,
            status: Some(ActiveStatus::from(model.status.as_str())),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<Model> for SupplierRef {
    fn from(model: Model) -> Self {
        SupplierRef {
            id: model.id,
            code: model.code,
            name: model.name,
        }
    }
}
