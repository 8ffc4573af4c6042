//! Software catalog entity, associated many-to-many with contracts.

use sea_orm::entity::prelude::*;

use crate::domain::{MasterRecord, SoftwareRef};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "software")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub description: Option<String>,
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
            description: model.description,
            field: None,
            contact_person: None,
            phone: None,
            email: None,
            address: None,
            tax_code: None,
            group: None,
            color: None,
            status: None,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<Model> for SoftwareRef {
    fn from(model: Model) -> Self {
        SoftwareRef {
            id: model.id,
            code: model.code,
            name: model.name,
        }
    }
}
