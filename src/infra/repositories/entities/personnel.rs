//! Personnel reference entity.

use sea_orm::entity::prelude::*;

use crate::domain::{ActiveStatus, MasterRecord};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "personnel")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    /// Position or role label
    pub description: Option<String>,
    /// Department
    pub group: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
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
            description: model.description,
            field: None,
            contact_person: None,
            phone: model.phone,
            email: model.email,
            address: None,
            tax_code: None,
            group: model.group,
            color: None,
            status: Some(ActiveStatus::from(model.status.as_str())),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
