//! Project staffing entity, owned by a contract.

use sea_orm::entity::prelude::*;

use crate::domain::ProjectMember;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "project_members")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub contract_id: Uuid,
    pub member_code: Option<String>,
    pub name: String,
    pub role: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ProjectMember {
    fn from(model: Model) -> Self {
        ProjectMember {
            id: model.id,
            contract_id: model.contract_id,
            member_code: model.member_code,
            name: model.name,
            role: model.role,
        }
    }
}
