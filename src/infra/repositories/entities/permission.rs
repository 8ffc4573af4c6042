//! Per-group permission entity.

use sea_orm::entity::prelude::*;

use crate::domain::Permission;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "permissions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub group_id: Uuid,
    pub code: String,
    pub name: String,
    pub is_parent: bool,
    pub parent_id: Option<Uuid>,
    pub can_view: bool,
    pub can_add: bool,
    pub can_edit: bool,
    pub can_delete: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Permission {
    fn from(model: Model) -> Self {
        Permission {
            id: model.id,
            group_id: model.group_id,
            code: model.code,
            name: model.name,
            is_parent: model.is_parent,
            parent_id: model.parent_id,
            can_view: model.can_view,
            can_add: model.can_add,
            can_edit: model.can_edit,
            can_delete: model.can_delete,
        }
    }
}
