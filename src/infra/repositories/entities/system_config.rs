//! System configuration entity.

use sea_orm::entity::prelude::*;

use crate::domain::{ConfigValueType, SystemConfig};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "system_configs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub key: String,
    pub value: Option<String>,
    pub value_type: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub is_editable: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SystemConfig {
    fn from(model: Model) -> Self {
        SystemConfig {
            id: model.id,
            key: model.key,
            value: model.value,
            value_type: ConfigValueType::from(model.value_type.as_str()),
            category: model.category,
            description: model.description,
            is_editable: model.is_editable,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
