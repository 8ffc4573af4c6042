//! Attachment metadata entity, owned by a contract.

use sea_orm::entity::prelude::*;

use crate::domain::ContractAttachment;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "contract_attachments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub contract_id: Uuid,
    pub name: String,
    pub size: Option<String>,
    pub file_type: Option<String>,
    pub upload_date: Option<Date>,
    pub file_path: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ContractAttachment {
    fn from(model: Model) -> Self {
        ContractAttachment {
            id: model.id,
            contract_id: model.contract_id,
            name: model.name,
            size: model.size,
            file_type: model.file_type,
            upload_date: model.upload_date,
            file_path: model.file_path,
        }
    }
}
