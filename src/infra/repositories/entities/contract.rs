//! Contract aggregate-root entity.

use sea_orm::entity::prelude::*;

use crate::domain::Contract;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "contracts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub sign_date: Date,
    pub content: Option<String>,
    pub customer_id: Uuid,
    pub contract_type_id: Option<Uuid>,
    pub value_pre_vat: i64,
    pub vat: i64,
    pub value_post_vat: i64,
    pub duration: Option<String>,
    pub status_id: Option<Uuid>,
    pub acceptance_date: Option<Date>,
    pub created_by: Option<Uuid>,
    /// Incremented on every successful update
    pub version: i64,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Contract {
    fn from(model: Model) -> Self {
        Contract {
            id: model.id,
            code: model.code,
            sign_date: model.sign_date,
            content: model.content,
            customer_id: model.customer_id,
            contract_type_id: model.contract_type_id,
            value_pre_vat: model.value_pre_vat,
            vat: model.vat,
            value_post_vat: model.value_post_vat,
            duration: model.duration,
            status_id: model.status_id,
            acceptance_date: model.acceptance_date,
            created_by: model.created_by,
            version: model.version,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
