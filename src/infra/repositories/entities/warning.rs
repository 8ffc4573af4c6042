//! Warning entity.

use sea_orm::entity::prelude::*;

use crate::domain::{Warning, WarningKind, WarningStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "warnings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub kind: String,
    pub contract_id: Uuid,
    pub contract_code: String,
    pub customer_name: String,
    pub due_date: Date,
    pub days_diff: i32,
    pub amount: Option<i64>,
    pub pic: Option<String>,
    pub status: String,
    pub note: Option<String>,
    pub details: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Warning {
    fn from(model: Model) -> Self {
        Warning {
            id: model.id,
            kind: WarningKind::from(model.kind.as_str()),
            contract_id: model.contract_id,
            contract_code: model.contract_code,
            customer_name: model.customer_name,
            due_date: model.due_date,
            days_diff: model.days_diff,
            amount: model.amount,
            pic: model.pic,
            status: WarningStatus::from(model.status.as_str()),
            note: model.note,
            details: model.details,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
