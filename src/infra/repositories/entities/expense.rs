//! Expense entity, owned by a contract with an optional supplier reference.

use sea_orm::entity::prelude::*;

use crate::domain::{Expense, PaymentStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub contract_id: Uuid,
    pub supplier_id: Option<Uuid>,
    pub category: String,
    pub description: Option<String>,
    pub total_amount: i64,
    pub supplier_contract_status: Option<String>,
    pub payment_status: String,
    pub pic: Option<String>,
    pub note: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Expense {
    fn from(model: Model) -> Self {
        Expense {
            id: model.id,
            contract_id: model.contract_id,
            supplier_id: model.supplier_id,
            category: model.category,
            description: model.description,
            total_amount: model.total_amount,
            supplier_contract_status: model.supplier_contract_status,
            payment_status: PaymentStatus::from(model.payment_status.as_str()),
            pic: model.pic,
            note: model.note,
        }
    }
}
