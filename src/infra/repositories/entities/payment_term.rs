//! Payment installment entity, owned by a contract.

use sea_orm::entity::prelude::*;

use crate::domain::{InvoiceStatus, PaymentTerm};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payment_terms")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub contract_id: Uuid,
    pub batch: String,
    pub content: Option<String>,
    pub ratio: f64,
    pub value: i64,
    pub is_collected: bool,
    pub collection_date: Option<Date>,
    pub invoice_status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for PaymentTerm {
    fn from(model: Model) -> Self {
        PaymentTerm {
            id: model.id,
            contract_id: model.contract_id,
            batch: model.batch,
            content: model.content,
            ratio: model.ratio,
            value: model.value,
            is_collected: model.is_collected,
            collection_date: model.collection_date,
            invoice_status: InvoiceStatus::from(model.invoice_status.as_str()),
        }
    }
}
