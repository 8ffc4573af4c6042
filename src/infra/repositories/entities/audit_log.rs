//! Append-only audit log entity.

use sea_orm::entity::prelude::*;

use crate::domain::AuditLog;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "audit_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub screen: String,
    pub action: String,
    pub details: Option<Json>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for AuditLog {
    fn from(model: Model) -> Self {
        AuditLog {
            id: model.id,
            user_id: model.user_id,
            screen: model.screen,
            action: model.action,
            details: model.details,
            ip_address: model.ip_address,
            user_agent: model.user_agent,
            created_at: model.created_at,
        }
    }
}
