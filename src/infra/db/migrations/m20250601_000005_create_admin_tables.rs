//! Migration: permissions, audit log, system configuration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Permissions::Table)
                    .col(
                        ColumnDef::new(Permissions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Permissions::GroupId).uuid().not_null())
                    .col(ColumnDef::new(Permissions::Code).string_len(50).not_null())
                    .col(ColumnDef::new(Permissions::Name).string().not_null())
                    .col(
                        ColumnDef::new(Permissions::IsParent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Permissions::ParentId).uuid().null())
                    .col(
                        ColumnDef::new(Permissions::CanView)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Permissions::CanAdd)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Permissions::CanEdit)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Permissions::CanDelete)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Permissions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Permissions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_permissions_group_id")
                            .from(Permissions::Table, Permissions::GroupId)
                            .to(UserGroups::Table, UserGroups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_permissions_group_id")
                    .table(Permissions::Table)
                    .col(Permissions::GroupId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AuditLogs::Table)
                    .col(ColumnDef::new(AuditLogs::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(AuditLogs::UserId).uuid().not_null())
                    .col(ColumnDef::new(AuditLogs::Screen).string().not_null())
                    .col(ColumnDef::new(AuditLogs::Action).string().not_null())
                    .col(ColumnDef::new(AuditLogs::Details).json_binary().null())
                    .col(ColumnDef::new(AuditLogs::IpAddress).string_len(50).null())
                    .col(ColumnDef::new(AuditLogs::UserAgent).text().null())
                    .col(
                        ColumnDef::new(AuditLogs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_audit_logs_user_id", AuditLogs::UserId),
            ("idx_audit_logs_screen", AuditLogs::Screen),
            ("idx_audit_logs_action", AuditLogs::Action),
            ("idx_audit_logs_created_at", AuditLogs::CreatedAt),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(AuditLogs::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .create_table(
                Table::create()
                    .table(SystemConfigs::Table)
                    .col(
                        ColumnDef::new(SystemConfigs::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SystemConfigs::Key)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(SystemConfigs::Value).text().null())
                    .col(
                        ColumnDef::new(SystemConfigs::ValueType)
                            .string_len(20)
                            .not_null()
                            .default("string"),
                    )
                    .col(ColumnDef::new(SystemConfigs::Category).string().null())
                    .col(ColumnDef::new(SystemConfigs::Description).text().null())
                    .col(
                        ColumnDef::new(SystemConfigs::IsEditable)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(SystemConfigs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SystemConfigs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SystemConfigs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AuditLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Permissions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Permissions {
    Table,
    Id,
    GroupId,
    Code,
    Name,
    IsParent,
    ParentId,
    CanView,
    CanAdd,
    CanEdit,
    CanDelete,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum AuditLogs {
    Table,
    Id,
    UserId,
    Screen,
    Action,
    Details,
    IpAddress,
    UserAgent,
    CreatedAt,
}

#[derive(Iden)]
enum SystemConfigs {
    Table,
    Id,
    Key,
    Value,
    ValueType,
    Category,
    Description,
    IsEditable,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum UserGroups {
    Table,
    Id,
}
