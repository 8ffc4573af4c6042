//! Migration: warnings table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Warnings::Table)
                    .col(ColumnDef::new(Warnings::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Warnings::Kind).string_len(50).not_null())
                    .col(ColumnDef::new(Warnings::ContractId).uuid().not_null())
                    .col(
                        ColumnDef::new(Warnings::ContractCode)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Warnings::CustomerName).string().not_null())
                    .col(ColumnDef::new(Warnings::DueDate).date().not_null())
                    .col(ColumnDef::new(Warnings::DaysDiff).integer().not_null())
                    .col(ColumnDef::new(Warnings::Amount).big_integer().null())
                    .col(ColumnDef::new(Warnings::Pic).string_len(100).null())
                    .col(
                        ColumnDef::new(Warnings::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Warnings::Note).text().null())
                    .col(ColumnDef::new(Warnings::Details).string().null())
                    .col(
                        ColumnDef::new(Warnings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Warnings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_warnings_contract_id")
                            .from(Warnings::Table, Warnings::ContractId)
                            .to(Contracts::Table, Contracts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_warnings_due_date")
                    .table(Warnings::Table)
                    .col(Warnings::DueDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_warnings_due_date")
                    .table(Warnings::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Warnings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Warnings {
    Table,
    Id,
    Kind,
    ContractId,
    ContractCode,
    CustomerName,
    DueDate,
    DaysDiff,
    Amount,
    Pic,
    Status,
    Note,
    Details,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Contracts {
    Table,
    Id,
}
