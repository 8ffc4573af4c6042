//! Migration: master-data reference tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Columns shared by every reference table.
fn base_table<T: Iden + Copy + 'static>(
    table: T,
    id: T,
    code: T,
    name: T,
    created_at: T,
    updated_at: T,
) -> TableCreateStatement {
    Table::create()
        .table(table)
        .col(ColumnDef::new(id).uuid().not_null().primary_key())
        .col(ColumnDef::new(code).string_len(50).not_null().unique_key())
        .col(ColumnDef::new(name).string().not_null())
        .col(
            ColumnDef::new(created_at)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .col(
            ColumnDef::new(updated_at)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                base_table(
                    Customers::Table,
                    Customers::Id,
                    Customers::Code,
                    Customers::Name,
                    Customers::CreatedAt,
                    Customers::UpdatedAt,
                )
                .col(ColumnDef::new(Customers::Field).string().null())
                .col(ColumnDef::new(Customers::ContactPerson).string().null())
                .col(ColumnDef::new(Customers::Phone).string_len(20).null())
                .col(ColumnDef::new(Customers::Email).string().null())
                .col(ColumnDef::new(Customers::Address).text().null())
                .col(ColumnDef::new(Customers::TaxCode).string_len(50).null())
                .col(ColumnDef::new(Customers::Group).string().null())
                .col(
                    ColumnDef::new(Customers::Status)
                        .string_len(20)
                        .not_null()
                        .default("active"),
                )
                .to_owned(),
            )
            .await?;

        manager
            .create_table(
                base_table(
                    Suppliers::Table,
                    Suppliers::Id,
                    Suppliers::Code,
                    Suppliers::Name,
                    Suppliers::CreatedAt,
                    Suppliers::UpdatedAt,
                )
                .col(ColumnDef::new(Suppliers::Field).string().null())
                .col(ColumnDef::new(Suppliers::TaxCode).string_len(50).null())
                .col(ColumnDef::new(Suppliers::ContactPerson).string().null())
                .col(ColumnDef::new(Suppliers::Phone).string_len(20).null())
                .col(ColumnDef::new(Suppliers::Email).string().null())
                .col(ColumnDef::new(Suppliers::Address).text().null())
                .col(
                    ColumnDef::new(Suppliers::Status)
                        .string_len(20)
                        .not_null()
                        .default("active"),
                )
                .to_owned(),
            )
            .await?;

        manager
            .create_table(
                base_table(
                    Software::Table,
                    Software::Id,
                    Software::Code,
                    Software::Name,
                    Software::CreatedAt,
                    Software::UpdatedAt,
                )
                .col(ColumnDef::new(Software::Description).text().null())
                .to_owned(),
            )
            .await?;

        manager
            .create_table(
                base_table(
                    Statuses::Table,
                    Statuses::Id,
                    Statuses::Code,
                    Statuses::Name,
                    Statuses::CreatedAt,
                    Statuses::UpdatedAt,
                )
                .col(ColumnDef::new(Statuses::Description).text().null())
                .col(ColumnDef::new(Statuses::Color).string().null())
                .to_owned(),
            )
            .await?;

        manager
            .create_table(
                base_table(
                    ContractTypes::Table,
                    ContractTypes::Id,
                    ContractTypes::Code,
                    ContractTypes::Name,
                    ContractTypes::CreatedAt,
                    ContractTypes::UpdatedAt,
                )
                .col(ColumnDef::new(ContractTypes::Description).text().null())
                .to_owned(),
            )
            .await?;

        manager
            .create_table(
                base_table(
                    Units::Table,
                    Units::Id,
                    Units::Code,
                    Units::Name,
                    Units::CreatedAt,
                    Units::UpdatedAt,
                )
                .col(ColumnDef::new(Units::Description).text().null())
                .to_owned(),
            )
            .await?;

        manager
            .create_table(
                base_table(
                    Personnel::Table,
                    Personnel::Id,
                    Personnel::Code,
                    Personnel::Name,
                    Personnel::CreatedAt,
                    Personnel::UpdatedAt,
                )
                .col(ColumnDef::new(Personnel::Description).string().null())
                .col(ColumnDef::new(Personnel::Group).string().null())
                .col(ColumnDef::new(Personnel::Email).string().null())
                .col(ColumnDef::new(Personnel::Phone).string_len(20).null())
                .col(
                    ColumnDef::new(Personnel::Status)
                        .string_len(20)
                        .not_null()
                        .default("active"),
                )
                .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Personnel::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Units::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContractTypes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Statuses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Software::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Suppliers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Customers::Table).to_owned())
            .await
    }
}

#[derive(Iden, Clone, Copy)]
enum Customers {
    Table,
    Id,
    Code,
    Name,
    Field,
    ContactPerson,
    Phone,
    Email,
    Address,
    TaxCode,
    Group,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone, Copy)]
enum Suppliers {
    Table,
    Id,
    Code,
    Name,
    Field,
    TaxCode,
    ContactPerson,
    Phone,
    Email,
    Address,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone, Copy)]
enum Software {
    Table,
    Id,
    Code,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone, Copy)]
enum Statuses {
    Table,
    Id,
    Code,
    Name,
    Description,
    Color,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone, Copy)]
enum ContractTypes {
    Table,
    Id,
    Code,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone, Copy)]
enum Units {
    Table,
    Id,
    Code,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone, Copy)]
enum Personnel {
    Table,
    Id,
    Code,
    Name,
    Description,
    Group,
    Email,
    Phone,
    Status,
    CreatedAt,
    UpdatedAt,
}
