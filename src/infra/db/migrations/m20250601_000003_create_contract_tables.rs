//! Migration: contract aggregate tables.
//!
//! Owned children cascade with their contract; reference-data links restrict
//! (customer) or null out (status, type, creator) on deletion of the target.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contracts::Table)
                    .col(ColumnDef::new(Contracts::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Contracts::Code)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Contracts::SignDate).date().not_null())
                    .col(ColumnDef::new(Contracts::Content).text().null())
                    .col(ColumnDef::new(Contracts::CustomerId).uuid().not_null())
                    .col(ColumnDef::new(Contracts::ContractTypeId).uuid().null())
                    .col(
                        ColumnDef::new(Contracts::ValuePreVat)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Contracts::Vat)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Contracts::ValuePostVat)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Contracts::Duration).string_len(100).null())
                    .col(ColumnDef::new(Contracts::StatusId).uuid().null())
                    .col(ColumnDef::new(Contracts::AcceptanceDate).date().null())
                    .col(ColumnDef::new(Contracts::CreatedBy).uuid().null())
                    .col(
                        ColumnDef::new(Contracts::Version)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Contracts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Contracts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contracts_customer_id")
                            .from(Contracts::Table, Contracts::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contracts_status_id")
                            .from(Contracts::Table, Contracts::StatusId)
                            .to(Statuses::Table, Statuses::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contracts_contract_type_id")
                            .from(Contracts::Table, Contracts::ContractTypeId)
                            .to(ContractTypes::Table, ContractTypes::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contracts_created_by")
                            .from(Contracts::Table, Contracts::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PaymentTerms::Table)
                    .col(
                        ColumnDef::new(PaymentTerms::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PaymentTerms::ContractId).uuid().not_null())
                    .col(ColumnDef::new(PaymentTerms::Batch).string_len(100).not_null())
                    .col(ColumnDef::new(PaymentTerms::Content).text().null())
                    .col(ColumnDef::new(PaymentTerms::Ratio).double().not_null())
                    .col(ColumnDef::new(PaymentTerms::Value).big_integer().not_null())
                    .col(
                        ColumnDef::new(PaymentTerms::IsCollected)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(PaymentTerms::CollectionDate).date().null())
                    .col(
                        ColumnDef::new(PaymentTerms::InvoiceStatus)
                            .string_len(20)
                            .not_null()
                            .default("not_exported"),
                    )
                    .col(
                        ColumnDef::new(PaymentTerms::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PaymentTerms::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_terms_contract_id")
                            .from(PaymentTerms::Table, PaymentTerms::ContractId)
                            .to(Contracts::Table, Contracts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payment_terms_contract_id")
                    .table(PaymentTerms::Table)
                    .col(PaymentTerms::ContractId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .col(ColumnDef::new(Expenses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Expenses::ContractId).uuid().not_null())
                    .col(ColumnDef::new(Expenses::SupplierId).uuid().null())
                    .col(ColumnDef::new(Expenses::Category).string_len(100).not_null())
                    .col(ColumnDef::new(Expenses::Description).text().null())
                    .col(ColumnDef::new(Expenses::TotalAmount).big_integer().not_null())
                    .col(
                        ColumnDef::new(Expenses::SupplierContractStatus)
                            .string_len(50)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Expenses::PaymentStatus)
                            .string_len(20)
                            .not_null()
                            .default("unpaid"),
                    )
                    .col(ColumnDef::new(Expenses::Pic).string_len(100).null())
                    .col(ColumnDef::new(Expenses::Note).text().null())
                    .col(
                        ColumnDef::new(Expenses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Expenses::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expenses_contract_id")
                            .from(Expenses::Table, Expenses::ContractId)
                            .to(Contracts::Table, Contracts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expenses_supplier_id")
                            .from(Expenses::Table, Expenses::SupplierId)
                            .to(Suppliers::Table, Suppliers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_expenses_contract_id")
                    .table(Expenses::Table)
                    .col(Expenses::ContractId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProjectMembers::Table)
                    .col(
                        ColumnDef::new(ProjectMembers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProjectMembers::ContractId).uuid().not_null())
                    .col(
                        ColumnDef::new(ProjectMembers::MemberCode)
                            .string_len(50)
                            .null(),
                    )
                    .col(ColumnDef::new(ProjectMembers::Name).string_len(100).not_null())
                    .col(ColumnDef::new(ProjectMembers::Role).string_len(100).null())
                    .col(
                        ColumnDef::new(ProjectMembers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectMembers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_members_contract_id")
                            .from(ProjectMembers::Table, ProjectMembers::ContractId)
                            .to(Contracts::Table, Contracts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_project_members_contract_id")
                    .table(ProjectMembers::Table)
                    .col(ProjectMembers::ContractId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ContractAttachments::Table)
                    .col(
                        ColumnDef::new(ContractAttachments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ContractAttachments::ContractId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ContractAttachments::Name).string().not_null())
                    .col(ColumnDef::new(ContractAttachments::Size).string_len(50).null())
                    .col(
                        ColumnDef::new(ContractAttachments::FileType)
                            .string_len(50)
                            .null(),
                    )
                    .col(ColumnDef::new(ContractAttachments::UploadDate).date().null())
                    .col(
                        ColumnDef::new(ContractAttachments::FilePath)
                            .string_len(500)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ContractAttachments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContractAttachments::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contract_attachments_contract_id")
                            .from(ContractAttachments::Table, ContractAttachments::ContractId)
                            .to(Contracts::Table, Contracts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ContractSoftware::Table)
                    .col(
                        ColumnDef::new(ContractSoftware::ContractId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContractSoftware::SoftwareId)
                            .uuid()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ContractSoftware::ContractId)
                            .col(ContractSoftware::SoftwareId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contract_software_contract_id")
                            .from(ContractSoftware::Table, ContractSoftware::ContractId)
                            .to(Contracts::Table, Contracts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contract_software_software_id")
                            .from(ContractSoftware::Table, ContractSoftware::SoftwareId)
                            .to(Software::Table, Software::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContractSoftware::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContractAttachments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProjectMembers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PaymentTerms::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Contracts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Contracts {
    Table,
    Id,
    Code,
    SignDate,
    Content,
    CustomerId,
    ContractTypeId,
    ValuePreVat,
    Vat,
    ValuePostVat,
    Duration,
    StatusId,
    AcceptanceDate,
    CreatedBy,
    Version,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum PaymentTerms {
    Table,
    Id,
    ContractId,
    Batch,
    Content,
    Ratio,
    Value,
    IsCollected,
    CollectionDate,
    InvoiceStatus,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Expenses {
    Table,
    Id,
    ContractId,
    SupplierId,
    Category,
    Description,
    TotalAmount,
    SupplierContractStatus,
    PaymentStatus,
    Pic,
    Note,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ProjectMembers {
    Table,
    Id,
    ContractId,
    MemberCode,
    Name,
    Role,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ContractAttachments {
    Table,
    Id,
    ContractId,
    Name,
    Size,
    FileType,
    UploadDate,
    FilePath,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ContractSoftware {
    Table,
    ContractId,
    SoftwareId,
}

#[derive(Iden)]
enum Customers {
    Table,
    Id,
}

#[derive(Iden)]
enum Statuses {
    Table,
    Id,
}

#[derive(Iden)]
enum ContractTypes {
    Table,
    Id,
}

#[derive(Iden)]
enum Suppliers {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Software {
    Table,
    Id,
}
