//! Migration: Create payments table.

use sea_orm_migration::prelude::*;

use super::m20250101_000005_create_leases_table::Leases;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Payments::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Payments::LeaseId).uuid().not_null())
                    .col(ColumnDef::new(Payments::Amount).decimal_len(10, 2).not_null())
                    .col(ColumnDef::new(Payments::PaymentMethod).string_len(20).not_null())
                    .col(ColumnDef::new(Payments::PaymentDate).date().not_null())
                    .col(ColumnDef::new(Payments::DueDate).date().not_null())
                    .col(ColumnDef::new(Payments::ReferenceNumber).string_len(100).null())
                    .col(
                        ColumnDef::new(Payments::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Payments::Notes).text().null())
                    .col(
                        ColumnDef::new(Payments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Payments::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payments_lease")
                            .from(Payments::Table, Payments::LeaseId)
                            .to(Leases::Table, Leases::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payments_lease_id")
                    .table(Payments::Table)
                    .col(Payments::LeaseId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Payments {
    Table,
    Id,
    LeaseId,
    Amount,
    PaymentMethod,
    PaymentDate,
    DueDate,
    ReferenceNumber,
    Status,
    Notes,
    CreatedAt,
    UpdatedAt,
}
