//! Migration: Create leases table.

use sea_orm_migration::prelude::*;

use super::m20250101_000003_create_units_table::Units;
use super::m20250101_000004_create_tenants_table::Tenants;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Leases::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Leases::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Leases::UnitId).uuid().not_null())
                    .col(ColumnDef::new(Leases::TenantId).uuid().not_null())
                    .col(ColumnDef::new(Leases::StartDate).date().not_null())
                    .col(ColumnDef::new(Leases::EndDate).date().not_null())
                    .col(ColumnDef::new(Leases::MonthlyRent).decimal_len(10, 2).not_null())
                    .col(ColumnDef::new(Leases::DepositPaid).decimal_len(10, 2).not_null())
                    .col(ColumnDef::new(Leases::AdvancePaid).decimal_len(10, 2).not_null())
                    .col(ColumnDef::new(Leases::DueDate).integer().not_null())
                    .col(
                        ColumnDef::new(Leases::Status)
                            .string_len(20)
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(Leases::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Leases::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_leases_unit")
                            .from(Leases::Table, Leases::UnitId)
                            .to(Units::Table, Units::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_leases_tenant")
                            .from(Leases::Table, Leases::TenantId)
                            .to(Tenants::Table, Tenants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Overlap checks scan a unit's leases by status
        manager
            .create_index(
                Index::create()
                    .name("idx_leases_unit_status")
                    .table(Leases::Table)
                    .col(Leases::UnitId)
                    .col(Leases::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_leases_tenant_id")
                    .table(Leases::Table)
                    .col(Leases::TenantId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Leases::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Leases {
    Table,
    Id,
    UnitId,
    TenantId,
    StartDate,
    EndDate,
    MonthlyRent,
    DepositPaid,
    AdvancePaid,
    DueDate,
    Status,
    CreatedAt,
    UpdatedAt,
}
