//! Migration: Create units table.

use sea_orm_migration::prelude::*;

use super::m20250101_000002_create_properties_table::Properties;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Units::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Units::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Units::PropertyId).uuid().not_null())
                    .col(ColumnDef::new(Units::UnitNumber).string_len(50).not_null())
                    .col(ColumnDef::new(Units::MonthlyRent).decimal_len(10, 2).not_null())
                    .col(
                        ColumnDef::new(Units::DepositRequired)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Units::AdvanceRequired)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Units::SizeSqm).decimal_len(8, 2).null())
                    .col(ColumnDef::new(Units::Bedrooms).integer().not_null().default(0))
                    .col(ColumnDef::new(Units::Bathrooms).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Units::IsAvailable)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Units::Images).json_binary().null())
                    .col(
                        ColumnDef::new(Units::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Units::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_units_property")
                            .from(Units::Table, Units::PropertyId)
                            .to(Properties::Table, Properties::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_units_property_id")
                    .table(Units::Table)
                    .col(Units::PropertyId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Units::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Units {
    Table,
    Id,
    PropertyId,
    UnitNumber,
    MonthlyRent,
    DepositRequired,
    AdvanceRequired,
    SizeSqm,
    Bedrooms,
    Bathrooms,
    IsAvailable,
    Images,
    CreatedAt,
    UpdatedAt,
}
