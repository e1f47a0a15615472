//! Migration: Create tenants table.

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
                    .table(Tenants::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tenants::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Tenants::PropertyId).uuid().not_null())
                    .col(ColumnDef::new(Tenants::FirstName).string_len(100).not_null())
                    .col(ColumnDef::new(Tenants::LastName).string_len(100).not_null())
                    .col(ColumnDef::new(Tenants::Email).string_len(255).not_null())
                    .col(ColumnDef::new(Tenants::Phone).string_len(50).not_null())
                    .col(ColumnDef::new(Tenants::EmergencyContact).json_binary().null())
                    .col(
                        ColumnDef::new(Tenants::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Tenants::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tenants_property")
                            .from(Tenants::Table, Tenants::PropertyId)
                            .to(Properties::Table, Properties::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tenants_property_id")
                    .table(Tenants::Table)
                    .col(Tenants::PropertyId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tenants_email")
                    .table(Tenants::Table)
                    .col(Tenants::Email)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tenants::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Tenants {
    Table,
    Id,
    PropertyId,
    FirstName,
    LastName,
    Email,
    Phone,
    EmergencyContact,
    CreatedAt,
    UpdatedAt,
}
