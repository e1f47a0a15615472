//! Migration: Create properties table.

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Properties::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Properties::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Properties::OwnerId).uuid().not_null())
                    .col(ColumnDef::new(Properties::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Properties::Address).text().not_null())
                    .col(ColumnDef::new(Properties::Description).text().null())
                    .col(
                        ColumnDef::new(Properties::TotalUnits)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Properties::Amenities).json_binary().null())
                    .col(ColumnDef::new(Properties::Images).json_binary().null())
                    .col(ColumnDef::new(Properties::Rules).text().null())
                    .col(
                        ColumnDef::new(Properties::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Properties::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_properties_owner")
                            .from(Properties::Table, Properties::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_properties_owner_id")
                    .table(Properties::Table)
                    .col(Properties::OwnerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Properties::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Properties {
    Table,
    Id,
    OwnerId,
    Name,
    Address,
    Description,
    TotalUnits,
    Amenities,
    Images,
    Rules,
    CreatedAt,
    UpdatedAt,
}
