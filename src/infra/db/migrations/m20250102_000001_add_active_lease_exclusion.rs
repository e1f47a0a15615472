//! Migration: Forbid overlapping active leases on the same unit (PostgreSQL).
//!
//! Backs up the application-level overlap check. Other backends skip it.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, DbBackend};

use crate::config::ACTIVE_LEASE_OVERLAP_CONSTRAINT;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if manager.get_database_backend() != DbBackend::Postgres {
            return Ok(());
        }

        let db = manager.get_connection();
        db.execute_unprepared("CREATE EXTENSION IF NOT EXISTS btree_gist")
            .await?;
        db.execute_unprepared(&format!(
            "ALTER TABLE leases ADD CONSTRAINT {} EXCLUDE USING gist \
             (unit_id WITH =, daterange(start_date, end_date, '[]') WITH &&) \
             WHERE (status = 'active')",
            ACTIVE_LEASE_OVERLAP_CONSTRAINT
        ))
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if manager.get_database_backend() != DbBackend::Postgres {
            return Ok(());
        }

        manager
            .get_connection()
            .execute_unprepared(&format!(
                "ALTER TABLE leases DROP CONSTRAINT IF EXISTS {}",
                ACTIVE_LEASE_OVERLAP_CONSTRAINT
            ))
            .await?;

        Ok(())
    }
}
