//! Shared fixtures: SQLite databases with the schema applied.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{ConnectOptions, Database as SeaDatabase, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

use landra::config::Config;
use landra::domain::{
    CreateLease, CreateTenant, NewUser, Property, PropertyInput, Tenant, Unit, UnitFields,
};
use landra::errors::AppResult;
use landra::infra::{Migrator, Persistence, TransactionContext, UnitOfWork};

pub const TEST_SECRET: &str = "test-session-secret-with-at-least-32-chars";

/// One connection, so every query sees the same in-memory database.
pub async fn test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);

    let db = SeaDatabase::connect(options)
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("apply migrations");
    db
}

/// File-backed database so several pooled connections race on one schema.
pub struct SharedDb {
    pub uow: Arc<Persistence>,
    path: PathBuf,
}

impl Drop for SharedDb {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm", "-journal"] {
            let _ = std::fs::remove_file(format!("{}{}", self.path.display(), suffix));
        }
    }
}

pub async fn shared_db(connections: u32) -> SharedDb {
    let path = std::env::temp_dir().join(format!("landra-{}.db", Uuid::new_v4()));
    let mut options = ConnectOptions::new(format!("sqlite://{}?mode=rwc", path.display()));
    options.max_connections(connections).sqlx_logging(false);

    let db = SeaDatabase::connect(options)
        .await
        .expect("connect to file sqlite");
    Migrator::up(&db, None).await.expect("apply migrations");

    SharedDb {
        uow: Arc::new(Persistence::new(db)),
        path,
    }
}

pub fn test_config() -> Config {
    Config::for_database("sqlite::memory:", TEST_SECRET)
}

pub async fn test_uow() -> Arc<Persistence> {
    Arc::new(Persistence::new(test_db().await))
}

pub async fn seed_owner(uow: &Persistence, email: &str) -> Uuid {
    uow.users()
        .create(NewUser {
            email: email.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            name: "Test Owner".to_string(),
            phone: None,
        })
        .await
        .expect("seed owner")
        .id
}

pub async fn seed_property(uow: &Persistence, owner_id: Uuid) -> Property {
    uow.properties()
        .create(
            owner_id,
            PropertyInput {
                name: "Sampaguita Apartments".to_string(),
                address: "123 Rizal Ave, Quezon City".to_string(),
                description: None,
                total_units: 5,
                amenities: vec!["wifi".to_string()],
                images: vec![],
                rules: None,
            },
        )
        .await
        .expect("seed property")
}

pub async fn seed_unit(uow: &Persistence, property_id: Uuid, unit_number: &str) -> Unit {
    uow.units()
        .create(
            property_id,
            UnitFields {
                unit_number: unit_number.to_string(),
                monthly_rent: Decimal::new(1500000, 2),
                deposit_required: Decimal::new(1500000, 2),
                advance_required: Decimal::new(1500000, 2),
                size_sqm: None,
                bedrooms: 1,
                bathrooms: 1,
                images: vec![],
            },
        )
        .await
        .expect("seed unit")
}

pub async fn seed_tenant(uow: &Persistence, property_id: Uuid, email: &str) -> Tenant {
    uow.tenants()
        .create(CreateTenant {
            property_id,
            first_name: "Juan".to_string(),
            last_name: "dela Cruz".to_string(),
            email: email.to_string(),
            phone: "09175550101".to_string(),
            emergency_contact: None,
        })
        .await
        .expect("seed tenant")
}

/// Lease payload with a whole-peso rent.
pub fn lease_input(
    unit_id: Uuid,
    tenant_id: Uuid,
    start: &str,
    end: &str,
    rent: i64,
    status: Option<&str>,
) -> CreateLease {
    CreateLease {
        unit_id: unit_id.to_string(),
        tenant_id: tenant_id.to_string(),
        start_date: start.to_string(),
        end_date: end.to_string(),
        monthly_rent: rent.into(),
        deposit_paid: rent.into(),
        advance_paid: rent.into(),
        due_date: 5.into(),
        status: status.map(str::to_string),
    }
}

async fn set_availability_in_tx(
    ctx: TransactionContext<'_>,
    unit_id: Uuid,
    available: bool,
) -> AppResult<()> {
    ctx.units().set_availability(unit_id, available).await
}

/// Flip a unit's availability outside the lease lifecycle.
pub async fn set_availability(uow: &Persistence, unit_id: Uuid, available: bool) {
    uow.transaction(move |ctx| Box::pin(set_availability_in_tx(ctx, unit_id, available)))
        .await
        .expect("set availability");
}

pub async fn unit_available(uow: &Persistence, unit_id: Uuid, owner_id: Uuid) -> bool {
    uow.units()
        .find_owned(unit_id, owner_id)
        .await
        .expect("load unit")
        .expect("unit exists")
        .is_available
}
