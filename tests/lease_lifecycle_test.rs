//! Lease lifecycle integration tests against an in-memory SQLite database.

mod common;

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

use common::{
    lease_input, seed_owner, seed_property, seed_tenant, seed_unit, shared_db, test_uow,
    unit_available,
};
use landra::domain::{LeaseFilters, LeaseStatus, UpdateLease};
use landra::errors::{AppError, OVERLAPPING_LEASE_MESSAGE};
use landra::infra::Persistence;
use landra::services::{LeaseManager, LeaseService};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

struct Fixture {
    uow: Arc<Persistence>,
    leases: LeaseManager<Persistence>,
    owner_id: Uuid,
    unit_id: Uuid,
    tenant_id: Uuid,
}

async fn fixture() -> Fixture {
    let uow = test_uow().await;
    let owner_id = seed_owner(&uow, "owner@example.ph").await;
    let property = seed_property(&uow, owner_id).await;
    let unit = seed_unit(&uow, property.id, "1A").await;
    let tenant = seed_tenant(&uow, property.id, "juan@example.ph").await;

    Fixture {
        leases: LeaseManager::new(uow.clone()),
        uow,
        owner_id,
        unit_id: unit.id,
        tenant_id: tenant.id,
    }
}

fn assert_overlap_conflict(err: AppError) {
    match err {
        AppError::Conflict(msg) => assert_eq!(msg, OVERLAPPING_LEASE_MESSAGE),
        other => panic!("expected overlap conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_terminate_recreate_scenario() {
    let f = fixture().await;
    assert!(unit_available(&f.uow, f.unit_id, f.owner_id).await);

    let l1 = f
        .leases
        .create_lease(
            f.owner_id,
            lease_input(f.unit_id, f.tenant_id, "2024-01-01", "2024-12-31", 15000, Some("active")),
        )
        .await
        .unwrap();
    assert_eq!(l1.status, LeaseStatus::Active);
    assert!(!unit_available(&f.uow, f.unit_id, f.owner_id).await);

    let june = || lease_input(f.unit_id, f.tenant_id, "2024-06-01", "2024-06-30", 15000, Some("active"));
    let err = f.leases.create_lease(f.owner_id, june()).await.unwrap_err();
    assert_overlap_conflict(err);

    let terminated = f
        .leases
        .terminate_lease(f.owner_id, l1.id, Some(date(2024, 7, 15)))
        .await
        .unwrap();
    assert_eq!(terminated.status, LeaseStatus::Terminated);
    assert_eq!(terminated.end_date, date(2024, 7, 15));
    assert!(unit_available(&f.uow, f.unit_id, f.owner_id).await);

    let l2 = f.leases.create_lease(f.owner_id, june()).await.unwrap();
    assert_eq!(l2.start_date, date(2024, 6, 1));
    assert!(!unit_available(&f.uow, f.unit_id, f.owner_id).await);
}

#[tokio::test]
async fn test_touching_end_date_counts_as_overlap() {
    let f = fixture().await;
    f.leases
        .create_lease(
            f.owner_id,
            lease_input(f.unit_id, f.tenant_id, "2024-01-01", "2024-12-31", 15000, None),
        )
        .await
        .unwrap();

    let err = f
        .leases
        .create_lease(
            f.owner_id,
            lease_input(f.unit_id, f.tenant_id, "2024-12-31", "2025-12-31", 15000, None),
        )
        .await
        .unwrap_err();
    assert_overlap_conflict(err);

    f.leases
        .create_lease(
            f.owner_id,
            lease_input(f.unit_id, f.tenant_id, "2025-01-01", "2025-12-31", 15000, None),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_non_active_lease_over_active_one_conflicts() {
    let f = fixture().await;
    f.leases
        .create_lease(
            f.owner_id,
            lease_input(f.unit_id, f.tenant_id, "2024-01-01", "2024-12-31", 15000, None),
        )
        .await
        .unwrap();

    for status in ["terminated", "expired"] {
        let err = f
            .leases
            .create_lease(
                f.owner_id,
                lease_input(f.unit_id, f.tenant_id, "2024-06-01", "2024-06-30", 12000, Some(status)),
            )
            .await
            .unwrap_err();
        assert_overlap_conflict(err);
    }

    assert!(!unit_available(&f.uow, f.unit_id, f.owner_id).await);
    assert_eq!(f.leases.list_active_leases(f.owner_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_concurrent_overlapping_creates_admit_one() {
    let db = shared_db(4).await;
    let owner_id = seed_owner(&db.uow, "owner@example.ph").await;
    let property = seed_property(&db.uow, owner_id).await;
    let unit = seed_unit(&db.uow, property.id, "1A").await;
    let juan = seed_tenant(&db.uow, property.id, "juan@example.ph").await;
    let maria = seed_tenant(&db.uow, property.id, "maria@example.ph").await;

    let first = LeaseManager::new(db.uow.clone());
    let second = LeaseManager::new(db.uow.clone());
    let (a, b) = tokio::join!(
        first.create_lease(
            owner_id,
            lease_input(unit.id, juan.id, "2024-01-01", "2024-12-31", 15000, None),
        ),
        second.create_lease(
            owner_id,
            lease_input(unit.id, maria.id, "2024-06-01", "2025-05-31", 15000, None),
        ),
    );

    let results = [a, b];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    for result in results {
        match result {
            Ok(_) => {}
            Err(AppError::Conflict(msg)) => assert_eq!(msg, OVERLAPPING_LEASE_MESSAGE),
            // Lost the write lock to the other transaction
            Err(AppError::Database(_)) => {}
            Err(other) => panic!("unexpected error {other:?}"),
        }
    }

    assert_eq!(first.list_active_leases(owner_id).await.unwrap().len(), 1);
    assert!(!unit_available(&db.uow, unit.id, owner_id).await);
}

#[tokio::test]
async fn test_non_active_lease_leaves_availability_alone() {
    let f = fixture().await;

    // Historical record, nothing active on the unit
    let expired = f
        .leases
        .create_lease(
            f.owner_id,
            lease_input(f.unit_id, f.tenant_id, "2023-01-01", "2023-12-31", 12000, Some("expired")),
        )
        .await
        .unwrap();
    assert_eq!(expired.status, LeaseStatus::Expired);
    assert!(unit_available(&f.uow, f.unit_id, f.owner_id).await);

    // A historical record never blocks a later active lease
    f.leases
        .create_lease(
            f.owner_id,
            lease_input(f.unit_id, f.tenant_id, "2023-06-01", "2024-05-31", 15000, None),
        )
        .await
        .unwrap();
    assert!(!unit_available(&f.uow, f.unit_id, f.owner_id).await);
}

#[tokio::test]
async fn test_foreign_unit_and_tenant_are_not_found() {
    let f = fixture().await;
    let intruder = seed_owner(&f.uow, "intruder@example.ph").await;

    let err = f
        .leases
        .create_lease(
            intruder,
            lease_input(f.unit_id, f.tenant_id, "2024-01-01", "2024-12-31", 15000, None),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFoundOrUnauthorized("Unit")));

    let other_property = seed_property(&f.uow, intruder).await;
    let other_unit = seed_unit(&f.uow, other_property.id, "9Z").await;
    let err = f
        .leases
        .create_lease(
            intruder,
            lease_input(other_unit.id, f.tenant_id, "2024-01-01", "2024-12-31", 15000, None),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFoundOrUnauthorized("Tenant")));
    assert!(unit_available(&f.uow, other_unit.id, intruder).await);
}

#[tokio::test]
async fn test_foreign_lease_is_invisible() {
    let f = fixture().await;
    let lease = f
        .leases
        .create_lease(
            f.owner_id,
            lease_input(f.unit_id, f.tenant_id, "2024-01-01", "2024-12-31", 15000, None),
        )
        .await
        .unwrap();
    let intruder = seed_owner(&f.uow, "intruder@example.ph").await;

    let err = f.leases.get_lease(intruder, lease.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFoundOrUnauthorized("Lease")));

    let err = f
        .leases
        .terminate_lease(intruder, lease.id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFoundOrUnauthorized("Lease")));
    assert!(!unit_available(&f.uow, f.unit_id, f.owner_id).await);

    assert!(f
        .leases
        .list_leases(intruder, LeaseFilters::default())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_status_update_moves_availability() {
    let f = fixture().await;
    let lease = f
        .leases
        .create_lease(
            f.owner_id,
            lease_input(f.unit_id, f.tenant_id, "2024-01-01", "2024-12-31", 15000, None),
        )
        .await
        .unwrap();

    let expired = f
        .leases
        .update_lease(
            f.owner_id,
            lease.id,
            UpdateLease {
                status: Some("expired".into()),
                ..UpdateLease::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(expired.status, LeaseStatus::Expired);
    assert!(unit_available(&f.uow, f.unit_id, f.owner_id).await);

    // Non-active to non-active leaves the flag alone
    common::set_availability(&f.uow, f.unit_id, false).await;
    f.leases
        .update_lease(
            f.owner_id,
            lease.id,
            UpdateLease {
                status: Some("terminated".into()),
                ..UpdateLease::default()
            },
        )
        .await
        .unwrap();
    assert!(!unit_available(&f.uow, f.unit_id, f.owner_id).await);
    common::set_availability(&f.uow, f.unit_id, true).await;

    let reactivated = f
        .leases
        .update_lease(
            f.owner_id,
            lease.id,
            UpdateLease {
                status: Some("active".into()),
                ..UpdateLease::default()
            },
        )
        .await
        .unwrap();
    assert!(reactivated.is_active());
    assert!(!unit_available(&f.uow, f.unit_id, f.owner_id).await);
}

#[tokio::test]
async fn test_update_rejects_overlap_and_rolls_back() {
    let f = fixture().await;
    let first = f
        .leases
        .create_lease(
            f.owner_id,
            lease_input(f.unit_id, f.tenant_id, "2024-01-01", "2024-06-30", 15000, None),
        )
        .await
        .unwrap();
    let second = f
        .leases
        .create_lease(
            f.owner_id,
            lease_input(f.unit_id, f.tenant_id, "2024-07-01", "2024-12-31", 15000, None),
        )
        .await
        .unwrap();

    let err = f
        .leases
        .update_lease(
            f.owner_id,
            first.id,
            UpdateLease {
                end_date: Some("2024-07-15".into()),
                monthly_rent: Some(16000.into()),
                ..UpdateLease::default()
            },
        )
        .await
        .unwrap_err();
    assert_overlap_conflict(err);

    let unchanged = f.leases.get_lease(f.owner_id, first.id).await.unwrap();
    assert_eq!(unchanged.summary.lease.end_date, date(2024, 6, 30));
    assert_eq!(unchanged.summary.lease.monthly_rent, first.monthly_rent);

    // Excluding itself, a lease may move within its own slot
    let moved = f
        .leases
        .update_lease(
            f.owner_id,
            second.id,
            UpdateLease {
                start_date: Some("2024-08-01".into()),
                ..UpdateLease::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(moved.start_date, date(2024, 8, 1));
}

#[tokio::test]
async fn test_update_rejects_inverted_range() {
    let f = fixture().await;
    let lease = f
        .leases
        .create_lease(
            f.owner_id,
            lease_input(f.unit_id, f.tenant_id, "2024-01-01", "2024-12-31", 15000, None),
        )
        .await
        .unwrap();

    let err = f
        .leases
        .update_lease(
            f.owner_id,
            lease.id,
            UpdateLease {
                end_date: Some("2023-06-30".into()),
                ..UpdateLease::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_terminate_before_start_is_rejected() {
    let f = fixture().await;
    let lease = f
        .leases
        .create_lease(
            f.owner_id,
            lease_input(f.unit_id, f.tenant_id, "2024-01-01", "2024-12-31", 15000, None),
        )
        .await
        .unwrap();

    let err = f
        .leases
        .terminate_lease(f.owner_id, lease.id, Some(date(2023, 12, 31)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let still_active = f.leases.get_lease(f.owner_id, lease.id).await.unwrap();
    assert!(still_active.summary.lease.is_active());
    assert!(!unit_available(&f.uow, f.unit_id, f.owner_id).await);
}

#[tokio::test]
async fn test_expiring_leases_window() {
    let f = fixture().await;
    let property = seed_property(&f.uow, f.owner_id).await;
    let far_unit = seed_unit(&f.uow, property.id, "2B").await;
    let today = Utc::now().date_naive();
    let fmt = |d: NaiveDate| d.format("%Y-%m-%d").to_string();

    let soon = f
        .leases
        .create_lease(
            f.owner_id,
            lease_input(
                f.unit_id,
                f.tenant_id,
                &fmt(today - Duration::days(300)),
                &fmt(today + Duration::days(10)),
                15000,
                None,
            ),
        )
        .await
        .unwrap();
    f.leases
        .create_lease(
            f.owner_id,
            lease_input(
                far_unit.id,
                f.tenant_id,
                &fmt(today - Duration::days(30)),
                &fmt(today + Duration::days(200)),
                15000,
                None,
            ),
        )
        .await
        .unwrap();

    let expiring = f.leases.list_expiring_leases(f.owner_id, 30).await.unwrap();
    assert_eq!(expiring.len(), 1);
    assert_eq!(expiring[0].summary.lease.id, soon.id);
    assert_eq!(expiring[0].days_until_expiry, 10);
    assert_eq!(expiring[0].summary.unit_number, "1A");

    assert_eq!(f.leases.list_expiring_leases(f.owner_id, 365).await.unwrap().len(), 2);

    for days in [0, 366] {
        let err = f
            .leases
            .list_expiring_leases(f.owner_id, days)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}

#[tokio::test]
async fn test_lease_details_and_filters() {
    let f = fixture().await;
    let lease = f
        .leases
        .create_lease(
            f.owner_id,
            lease_input(f.unit_id, f.tenant_id, "2024-01-01", "2099-12-31", 15000, None),
        )
        .await
        .unwrap();

    let details = f.leases.get_lease(f.owner_id, lease.id).await.unwrap();
    assert_eq!(details.summary.tenant.email, "juan@example.ph");
    assert_eq!(details.summary.property.name, "Sampaguita Apartments");
    assert!(details.next_due_date.is_some());

    let by_status = f
        .leases
        .list_leases(
            f.owner_id,
            LeaseFilters {
                status: Some(LeaseStatus::Terminated),
                ..LeaseFilters::default()
            },
        )
        .await
        .unwrap();
    assert!(by_status.is_empty());

    let by_unit = f
        .leases
        .list_leases(
            f.owner_id,
            LeaseFilters {
                unit_id: Some(f.unit_id),
                ..LeaseFilters::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(by_unit.len(), 1);
}
