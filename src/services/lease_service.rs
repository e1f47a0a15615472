//! Lease service - the lease lifecycle.
//!
//! Every write that changes a lease also settles the unit's availability
//! in the same transaction. Create and update run SERIALIZABLE so the
//! overlap check still holds when the transaction commits.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::MAX_EXPIRING_LEASE_WINDOW_DAYS;
use crate::domain::lease::check_termination_date;
use crate::domain::{
    CreateLease, DateRange, ExpiringLease, Lease, LeaseAnalytics, LeaseChanges, LeaseDetails,
    LeaseFilters, LeaseStatus, LeaseSummary, NewLease, UpdateLease,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{TransactionContext, UnitOfWork};

#[async_trait]
pub trait LeaseService: Send + Sync {
    /// Create a lease on an owned unit for an owned tenant
    async fn create_lease(&self, owner_id: Uuid, input: CreateLease) -> AppResult<Lease>;

    /// Apply a partial update, re-checking overlap and availability
    async fn update_lease(&self, owner_id: Uuid, id: Uuid, input: UpdateLease)
        -> AppResult<Lease>;

    /// End a lease on `termination_date` (today when absent) and free its unit
    async fn terminate_lease(
        &self,
        owner_id: Uuid,
        id: Uuid,
        termination_date: Option<NaiveDate>,
    ) -> AppResult<Lease>;

    async fn get_lease_analytics(&self, owner_id: Uuid) -> AppResult<LeaseAnalytics>;

    async fn list_leases(&self, owner_id: Uuid, filters: LeaseFilters)
        -> AppResult<Vec<LeaseSummary>>;

    async fn list_active_leases(&self, owner_id: Uuid) -> AppResult<Vec<LeaseSummary>>;

    /// Active leases ending within the next `days` days
    async fn list_expiring_leases(&self, owner_id: Uuid, days: i64)
        -> AppResult<Vec<ExpiringLease>>;

    async fn get_lease(&self, owner_id: Uuid, id: Uuid) -> AppResult<LeaseDetails>;
}

pub struct LeaseManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> LeaseManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

async fn ensure_no_overlap(
    ctx: &TransactionContext<'_>,
    unit_id: Uuid,
    period: DateRange,
    exclude: Option<Uuid>,
) -> AppResult<()> {
    let overlapping = ctx
        .leases()
        .find_active_overlapping(unit_id, period, exclude)
        .await?;

    if let Some(existing) = overlapping.first() {
        tracing::info!(
            unit_id = %unit_id,
            existing_lease_id = %existing.id,
            "Rejected overlapping active lease"
        );
        return Err(AppError::overlapping_lease());
    }
    Ok(())
}

async fn create_in_tx(
    ctx: TransactionContext<'_>,
    owner_id: Uuid,
    new_lease: NewLease,
) -> AppResult<Lease> {
    let unit = ctx
        .units()
        .find_owned(new_lease.unit_id, owner_id)
        .await?
        .ok_or_not_owned("Unit")?;
    ctx.tenants()
        .find_owned(new_lease.tenant_id, owner_id)
        .await?
        .ok_or_not_owned("Tenant")?;

    // Any new lease, whatever its status, is rejected over an active one.
    ensure_no_overlap(&ctx, unit.id, new_lease.period, None).await?;

    let lease = ctx.leases().insert(new_lease).await?;
    if lease.is_active() {
        ctx.units().set_availability(unit.id, false).await?;
    }
    Ok(lease)
}

async fn update_in_tx(
    ctx: TransactionContext<'_>,
    owner_id: Uuid,
    id: Uuid,
    changes: LeaseChanges,
) -> AppResult<Lease> {
    let before = ctx
        .leases()
        .find_owned(id, owner_id)
        .await?
        .ok_or_not_owned("Lease")?;
    let after = changes.apply_to(&before)?;

    if changes.needs_overlap_check(&before, &after) {
        ensure_no_overlap(&ctx, after.unit_id, after.period(), Some(after.id)).await?;
    }

    let updated = ctx.leases().update(&after).await?;
    if let Some(available) = changes.availability_after(before.status) {
        ctx.units().set_availability(updated.unit_id, available).await?;
    }
    Ok(updated)
}

async fn terminate_in_tx(
    ctx: TransactionContext<'_>,
    owner_id: Uuid,
    id: Uuid,
    termination_date: NaiveDate,
) -> AppResult<Lease> {
    let lease = ctx
        .leases()
        .find_owned(id, owner_id)
        .await?
        .ok_or_not_owned("Lease")?;
    check_termination_date(&lease, termination_date)?;

    let terminated = ctx.leases().terminate(&lease, termination_date).await?;
    ctx.units().set_availability(terminated.unit_id, true).await?;
    Ok(terminated)
}

async fn analytics_in_tx(ctx: TransactionContext<'_>, owner_id: Uuid) -> AppResult<LeaseAnalytics> {
    let leases = ctx.leases().status_rents_for_owner(owner_id).await?;
    let units = ctx.units().availability_for_owner(owner_id).await?;
    Ok(LeaseAnalytics::from_snapshot(leases, units))
}

#[async_trait]
impl<U: UnitOfWork> LeaseService for LeaseManager<U> {
    #[tracing::instrument(skip(self, input), fields(owner_id = %owner_id))]
    async fn create_lease(&self, owner_id: Uuid, input: CreateLease) -> AppResult<Lease> {
        let new_lease = input.validate()?;

        let lease = self
            .uow
            .transaction_serializable(move |ctx| Box::pin(create_in_tx(ctx, owner_id, new_lease)))
            .await?;

        tracing::info!(
            lease_id = %lease.id,
            unit_id = %lease.unit_id,
            status = %lease.status,
            "Lease created"
        );
        Ok(lease)
    }

    #[tracing::instrument(skip(self, input), fields(owner_id = %owner_id, lease_id = %id))]
    async fn update_lease(
        &self,
        owner_id: Uuid,
        id: Uuid,
        input: UpdateLease,
    ) -> AppResult<Lease> {
        let changes = input.validate()?;

        let lease = self
            .uow
            .transaction_serializable(move |ctx| Box::pin(update_in_tx(ctx, owner_id, id, changes)))
            .await?;

        tracing::info!(
            lease_id = %lease.id,
            unit_id = %lease.unit_id,
            status = %lease.status,
            "Lease updated"
        );
        Ok(lease)
    }

    #[tracing::instrument(skip(self), fields(owner_id = %owner_id, lease_id = %id))]
    async fn terminate_lease(
        &self,
        owner_id: Uuid,
        id: Uuid,
        termination_date: Option<NaiveDate>,
    ) -> AppResult<Lease> {
        let termination_date = termination_date.unwrap_or_else(today);

        let lease = self
            .uow
            .transaction(move |ctx| Box::pin(terminate_in_tx(ctx, owner_id, id, termination_date)))
            .await?;

        tracing::info!(
            lease_id = %lease.id,
            unit_id = %lease.unit_id,
            end_date = %lease.end_date,
            "Lease terminated"
        );
        Ok(lease)
    }

    async fn get_lease_analytics(&self, owner_id: Uuid) -> AppResult<LeaseAnalytics> {
        self.uow
            .transaction_snapshot(move |ctx| Box::pin(analytics_in_tx(ctx, owner_id)))
            .await
    }

    async fn list_leases(
        &self,
        owner_id: Uuid,
        filters: LeaseFilters,
    ) -> AppResult<Vec<LeaseSummary>> {
        self.uow.leases().list(owner_id, filters).await
    }

    async fn list_active_leases(&self, owner_id: Uuid) -> AppResult<Vec<LeaseSummary>> {
        let filters = LeaseFilters {
            status: Some(LeaseStatus::Active),
            ..LeaseFilters::default()
        };
        self.uow.leases().list(owner_id, filters).await
    }

    async fn list_expiring_leases(
        &self,
        owner_id: Uuid,
        days: i64,
    ) -> AppResult<Vec<ExpiringLease>> {
        if !(1..=MAX_EXPIRING_LEASE_WINDOW_DAYS).contains(&days) {
            return Err(AppError::validation(format!(
                "Days must be between 1 and {}",
                MAX_EXPIRING_LEASE_WINDOW_DAYS
            )));
        }

        let today = today();
        let leases = self
            .uow
            .leases()
            .list_expiring(owner_id, today, today + Duration::days(days))
            .await?;

        Ok(leases
            .into_iter()
            .map(|summary| ExpiringLease::new(summary, today))
            .collect())
    }

    async fn get_lease(&self, owner_id: Uuid, id: Uuid) -> AppResult<LeaseDetails> {
        let summary = self
            .uow
            .leases()
            .find_summary(id, owner_id)
            .await?
            .ok_or_not_owned("Lease")?;

        Ok(LeaseDetails::new(summary, today()))
    }
}
