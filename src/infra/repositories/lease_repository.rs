//! Lease read side.
//!
//! Listings join each lease to its unit, tenant and property in one query.
//! Writes happen only inside the lease lifecycle transactions, see
//! `TxLeaseRepository`.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Select, Set,
};
use uuid::Uuid;

use super::entities::lease::{self, ActiveModel, Entity as LeaseEntity};
use super::entities::{parse_column, property, tenant, unit};
use crate::domain::{
    money, Lease, LeaseFilters, LeaseProperty, LeaseStatus, LeaseSummary, LeaseTenant,
};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait LeaseRepository: Send + Sync {
    /// Owner's leases matching the filters, newest first
    async fn list(&self, owner_id: Uuid, filters: LeaseFilters) -> AppResult<Vec<LeaseSummary>>;

    /// Active leases ending within `[from, until]`, soonest first
    async fn list_expiring(
        &self,
        owner_id: Uuid,
        from: NaiveDate,
        until: NaiveDate,
    ) -> AppResult<Vec<LeaseSummary>>;

    async fn find_summary(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<LeaseSummary>>;

    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Lease>>;
}

/// Leases joined through unit and property to the owner
pub(crate) fn leases_of_owner(owner_id: Uuid) -> Select<LeaseEntity> {
    LeaseEntity::find()
        .join(JoinType::InnerJoin, lease::Relation::Unit.def())
        .join(JoinType::InnerJoin, unit::Relation::Property.def())
        .filter(property::Column::OwnerId.eq(owner_id))
}

pub(crate) fn owned_lease(id: Uuid, owner_id: Uuid) -> Select<LeaseEntity> {
    leases_of_owner(owner_id).filter(lease::Column::Id.eq(id))
}

/// Column set written on every lease update
pub(crate) fn lease_update_model(lease: &Lease) -> ActiveModel {
    ActiveModel {
        id: Set(lease.id),
        start_date: Set(lease.start_date),
        end_date: Set(lease.end_date),
        monthly_rent: Set(lease.monthly_rent),
        deposit_paid: Set(lease.deposit_paid),
        advance_paid: Set(lease.advance_paid),
        due_date: Set(lease.due_date as i32),
        status: Set(lease.status.as_str().to_string()),
        updated_at: Set(Utc::now()),
        ..Default::default()
    }
}

/// Flat row produced by the summary join
#[derive(Debug, FromQueryResult)]
struct LeaseSummaryRow {
    id: Uuid,
    unit_id: Uuid,
    tenant_id: Uuid,
    start_date: NaiveDate,
    end_date: NaiveDate,
    monthly_rent: Decimal,
    deposit_paid: Decimal,
    advance_paid: Decimal,
    due_date: i32,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    unit_number: String,
    tenant_first_name: String,
    tenant_last_name: String,
    tenant_email: String,
    tenant_phone: String,
    property_id: Uuid,
    property_name: String,
    property_address: String,
}

impl TryFrom<LeaseSummaryRow> for LeaseSummary {
    type Error = AppError;

    fn try_from(row: LeaseSummaryRow) -> Result<Self, Self::Error> {
        let lease = Lease {
            id: row.id,
            unit_id: row.unit_id,
            tenant_id: row.tenant_id,
            start_date: row.start_date,
            end_date: row.end_date,
            monthly_rent: money::normalize(row.monthly_rent),
            deposit_paid: money::normalize(row.deposit_paid),
            advance_paid: money::normalize(row.advance_paid),
            due_date: u32::try_from(row.due_date)
                .map_err(|_| AppError::internal("Negative lease due date in storage"))?,
            status: parse_column(&row.status, "lease status")?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        };

        Ok(LeaseSummary {
            tenant: LeaseTenant {
                id: lease.tenant_id,
                first_name: row.tenant_first_name,
                last_name: row.tenant_last_name,
                email: row.tenant_email,
                phone: row.tenant_phone,
            },
            property: LeaseProperty {
                id: row.property_id,
                name: row.property_name,
                address: row.property_address,
            },
            unit_number: row.unit_number,
            lease,
        })
    }
}

fn summaries(owner_id: Uuid) -> Select<LeaseEntity> {
    leases_of_owner(owner_id)
        .join(JoinType::InnerJoin, lease::Relation::Tenant.def())
        .select_only()
        .columns([
            lease::Column::Id,
            lease::Column::UnitId,
            lease::Column::TenantId,
            lease::Column::StartDate,
            lease::Column::EndDate,
            lease::Column::MonthlyRent,
            lease::Column::DepositPaid,
            lease::Column::AdvancePaid,
            lease::Column::DueDate,
            lease::Column::Status,
            lease::Column::CreatedAt,
            lease::Column::UpdatedAt,
        ])
        .column_as(unit::Column::UnitNumber, "unit_number")
        .column_as(tenant::Column::FirstName, "tenant_first_name")
        .column_as(tenant::Column::LastName, "tenant_last_name")
        .column_as(tenant::Column::Email, "tenant_email")
        .column_as(tenant::Column::Phone, "tenant_phone")
        .column_as(property::Column::Id, "property_id")
        .column_as(property::Column::Name, "property_name")
        .column_as(property::Column::Address, "property_address")
}

async fn load_summaries(
    db: &DatabaseConnection,
    query: Select<LeaseEntity>,
) -> AppResult<Vec<LeaseSummary>> {
    query
        .into_model::<LeaseSummaryRow>()
        .all(db)
        .await
        .map_err(AppError::from)?
        .into_iter()
        .map(LeaseSummary::try_from)
        .collect()
}

pub struct LeaseStore {
    db: DatabaseConnection,
}

impl LeaseStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LeaseRepository for LeaseStore {
    async fn list(&self, owner_id: Uuid, filters: LeaseFilters) -> AppResult<Vec<LeaseSummary>> {
        let mut query = summaries(owner_id);

        if let Some(property_id) = filters.property_id {
            query = query.filter(unit::Column::PropertyId.eq(property_id));
        }
        if let Some(unit_id) = filters.unit_id {
            query = query.filter(lease::Column::UnitId.eq(unit_id));
        }
        if let Some(tenant_id) = filters.tenant_id {
            query = query.filter(lease::Column::TenantId.eq(tenant_id));
        }
        if let Some(status) = filters.status {
            query = query.filter(lease::Column::Status.eq(status.as_str()));
        }

        load_summaries(&self.db, query.order_by_desc(lease::Column::CreatedAt)).await
    }

    async fn list_expiring(
        &self,
        owner_id: Uuid,
        from: NaiveDate,
        until: NaiveDate,
    ) -> AppResult<Vec<LeaseSummary>> {
        let query = summaries(owner_id)
            .filter(lease::Column::Status.eq(LeaseStatus::Active.as_str()))
            .filter(lease::Column::EndDate.between(from, until))
            .order_by_asc(lease::Column::EndDate);

        load_summaries(&self.db, query).await
    }

    async fn find_summary(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<LeaseSummary>> {
        let query = summaries(owner_id).filter(lease::Column::Id.eq(id));
        Ok(load_summaries(&self.db, query).await?.into_iter().next())
    }

    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Lease>> {
        owned_lease(id, owner_id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .map(Lease::try_from)
            .transpose()
    }
}
