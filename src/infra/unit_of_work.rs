//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and owns the transaction lifecycle.
//! Lease writes always travel together with the unit availability write
//! they imply, so both go through one `TransactionContext`.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, IsolationLevel, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use uuid::Uuid;

use super::repositories::entities::{lease, unit};
use super::repositories::{
    lease_update_model, leases_of_owner, owned_lease, owned_tenant, owned_unit, units_of_owner,
    LeaseRepository, LeaseStore, PaymentRepository, PaymentStore, PropertyRepository,
    PropertyStore, TenantRepository, TenantStore, UnitRepository, UnitStore, UserRepository,
    UserStore,
};
use crate::domain::{DateRange, Lease, LeaseStatus, NewLease, Tenant, Unit};
use crate::errors::{AppError, AppResult};

/// Boxed transaction body borrowing the transaction for `'a`.
pub type TxFuture<'a, T> = Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'a>>;

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories and transaction management.
/// Note: This trait is not mockable directly due to generic methods.
/// For testing, wrap mocked repositories in a test implementation.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn properties(&self) -> Arc<dyn PropertyRepository>;

    fn units(&self) -> Arc<dyn UnitRepository>;

    fn tenants(&self) -> Arc<dyn TenantRepository>;

    fn leases(&self) -> Arc<dyn LeaseRepository>;

    fn payments(&self) -> Arc<dyn PaymentRepository>;

    /// Execute a closure within a READ COMMITTED transaction.
    ///
    /// The transaction is committed on success or rolled back on error.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;

    /// Execute a closure within a SERIALIZABLE transaction.
    ///
    /// Used wherever a check must hold at commit time, such as the
    /// active lease overlap check.
    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;

    /// Execute a closure within a REPEATABLE READ, READ ONLY transaction.
    ///
    /// Every read inside sees the same snapshot.
    async fn transaction_snapshot<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// All repository operations performed through this context are part
/// of the same database transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn leases(&self) -> TxLeaseRepository<'_> {
        TxLeaseRepository { txn: self.txn }
    }

    pub fn units(&self) -> TxUnitRepository<'_> {
        TxUnitRepository { txn: self.txn }
    }

    pub fn tenants(&self) -> TxTenantRepository<'_> {
        TxTenantRepository { txn: self.txn }
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    property_repo: Arc<PropertyStore>,
    unit_repo: Arc<UnitStore>,
    tenant_repo: Arc<TenantStore>,
    lease_repo: Arc<LeaseStore>,
    payment_repo: Arc<PaymentStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            property_repo: Arc::new(PropertyStore::new(db.clone())),
            unit_repo: Arc::new(UnitStore::new(db.clone())),
            tenant_repo: Arc::new(TenantStore::new(db.clone())),
            lease_repo: Arc::new(LeaseStore::new(db.clone())),
            payment_repo: Arc::new(PaymentStore::new(db.clone())),
            db,
        }
    }

    async fn execute_transaction<F, T>(
        &self,
        isolation: IsolationLevel,
        access: AccessMode,
        f: F,
    ) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(Some(isolation), Some(access))
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn properties(&self) -> Arc<dyn PropertyRepository> {
        self.property_repo.clone()
    }

    fn units(&self) -> Arc<dyn UnitRepository> {
        self.unit_repo.clone()
    }

    fn tenants(&self) -> Arc<dyn TenantRepository> {
        self.tenant_repo.clone()
    }

    fn leases(&self) -> Arc<dyn LeaseRepository> {
        self.lease_repo.clone()
    }

    fn payments(&self) -> Arc<dyn PaymentRepository> {
        self.payment_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::ReadCommitted, AccessMode::ReadWrite, f)
            .await
    }

    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::Serializable, AccessMode::ReadWrite, f)
            .await
    }

    async fn transaction_snapshot<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::RepeatableRead, AccessMode::ReadOnly, f)
            .await
    }
}

/// Transaction-aware lease repository.
pub struct TxLeaseRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxLeaseRepository<'a> {
    /// Lease reachable through unit and property from the owner
    pub async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Lease>> {
        owned_lease(id, owner_id)
            .one(self.txn)
            .await
            .map_err(AppError::from)?
            .map(Lease::try_from)
            .transpose()
    }

    /// Active leases on the unit whose period intersects `range`, inclusive
    /// on both ends. `exclude` skips the lease being edited.
    pub async fn find_active_overlapping(
        &self,
        unit_id: Uuid,
        range: DateRange,
        exclude: Option<Uuid>,
    ) -> AppResult<Vec<Lease>> {
        let mut query = lease::Entity::find()
            .filter(lease::Column::UnitId.eq(unit_id))
            .filter(lease::Column::Status.eq(LeaseStatus::Active.as_str()))
            .filter(lease::Column::StartDate.lte(range.end))
            .filter(lease::Column::EndDate.gte(range.start));

        if let Some(id) = exclude {
            query = query.filter(lease::Column::Id.ne(id));
        }

        query
            .order_by_asc(lease::Column::StartDate)
            .all(self.txn)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(Lease::try_from)
            .collect()
    }

    pub async fn insert(&self, new_lease: NewLease) -> AppResult<Lease> {
        let now = chrono::Utc::now();
        let active_model = lease::ActiveModel {
            id: Set(Uuid::new_v4()),
            unit_id: Set(new_lease.unit_id),
            tenant_id: Set(new_lease.tenant_id),
            start_date: Set(new_lease.period.start),
            end_date: Set(new_lease.period.end),
            monthly_rent: Set(new_lease.monthly_rent),
            deposit_paid: Set(new_lease.deposit_paid),
            advance_paid: Set(new_lease.advance_paid),
            due_date: Set(new_lease.due_date as i32),
            status: Set(new_lease.status.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(self.txn).await.map_err(AppError::from)?;
        Lease::try_from(model)
    }

    /// Write every mutable column of `lease`.
    pub async fn update(&self, lease: &Lease) -> AppResult<Lease> {
        let model = lease_update_model(lease)
            .update(self.txn)
            .await
            .map_err(AppError::from)?;
        Lease::try_from(model)
    }

    /// Mark terminated and cut the end date to `termination_date`.
    pub async fn terminate(&self, lease: &Lease, termination_date: NaiveDate) -> AppResult<Lease> {
        let terminated = Lease {
            status: LeaseStatus::Terminated,
            end_date: termination_date,
            ..lease.clone()
        };
        self.update(&terminated).await
    }

    /// `(status, monthly_rent)` for every lease of the owner
    pub async fn status_rents_for_owner(
        &self,
        owner_id: Uuid,
    ) -> AppResult<Vec<(LeaseStatus, Decimal)>> {
        let rows = leases_of_owner(owner_id)
            .select_only()
            .column(lease::Column::Status)
            .column(lease::Column::MonthlyRent)
            .into_tuple::<(String, Decimal)>()
            .all(self.txn)
            .await
            .map_err(AppError::from)?;

        rows.into_iter()
            .map(|(status, rent)| Ok((status.parse::<LeaseStatus>()?, rent)))
            .collect()
    }
}

/// Transaction-aware unit repository.
pub struct TxUnitRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxUnitRepository<'a> {
    pub async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Unit>> {
        let result = owned_unit(id, owner_id)
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Unit::from))
    }

    pub async fn set_availability(&self, id: Uuid, is_available: bool) -> AppResult<()> {
        let active = unit::ActiveModel {
            id: Set(id),
            is_available: Set(is_available),
            updated_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        active.update(self.txn).await.map_err(AppError::from)?;
        Ok(())
    }

    /// `is_available` for every unit under the owner's properties
    pub async fn availability_for_owner(&self, owner_id: Uuid) -> AppResult<Vec<bool>> {
        units_of_owner(owner_id)
            .select_only()
            .column(unit::Column::IsAvailable)
            .into_tuple::<bool>()
            .all(self.txn)
            .await
            .map_err(AppError::from)
    }
}

/// Transaction-aware tenant repository.
pub struct TxTenantRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxTenantRepository<'a> {
    pub async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Tenant>> {
        let result = owned_tenant(id, owner_id)
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Tenant::from))
    }
}
