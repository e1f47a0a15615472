//! Payment ledger repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
};
use uuid::Uuid;

use super::entities::payment::{self, ActiveModel, Entity as PaymentEntity};
use super::entities::{lease, property, unit};
use crate::domain::{NewPayment, Payment, PaymentStatus};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Record a payment against an already-verified lease
    async fn create(&self, payment: NewPayment) -> AppResult<Payment>;

    /// Payments of one lease by payment date
    async fn list_for_lease(&self, lease_id: Uuid) -> AppResult<Vec<Payment>>;

    /// One page of the owner's payments, newest first, with the total count
    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        offset: u64,
        limit: u64,
    ) -> AppResult<(Vec<Payment>, u64)>;

    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Payment>>;

    async fn update_status(&self, id: Uuid, status: PaymentStatus) -> AppResult<Payment>;
}

/// Payments joined through lease, unit and property to the owner
fn payments_of_owner(owner_id: Uuid) -> Select<PaymentEntity> {
    PaymentEntity::find()
        .join(JoinType::InnerJoin, payment::Relation::Lease.def())
        .join(JoinType::InnerJoin, lease::Relation::Unit.def())
        .join(JoinType::InnerJoin, unit::Relation::Property.def())
        .filter(property::Column::OwnerId.eq(owner_id))
}

fn to_payments(models: Vec<payment::Model>) -> AppResult<Vec<Payment>> {
    models.into_iter().map(Payment::try_from).collect()
}

pub struct PaymentStore {
    db: DatabaseConnection,
}

impl PaymentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PaymentRepository for PaymentStore {
    async fn create(&self, payment: NewPayment) -> AppResult<Payment> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            lease_id: Set(payment.lease_id),
            amount: Set(payment.amount),
            payment_method: Set(payment.payment_method.as_str().to_string()),
            payment_date: Set(payment.payment_date),
            due_date: Set(payment.due_date),
            reference_number: Set(payment.reference_number),
            status: Set(payment.status.as_str().to_string()),
            notes: Set(payment.notes),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Payment::try_from(model)
    }

    async fn list_for_lease(&self, lease_id: Uuid) -> AppResult<Vec<Payment>> {
        let models = PaymentEntity::find()
            .filter(payment::Column::LeaseId.eq(lease_id))
            .order_by_asc(payment::Column::PaymentDate)
            .order_by_asc(payment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        to_payments(models)
    }

    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        offset: u64,
        limit: u64,
    ) -> AppResult<(Vec<Payment>, u64)> {
        let total = payments_of_owner(owner_id)
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        let models = payments_of_owner(owner_id)
            .order_by_desc(payment::Column::PaymentDate)
            .order_by_desc(payment::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok((to_payments(models)?, total))
    }

    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Payment>> {
        payments_of_owner(owner_id)
            .filter(payment::Column::Id.eq(id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .map(Payment::try_from)
            .transpose()
    }

    async fn update_status(&self, id: Uuid, status: PaymentStatus) -> AppResult<Payment> {
        let existing = PaymentEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFoundOrUnauthorized("Payment"))?;

        let mut active: ActiveModel = existing.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Payment::try_from(model)
    }
}
