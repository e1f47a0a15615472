//! Payment service - rent payments recorded against owned leases.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Payment, PaymentStatus, RecordPayment};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

#[async_trait]
pub trait PaymentService: Send + Sync {
    async fn record_payment(&self, owner_id: Uuid, input: RecordPayment) -> AppResult<Payment>;

    async fn list_for_lease(&self, owner_id: Uuid, lease_id: Uuid) -> AppResult<Vec<Payment>>;

    async fn list_payments(
        &self,
        owner_id: Uuid,
        params: PaginationParams,
    ) -> AppResult<Paginated<Payment>>;

    async fn update_status(
        &self,
        owner_id: Uuid,
        id: Uuid,
        status: PaymentStatus,
    ) -> AppResult<Payment>;
}

pub struct PaymentManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> PaymentManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> PaymentService for PaymentManager<U> {
    async fn record_payment(&self, owner_id: Uuid, input: RecordPayment) -> AppResult<Payment> {
        let lease = self
            .uow
            .leases()
            .find_owned(input.lease_id, owner_id)
            .await?
            .ok_or_not_owned("Lease")?;

        let payment = self
            .uow
            .payments()
            .create(input.into_new_payment(&lease)?)
            .await?;

        tracing::info!(
            payment_id = %payment.id,
            lease_id = %payment.lease_id,
            due_date = %payment.due_date,
            "Payment recorded"
        );
        Ok(payment)
    }

    async fn list_for_lease(&self, owner_id: Uuid, lease_id: Uuid) -> AppResult<Vec<Payment>> {
        self.uow
            .leases()
            .find_owned(lease_id, owner_id)
            .await?
            .ok_or_not_owned("Lease")?;

        self.uow.payments().list_for_lease(lease_id).await
    }

    async fn list_payments(
        &self,
        owner_id: Uuid,
        params: PaginationParams,
    ) -> AppResult<Paginated<Payment>> {
        let limit = params.limit();
        let (payments, total) = self
            .uow
            .payments()
            .list_by_owner(owner_id, params.offset(), limit)
            .await?;

        Ok(Paginated::new(payments, params.page(), limit, total))
    }

    async fn update_status(
        &self,
        owner_id: Uuid,
        id: Uuid,
        status: PaymentStatus,
    ) -> AppResult<Payment> {
        self.uow
            .payments()
            .find_owned(id, owner_id)
            .await?
            .ok_or_not_owned("Payment")?;

        let payment = self.uow.payments().update_status(id, status).await?;
        tracing::info!(payment_id = %id, status = status.as_str(), "Payment status changed");
        Ok(payment)
    }
}
