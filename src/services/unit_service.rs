//! Unit service - rentable units under the owner's properties.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Unit, UnitInput, UnitWithProperty};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait UnitService: Send + Sync {
    async fn create_unit(&self, owner_id: Uuid, property_id: Uuid, input: UnitInput)
        -> AppResult<Unit>;

    async fn list_for_property(&self, owner_id: Uuid, property_id: Uuid) -> AppResult<Vec<Unit>>;

    async fn list_units(&self, owner_id: Uuid) -> AppResult<Vec<UnitWithProperty>>;

    async fn get_unit(&self, owner_id: Uuid, id: Uuid) -> AppResult<Unit>;

    async fn update_unit(&self, owner_id: Uuid, id: Uuid, input: UnitInput) -> AppResult<Unit>;

    async fn delete_unit(&self, owner_id: Uuid, id: Uuid) -> AppResult<()>;
}

pub struct UnitManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UnitManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn ensure_property(&self, owner_id: Uuid, property_id: Uuid) -> AppResult<()> {
        self.uow
            .properties()
            .find_owned(property_id, owner_id)
            .await?
            .ok_or_not_owned("Property")
            .map(|_| ())
    }
}

#[async_trait]
impl<U: UnitOfWork> UnitService for UnitManager<U> {
    async fn create_unit(
        &self,
        owner_id: Uuid,
        property_id: Uuid,
        input: UnitInput,
    ) -> AppResult<Unit> {
        let fields = input.into_fields()?;
        self.ensure_property(owner_id, property_id).await?;

        let unit = self.uow.units().create(property_id, fields).await?;
        tracing::info!(unit_id = %unit.id, property_id = %property_id, "Unit created");
        Ok(unit)
    }

    async fn list_for_property(&self, owner_id: Uuid, property_id: Uuid) -> AppResult<Vec<Unit>> {
        self.ensure_property(owner_id, property_id).await?;
        self.uow.units().list_for_property(property_id).await
    }

    async fn list_units(&self, owner_id: Uuid) -> AppResult<Vec<UnitWithProperty>> {
        self.uow.units().list_by_owner(owner_id).await
    }

    async fn get_unit(&self, owner_id: Uuid, id: Uuid) -> AppResult<Unit> {
        self.uow
            .units()
            .find_owned(id, owner_id)
            .await?
            .ok_or_not_owned("Unit")
    }

    async fn update_unit(&self, owner_id: Uuid, id: Uuid, input: UnitInput) -> AppResult<Unit> {
        let fields = input.into_fields()?;
        self.uow
            .units()
            .update_owned(id, owner_id, fields)
            .await?
            .ok_or_not_owned("Unit")
    }

    async fn delete_unit(&self, owner_id: Uuid, id: Uuid) -> AppResult<()> {
        if !self.uow.units().delete_owned(id, owner_id).await? {
            return Err(AppError::NotFoundOrUnauthorized("Unit"));
        }

        tracing::info!(unit_id = %id, "Unit deleted");
        Ok(())
    }
}
