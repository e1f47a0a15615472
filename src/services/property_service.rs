//! Property service - portfolio CRUD scoped to the owner.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Property, PropertyInput};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait PropertyService: Send + Sync {
    async fn create_property(&self, owner_id: Uuid, input: PropertyInput) -> AppResult<Property>;

    async fn list_properties(&self, owner_id: Uuid) -> AppResult<Vec<Property>>;

    async fn get_property(&self, owner_id: Uuid, id: Uuid) -> AppResult<Property>;

    async fn update_property(
        &self,
        owner_id: Uuid,
        id: Uuid,
        input: PropertyInput,
    ) -> AppResult<Property>;

    /// Delete the property together with its units, tenants, leases and payments
    async fn delete_property(&self, owner_id: Uuid, id: Uuid) -> AppResult<()>;
}

pub struct PropertyManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> PropertyManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> PropertyService for PropertyManager<U> {
    async fn create_property(&self, owner_id: Uuid, input: PropertyInput) -> AppResult<Property> {
        let property = self
            .uow
            .properties()
            .create(owner_id, input.normalized())
            .await?;

        tracing::info!(property_id = %property.id, "Property created");
        Ok(property)
    }

    async fn list_properties(&self, owner_id: Uuid) -> AppResult<Vec<Property>> {
        self.uow.properties().list_by_owner(owner_id).await
    }

    async fn get_property(&self, owner_id: Uuid, id: Uuid) -> AppResult<Property> {
        self.uow
            .properties()
            .find_owned(id, owner_id)
            .await?
            .ok_or_not_owned("Property")
    }

    async fn update_property(
        &self,
        owner_id: Uuid,
        id: Uuid,
        input: PropertyInput,
    ) -> AppResult<Property> {
        self.uow
            .properties()
            .update_owned(id, owner_id, input.normalized())
            .await?
            .ok_or_not_owned("Property")
    }

    async fn delete_property(&self, owner_id: Uuid, id: Uuid) -> AppResult<()> {
        if !self.uow.properties().delete_owned(id, owner_id).await? {
            return Err(AppError::NotFoundOrUnauthorized("Property"));
        }

        tracing::info!(property_id = %id, "Property deleted");
        Ok(())
    }
}
