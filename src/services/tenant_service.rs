//! Tenant service - renters registered under the owner's properties.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{CreateTenant, Tenant, TenantFilters, UpdateTenant};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

const DUPLICATE_TENANT_EMAIL: &str = "A tenant with this email already exists in your properties";

#[async_trait]
pub trait TenantService: Send + Sync {
    async fn create_tenant(&self, owner_id: Uuid, input: CreateTenant) -> AppResult<Tenant>;

    async fn list_tenants(&self, owner_id: Uuid, filters: TenantFilters) -> AppResult<Vec<Tenant>>;

    async fn list_for_property(&self, owner_id: Uuid, property_id: Uuid)
        -> AppResult<Vec<Tenant>>;

    async fn get_tenant(&self, owner_id: Uuid, id: Uuid) -> AppResult<Tenant>;

    async fn update_tenant(&self, owner_id: Uuid, id: Uuid, input: UpdateTenant)
        -> AppResult<Tenant>;

    /// Rejected while the tenant holds an active lease
    async fn delete_tenant(&self, owner_id: Uuid, id: Uuid) -> AppResult<()>;
}

pub struct TenantManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> TenantManager<U> {
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

    async fn ensure_owned(&self, owner_id: Uuid, id: Uuid) -> AppResult<Tenant> {
        self.uow
            .tenants()
            .find_owned(id, owner_id)
            .await?
            .ok_or_not_owned("Tenant")
    }
}

#[async_trait]
impl<U: UnitOfWork> TenantService for TenantManager<U> {
    async fn create_tenant(&self, owner_id: Uuid, input: CreateTenant) -> AppResult<Tenant> {
        self.ensure_property(owner_id, input.property_id).await?;

        if self
            .uow
            .tenants()
            .email_taken(owner_id, &input.email, None)
            .await?
        {
            return Err(AppError::conflict(DUPLICATE_TENANT_EMAIL));
        }

        let tenant = self.uow.tenants().create(input).await?;
        tracing::info!(tenant_id = %tenant.id, property_id = %tenant.property_id, "Tenant created");
        Ok(tenant)
    }

    async fn list_tenants(&self, owner_id: Uuid, filters: TenantFilters) -> AppResult<Vec<Tenant>> {
        self.uow.tenants().list(owner_id, filters).await
    }

    async fn list_for_property(
        &self,
        owner_id: Uuid,
        property_id: Uuid,
    ) -> AppResult<Vec<Tenant>> {
        self.ensure_property(owner_id, property_id).await?;
        self.uow
            .tenants()
            .list(
                owner_id,
                TenantFilters {
                    property_id: Some(property_id),
                    search: None,
                },
            )
            .await
    }

    async fn get_tenant(&self, owner_id: Uuid, id: Uuid) -> AppResult<Tenant> {
        self.ensure_owned(owner_id, id).await
    }

    async fn update_tenant(
        &self,
        owner_id: Uuid,
        id: Uuid,
        input: UpdateTenant,
    ) -> AppResult<Tenant> {
        let existing = self.ensure_owned(owner_id, id).await?;

        if let Some(email) = input.email.as_deref() {
            let changed = !email.trim().eq_ignore_ascii_case(&existing.email);
            if changed && self.uow.tenants().email_taken(owner_id, email, Some(id)).await? {
                return Err(AppError::conflict(DUPLICATE_TENANT_EMAIL));
            }
        }

        self.uow.tenants().update(id, input).await
    }

    async fn delete_tenant(&self, owner_id: Uuid, id: Uuid) -> AppResult<()> {
        self.ensure_owned(owner_id, id).await?;

        if self.uow.tenants().has_active_lease(id).await? {
            return Err(AppError::conflict("Tenant has an active lease"));
        }

        self.uow.tenants().delete(id).await?;
        tracing::info!(tenant_id = %id, "Tenant deleted");
        Ok(())
    }
}
