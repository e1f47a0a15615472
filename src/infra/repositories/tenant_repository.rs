//! Tenant repository. Tenants are owned through their property.

use async_trait::async_trait;
use sea_orm::{
    prelude::Json,
    sea_query::{Expr, Func},
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use uuid::Uuid;

use super::entities::lease::{self, Entity as LeaseEntity};
use super::entities::property::{self, Entity as PropertyEntity};
use super::entities::tenant::{self, ActiveModel, Entity as TenantEntity};
use crate::domain::{CreateTenant, EmergencyContact, LeaseStatus, Tenant, TenantFilters, UpdateTenant};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TenantRepository: Send + Sync {
    /// Create a tenant under an already-verified property
    async fn create(&self, input: CreateTenant) -> AppResult<Tenant>;

    /// Owner's tenants matching the filters, newest first
    async fn list(&self, owner_id: Uuid, filters: TenantFilters) -> AppResult<Vec<Tenant>>;

    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Tenant>>;

    /// Whether another of the owner's tenants already uses this email
    async fn email_taken(
        &self,
        owner_id: Uuid,
        email: &str,
        exclude: Option<Uuid>,
    ) -> AppResult<bool>;

    /// Apply the supplied fields to an already-verified tenant
    async fn update(&self, id: Uuid, changes: UpdateTenant) -> AppResult<Tenant>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;

    async fn has_active_lease(&self, id: Uuid) -> AppResult<bool>;
}

/// Tenant lookup joined through its property to the owner
pub(crate) fn owned_tenant(id: Uuid, owner_id: Uuid) -> Select<TenantEntity> {
    TenantEntity::find_by_id(id)
        .inner_join(PropertyEntity)
        .filter(property::Column::OwnerId.eq(owner_id))
}

fn lowered(column: tenant::Column) -> Expr {
    Expr::expr(Func::lower(Expr::col((tenant::Entity, column))))
}

fn contact_json(contact: Option<EmergencyContact>) -> AppResult<Option<Json>> {
    contact
        .map(|c| {
            serde_json::to_value(c)
                .map_err(|e| AppError::internal(format!("Emergency contact encoding failed: {}", e)))
        })
        .transpose()
}

pub struct TenantStore {
    db: DatabaseConnection,
}

impl TenantStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TenantRepository for TenantStore {
    async fn create(&self, input: CreateTenant) -> AppResult<Tenant> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            property_id: Set(input.property_id),
            first_name: Set(input.first_name.trim().to_string()),
            last_name: Set(input.last_name.trim().to_string()),
            email: Set(input.email.trim().to_lowercase()),
            phone: Set(input.phone.trim().to_string()),
            emergency_contact: Set(contact_json(input.emergency_contact)?),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Tenant::from(model))
    }

    async fn list(&self, owner_id: Uuid, filters: TenantFilters) -> AppResult<Vec<Tenant>> {
        let mut query = TenantEntity::find()
            .inner_join(PropertyEntity)
            .filter(property::Column::OwnerId.eq(owner_id));

        if let Some(property_id) = filters.property_id {
            query = query.filter(tenant::Column::PropertyId.eq(property_id));
        }

        if let Some(term) = filters.search_term() {
            let pattern = format!("%{}%", term.to_lowercase());
            query = query.filter(
                Condition::any()
                    .add(lowered(tenant::Column::FirstName).like(pattern.as_str()))
                    .add(lowered(tenant::Column::LastName).like(pattern.as_str()))
                    .add(lowered(tenant::Column::Email).like(pattern.as_str()))
                    .add(lowered(tenant::Column::Phone).like(pattern.as_str())),
            );
        }

        let models = query
            .order_by_desc(tenant::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Tenant::from).collect())
    }

    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Tenant>> {
        let result = owned_tenant(id, owner_id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Tenant::from))
    }

    async fn email_taken(
        &self,
        owner_id: Uuid,
        email: &str,
        exclude: Option<Uuid>,
    ) -> AppResult<bool> {
        let mut query = TenantEntity::find()
            .inner_join(PropertyEntity)
            .filter(property::Column::OwnerId.eq(owner_id))
            .filter(lowered(tenant::Column::Email).eq(email.trim().to_lowercase()));

        if let Some(id) = exclude {
            query = query.filter(tenant::Column::Id.ne(id));
        }

        let matches = query
            .select_only()
            .column(tenant::Column::Id)
            .into_tuple::<Uuid>()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(!matches.is_empty())
    }

    async fn update(&self, id: Uuid, changes: UpdateTenant) -> AppResult<Tenant> {
        let existing = TenantEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFoundOrUnauthorized("Tenant"))?;

        let mut active: ActiveModel = existing.into();
        if let Some(first_name) = changes.first_name {
            active.first_name = Set(first_name.trim().to_string());
        }
        if let Some(last_name) = changes.last_name {
            active.last_name = Set(last_name.trim().to_string());
        }
        if let Some(email) = changes.email {
            active.email = Set(email.trim().to_lowercase());
        }
        if let Some(phone) = changes.phone {
            active.phone = Set(phone.trim().to_string());
        }
        if changes.emergency_contact.is_some() {
            active.emergency_contact = Set(contact_json(changes.emergency_contact)?);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Tenant::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = TenantEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFoundOrUnauthorized("Tenant"));
        }

        Ok(())
    }

    async fn has_active_lease(&self, id: Uuid) -> AppResult<bool> {
        let count = LeaseEntity::find()
            .filter(lease::Column::TenantId.eq(id))
            .filter(lease::Column::Status.eq(LeaseStatus::Active.as_str()))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }
}
