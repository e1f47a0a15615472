//! Property repository. Every query is scoped to the owning landlord.

use async_trait::async_trait;
use sea_orm::{
    prelude::Json, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Select, Set,
};
use uuid::Uuid;

use super::entities::property::{self, ActiveModel, Entity as PropertyEntity};
use crate::domain::{Property, PropertyInput};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    async fn create(&self, owner_id: Uuid, input: PropertyInput) -> AppResult<Property>;

    /// Owner's properties, newest first
    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Property>>;

    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Property>>;

    /// Replace every editable field. `None` when the property is not owned.
    async fn update_owned(
        &self,
        id: Uuid,
        owner_id: Uuid,
        input: PropertyInput,
    ) -> AppResult<Option<Property>>;

    /// Delete with cascade. `false` when nothing owned matched.
    async fn delete_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool>;
}

/// Property lookup restricted to one owner
pub(crate) fn owned_property(id: Uuid, owner_id: Uuid) -> Select<PropertyEntity> {
    PropertyEntity::find_by_id(id).filter(property::Column::OwnerId.eq(owner_id))
}

pub struct PropertyStore {
    db: DatabaseConnection,
}

impl PropertyStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PropertyRepository for PropertyStore {
    async fn create(&self, owner_id: Uuid, input: PropertyInput) -> AppResult<Property> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            owner_id: Set(owner_id),
            name: Set(input.name),
            address: Set(input.address),
            description: Set(input.description),
            total_units: Set(input.total_units),
            amenities: Set(Some(Json::from(input.amenities))),
            images: Set(Some(Json::from(input.images))),
            rules: Set(input.rules),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Property::from(model))
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Property>> {
        let models = PropertyEntity::find()
            .filter(property::Column::OwnerId.eq(owner_id))
            .order_by_desc(property::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Property::from).collect())
    }

    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Property>> {
        let result = owned_property(id, owner_id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Property::from))
    }

    async fn update_owned(
        &self,
        id: Uuid,
        owner_id: Uuid,
        input: PropertyInput,
    ) -> AppResult<Option<Property>> {
        let Some(existing) = owned_property(id, owner_id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = existing.into();
        active.name = Set(input.name);
        active.address = Set(input.address);
        active.description = Set(input.description);
        active.total_units = Set(input.total_units);
        active.amenities = Set(Some(Json::from(input.amenities)));
        active.images = Set(Some(Json::from(input.images)));
        active.rules = Set(input.rules);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Some(Property::from(model)))
    }

    async fn delete_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool> {
        let result = PropertyEntity::delete_many()
            .filter(property::Column::Id.eq(id))
            .filter(property::Column::OwnerId.eq(owner_id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }
}
