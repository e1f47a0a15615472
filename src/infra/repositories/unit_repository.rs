//! Unit repository.
//!
//! Units are owned through their property, so ownership checks join
//! `properties.owner_id`. Availability is written only by the lease
//! lifecycle through the transactional repository.

use async_trait::async_trait;
use sea_orm::{
    prelude::Json, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set,
};
use uuid::Uuid;

use super::entities::property::{self, Entity as PropertyEntity};
use super::entities::unit::{self, ActiveModel, Entity as UnitEntity};
use crate::domain::{Unit, UnitFields, UnitWithProperty};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UnitRepository: Send + Sync {
    /// Create an available unit under an already-verified property
    async fn create(&self, property_id: Uuid, fields: UnitFields) -> AppResult<Unit>;

    /// Units of one property ordered by unit number
    async fn list_for_property(&self, property_id: Uuid) -> AppResult<Vec<Unit>>;

    /// Every unit across the owner's properties, newest first
    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<UnitWithProperty>>;

    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Unit>>;

    /// Replace the descriptive fields; availability is left as stored.
    async fn update_owned(
        &self,
        id: Uuid,
        owner_id: Uuid,
        fields: UnitFields,
    ) -> AppResult<Option<Unit>>;

    async fn delete_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool>;
}

/// Unit lookup joined through its property to the owner
pub(crate) fn owned_unit(id: Uuid, owner_id: Uuid) -> Select<UnitEntity> {
    UnitEntity::find_by_id(id)
        .inner_join(PropertyEntity)
        .filter(property::Column::OwnerId.eq(owner_id))
}

/// All units under the owner's properties
pub(crate) fn units_of_owner(owner_id: Uuid) -> Select<UnitEntity> {
    UnitEntity::find()
        .inner_join(PropertyEntity)
        .filter(property::Column::OwnerId.eq(owner_id))
}

pub struct UnitStore {
    db: DatabaseConnection,
}

impl UnitStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UnitRepository for UnitStore {
    async fn create(&self, property_id: Uuid, fields: UnitFields) -> AppResult<Unit> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            property_id: Set(property_id),
            unit_number: Set(fields.unit_number),
            monthly_rent: Set(fields.monthly_rent),
            deposit_required: Set(fields.deposit_required),
            advance_required: Set(fields.advance_required),
            size_sqm: Set(fields.size_sqm),
            bedrooms: Set(fields.bedrooms),
            bathrooms: Set(fields.bathrooms),
            is_available: Set(true),
            images: Set(Some(Json::from(fields.images))),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Unit::from(model))
    }

    async fn list_for_property(&self, property_id: Uuid) -> AppResult<Vec<Unit>> {
        let models = UnitEntity::find()
            .filter(unit::Column::PropertyId.eq(property_id))
            .order_by_asc(unit::Column::UnitNumber)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Unit::from).collect())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<UnitWithProperty>> {
        let rows = UnitEntity::find()
            .find_also_related(PropertyEntity)
            .filter(property::Column::OwnerId.eq(owner_id))
            .order_by_desc(unit::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows
            .into_iter()
            .map(|(unit, property)| UnitWithProperty {
                unit: Unit::from(unit),
                property_name: property.map(|p| p.name).unwrap_or_default(),
            })
            .collect())
    }

    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Unit>> {
        let result = owned_unit(id, owner_id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Unit::from))
    }

    async fn update_owned(
        &self,
        id: Uuid,
        owner_id: Uuid,
        fields: UnitFields,
    ) -> AppResult<Option<Unit>> {
        let Some(existing) = owned_unit(id, owner_id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = existing.into();
        active.unit_number = Set(fields.unit_number);
        active.monthly_rent = Set(fields.monthly_rent);
        active.deposit_required = Set(fields.deposit_required);
        active.advance_required = Set(fields.advance_required);
        active.size_sqm = Set(fields.size_sqm);
        active.bedrooms = Set(fields.bedrooms);
        active.bathrooms = Set(fields.bathrooms);
        active.images = Set(Some(Json::from(fields.images)));
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Some(Unit::from(model)))
    }

    async fn delete_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool> {
        let owned = owned_unit(id, owner_id)
            .select_only()
            .column(unit::Column::Id)
            .into_tuple::<Uuid>()
            .one(&self.db)
            .await?;

        let Some(id) = owned else {
            return Ok(false);
        };

        let result = UnitEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }
}
