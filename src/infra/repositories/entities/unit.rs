//! Unit database entity.

use sea_orm::entity::prelude::*;

use super::string_list;
use crate::domain::{money, Unit};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "units")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub property_id: Uuid,
    pub unit_number: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub monthly_rent: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub deposit_required: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub advance_required: Decimal,
    #[sea_orm(column_type = "Decimal(Some((8, 2)))", nullable)]
    pub size_sqm: Option<Decimal>,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub is_available: bool,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub images: Option<Json>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::property::Entity",
        from = "Column::PropertyId",
        to = "super::property::Column::Id",
        on_delete = "Cascade"
    )]
    Property,
    #[sea_orm(has_many = "super::lease::Entity")]
    Lease,
}

impl Related<super::property::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Property.def()
    }
}

impl Related<super::lease::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lease.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Unit {
    fn from(model: Model) -> Self {
        Unit {
            id: model.id,
            property_id: model.property_id,
            unit_number: model.unit_number,
            monthly_rent: money::normalize(model.monthly_rent),
            deposit_required: money::normalize(model.deposit_required),
            advance_required: money::normalize(model.advance_required),
            size_sqm: model.size_sqm.map(money::normalize),
            bedrooms: model.bedrooms,
            bathrooms: model.bathrooms,
            is_available: model.is_available,
            images: string_list(model.images),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
