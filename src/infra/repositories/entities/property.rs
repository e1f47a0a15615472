//! Property database entity.

use sea_orm::entity::prelude::*;

use super::string_list;
use crate::domain::Property;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "properties")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub address: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub total_units: i32,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub amenities: Option<Json>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub images: Option<Json>,
    #[sea_orm(column_type = "Text", nullable)]
    pub rules: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Owner,
    #[sea_orm(has_many = "super::unit::Entity")]
    Unit,
    #[sea_orm(has_many = "super::tenant::Entity")]
    Tenant,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::unit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Unit.def()
    }
}

impl Related<super::tenant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tenant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Property {
    fn from(model: Model) -> Self {
        Property {
            id: model.id,
            owner_id: model.owner_id,
            name: model.name,
            address: model.address,
            description: model.description,
            total_units: model.total_units,
            amenities: string_list(model.amenities),
            images: string_list(model.images),
            rules: model.rules,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
