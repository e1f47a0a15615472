//! Tenant database entity.

use sea_orm::entity::prelude::*;

use crate::domain::{EmergencyContact, Tenant};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tenants")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub property_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub emergency_contact: Option<Json>,
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

impl From<Model> for Tenant {
    fn from(model: Model) -> Self {
        Tenant {
            id: model.id,
            property_id: model.property_id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            phone: model.phone,
            emergency_contact: model
                .emergency_contact
                .and_then(|v| serde_json::from_value::<EmergencyContact>(v).ok()),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
