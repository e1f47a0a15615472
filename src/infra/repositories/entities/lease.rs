//! Lease database entity.

use sea_orm::entity::prelude::*;

use super::parse_column;
use crate::domain::{money, Lease};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "leases")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub unit_id: Uuid,
    pub tenant_id: Uuid,
    pub start_date: Date,
    pub end_date: Date,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub monthly_rent: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub deposit_paid: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub advance_paid: Decimal,
    /// Day of month rent falls due
    pub due_date: i32,
    /// active | terminated | expired
    pub status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::unit::Entity",
        from = "Column::UnitId",
        to = "super::unit::Column::Id",
        on_delete = "Cascade"
    )]
    Unit,
    #[sea_orm(
        belongs_to = "super::tenant::Entity",
        from = "Column::TenantId",
        to = "super::tenant::Column::Id",
        on_delete = "Cascade"
    )]
    Tenant,
    #[sea_orm(has_many = "super::payment::Entity")]
    Payment,
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

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Lease {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Lease {
            id: model.id,
            unit_id: model.unit_id,
            tenant_id: model.tenant_id,
            start_date: model.start_date,
            end_date: model.end_date,
            monthly_rent: money::normalize(model.monthly_rent),
            deposit_paid: money::normalize(model.deposit_paid),
            advance_paid: money::normalize(model.advance_paid),
            due_date: u32::try_from(model.due_date)
                .map_err(|_| AppError::internal("Negative lease due date in storage"))?,
            status: parse_column(&model.status, "lease status")?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
