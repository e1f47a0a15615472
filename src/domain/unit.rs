//! Rentable unit within a property.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::money;
use crate::errors::AppResult;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Unit {
    pub id: Uuid,
    pub property_id: Uuid,
    pub unit_number: String,
    #[schema(value_type = String, example = "15000.00")]
    pub monthly_rent: Decimal,
    #[schema(value_type = String, example = "15000.00")]
    pub deposit_required: Decimal,
    #[schema(value_type = String, example = "15000.00")]
    pub advance_required: Decimal,
    #[schema(value_type = Option<String>, example = "24.50")]
    pub size_sqm: Option<Decimal>,
    pub bedrooms: i32,
    pub bathrooms: i32,
    /// False while an active lease occupies the unit; maintained by the lease lifecycle
    pub is_available: bool,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Unit listed across all of an owner's properties
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UnitWithProperty {
    #[serde(flatten)]
    pub unit: Unit,
    pub property_name: String,
}

/// Unit create/replace payload. Availability is never client-supplied.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UnitInput {
    #[validate(length(min = 1, max = 50, message = "Unit number is required"))]
    #[schema(example = "2B")]
    pub unit_number: String,
    #[schema(value_type = String, example = "15000.00")]
    pub monthly_rent: Decimal,
    #[schema(value_type = String, example = "15000.00")]
    pub deposit_required: Decimal,
    #[schema(value_type = String, example = "15000.00")]
    pub advance_required: Decimal,
    #[schema(value_type = Option<String>, example = "24.50")]
    pub size_sqm: Option<Decimal>,
    #[validate(range(min = 0, message = "Bedrooms must be zero or more"))]
    #[serde(default)]
    pub bedrooms: i32,
    #[validate(range(min = 0, message = "Bathrooms must be zero or more"))]
    #[serde(default)]
    pub bathrooms: i32,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Validated unit fields ready to persist
#[derive(Debug, Clone, PartialEq)]
pub struct UnitFields {
    pub unit_number: String,
    pub monthly_rent: Decimal,
    pub deposit_required: Decimal,
    pub advance_required: Decimal,
    pub size_sqm: Option<Decimal>,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub images: Vec<String>,
}

impl UnitInput {
    /// Check the currency fields and normalize them to centavos.
    pub fn into_fields(self) -> AppResult<UnitFields> {
        Ok(UnitFields {
            unit_number: self.unit_number.trim().to_string(),
            monthly_rent: money::non_negative(self.monthly_rent, "Monthly rent must be positive")?,
            deposit_required: money::non_negative(
                self.deposit_required,
                "Deposit must be positive",
            )?,
            advance_required: money::non_negative(
                self.advance_required,
                "Advance must be positive",
            )?,
            size_sqm: money::non_negative_opt(self.size_sqm, "Size must be positive")?,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            images: self.images,
        })
    }
}
