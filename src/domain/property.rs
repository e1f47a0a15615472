//! Property domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Property {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub address: String,
    pub description: Option<String>,
    /// Advertised unit count; display only
    pub total_units: i32,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub rules: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Property create/replace payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct PropertyInput {
    #[validate(length(min = 1, max = 255, message = "Property name is required"))]
    #[schema(example = "Sampaguita Apartments")]
    pub name: String,
    #[validate(length(min = 1, message = "Address is required"))]
    #[schema(example = "123 Rizal Ave, Quezon City")]
    pub address: String,
    pub description: Option<String>,
    #[validate(range(min = 0, message = "Total units must be zero or more"))]
    #[serde(default)]
    #[schema(example = 12)]
    pub total_units: i32,
    #[serde(default)]
    #[schema(example = json!(["wifi", "parking"]))]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub rules: Option<String>,
}

impl PropertyInput {
    /// Trim text fields and drop blank amenities.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.address = self.address.trim().to_string();
        self.amenities = self
            .amenities
            .into_iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();
        self
    }
}
