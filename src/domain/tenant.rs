//! Tenant domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct EmergencyContact {
    #[validate(length(min = 1, message = "Emergency contact name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Emergency contact phone is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Emergency contact relationship is required"))]
    pub relationship: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Tenant {
    pub id: Uuid,
    pub property_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub emergency_contact: Option<EmergencyContact>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Tenant registration payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTenant {
    pub property_id: Uuid,
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    #[schema(example = "Juan")]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    #[schema(example = "dela Cruz")]
    pub last_name: String,
    #[validate(
        email(message = "Invalid email address"),
        length(max = 255, message = "Email is too long")
    )]
    #[schema(example = "juan@example.ph")]
    pub email: String,
    #[validate(length(min = 1, max = 50, message = "Phone number is required"))]
    #[schema(example = "+63 917 555 0101")]
    pub phone: String,
    #[validate(nested)]
    pub emergency_contact: Option<EmergencyContact>,
}

/// Partial tenant update payload
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTenant {
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    pub last_name: Option<String>,
    #[validate(
        email(message = "Invalid email address"),
        length(max = 255, message = "Email is too long")
    )]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Phone number is required"))]
    pub phone: Option<String>,
    #[validate(nested)]
    pub emergency_contact: Option<EmergencyContact>,
}

/// Tenant list filters
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TenantFilters {
    pub property_id: Option<Uuid>,
    /// Case-insensitive match on name, email or phone
    pub search: Option<String>,
}

impl TenantFilters {
    /// Search term with surrounding whitespace removed; blank means no search.
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create() -> CreateTenant {
        CreateTenant {
            property_id: Uuid::new_v4(),
            first_name: "Juan".into(),
            last_name: "dela Cruz".into(),
            email: "juan@example.ph".into(),
            phone: "09175550101".into(),
            emergency_contact: None,
        }
    }

    #[test]
    fn test_valid_tenant() {
        assert!(create().validate().is_ok());
    }

    #[test]
    fn test_bad_email_rejected() {
        let mut input = create();
        input.email = "not-an-email".into();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_partial_emergency_contact_rejected() {
        let mut input = create();
        input.emergency_contact = Some(EmergencyContact {
            name: "Rosa".into(),
            phone: String::new(),
            relationship: "Mother".into(),
        });
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let filters = TenantFilters {
            property_id: None,
            search: Some("   ".into()),
        };
        assert_eq!(filters.search_term(), None);
    }
}
