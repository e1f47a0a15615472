//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, lease_handler, payment_handler, property_handler, tenant_handler, unit_handler,
    upload_handler,
};
use crate::config::SESSION_COOKIE_NAME;
use crate::domain::{
    CreateLease, CreateTenant, EmergencyContact, ExpiringLease, Lease, LeaseAnalytics,
    LeaseDetails, LeaseProperty, LeaseStatus, LeaseStatusStats, LeaseSummary, LeaseTenant,
    Payment, PaymentMethod, PaymentStatus, Property, PropertyInput, RecordPayment,
    TerminateLease, Tenant, Unit, UnitInput, UnitWithProperty, UpdateLease, UpdatePaymentStatus,
    UpdateTenant, UserResponse,
};
use crate::services::{SessionResponse, UploadedFile};
use crate::types::{MessageResponse, PaginationMeta, PaymentPage};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Landra API",
        version = "0.1.0",
        description = "Property management for landlords: properties, units, tenants, leases and rent payments"
    ),
    servers((url = "http://localhost:3000", description = "Local development server")),
    paths(
        auth_handler::signup,
        auth_handler::signin,
        auth_handler::signout,
        auth_handler::me,
        property_handler::list_properties,
        property_handler::create_property,
        property_handler::get_property,
        property_handler::update_property,
        property_handler::delete_property,
        unit_handler::list_units,
        unit_handler::list_property_units,
        unit_handler::create_unit,
        unit_handler::get_unit,
        unit_handler::update_unit,
        unit_handler::delete_unit,
        tenant_handler::list_tenants,
        tenant_handler::list_property_tenants,
        tenant_handler::create_tenant,
        tenant_handler::get_tenant,
        tenant_handler::update_tenant,
        tenant_handler::delete_tenant,
        lease_handler::list_leases,
        lease_handler::create_lease,
        lease_handler::list_active_leases,
        lease_handler::list_expiring_leases,
        lease_handler::get_lease_analytics,
        lease_handler::get_lease,
        lease_handler::update_lease,
        lease_handler::terminate_lease,
        lease_handler::list_lease_payments,
        payment_handler::list_payments,
        payment_handler::record_payment,
        payment_handler::update_payment_status,
        upload_handler::upload_image,
    ),
    components(
        schemas(
            auth_handler::SignUpRequest,
            auth_handler::SignInRequest,
            SessionResponse,
            UserResponse,
            MessageResponse,
            Property,
            PropertyInput,
            Unit,
            UnitInput,
            UnitWithProperty,
            Tenant,
            CreateTenant,
            UpdateTenant,
            EmergencyContact,
            LeaseStatus,
            Lease,
            CreateLease,
            UpdateLease,
            TerminateLease,
            LeaseSummary,
            LeaseDetails,
            LeaseTenant,
            LeaseProperty,
            ExpiringLease,
            LeaseAnalytics,
            LeaseStatusStats,
            Payment,
            PaymentMethod,
            PaymentStatus,
            RecordPayment,
            UpdatePaymentStatus,
            PaymentPage,
            PaginationMeta,
            UploadedFile,
            upload_handler::UploadForm,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Landlord accounts and sessions"),
        (name = "Properties", description = "Owned properties"),
        (name = "Units", description = "Rentable units within a property"),
        (name = "Tenants", description = "Tenant records"),
        (name = "Leases", description = "Lease lifecycle and analytics"),
        (name = "Payments", description = "Rent payment ledger"),
        (name = "Uploads", description = "Listing images")
    )
)]
pub struct ApiDoc;

/// Registers the cookie and Bearer session schemes
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE_NAME))),
            );
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Session token returned by /auth/signin"))
                        .build(),
                ),
            );
        }
    }
}
