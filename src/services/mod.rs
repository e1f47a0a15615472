//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. Every operation takes the authenticated
//! owner's id explicitly; nothing reads identity from global state.
//!
//! All services use the Unit of Work pattern for centralized repository
//! access and transaction management.

mod auth_service;
pub mod container;
mod lease_service;
mod payment_service;
mod property_service;
mod tenant_service;
mod unit_service;
mod upload_service;

pub use container::{ServiceContainer, Services};

pub use auth_service::{AuthService, Authenticator, SessionClaims, SessionResponse};
pub use lease_service::{LeaseManager, LeaseService};
pub use payment_service::{PaymentManager, PaymentService};
pub use property_service::{PropertyManager, PropertyService};
pub use tenant_service::{TenantManager, TenantService};
pub use unit_service::{UnitManager, UnitService};
pub use upload_service::{UploadService, UploadedFile, Uploader};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
