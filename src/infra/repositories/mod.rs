//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.
//! Owner scoping is part of every query that takes an `owner_id`.

pub(crate) mod entities;
mod lease_repository;
mod payment_repository;
mod property_repository;
mod tenant_repository;
mod unit_repository;
mod user_repository;

pub use lease_repository::{LeaseRepository, LeaseStore};
pub use payment_repository::{PaymentRepository, PaymentStore};
pub use property_repository::{PropertyRepository, PropertyStore};
pub use tenant_repository::{TenantRepository, TenantStore};
pub use unit_repository::{UnitRepository, UnitStore};
pub use user_repository::{UserRepository, UserStore};

pub(crate) use lease_repository::{lease_update_model, leases_of_owner, owned_lease};
pub(crate) use tenant_repository::owned_tenant;
pub(crate) use unit_repository::{owned_unit, units_of_owner};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use lease_repository::MockLeaseRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use payment_repository::MockPaymentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use property_repository::MockPropertyRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use tenant_repository::MockTenantRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use unit_repository::MockUnitRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
