//! Domain layer - Landlord portfolio entities and the rules around them.
//!
//! Leases carry the interesting invariants: no two active leases on a unit
//! may overlap, and a unit's availability follows its active lease.
//! Everything here is storage-agnostic.

pub mod analytics;
pub mod lease;
pub mod money;
pub mod password;
pub mod payment;
pub mod property;
pub mod schedule;
pub mod tenant;
pub mod unit;
pub mod user;

pub use analytics::{LeaseAnalytics, LeaseStatusStats};
pub use lease::{
    CreateLease, DateRange, ExpiringLease, Lease, LeaseChanges, LeaseDetails, LeaseFilters,
    LeaseProperty, LeaseStatus, LeaseSummary, LeaseTenant, NewLease, TerminateLease, UpdateLease,
};
pub use password::Password;
pub use payment::{
    NewPayment, Payment, PaymentMethod, PaymentStatus, RecordPayment, UpdatePaymentStatus,
};
pub use property::{Property, PropertyInput};
pub use tenant::{CreateTenant, EmergencyContact, Tenant, TenantFilters, UpdateTenant};
pub use unit::{Unit, UnitFields, UnitInput, UnitWithProperty};
pub use user::{NewUser, User, UserResponse};
