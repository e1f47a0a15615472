//! Infrastructure layer - External systems integration
//!
//! - Database connections, migrations and repositories
//! - Unit of Work for transaction management
//! - Local file storage for uploads

pub mod db;
pub mod repositories;
pub mod storage;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    LeaseRepository, LeaseStore, PaymentRepository, PaymentStore, PropertyRepository,
    PropertyStore, TenantRepository, TenantStore, UnitRepository, UnitStore, UserRepository,
    UserStore,
};
pub use storage::{FileStorage, LocalFileStorage};
pub use unit_of_work::{
    Persistence, TransactionContext, TxFuture, TxLeaseRepository, TxTenantRepository,
    TxUnitRepository, UnitOfWork,
};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockLeaseRepository, MockPaymentRepository, MockPropertyRepository, MockTenantRepository,
    MockUnitRepository, MockUserRepository,
};
#[cfg(any(test, feature = "test-utils"))]
pub use storage::MockFileStorage;
