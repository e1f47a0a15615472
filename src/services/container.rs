//! Service Container - Centralized service access.
//!
//! Wires every service over one shared `Persistence` unit of work.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, LeaseManager, LeaseService, PaymentManager, PaymentService,
    PropertyManager, PropertyService, TenantManager, TenantService, UnitManager, UnitService,
    UploadService, Uploader,
};
use crate::config::Config;
use crate::infra::{LocalFileStorage, Persistence};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn properties(&self) -> Arc<dyn PropertyService>;

    fn units(&self) -> Arc<dyn UnitService>;

    fn tenants(&self) -> Arc<dyn TenantService>;

    fn leases(&self) -> Arc<dyn LeaseService>;

    fn payments(&self) -> Arc<dyn PaymentService>;

    fn uploads(&self) -> Arc<dyn UploadService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    property_service: Arc<dyn PropertyService>,
    unit_service: Arc<dyn UnitService>,
    tenant_service: Arc<dyn TenantService>,
    lease_service: Arc<dyn LeaseService>,
    payment_service: Arc<dyn PaymentService>,
    upload_service: Arc<dyn UploadService>,
}

impl Services {
    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let storage = Arc::new(LocalFileStorage::new(config.upload_dir.clone()));

        Self {
            property_service: Arc::new(PropertyManager::new(uow.clone())),
            unit_service: Arc::new(UnitManager::new(uow.clone())),
            tenant_service: Arc::new(TenantManager::new(uow.clone())),
            lease_service: Arc::new(LeaseManager::new(uow.clone())),
            payment_service: Arc::new(PaymentManager::new(uow.clone())),
            upload_service: Arc::new(Uploader::new(storage, config.max_upload_bytes)),
            auth_service: Arc::new(Authenticator::new(uow, config)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn properties(&self) -> Arc<dyn PropertyService> {
        self.property_service.clone()
    }

    fn units(&self) -> Arc<dyn UnitService> {
        self.unit_service.clone()
    }

    fn tenants(&self) -> Arc<dyn TenantService> {
        self.tenant_service.clone()
    }

    fn leases(&self) -> Arc<dyn LeaseService> {
        self.lease_service.clone()
    }

    fn payments(&self) -> Arc<dyn PaymentService> {
        self.payment_service.clone()
    }

    fn uploads(&self) -> Arc<dyn UploadService> {
        self.upload_service.clone()
    }
}
