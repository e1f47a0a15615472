//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    AuthService, LeaseService, PaymentService, PropertyService, ServiceContainer, Services,
    TenantService, UnitService, UploadService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub property_service: Arc<dyn PropertyService>,
    pub unit_service: Arc<dyn UnitService>,
    pub tenant_service: Arc<dyn TenantService>,
    pub lease_service: Arc<dyn LeaseService>,
    pub payment_service: Arc<dyn PaymentService>,
    pub upload_service: Arc<dyn UploadService>,
    /// Database connection, used by the health check
    pub database: Arc<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Create application state from a connected database and config.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config.clone());
        Self::from_container(&container, database, config)
    }

    /// Create application state from any service container (e.g. a mock).
    pub fn from_container(
        container: &dyn ServiceContainer,
        database: Arc<Database>,
        config: Config,
    ) -> Self {
        Self {
            auth_service: container.auth(),
            property_service: container.properties(),
            unit_service: container.units(),
            tenant_service: container.tenants(),
            lease_service: container.leases(),
            payment_service: container.payments(),
            upload_service: container.uploads(),
            database,
            config: Arc::new(config),
        }
    }
}
