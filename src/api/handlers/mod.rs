//! HTTP request handlers.

pub mod auth_handler;
pub mod lease_handler;
pub mod payment_handler;
pub mod property_handler;
pub mod tenant_handler;
pub mod unit_handler;
pub mod upload_handler;

pub use auth_handler::auth_routes;
pub use lease_handler::lease_routes;
pub use payment_handler::payment_routes;
pub use property_handler::property_routes;
pub use tenant_handler::tenant_routes;
pub use unit_handler::unit_routes;
