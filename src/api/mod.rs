//! HTTP surface. Handlers stay thin: they authenticate through the session
//! middleware, decode the payload and hand off to a service.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use state::AppState;
