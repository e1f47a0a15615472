//! API middleware.

mod auth;

pub use auth::{session_middleware, session_token, CurrentOwner};
