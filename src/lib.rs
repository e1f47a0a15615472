//! Landra - property management for landlords.
//!
//! Landlords own properties, properties hold units and tenants, and leases
//! tie a tenant to a unit for a date range. The lease lifecycle keeps two
//! rules: active leases on a unit never overlap, and a unit's availability
//! follows its active lease.
//!
//! # Architecture Layers
//!
//! - **cli** / **commands**: `serve` and `migrate`
//! - **config**: environment configuration and constants
//! - **domain**: entities, payload validation, analytics, due dates
//! - **services**: owner-scoped use cases, including the lease manager
//! - **infra**: SeaORM persistence, unit of work, file storage
//! - **api**: axum handlers, session middleware, routes
//! - **types**: pagination and shared responses
//! - **errors**: centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! landra migrate up
//! landra serve --port 3000
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

pub use api::AppState;
pub use config::Config;
pub use domain::{Lease, LeaseStatus, Password, User};
pub use errors::{AppError, AppResult};
