//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod lease;
pub mod payment;
pub mod property;
pub mod tenant;
pub mod unit;
pub mod user;

use crate::errors::{AppError, AppResult};

/// Decode a JSON string array column, tolerating legacy nulls.
pub(crate) fn string_list(value: Option<sea_orm::prelude::Json>) -> Vec<String> {
    value
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default()
}

/// Parse an enum stored as text, surfacing corrupt rows as internal errors.
pub(crate) fn parse_column<T: std::str::FromStr>(value: &str, column: &str) -> AppResult<T> {
    value
        .parse()
        .map_err(|_| AppError::internal(format!("Unexpected {} value in storage: {}", column, value)))
}
