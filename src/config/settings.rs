//! Application settings loaded from environment variables.

use std::env;
use std::path::PathBuf;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_EXPIRING_LEASE_WINDOW_DAYS, DEFAULT_MAX_UPLOAD_BYTES,
    DEFAULT_SESSION_EXPIRATION_HOURS, DEFAULT_UPLOAD_DIR, MIN_SESSION_SECRET_LENGTH,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    session_secret: String,
    pub session_expiration_hours: i64,
    pub secure_cookies: bool,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub expiring_lease_window_days: i64,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("session_secret", &"[REDACTED]")
            .field("session_expiration_hours", &self.session_expiration_hours)
            .field("secure_cookies", &self.secure_cookies)
            .field("upload_dir", &self.upload_dir)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("expiring_lease_window_days", &self.expiring_lease_window_days)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if SESSION_SECRET is missing in a release build or is too short.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let session_secret = env::var("SESSION_SECRET").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                tracing::warn!("SESSION_SECRET not set, using insecure default for development");
                "dev-session-secret-minimum-32-chars!".to_string()
            } else {
                panic!("SESSION_SECRET environment variable must be set in production");
            }
        });

        if session_secret.len() < MIN_SESSION_SECRET_LENGTH {
            panic!(
                "SESSION_SECRET must be at least {} characters long",
                MIN_SESSION_SECRET_LENGTH
            );
        }

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            session_secret,
            session_expiration_hours: parse_var("SESSION_EXPIRATION_HOURS")
                .unwrap_or(DEFAULT_SESSION_EXPIRATION_HOURS),
            secure_cookies: parse_var("SECURE_COOKIES").unwrap_or(false),
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_UPLOAD_DIR)),
            max_upload_bytes: parse_var("MAX_UPLOAD_BYTES").unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            expiring_lease_window_days: parse_var("EXPIRING_LEASE_WINDOW_DAYS")
                .unwrap_or(DEFAULT_EXPIRING_LEASE_WINDOW_DAYS),
        }
    }

    /// Configuration for tests and embedded use, with an explicit database URL and secret.
    pub fn for_database(database_url: impl Into<String>, session_secret: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            session_secret: session_secret.into(),
            session_expiration_hours: DEFAULT_SESSION_EXPIRATION_HOURS,
            secure_cookies: false,
            upload_dir: env::temp_dir().join("landra-uploads"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            expiring_lease_window_days: DEFAULT_EXPIRING_LEASE_WINDOW_DAYS,
        }
    }

    /// Get session secret bytes for token signing/verification.
    pub fn session_secret_bytes(&self) -> &[u8] {
        self.session_secret.as_bytes()
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
