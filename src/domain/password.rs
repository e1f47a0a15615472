//! Landlord account passwords, stored as argon2id PHC strings.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::config::MIN_PASSWORD_LENGTH;
use crate::errors::{AppError, AppResult};

/// Salted password hash. Never holds the plain text.
#[derive(Clone)]
pub struct Password(String);

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

impl Password {
    /// Hash a sign-up password after checking its length.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        if plain_text.chars().count() < MIN_PASSWORD_LENGTH as usize {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map(|phc| Self(phc.to_string()))
            .map_err(|e| AppError::internal(format!("Password hashing failed: {}", e)))
    }

    pub fn from_hash(hash: String) -> Self {
        Self(hash)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// A stored value that is not a PHC string never verifies.
    pub fn verify(&self, attempt: &str) -> bool {
        match PasswordHash::new(&self.0) {
            Ok(parsed) => Argon2::default()
                .verify_password(attempt.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_attempts() {
        let password = Password::new("paupahan-2024").unwrap();

        assert!(password.verify("paupahan-2024"));
        assert!(!password.verify("Paupahan-2024"));
    }

    #[test]
    fn test_stored_hash_reloads() {
        let stored = Password::new("sampaguita").unwrap().into_string();
        assert!(stored.starts_with("$argon2id$"));

        assert!(Password::from_hash(stored).verify("sampaguita"));
    }

    #[test]
    fn test_salts_differ_per_hash() {
        let first = Password::new("kalamansi").unwrap();
        let second = Password::new("kalamansi").unwrap();

        assert_ne!(first.as_str(), second.as_str());
    }

    #[test]
    fn test_minimum_length() {
        let err = Password::new("12345").unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 6 characters");
        assert!(Password::new("123456").is_ok());
    }

    #[test]
    fn test_garbage_hash_never_verifies() {
        let stored = Password::from_hash("not-a-phc-string".to_string());
        assert!(!stored.verify("anything"));
        assert_eq!(format!("{:?}", stored), "Password([REDACTED])");
    }
}
