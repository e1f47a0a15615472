//! Authentication service - landlord accounts and signed sessions.
//!
//! Passwords go through the domain `Password` value object; sessions are
//! HS256 JWTs carried in a cookie or a Bearer header.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, SECONDS_PER_HOUR};
use crate::domain::{NewUser, Password, User, UserResponse};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Argon2id hash of a random string; verifying against it always fails.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$5sX0Xn0p9r8vQm2h6l7Xv3Hc0jH1t8Zq2yYb0dQ3xkA";

/// Session token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: Uuid,
    pub email: String,
    pub name: String,
    pub exp: i64,
    pub iat: i64,
}

/// Issued session returned by sign-up and sign-in
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionResponse {
    pub user: UserResponse,
    /// Same token as the `session` cookie, for Bearer clients
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Lifetime in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account and open a session for it
    async fn register(
        &self,
        email: String,
        password: String,
        name: String,
        phone: Option<String>,
    ) -> AppResult<SessionResponse>;

    /// Verify credentials and open a session
    async fn login(&self, email: String, password: String) -> AppResult<SessionResponse>;

    /// Decode and check a session token
    fn verify_token(&self, token: &str) -> AppResult<SessionClaims>;

    /// Account behind a verified session
    async fn current_user(&self, user_id: Uuid) -> AppResult<UserResponse>;
}

fn issue_session(user: User, config: &Config) -> AppResult<SessionResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.session_expiration_hours);

    let claims = SessionClaims {
        sub: user.id,
        email: user.email.clone(),
        name: user.name.clone(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.session_secret_bytes()),
    )?;

    Ok(SessionResponse {
        user: UserResponse::from(user),
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: config.session_expiration_hours * SECONDS_PER_HOUR,
    })
}

pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(
        &self,
        email: String,
        password: String,
        name: String,
        phone: Option<String>,
    ) -> AppResult<SessionResponse> {
        let email = email.trim().to_lowercase();
        if self.uow.users().find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("User with this email already exists"));
        }

        let password_hash = Password::new(&password)?.into_string();
        let user = self
            .uow
            .users()
            .create(NewUser {
                email,
                password_hash,
                name: name.trim().to_string(),
                phone: phone.map(|p| p.trim().to_string()).filter(|p| !p.is_empty()),
            })
            .await?;

        tracing::info!(user_id = %user.id, "Account created");
        issue_session(user, &self.config)
    }

    async fn login(&self, email: String, password: String) -> AppResult<SessionResponse> {
        let user = self
            .uow
            .users()
            .find_by_email(&email.trim().to_lowercase())
            .await?;

        // Unknown emails still pay for a hash verification.
        let stored = Password::from_hash(
            user.as_ref()
                .map(|u| u.password_hash.clone())
                .unwrap_or_else(|| DUMMY_HASH.to_string()),
        );
        let password_valid = stored.verify(&password);

        match user {
            Some(user) if password_valid => issue_session(user, &self.config),
            _ => Err(AppError::InvalidCredentials),
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<SessionClaims> {
        let token_data = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.config.session_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    async fn current_user(&self, user_id: Uuid) -> AppResult<UserResponse> {
        self.uow
            .users()
            .find_by_id(user_id)
            .await?
            .map(UserResponse::from)
            .ok_or_not_owned("User")
    }
}
