//! Authentication handlers.
//!
//! Sign-up and sign-in set the `session` cookie and also return the token
//! in the body for Bearer clients.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::post,
    Extension, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentOwner;
use crate::api::AppState;
use crate::config::{Config, SESSION_COOKIE_NAME};
use crate::domain::UserResponse;
use crate::errors::AppResult;
use crate::services::SessionResponse;
use crate::types::MessageResponse;

/// Account sign-up request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignUpRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    #[schema(example = "Maria Santos")]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    #[schema(example = "maria@example.ph")]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "kalamansi", min_length = 6)]
    pub password: String,
    #[schema(example = "+63 917 123 4567")]
    pub phone: Option<String>,
}

/// Account sign-in request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignInRequest {
    #[validate(email(message = "Invalid email address"))]
    #[schema(example = "maria@example.ph")]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "kalamansi")]
    pub password: String,
}

/// Public authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .route("/signout", post(signout))
}

fn session_cookie(token: String, config: &Config) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::hours(config.session_expiration_hours))
        .secure(config.secure_cookies)
        .build()
}

/// Create an account and sign in
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "Authentication",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created, session cookie set", body = SessionResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(payload): ValidatedJson<SignUpRequest>,
) -> AppResult<(StatusCode, CookieJar, Json<SessionResponse>)> {
    let session = state
        .auth_service
        .register(payload.email, payload.password, payload.name, payload.phone)
        .await?;

    let jar = jar.add(session_cookie(session.access_token.clone(), &state.config));
    Ok((StatusCode::CREATED, jar, Json(session)))
}

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "/auth/signin",
    tag = "Authentication",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in, session cookie set", body = SessionResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid email or password")
    )
)]
pub async fn signin(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(payload): ValidatedJson<SignInRequest>,
) -> AppResult<(CookieJar, Json<SessionResponse>)> {
    let session = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    let jar = jar.add(session_cookie(session.access_token.clone(), &state.config));
    Ok((jar, Json(session)))
}

/// Clear the session cookie
#[utoipa::path(
    post,
    path = "/auth/signout",
    tag = "Authentication",
    responses((status = 200, description = "Signed out", body = MessageResponse))
)]
pub async fn signout(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE_NAME).path("/"));
    (jar, Json(MessageResponse::new("Signed out successfully")))
}

/// Current signed-in account
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "Authentication",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current account", body = UserResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(
    State(state): State<AppState>,
    Extension(owner): Extension<CurrentOwner>,
) -> AppResult<Json<UserResponse>> {
    let user = state.auth_service.current_user(owner.id).await?;
    Ok(Json(user))
}
