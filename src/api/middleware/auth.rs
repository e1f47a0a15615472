//! Session middleware.
//!
//! The token is read from the `session` cookie first, then from an
//! `Authorization: Bearer` header.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::api::AppState;
use crate::config::{BEARER_TOKEN_PREFIX, SESSION_COOKIE_NAME};
use crate::errors::AppError;

/// Authenticated landlord; every owner-scoped operation receives its `id`.
#[derive(Clone, Debug)]
pub struct CurrentOwner {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

/// Session token carried by the request, if any.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(SESSION_COOKIE_NAME) {
        return Some(cookie.value().to_string());
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .map(str::to_string)
}

/// Verifies the session and injects the `CurrentOwner` into the request extensions.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = session_token(request.headers()).ok_or(AppError::Unauthorized)?;
    let claims = state.auth_service.verify_token(&token)?;

    request.extensions_mut().insert(CurrentOwner {
        id: claims.sub,
        email: claims.email,
        name: claims.name,
    });

    Ok(next.run(request).await)
}
