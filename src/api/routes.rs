//! Application route configuration.

use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::{services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    auth_handler, auth_routes, lease_routes, payment_routes, property_routes, tenant_routes,
    unit_routes, upload_handler,
};
use super::middleware::session_middleware;
use super::openapi::ApiDoc;
use super::AppState;
use crate::config::MULTIPART_OVERHEAD_BYTES;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let session = middleware::from_fn_with_state(state.clone(), session_middleware);

    // Everything here is owner-scoped
    let protected = Router::new()
        .route("/auth/me", get(auth_handler::me))
        .nest("/properties", property_routes())
        .nest("/units", unit_routes())
        .nest("/tenants", tenant_routes())
        .nest("/leases", lease_routes())
        .nest("/payments", payment_routes())
        .route_layer(session.clone());

    // POST stores a new image, anything else is served from disk
    let uploads = Router::new()
        .route(
            "/",
            post(upload_handler::upload_image)
                .route_layer(session)
                .layer(DefaultBodyLimit::max(
                    state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES,
                )),
        )
        .fallback_service(ServeDir::new(&state.config.upload_dir))
        .with_state(state.clone());

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/auth", auth_routes())
        .merge(protected)
        .nest_service("/uploads", uploads)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Welcome to Landra"
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: ServiceStatus,
}

#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint with database connectivity check
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.database.ping().await {
        Ok(_) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                database: ServiceStatus {
                    status: "healthy",
                    error: None,
                },
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy",
                    database: ServiceStatus {
                        status: "unhealthy",
                        error: Some(e.to_string()),
                    },
                }),
            )
        }
    }
}
