//! Lease handlers.
//!
//! Create and update bodies go through `JsonPayload`; their checks run in
//! the domain layer so the first failing field is the one reported.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::api::extractors::JsonPayload;
use crate::api::middleware::CurrentOwner;
use crate::api::AppState;
use crate::domain::{
    CreateLease, ExpiringLease, Lease, LeaseAnalytics, LeaseDetails, LeaseFilters, LeaseSummary,
    Payment, TerminateLease, UpdateLease,
};
use crate::errors::{AppError, AppResult};

/// Expiring lease window
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExpiringParams {
    /// Days ahead to look, 1..=365; defaults to the configured window
    #[param(example = 60)]
    pub days: Option<i64>,
}

pub fn lease_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_leases).post(create_lease))
        .route("/active", get(list_active_leases))
        .route("/expiring", get(list_expiring_leases))
        .route("/analytics", get(get_lease_analytics))
        .route("/:id", get(get_lease).patch(update_lease))
        .route("/:id/terminate", post(terminate_lease))
        .route("/:id/payments", get(list_lease_payments))
}

/// List leases with their unit, tenant and property
#[utoipa::path(
    get,
    path = "/leases",
    tag = "Leases",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    params(LeaseFilters),
    responses(
        (status = 200, description = "Matching leases, newest first", body = Vec<LeaseSummary>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_leases(
    State(state): State<AppState>,
    Extension(owner): Extension<CurrentOwner>,
    Query(filters): Query<LeaseFilters>,
) -> AppResult<Json<Vec<LeaseSummary>>> {
    let leases = state.lease_service.list_leases(owner.id, filters).await?;
    Ok(Json(leases))
}

/// Create a lease; an active lease takes its unit off the market
#[utoipa::path(
    post,
    path = "/leases",
    tag = "Leases",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    request_body = CreateLease,
    responses(
        (status = 201, description = "Lease created", body = Lease),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Unit or tenant not found or unauthorized"),
        (status = 409, description = "Overlapping active lease on the unit")
    )
)]
pub async fn create_lease(
    State(state): State<AppState>,
    Extension(owner): Extension<CurrentOwner>,
    JsonPayload(payload): JsonPayload<CreateLease>,
) -> AppResult<(StatusCode, Json<Lease>)> {
    let lease = state.lease_service.create_lease(owner.id, payload).await?;
    Ok((StatusCode::CREATED, Json(lease)))
}

#[utoipa::path(
    get,
    path = "/leases/active",
    tag = "Leases",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses((status = 200, description = "Active leases", body = Vec<LeaseSummary>))
)]
pub async fn list_active_leases(
    State(state): State<AppState>,
    Extension(owner): Extension<CurrentOwner>,
) -> AppResult<Json<Vec<LeaseSummary>>> {
    let leases = state.lease_service.list_active_leases(owner.id).await?;
    Ok(Json(leases))
}

/// Active leases ending soon, closest first
#[utoipa::path(
    get,
    path = "/leases/expiring",
    tag = "Leases",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    params(ExpiringParams),
    responses(
        (status = 200, description = "Expiring leases", body = Vec<ExpiringLease>),
        (status = 400, description = "Days out of range")
    )
)]
pub async fn list_expiring_leases(
    State(state): State<AppState>,
    Extension(owner): Extension<CurrentOwner>,
    Query(params): Query<ExpiringParams>,
) -> AppResult<Json<Vec<ExpiringLease>>> {
    let days = params
        .days
        .unwrap_or(state.config.expiring_lease_window_days);
    let leases = state
        .lease_service
        .list_expiring_leases(owner.id, days)
        .await?;
    Ok(Json(leases))
}

/// Occupancy and revenue for the owner's portfolio
#[utoipa::path(
    get,
    path = "/leases/analytics",
    tag = "Leases",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses((status = 200, description = "Lease analytics", body = LeaseAnalytics))
)]
pub async fn get_lease_analytics(
    State(state): State<AppState>,
    Extension(owner): Extension<CurrentOwner>,
) -> AppResult<Json<LeaseAnalytics>> {
    let analytics = state.lease_service.get_lease_analytics(owner.id).await?;
    Ok(Json(analytics))
}

#[utoipa::path(
    get,
    path = "/leases/{id}",
    tag = "Leases",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Lease ID")),
    responses(
        (status = 200, description = "Lease with its next due date", body = LeaseDetails),
        (status = 404, description = "Lease not found or unauthorized")
    )
)]
pub async fn get_lease(
    State(state): State<AppState>,
    Extension(owner): Extension<CurrentOwner>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<LeaseDetails>> {
    let lease = state.lease_service.get_lease(owner.id, id).await?;
    Ok(Json(lease))
}

/// Partially update a lease
#[utoipa::path(
    patch,
    path = "/leases/{id}",
    tag = "Leases",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Lease ID")),
    request_body = UpdateLease,
    responses(
        (status = 200, description = "Lease updated", body = Lease),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Lease not found or unauthorized"),
        (status = 409, description = "Overlapping active lease on the unit")
    )
)]
pub async fn update_lease(
    State(state): State<AppState>,
    Extension(owner): Extension<CurrentOwner>,
    Path(id): Path<Uuid>,
    JsonPayload(payload): JsonPayload<UpdateLease>,
) -> AppResult<Json<Lease>> {
    let lease = state
        .lease_service
        .update_lease(owner.id, id, payload)
        .await?;
    Ok(Json(lease))
}

/// Terminate a lease and free its unit. The body is optional.
#[utoipa::path(
    post,
    path = "/leases/{id}/terminate",
    tag = "Leases",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Lease ID")),
    request_body(content = TerminateLease, description = "Optional; the date defaults to today"),
    responses(
        (status = 200, description = "Lease terminated", body = Lease),
        (status = 400, description = "Invalid termination date"),
        (status = 404, description = "Lease not found or unauthorized")
    )
)]
pub async fn terminate_lease(
    State(state): State<AppState>,
    Extension(owner): Extension<CurrentOwner>,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> AppResult<Json<Lease>> {
    let payload: TerminateLease = if body.is_empty() {
        TerminateLease::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| AppError::validation(e.to_string()))?
    };

    let lease = state
        .lease_service
        .terminate_lease(owner.id, id, payload.termination_date()?)
        .await?;
    Ok(Json(lease))
}

/// Payments recorded against a lease, by payment date
#[utoipa::path(
    get,
    path = "/leases/{id}/payments",
    tag = "Payments",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Lease ID")),
    responses(
        (status = 200, description = "Lease payments", body = Vec<Payment>),
        (status = 404, description = "Lease not found or unauthorized")
    )
)]
pub async fn list_lease_payments(
    State(state): State<AppState>,
    Extension(owner): Extension<CurrentOwner>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<Payment>>> {
    let payments = state.payment_service.list_for_lease(owner.id, id).await?;
    Ok(Json(payments))
}
