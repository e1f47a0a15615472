//! Payment handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch},
    Extension, Router,
};
use uuid::Uuid;

use crate::api::extractors::{JsonPayload, ValidatedJson};
use crate::api::middleware::CurrentOwner;
use crate::api::AppState;
use crate::domain::{Payment, RecordPayment, UpdatePaymentStatus};
use crate::errors::AppResult;
use crate::types::{Paginated, PaginationParams, PaymentPage};

pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_payments).post(record_payment))
        .route("/:id/status", patch(update_payment_status))
}

/// Paginated payments across all of the owner's leases, newest first
#[utoipa::path(
    get,
    path = "/payments",
    tag = "Payments",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of payments", body = PaymentPage),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_payments(
    State(state): State<AppState>,
    Extension(owner): Extension<CurrentOwner>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<Payment>>> {
    let page = state.payment_service.list_payments(owner.id, params).await?;
    Ok(Json(page))
}

/// Record a rent payment against an owned lease
#[utoipa::path(
    post,
    path = "/payments",
    tag = "Payments",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    request_body = RecordPayment,
    responses(
        (status = 201, description = "Payment recorded", body = Payment),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Lease not found or unauthorized")
    )
)]
pub async fn record_payment(
    State(state): State<AppState>,
    Extension(owner): Extension<CurrentOwner>,
    ValidatedJson(payload): ValidatedJson<RecordPayment>,
) -> AppResult<(StatusCode, Json<Payment>)> {
    let payment = state
        .payment_service
        .record_payment(owner.id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

/// Mark a payment pending or confirmed
#[utoipa::path(
    patch,
    path = "/payments/{id}/status",
    tag = "Payments",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Payment ID")),
    request_body = UpdatePaymentStatus,
    responses(
        (status = 200, description = "Payment updated", body = Payment),
        (status = 404, description = "Payment not found or unauthorized")
    )
)]
pub async fn update_payment_status(
    State(state): State<AppState>,
    Extension(owner): Extension<CurrentOwner>,
    Path(id): Path<Uuid>,
    JsonPayload(payload): JsonPayload<UpdatePaymentStatus>,
) -> AppResult<Json<Payment>> {
    let payment = state
        .payment_service
        .update_status(owner.id, id, payload.status)
        .await?;
    Ok(Json(payment))
}
