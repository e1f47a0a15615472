//! Unit handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Extension, Router,
};
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentOwner;
use crate::api::AppState;
use crate::domain::{Unit, UnitInput, UnitWithProperty};
use crate::errors::AppResult;
use crate::types::NoContent;

pub fn unit_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_units))
        .route("/:id", get(get_unit).put(update_unit).delete(delete_unit))
}

/// List units across all of the owner's properties
#[utoipa::path(
    get,
    path = "/units",
    tag = "Units",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses(
        (status = 200, description = "Owned units with their property name", body = Vec<UnitWithProperty>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_units(
    State(state): State<AppState>,
    Extension(owner): Extension<CurrentOwner>,
) -> AppResult<Json<Vec<UnitWithProperty>>> {
    let units = state.unit_service.list_units(owner.id).await?;
    Ok(Json(units))
}

/// List a property's units by unit number
#[utoipa::path(
    get,
    path = "/properties/{id}/units",
    tag = "Units",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Property ID")),
    responses(
        (status = 200, description = "Units of the property", body = Vec<Unit>),
        (status = 404, description = "Property not found or unauthorized")
    )
)]
pub async fn list_property_units(
    State(state): State<AppState>,
    Extension(owner): Extension<CurrentOwner>,
    Path(property_id): Path<Uuid>,
) -> AppResult<Json<Vec<Unit>>> {
    let units = state
        .unit_service
        .list_for_property(owner.id, property_id)
        .await?;
    Ok(Json(units))
}

/// Add a unit to a property; new units start available
#[utoipa::path(
    post,
    path = "/properties/{id}/units",
    tag = "Units",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Property ID")),
    request_body = UnitInput,
    responses(
        (status = 201, description = "Unit created", body = Unit),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Property not found or unauthorized")
    )
)]
pub async fn create_unit(
    State(state): State<AppState>,
    Extension(owner): Extension<CurrentOwner>,
    Path(property_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UnitInput>,
) -> AppResult<(StatusCode, Json<Unit>)> {
    let unit = state
        .unit_service
        .create_unit(owner.id, property_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(unit)))
}

#[utoipa::path(
    get,
    path = "/units/{id}",
    tag = "Units",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Unit ID")),
    responses(
        (status = 200, description = "Unit found", body = Unit),
        (status = 404, description = "Unit not found or unauthorized")
    )
)]
pub async fn get_unit(
    State(state): State<AppState>,
    Extension(owner): Extension<CurrentOwner>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Unit>> {
    let unit = state.unit_service.get_unit(owner.id, id).await?;
    Ok(Json(unit))
}

#[utoipa::path(
    put,
    path = "/units/{id}",
    tag = "Units",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Unit ID")),
    request_body = UnitInput,
    responses(
        (status = 200, description = "Unit updated", body = Unit),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Unit not found or unauthorized")
    )
)]
pub async fn update_unit(
    State(state): State<AppState>,
    Extension(owner): Extension<CurrentOwner>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UnitInput>,
) -> AppResult<Json<Unit>> {
    let unit = state.unit_service.update_unit(owner.id, id, payload).await?;
    Ok(Json(unit))
}

#[utoipa::path(
    delete,
    path = "/units/{id}",
    tag = "Units",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Unit ID")),
    responses(
        (status = 204, description = "Unit deleted"),
        (status = 404, description = "Unit not found or unauthorized")
    )
)]
pub async fn delete_unit(
    State(state): State<AppState>,
    Extension(owner): Extension<CurrentOwner>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state.unit_service.delete_unit(owner.id, id).await?;
    Ok(NoContent)
}
