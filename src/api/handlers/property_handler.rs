//! Property handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Extension, Router,
};
use uuid::Uuid;

use super::{tenant_handler, unit_handler};
use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentOwner;
use crate::api::AppState;
use crate::domain::{Property, PropertyInput};
use crate::errors::AppResult;
use crate::types::NoContent;

/// Property routes, including the per-property unit and tenant listings
pub fn property_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_properties).post(create_property))
        .route(
            "/:id",
            get(get_property).put(update_property).delete(delete_property),
        )
        .route(
            "/:id/units",
            get(unit_handler::list_property_units).post(unit_handler::create_unit),
        )
        .route("/:id/tenants", get(tenant_handler::list_property_tenants))
}

/// List the owner's properties, newest first
#[utoipa::path(
    get,
    path = "/properties",
    tag = "Properties",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses(
        (status = 200, description = "Owned properties", body = Vec<Property>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_properties(
    State(state): State<AppState>,
    Extension(owner): Extension<CurrentOwner>,
) -> AppResult<Json<Vec<Property>>> {
    let properties = state.property_service.list_properties(owner.id).await?;
    Ok(Json(properties))
}

/// Create a property
#[utoipa::path(
    post,
    path = "/properties",
    tag = "Properties",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    request_body = PropertyInput,
    responses(
        (status = 201, description = "Property created", body = Property),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_property(
    State(state): State<AppState>,
    Extension(owner): Extension<CurrentOwner>,
    ValidatedJson(payload): ValidatedJson<PropertyInput>,
) -> AppResult<(StatusCode, Json<Property>)> {
    let property = state
        .property_service
        .create_property(owner.id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(property)))
}

#[utoipa::path(
    get,
    path = "/properties/{id}",
    tag = "Properties",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Property ID")),
    responses(
        (status = 200, description = "Property found", body = Property),
        (status = 404, description = "Property not found or unauthorized")
    )
)]
pub async fn get_property(
    State(state): State<AppState>,
    Extension(owner): Extension<CurrentOwner>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Property>> {
    let property = state.property_service.get_property(owner.id, id).await?;
    Ok(Json(property))
}

/// Replace every field of a property
#[utoipa::path(
    put,
    path = "/properties/{id}",
    tag = "Properties",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Property ID")),
    request_body = PropertyInput,
    responses(
        (status = 200, description = "Property updated", body = Property),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Property not found or unauthorized")
    )
)]
pub async fn update_property(
    State(state): State<AppState>,
    Extension(owner): Extension<CurrentOwner>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<PropertyInput>,
) -> AppResult<Json<Property>> {
    let property = state
        .property_service
        .update_property(owner.id, id, payload)
        .await?;
    Ok(Json(property))
}

/// Delete a property and everything under it
#[utoipa::path(
    delete,
    path = "/properties/{id}",
    tag = "Properties",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Property ID")),
    responses(
        (status = 204, description = "Property deleted"),
        (status = 404, description = "Property not found or unauthorized")
    )
)]
pub async fn delete_property(
    State(state): State<AppState>,
    Extension(owner): Extension<CurrentOwner>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state.property_service.delete_property(owner.id, id).await?;
    Ok(NoContent)
}
