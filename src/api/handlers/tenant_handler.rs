//! Tenant handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Extension, Router,
};
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentOwner;
use crate::api::AppState;
use crate::domain::{CreateTenant, Tenant, TenantFilters, UpdateTenant};
use crate::errors::AppResult;
use crate::types::NoContent;

pub fn tenant_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tenants).post(create_tenant))
        .route(
            "/:id",
            get(get_tenant).patch(update_tenant).delete(delete_tenant),
        )
}

/// List tenants, optionally filtered by property and a search term
#[utoipa::path(
    get,
    path = "/tenants",
    tag = "Tenants",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    params(TenantFilters),
    responses(
        (status = 200, description = "Matching tenants, newest first", body = Vec<Tenant>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_tenants(
    State(state): State<AppState>,
    Extension(owner): Extension<CurrentOwner>,
    Query(filters): Query<TenantFilters>,
) -> AppResult<Json<Vec<Tenant>>> {
    let tenants = state.tenant_service.list_tenants(owner.id, filters).await?;
    Ok(Json(tenants))
}

#[utoipa::path(
    get,
    path = "/properties/{id}/tenants",
    tag = "Tenants",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Property ID")),
    responses(
        (status = 200, description = "Tenants of the property", body = Vec<Tenant>),
        (status = 404, description = "Property not found or unauthorized")
    )
)]
pub async fn list_property_tenants(
    State(state): State<AppState>,
    Extension(owner): Extension<CurrentOwner>,
    Path(property_id): Path<Uuid>,
) -> AppResult<Json<Vec<Tenant>>> {
    let tenants = state
        .tenant_service
        .list_for_property(owner.id, property_id)
        .await?;
    Ok(Json(tenants))
}

/// Register a tenant under an owned property
#[utoipa::path(
    post,
    path = "/tenants",
    tag = "Tenants",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    request_body = CreateTenant,
    responses(
        (status = 201, description = "Tenant created", body = Tenant),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Property not found or unauthorized"),
        (status = 409, description = "Email already used by another tenant")
    )
)]
pub async fn create_tenant(
    State(state): State<AppState>,
    Extension(owner): Extension<CurrentOwner>,
    ValidatedJson(payload): ValidatedJson<CreateTenant>,
) -> AppResult<(StatusCode, Json<Tenant>)> {
    let tenant = state.tenant_service.create_tenant(owner.id, payload).await?;
    Ok((StatusCode::CREATED, Json(tenant)))
}

#[utoipa::path(
    get,
    path = "/tenants/{id}",
    tag = "Tenants",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Tenant ID")),
    responses(
        (status = 200, description = "Tenant found", body = Tenant),
        (status = 404, description = "Tenant not found or unauthorized")
    )
)]
pub async fn get_tenant(
    State(state): State<AppState>,
    Extension(owner): Extension<CurrentOwner>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Tenant>> {
    let tenant = state.tenant_service.get_tenant(owner.id, id).await?;
    Ok(Json(tenant))
}

/// Partially update a tenant
#[utoipa::path(
    patch,
    path = "/tenants/{id}",
    tag = "Tenants",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Tenant ID")),
    request_body = UpdateTenant,
    responses(
        (status = 200, description = "Tenant updated", body = Tenant),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Tenant not found or unauthorized"),
        (status = 409, description = "Email already used by another tenant")
    )
)]
pub async fn update_tenant(
    State(state): State<AppState>,
    Extension(owner): Extension<CurrentOwner>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateTenant>,
) -> AppResult<Json<Tenant>> {
    let tenant = state
        .tenant_service
        .update_tenant(owner.id, id, payload)
        .await?;
    Ok(Json(tenant))
}

/// Delete a tenant without an active lease
#[utoipa::path(
    delete,
    path = "/tenants/{id}",
    tag = "Tenants",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Tenant ID")),
    responses(
        (status = 204, description = "Tenant deleted"),
        (status = 404, description = "Tenant not found or unauthorized"),
        (status = 409, description = "Tenant has an active lease")
    )
)]
pub async fn delete_tenant(
    State(state): State<AppState>,
    Extension(owner): Extension<CurrentOwner>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state.tenant_service.delete_tenant(owner.id, id).await?;
    Ok(NoContent)
}
