//! Manufacturer management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    models::{
        manufacturer::{
            CreateManufacturer, Manufacturer, ManufacturerDetails, ManufacturerDirectory,
            UpdateManufacturer,
        },
        user::Role,
    },
    AppState,
};

use super::AuthenticatedUser;

/// List active manufacturers (admin or staff)
#[utoipa::path(
    get,
    path = "/manufacturers",
    tag = "manufacturers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active manufacturers", body = [Manufacturer]),
        (status = 403, description = "Admin or staff access required")
    )
)]
pub async fn list_manufacturers(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Manufacturer>>> {
    claims.require_role(&[Role::Admin, Role::Staff])?;
    let manufacturers = state.services.manufacturers.list().await?;
    Ok(Json(manufacturers))
}

/// Contact directory grouped by product line (admin)
#[utoipa::path(
    get,
    path = "/manufacturers/directory",
    tag = "manufacturers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Manufacturer directory", body = ManufacturerDirectory),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn get_directory(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<ManufacturerDirectory>> {
    claims.require_admin()?;
    let directory = state.services.manufacturers.directory().await?;
    Ok(Json(directory))
}

/// List active manufacturers of one product line (admin or staff)
#[utoipa::path(
    get,
    path = "/manufacturers/product-line/{product_line}",
    tag = "manufacturers",
    security(("bearer_auth" = [])),
    params(("product_line" = String, Path, description = "Product line name")),
    responses(
        (status = 200, description = "Manufacturers in the product line", body = [Manufacturer]),
        (status = 403, description = "Admin or staff access required")
    )
)]
pub async fn list_by_product_line(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(product_line): Path<String>,
) -> AppResult<Json<Vec<Manufacturer>>> {
    claims.require_role(&[Role::Admin, Role::Staff])?;
    let manufacturers = state
        .services
        .manufacturers
        .list_by_product_line(&product_line)
        .await?;
    Ok(Json(manufacturers))
}

/// Get one manufacturer with inventory usage (admin)
#[utoipa::path(
    get,
    path = "/manufacturers/{id}",
    tag = "manufacturers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Manufacturer id")),
    responses(
        (status = 200, description = "Manufacturer details", body = ManufacturerDetails),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Manufacturer not found")
    )
)]
pub async fn get_manufacturer(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ManufacturerDetails>> {
    claims.require_admin()?;
    let details = state.services.manufacturers.details(id).await?;
    Ok(Json(details))
}

/// Create a manufacturer (admin)
#[utoipa::path(
    post,
    path = "/manufacturers",
    tag = "manufacturers",
    security(("bearer_auth" = [])),
    request_body = CreateManufacturer,
    responses(
        (status = 201, description = "Manufacturer created", body = Manufacturer),
        (status = 403, description = "Admin access required"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_manufacturer(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateManufacturer>,
) -> AppResult<(StatusCode, Json<Manufacturer>)> {
    claims.require_admin()?;
    let manufacturer = state.services.manufacturers.create(&data).await?;
    Ok((StatusCode::CREATED, Json(manufacturer)))
}

/// Update a manufacturer (admin)
#[utoipa::path(
    put,
    path = "/manufacturers/{id}",
    tag = "manufacturers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Manufacturer id")),
    request_body = UpdateManufacturer,
    responses(
        (status = 200, description = "Manufacturer updated", body = Manufacturer),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Manufacturer not found"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn update_manufacturer(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateManufacturer>,
) -> AppResult<Json<Manufacturer>> {
    claims.require_admin()?;
    let manufacturer = state.services.manufacturers.update(id, &data).await?;
    Ok(Json(manufacturer))
}

/// Delete a manufacturer (admin). Refused while inventory references it.
#[utoipa::path(
    delete,
    path = "/manufacturers/{id}",
    tag = "manufacturers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Manufacturer id")),
    responses(
        (status = 200, description = "Manufacturer deleted"),
        (status = 400, description = "Manufacturer still has inventory items"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Manufacturer not found")
    )
)]
pub async fn delete_manufacturer(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Value>> {
    claims.require_admin()?;
    state.services.manufacturers.delete(id).await?;
    Ok(Json(json!({ "message": "Manufacturer deleted successfully" })))
}
