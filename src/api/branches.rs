//! Branch management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    models::{
        branch::{Branch, BranchDetails, BranchPublic, BranchSummary, CreateBranch, UpdateBranch},
        user::Role,
    },
    AppState,
};

use super::AuthenticatedUser;

/// List all branches with record counts (admin)
#[utoipa::path(
    get,
    path = "/branches",
    tag = "branches",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All branches", body = [BranchSummary]),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn list_branches(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<BranchSummary>>> {
    claims.require_admin()?;
    let branches = state.services.branches.list().await?;
    Ok(Json(branches))
}

/// List active branches for the customer-facing picker
#[utoipa::path(
    get,
    path = "/branches/public",
    tag = "branches",
    responses(
        (status = 200, description = "Active branches", body = [BranchPublic])
    )
)]
pub async fn list_public_branches(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<BranchPublic>>> {
    let branches = state.services.branches.list_public().await?;
    Ok(Json(branches))
}

/// Get one branch with its stock summary (admin, or staff of that branch)
#[utoipa::path(
    get,
    path = "/branches/{id}",
    tag = "branches",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Branch id")),
    responses(
        (status = 200, description = "Branch details", body = BranchDetails),
        (status = 403, description = "Staff can only view their own branch"),
        (status = 404, description = "Branch not found")
    )
)]
pub async fn get_branch(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<BranchDetails>> {
    claims.require_role(&[Role::Admin, Role::Staff])?;
    let details = state.services.branches.details(&claims, id).await?;
    Ok(Json(details))
}

/// Create a branch (admin)
#[utoipa::path(
    post,
    path = "/branches",
    tag = "branches",
    security(("bearer_auth" = [])),
    request_body = CreateBranch,
    responses(
        (status = 201, description = "Branch created", body = Branch),
        (status = 403, description = "Admin access required"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_branch(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateBranch>,
) -> AppResult<(StatusCode, Json<Branch>)> {
    claims.require_admin()?;
    let branch = state.services.branches.create(&data).await?;
    Ok((StatusCode::CREATED, Json(branch)))
}

/// Update a branch (admin)
#[utoipa::path(
    put,
    path = "/branches/{id}",
    tag = "branches",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Branch id")),
    request_body = UpdateBranch,
    responses(
        (status = 200, description = "Branch updated", body = Branch),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Branch not found"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn update_branch(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateBranch>,
) -> AppResult<Json<Branch>> {
    claims.require_admin()?;
    let branch = state.services.branches.update(id, &data).await?;
    Ok(Json(branch))
}

/// Delete a branch (admin). Refused while dependent records remain.
#[utoipa::path(
    delete,
    path = "/branches/{id}",
    tag = "branches",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Branch id")),
    responses(
        (status = 200, description = "Branch deleted"),
        (status = 400, description = "Branch still has dependent records"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Branch not found")
    )
)]
pub async fn delete_branch(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Value>> {
    claims.require_admin()?;
    state.services.branches.delete(id).await?;
    Ok(Json(json!({ "message": "Branch deleted successfully" })))
}
