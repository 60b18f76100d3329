//! Role-upgrade request endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppResult,
    models::role_request::{
        CreateRoleRequest, ReviewRoleRequest, RoleRequest, RoleRequestDetails,
        RoleRequestStatus, RoleRequestStatusResponse,
    },
    AppState,
};

use super::AuthenticatedUser;

#[derive(Debug, Deserialize, IntoParams)]
pub struct RoleRequestListQuery {
    /// Filter by status (pending, approved, rejected)
    pub status: Option<RoleRequestStatus>,
}

/// Submit a role-upgrade request (customers only)
#[utoipa::path(
    post,
    path = "/role-requests",
    tag = "role-requests",
    security(("bearer_auth" = [])),
    request_body = CreateRoleRequest,
    responses(
        (status = 201, description = "Request submitted", body = RoleRequest),
        (status = 400, description = "A pending request already exists"),
        (status = 403, description = "Only customers can request upgrades"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_role_request(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateRoleRequest>,
) -> AppResult<(StatusCode, Json<RoleRequest>)> {
    let request = state.services.role_requests.submit(&claims, &data).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// List role requests for review (admin)
#[utoipa::path(
    get,
    path = "/role-requests",
    tag = "role-requests",
    security(("bearer_auth" = [])),
    params(RoleRequestListQuery),
    responses(
        (status = 200, description = "Role requests", body = [RoleRequestDetails]),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn list_role_requests(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<RoleRequestListQuery>,
) -> AppResult<Json<Vec<RoleRequestDetails>>> {
    claims.require_admin()?;
    let requests = state.services.role_requests.list(query.status).await?;
    Ok(Json(requests))
}

/// Approve a pending request (admin)
#[utoipa::path(
    post,
    path = "/role-requests/{id}/approve",
    tag = "role-requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Role request id")),
    request_body = ReviewRoleRequest,
    responses(
        (status = 200, description = "Request approved", body = RoleRequest),
        (status = 400, description = "Request already processed"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn approve_role_request(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<ReviewRoleRequest>,
) -> AppResult<Json<RoleRequest>> {
    claims.require_admin()?;
    let request = state
        .services
        .role_requests
        .approve(&claims, id, &data)
        .await?;
    Ok(Json(request))
}

/// Reject a pending request (admin)
#[utoipa::path(
    post,
    path = "/role-requests/{id}/reject",
    tag = "role-requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Role request id")),
    request_body = ReviewRoleRequest,
    responses(
        (status = 200, description = "Request rejected", body = RoleRequest),
        (status = 400, description = "Request already processed"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn reject_role_request(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<ReviewRoleRequest>,
) -> AppResult<Json<RoleRequest>> {
    claims.require_admin()?;
    let request = state
        .services
        .role_requests
        .reject(&claims, id, &data)
        .await?;
    Ok(Json(request))
}

/// Check the latest request status for an email (public)
#[utoipa::path(
    get,
    path = "/role-requests/status/{email}",
    tag = "role-requests",
    params(("email" = String, Path, description = "Requester email")),
    responses(
        (status = 200, description = "Latest request status", body = RoleRequestStatusResponse),
        (status = 404, description = "Unknown email")
    )
)]
pub async fn get_role_request_status(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<RoleRequestStatusResponse>> {
    let status = state.services.role_requests.status_by_email(&email).await?;
    Ok(Json(status))
}
