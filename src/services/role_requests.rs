//! Role-upgrade request workflow

use serde_json::json;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        role_request::{
            CreateRoleRequest, ReviewRoleRequest, RoleRequest, RoleRequestDetails,
            RoleRequestStatus, RoleRequestStatusResponse,
        },
        user::{Role, UserClaims},
    },
    repository::Repository,
};

use super::realtime::RealtimeService;

#[derive(Clone)]
pub struct RoleRequestsService {
    repository: Repository,
    realtime: RealtimeService,
}

impl RoleRequestsService {
    pub fn new(repository: Repository, realtime: RealtimeService) -> Self {
        Self { repository, realtime }
    }

    /// Submit an upgrade request. Customers only; one pending request at
    /// a time per user.
    pub async fn submit(
        &self,
        caller: &UserClaims,
        data: &CreateRoleRequest,
    ) -> AppResult<RoleRequest> {
        data.validate()?;
        if caller.role != Role::Customer {
            return Err(AppError::Authorization(
                "Only customers can request role upgrades".to_string(),
            ));
        }

        if self
            .repository
            .role_requests
            .find_pending_for_user(caller.user_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "You already have a pending request".to_string(),
            ));
        }

        if let Some(branch_id) = data.branch_id {
            // Surfaces a 404 for dangling branch ids before the insert
            self.repository.branches.get_by_id(branch_id).await?;
        }

        let request = self
            .repository
            .role_requests
            .create(caller.user_id, data)
            .await?;

        self.realtime
            .publish("role_request.created", &json!({ "request_id": request.id, "user_id": caller.user_id }))
            .await;

        tracing::info!(
            "User {} requested upgrade to {}",
            caller.user_id,
            request.requested_role.as_str()
        );
        Ok(request)
    }

    /// Admin review list, optionally filtered by status
    pub async fn list(
        &self,
        status: Option<RoleRequestStatus>,
    ) -> AppResult<Vec<RoleRequestDetails>> {
        self.repository.role_requests.list_details(status).await
    }

    /// Approve a pending request; promotes the user atomically and
    /// notifies them
    pub async fn approve(
        &self,
        reviewer: &UserClaims,
        id: i32,
        data: &ReviewRoleRequest,
    ) -> AppResult<RoleRequest> {
        data.validate()?;
        let request = self
            .repository
            .role_requests
            .approve(id, reviewer.user_id, data.admin_notes.as_deref())
            .await?;

        self.realtime
            .publish_to_user(
                request.user_id,
                "role_request.approved",
                &json!({
                    "request_id": request.id,
                    "new_role": request.requested_role.as_str(),
                }),
            )
            .await;

        tracing::info!("Role request {} approved by user {}", id, reviewer.user_id);
        Ok(request)
    }

    /// Reject a pending request; the user keeps their current role
    pub async fn reject(
        &self,
        reviewer: &UserClaims,
        id: i32,
        data: &ReviewRoleRequest,
    ) -> AppResult<RoleRequest> {
        data.validate()?;
        let request = self
            .repository
            .role_requests
            .reject(id, reviewer.user_id, data.admin_notes.as_deref())
            .await?;

        self.realtime
            .publish_to_user(
                request.user_id,
                "role_request.rejected",
                &json!({ "request_id": request.id }),
            )
            .await;

        tracing::info!("Role request {} rejected by user {}", id, reviewer.user_id);
        Ok(request)
    }

    /// Public status check for the latest request filed under an email
    pub async fn status_by_email(&self, email: &str) -> AppResult<RoleRequestStatusResponse> {
        let user = self.repository.users.get_by_email(email).await?;
        let latest = self
            .repository
            .role_requests
            .find_latest_for_user(user.id)
            .await?;

        let Some(request) = latest else {
            return Ok(RoleRequestStatusResponse {
                status: "none".to_string(),
                requested_role: None,
                created_at: None,
                message: "No role request found".to_string(),
            });
        };

        let message = match request.status {
            RoleRequestStatus::Pending => "Request is pending approval",
            RoleRequestStatus::Approved => "Request has been approved",
            RoleRequestStatus::Rejected => "Request has been rejected",
        };
        Ok(RoleRequestStatusResponse {
            status: request.status.as_str().to_string(),
            requested_role: Some(request.requested_role),
            created_at: request.created_at,
            message: message.to_string(),
        })
    }
}
