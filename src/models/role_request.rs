//! Role-upgrade request model and workflow types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use validator::Validate;

use super::user::UpgradeRole;

/// Role request lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RoleRequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RoleRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleRequestStatus::Pending => "pending",
            RoleRequestStatus::Approved => "approved",
            RoleRequestStatus::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for RoleRequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(RoleRequestStatus::Pending),
            "approved" => Ok(RoleRequestStatus::Approved),
            "rejected" => Ok(RoleRequestStatus::Rejected),
            _ => Err(format!("Invalid role request status: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for RoleRequestStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for RoleRequestStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for RoleRequestStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Role request row
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct RoleRequest {
    pub id: i32,
    pub user_id: i32,
    pub requested_role: UpgradeRole,
    pub branch_id: Option<i32>,
    pub reason: Option<String>,
    pub status: RoleRequestStatus,
    /// Admin who approved or rejected the request
    pub reviewed_by: Option<i32>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub admin_notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Role request joined with requester and branch identity, for the admin
/// review dashboard
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct RoleRequestDetails {
    pub id: i32,
    pub user_id: i32,
    pub user_name: String,
    pub user_email: String,
    pub requested_role: UpgradeRole,
    pub branch_id: Option<i32>,
    pub branch_name: Option<String>,
    pub reason: Option<String>,
    pub status: RoleRequestStatus,
    pub reviewed_by: Option<i32>,
    pub reviewer_name: Option<String>,
    pub admin_notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Create role request body
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRoleRequest {
    pub requested_role: UpgradeRole,
    pub branch_id: Option<i32>,
    #[validate(length(max = 1000, message = "Reason must be at most 1000 characters"))]
    pub reason: Option<String>,
}

/// Admin review body (approve or reject)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReviewRoleRequest {
    #[validate(length(max = 1000, message = "Notes must be at most 1000 characters"))]
    pub admin_notes: Option<String>,
}

/// Public status check keyed by email. `status` is `"none"` when the
/// user never filed a request.
#[derive(Debug, Serialize, ToSchema)]
pub struct RoleRequestStatusResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_role: Option<UpgradeRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub message: String,
}
