//! Role requests repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        role_request::{CreateRoleRequest, RoleRequest, RoleRequestDetails, RoleRequestStatus},
        user::Role,
    },
};

#[derive(Clone)]
pub struct RoleRequestsRepository {
    pool: Pool<Postgres>,
}

impl RoleRequestsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Pending request for a user, if any. The partial unique index
    /// role_requests_one_pending guarantees at most one.
    pub async fn find_pending_for_user(&self, user_id: i32) -> AppResult<Option<RoleRequest>> {
        let row = sqlx::query_as::<_, RoleRequest>(
            "SELECT * FROM role_requests WHERE user_id = $1 AND status = 'pending'",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Most recent request for a user regardless of status
    pub async fn find_latest_for_user(&self, user_id: i32) -> AppResult<Option<RoleRequest>> {
        let row = sqlx::query_as::<_, RoleRequest>(
            "SELECT * FROM role_requests WHERE user_id = $1 ORDER BY created_at DESC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Insert a pending request. A concurrent submission that slips past
    /// the existence check trips the partial unique index instead.
    pub async fn create(&self, user_id: i32, data: &CreateRoleRequest) -> AppResult<RoleRequest> {
        let row = sqlx::query_as::<_, RoleRequest>(
            r#"
            INSERT INTO role_requests
                (user_id, requested_role, branch_id, reason, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, 'pending', NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(data.requested_role)
        .bind(data.branch_id)
        .bind(&data.reason)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict("You already have a pending request".to_string())
            }
            other => AppError::Database(other),
        })?;
        Ok(row)
    }

    /// Requests joined with requester, branch and reviewer identity,
    /// newest first, optionally filtered by status
    pub async fn list_details(
        &self,
        status: Option<RoleRequestStatus>,
    ) -> AppResult<Vec<RoleRequestDetails>> {
        let base = r#"
            SELECT r.id, r.user_id, u.name as user_name, u.email as user_email,
                   r.requested_role, r.branch_id, b.name as branch_name,
                   r.reason, r.status, r.reviewed_by, rv.name as reviewer_name,
                   r.admin_notes, r.created_at
            FROM role_requests r
            JOIN users u ON r.user_id = u.id
            LEFT JOIN branches b ON r.branch_id = b.id
            LEFT JOIN users rv ON r.reviewed_by = rv.id
        "#;
        let rows = if let Some(status) = status {
            sqlx::query_as::<_, RoleRequestDetails>(&format!(
                "{} WHERE r.status = $1 ORDER BY r.created_at DESC",
                base
            ))
            .bind(status)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, RoleRequestDetails>(&format!(
                "{} ORDER BY r.created_at DESC",
                base
            ))
            .fetch_all(&self.pool)
            .await?
        };
        Ok(rows)
    }

    /// Approve a pending request. The request update and the user's role
    /// promotion commit together or not at all.
    pub async fn approve(
        &self,
        id: i32,
        reviewer_id: i32,
        admin_notes: Option<&str>,
    ) -> AppResult<RoleRequest> {
        let mut tx = self.pool.begin().await?;

        let request = sqlx::query_as::<_, RoleRequest>(
            "SELECT * FROM role_requests WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Role request with id {} not found", id)))?;

        if request.status != RoleRequestStatus::Pending {
            return Err(AppError::Conflict("Request already processed".to_string()));
        }

        let updated = sqlx::query_as::<_, RoleRequest>(
            r#"
            UPDATE role_requests
            SET status = 'approved', reviewed_by = $1, reviewed_at = NOW(),
                admin_notes = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(reviewer_id)
        .bind(admin_notes)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        // The user takes exactly the branch the request asked for; a null
        // request branch clears any previous assignment
        let new_role: Role = request.requested_role.into();
        sqlx::query(
            r#"
            UPDATE users
            SET role = $1, branch_id = $2, is_approved = TRUE, updated_at = NOW()
            WHERE id = $3
            "#,
        )
        .bind(new_role)
        .bind(request.branch_id)
        .bind(request.user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Reject a pending request; the user keeps their current role
    pub async fn reject(
        &self,
        id: i32,
        reviewer_id: i32,
        admin_notes: Option<&str>,
    ) -> AppResult<RoleRequest> {
        let mut tx = self.pool.begin().await?;

        let request = sqlx::query_as::<_, RoleRequest>(
            "SELECT * FROM role_requests WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Role request with id {} not found", id)))?;

        if request.status != RoleRequestStatus::Pending {
            return Err(AppError::Conflict("Request already processed".to_string()));
        }

        let updated = sqlx::query_as::<_, RoleRequest>(
            r#"
            UPDATE role_requests
            SET status = 'rejected', reviewed_by = $1, reviewed_at = NOW(),
                admin_notes = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(reviewer_id)
        .bind(admin_notes)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }
}
