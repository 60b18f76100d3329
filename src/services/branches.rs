//! Branch directory management

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        branch::{
            Branch, BranchDetails, BranchPublic, BranchSummary, CreateBranch, UpdateBranch,
        },
        user::{Role, UserClaims},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BranchesService {
    repository: Repository,
}

impl BranchesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Admin list with per-branch record counts
    pub async fn list(&self) -> AppResult<Vec<BranchSummary>> {
        self.repository.branches.list_with_counts().await
    }

    /// Active branches for the customer-facing picker
    pub async fn list_public(&self) -> AppResult<Vec<BranchPublic>> {
        self.repository.branches.list_public().await
    }

    /// Branch detail with stock summary. Staff may only view their own
    /// branch; admins may view any.
    pub async fn details(&self, caller: &UserClaims, id: i32) -> AppResult<BranchDetails> {
        if caller.role == Role::Staff && caller.branch_id != Some(id) {
            return Err(AppError::Authorization(
                "Staff can only view their own branch".to_string(),
            ));
        }
        let branch = self.repository.branches.get_by_id(id).await?;
        let stock_summary = self.repository.branches.stock_summary(id).await?;
        Ok(BranchDetails { branch, stock_summary })
    }

    pub async fn create(&self, data: &CreateBranch) -> AppResult<Branch> {
        data.validate()?;
        if self.repository.branches.code_exists(&data.code, None).await? {
            return Err(AppError::field_validation("code", "Code is already in use"));
        }
        let branch = self.repository.branches.create(data).await?;
        tracing::info!("Branch {} ({}) created", branch.id, branch.code);
        Ok(branch)
    }

    pub async fn update(&self, id: i32, data: &UpdateBranch) -> AppResult<Branch> {
        data.validate()?;
        if let Some(ref code) = data.code {
            if self.repository.branches.code_exists(code, Some(id)).await? {
                return Err(AppError::field_validation("code", "Code is already in use"));
            }
        }
        self.repository.branches.update(id, data).await
    }

    /// Delete a branch. Refused while any dependent records remain; the
    /// guards are checked in order so the message names the first blocker.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.branches.get_by_id(id).await?;
        let deps = self.repository.branches.dependent_counts(id).await?;

        if deps.users > 0 {
            return Err(AppError::Conflict(
                "Cannot delete branch. It has associated users. Please reassign users first."
                    .to_string(),
            ));
        }
        if deps.stock > 0 {
            return Err(AppError::Conflict(
                "Cannot delete branch. It has associated stock records. Please clear stock first."
                    .to_string(),
            ));
        }
        if deps.reservations > 0 {
            return Err(AppError::Conflict(
                "Cannot delete branch. It has associated reservations. Please handle reservations first."
                    .to_string(),
            ));
        }
        if deps.appointments > 0 {
            return Err(AppError::Conflict(
                "Cannot delete branch. It has associated appointments. Please handle appointments first."
                    .to_string(),
            ));
        }

        self.repository.branches.delete(id).await?;
        tracing::info!("Branch {} deleted", id);
        Ok(())
    }
}
