//! Branch model and request types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Branch row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Branch {
    pub id: i32,
    pub name: String,
    /// Short unique branch code (e.g. "BR1")
    pub code: String,
    pub address: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Branch with associated record counts, for the admin list view
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BranchSummary {
    pub id: i32,
    pub name: String,
    pub code: String,
    pub address: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_active: bool,
    pub user_count: i64,
    pub stock_count: i64,
}

/// Compact branch listing for the public customer view
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BranchPublic {
    pub id: i32,
    pub name: String,
    pub code: String,
    pub address: String,
    pub phone: Option<String>,
}

/// Create branch request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBranch {
    #[validate(length(min = 1, max = 255, message = "Name is required (max 255 characters)"))]
    pub name: String,
    #[validate(length(min = 1, max = 10, message = "Code is required (max 10 characters)"))]
    pub code: String,
    #[validate(length(min = 1, max = 500, message = "Address is required (max 500 characters)"))]
    pub address: String,
    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

/// Update branch request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBranch {
    #[validate(length(min = 1, max = 255, message = "Name must not be empty (max 255 characters)"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 10, message = "Code must not be empty (max 10 characters)"))]
    pub code: Option<String>,
    #[validate(length(min = 1, max = 500, message = "Address must not be empty (max 500 characters)"))]
    pub address: Option<String>,
    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub is_active: Option<bool>,
}

/// Stock availability summary shown on the branch detail view
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BranchStockSummary {
    pub total_products: i64,
    pub in_stock: i64,
    pub low_stock: i64,
    pub out_of_stock: i64,
}

/// Branch detail response
#[derive(Debug, Serialize, ToSchema)]
pub struct BranchDetails {
    pub branch: Branch,
    pub stock_summary: BranchStockSummary,
}
