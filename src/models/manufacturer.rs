//! Manufacturer model and request types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Manufacturer row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Manufacturer {
    pub id: i32,
    pub name: String,
    pub contact_person: String,
    pub phone: String,
    pub email: String,
    /// Product family this supplier covers (e.g. "frames", "lenses")
    pub product_line: String,
    pub address: Option<String>,
    pub website: Option<String>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Directory entry: contact-facing subset of a manufacturer
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ManufacturerContact {
    pub id: i32,
    pub name: String,
    pub contact_person: String,
    pub phone: String,
    pub email: String,
    pub product_line: String,
    pub address: Option<String>,
    pub website: Option<String>,
}

/// Create manufacturer request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateManufacturer {
    #[validate(length(min = 1, max = 255, message = "Name is required (max 255 characters)"))]
    pub name: String,
    #[validate(length(min = 1, max = 255, message = "Contact person is required (max 255 characters)"))]
    pub contact_person: String,
    #[validate(length(min = 1, max = 20, message = "Phone is required (max 20 characters)"))]
    pub phone: String,
    #[validate(email(message = "Invalid email format"), length(max = 255, message = "Email must be at most 255 characters"))]
    pub email: String,
    #[validate(length(min = 1, max = 255, message = "Product line is required (max 255 characters)"))]
    pub product_line: String,
    pub address: Option<String>,
    #[validate(url(message = "Invalid website URL"), length(max = 255, message = "Website must be at most 255 characters"))]
    pub website: Option<String>,
    pub notes: Option<String>,
}

/// Update manufacturer request; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateManufacturer {
    #[validate(length(min = 1, max = 255, message = "Name must not be empty (max 255 characters)"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Contact person must not be empty (max 255 characters)"))]
    pub contact_person: Option<String>,
    #[validate(length(min = 1, max = 20, message = "Phone must not be empty (max 20 characters)"))]
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Product line must not be empty (max 255 characters)"))]
    pub product_line: Option<String>,
    pub address: Option<String>,
    #[validate(url(message = "Invalid website URL"))]
    pub website: Option<String>,
    pub notes: Option<String>,
    pub is_active: Option<bool>,
}

/// Manufacturer detail response with inventory usage
#[derive(Debug, Serialize, ToSchema)]
pub struct ManufacturerDetails {
    pub manufacturer: Manufacturer,
    pub inventory_count: i64,
    /// Distinct names of branches stocking this manufacturer's products
    pub branches_with_products: Vec<String>,
}

/// Directory response grouped by product line
#[derive(Debug, Serialize, ToSchema)]
pub struct ManufacturerDirectory {
    pub manufacturers: Vec<ManufacturerContact>,
    /// Product lines in the order they first appear in the sorted list
    pub product_lines: Vec<String>,
    pub count: usize,
}
