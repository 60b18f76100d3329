//! Error types for OptiCare server

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Field name to error-message map attached to validation failures
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Validation failure on a single field
    pub fn field_validation(field: &str, message: &str) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![message.to_string()]);
        AppError::Validation(errors)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut map = FieldErrors::new();
        for (field, field_errors) in errors.field_errors() {
            let messages = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}", field))
                })
                .collect();
            map.insert(field.to_string(), messages);
        }
        AppError::Validation(map)
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    /// Field-level validation errors (422 responses only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message, errors) = match self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, "authentication", msg, None)
            }
            AppError::Authorization(msg) => (StatusCode::FORBIDDEN, "authorization", msg, None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            AppError::Validation(map) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation",
                "Validation failed".to_string(),
                Some(map),
            ),
            AppError::Conflict(msg) => (StatusCode::BAD_REQUEST, "conflict", msg, None),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database",
                    "Database error".to_string(),
                    None,
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            message,
            errors,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_validation_carries_field_map() {
        let err = AppError::field_validation("code", "The code has already been taken");
        match err {
            AppError::Validation(map) => {
                assert_eq!(map["code"], vec!["The code has already been taken"]);
            }
            _ => panic!("expected validation error"),
        }
    }

    #[test]
    fn validator_errors_convert_to_field_map() {
        use validator::Validate;

        #[derive(Validate)]
        struct Form {
            #[validate(length(min = 3, message = "Name must be at least 3 characters"))]
            name: String,
        }

        let form = Form { name: "ab".into() };
        let err: AppError = form.validate().unwrap_err().into();
        match err {
            AppError::Validation(map) => {
                assert_eq!(map["name"], vec!["Name must be at least 3 characters"]);
            }
            _ => panic!("expected validation error"),
        }
    }
}
