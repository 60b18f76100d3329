//! OptiCare Clinic Management System
//!
//! A Rust implementation of the OptiCare multi-branch optical retail and
//! eyewear clinic backend: appointment availability, branch and
//! manufacturer directories, role-upgrade workflows, and administrative
//! analytics and reporting.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
