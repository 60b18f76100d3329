//! Domain models

pub mod analytics;
pub mod appointment;
pub mod branch;
pub mod manufacturer;
pub mod prescription;
pub mod role_request;
pub mod schedule;
pub mod user;

pub use analytics::{AnalyticsData, AnalyticsQuery, Page, ReportFilter, SystemStats};
pub use appointment::AppointmentStatus;
pub use branch::{Branch, CreateBranch, UpdateBranch};
pub use manufacturer::{CreateManufacturer, Manufacturer, UpdateManufacturer};
pub use prescription::{EyewearReminder, ReminderPriority};
pub use role_request::{CreateRoleRequest, RoleRequest, RoleRequestStatus};
pub use schedule::AvailabilityResponse;
pub use user::{Role, UpgradeRole, User, UserClaims};
