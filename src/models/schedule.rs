//! Schedule models (recurring weekly availability windows)

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// A recurring weekly availability window joined with its optometrist
/// and branch identity. `day_of_week` is the ISO weekday (1=Monday).
#[derive(Debug, Clone, FromRow)]
pub struct ScheduleWindowDetails {
    pub id: i32,
    pub optometrist_id: i32,
    pub optometrist_name: String,
    pub branch_id: i32,
    pub branch_name: String,
    pub branch_code: String,
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Query parameters for the availability endpoint
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AvailabilityQuery {
    /// Target date (YYYY-MM-DD), today or later
    pub date: String,
}

/// Availability response for one date
#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityResponse {
    /// Target date (ISO)
    pub date: String,
    /// False when no optometrist is scheduled on this weekday
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optometrist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optometrist_id: Option<i32>,
    /// Open slots in 12-hour display form, ascending
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_times: Option<Vec<String>>,
}

/// Weekly schedule projection grouped by optometrist
#[derive(Debug, Serialize, ToSchema)]
pub struct WeeklyScheduleResponse {
    pub weekly_schedule: Vec<OptometristWeek>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OptometristWeek {
    pub optometrist: OptometristRef,
    /// Exactly 7 entries, Monday through Sunday
    pub schedule: Vec<WeekdayEntry>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OptometristRef {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WeekdayEntry {
    /// Canonical weekday name
    pub day: String,
    /// ISO day number (1=Monday, 7=Sunday)
    pub day_number: i16,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<WeekdayBranch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<WeekdayWindow>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WeekdayBranch {
    pub id: i32,
    pub name: String,
    pub code: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WeekdayWindow {
    /// Start time in 12-hour display form
    pub start_time: String,
    /// End time in 12-hour display form
    pub end_time: String,
}
