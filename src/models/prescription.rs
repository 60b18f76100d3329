//! Prescription rows and eyewear reminder types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Active prescription joined with its originating appointment
#[derive(Debug, Clone, FromRow)]
pub struct PrescriptionRecord {
    pub prescription_id: Uuid,
    /// Prescription kind (e.g. "glasses", "contacts")
    pub r#type: String,
    pub expiry_date: Option<NaiveDate>,
    pub appointment_id: i32,
    pub appointment_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Reminder priority; urgent once the check date has passed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReminderPriority {
    Urgent,
    Normal,
}

/// Eyewear check reminder derived from an active prescription
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EyewearReminder {
    /// Synthetic identifier ("reminder_<prescription id>")
    pub id: String,
    pub eyewear_id: Uuid,
    /// Display label, e.g. "Glasses (ID: 1a2b3c4d)"
    pub eyewear_label: String,
    /// Recommended next check date (ISO)
    pub next_check_date: String,
    /// Date of the appointment the prescription was issued at (ISO)
    pub assessment_date: String,
    pub assessed_by: String,
    pub priority: ReminderPriority,
    pub is_overdue: bool,
    pub created_at: DateTime<Utc>,
    pub notes: String,
    pub r#type: String,
}

/// Eyewear reminders response
#[derive(Debug, Serialize, ToSchema)]
pub struct EyewearRemindersResponse {
    pub reminders: Vec<EyewearReminder>,
    pub count: usize,
}

/// Customer self-assessment of eyewear condition
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ConditionForm {
    /// One of: clear, slightly_blurry, blurry, very_blurry
    pub lens_clarity: String,
    /// One of: excellent, good, loose, damaged
    pub frame_condition: String,
    /// One of: no, mild, moderate, severe
    pub eye_discomfort: String,
    #[validate(length(max = 500, message = "Remarks must be at most 500 characters"))]
    pub remarks: Option<String>,
}

impl ConditionForm {
    pub const LENS_CLARITY: &'static [&'static str] =
        &["clear", "slightly_blurry", "blurry", "very_blurry"];
    pub const FRAME_CONDITION: &'static [&'static str] =
        &["excellent", "good", "loose", "damaged"];
    pub const EYE_DISCOMFORT: &'static [&'static str] = &["no", "mild", "moderate", "severe"];
}

/// Follow-up appointment request for an eyewear check
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EyewearAppointmentRequest {
    /// Desired date (YYYY-MM-DD), strictly after today
    pub appointment_date: String,
    /// Desired time in 24-hour HH:MM form
    pub preferred_time: String,
    #[validate(length(max = 500, message = "Notes must be at most 500 characters"))]
    pub notes: Option<String>,
}
