//! Eyewear reminders and condition self-assessments

use chrono::{DateTime, Duration, Months, NaiveDate, NaiveTime, Utc};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::prescription::{
        ConditionForm, EyewearAppointmentRequest, EyewearReminder, EyewearRemindersResponse,
        PrescriptionRecord, ReminderPriority,
    },
    repository::Repository,
};

use super::realtime::RealtimeService;

const CHECK_INTERVAL_MONTHS: u32 = 6;
const REMINDER_HORIZON_DAYS: i64 = 14;
const REMINDER_LIMIT: i64 = 10;

#[derive(Clone)]
pub struct EyewearService {
    repository: Repository,
    realtime: RealtimeService,
}

impl EyewearService {
    pub fn new(repository: Repository, realtime: RealtimeService) -> Self {
        Self { repository, realtime }
    }

    /// Reminders derived from the customer's active prescriptions. Only
    /// checks due within the next two weeks (or overdue) are shown.
    pub async fn reminders(&self, patient_id: i32) -> AppResult<EyewearRemindersResponse> {
        let prescriptions = self
            .repository
            .prescriptions
            .active_for_patient(patient_id, REMINDER_LIMIT)
            .await?;

        let now = Utc::now();
        let reminders: Vec<EyewearReminder> = prescriptions
            .into_iter()
            .filter_map(|p| build_reminder(&p, now))
            .collect();

        let count = reminders.len();
        Ok(EyewearRemindersResponse { reminders, count })
    }

    /// Accept a condition self-assessment against an owned prescription.
    /// The form is not stored; staff are notified over the realtime channel.
    pub async fn submit_condition_form(
        &self,
        patient_id: i32,
        eyewear_id: Uuid,
        form: &ConditionForm,
    ) -> AppResult<()> {
        form.validate()?;
        validate_choice("lens_clarity", &form.lens_clarity, ConditionForm::LENS_CLARITY)?;
        validate_choice(
            "frame_condition",
            &form.frame_condition,
            ConditionForm::FRAME_CONDITION,
        )?;
        validate_choice(
            "eye_discomfort",
            &form.eye_discomfort,
            ConditionForm::EYE_DISCOMFORT,
        )?;

        self.repository
            .prescriptions
            .find_owned(eyewear_id, patient_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("Eyewear not found or doesn't belong to you".to_string())
            })?;

        self.realtime
            .publish(
                "eyewear.condition_form",
                &json!({
                    "eyewear_id": eyewear_id,
                    "patient_id": patient_id,
                    "lens_clarity": form.lens_clarity,
                    "frame_condition": form.frame_condition,
                    "eye_discomfort": form.eye_discomfort,
                    "remarks": form.remarks,
                }),
            )
            .await;

        tracing::info!("Condition assessment submitted for prescription {}", eyewear_id);
        Ok(())
    }

    /// Book a follow-up check appointment for an owned prescription
    pub async fn schedule_check(
        &self,
        patient_id: i32,
        eyewear_id: Uuid,
        request: &EyewearAppointmentRequest,
    ) -> AppResult<i32> {
        request.validate()?;
        let date = NaiveDate::parse_from_str(&request.appointment_date, "%Y-%m-%d")
            .map_err(|_| {
                AppError::field_validation("appointment_date", "Invalid date (use YYYY-MM-DD)")
            })?;
        if date <= Utc::now().date_naive() {
            return Err(AppError::field_validation(
                "appointment_date",
                "Date must be after today",
            ));
        }
        let time = NaiveTime::parse_from_str(&request.preferred_time, "%H:%M").map_err(|_| {
            AppError::field_validation("preferred_time", "Invalid time (use HH:MM)")
        })?;

        let prescription = self
            .repository
            .prescriptions
            .find_owned(eyewear_id, patient_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("Eyewear not found or doesn't belong to you".to_string())
            })?;

        let appointment_id = self
            .repository
            .prescriptions
            .create_followup_appointment(
                patient_id,
                prescription.appointment_id,
                date,
                time,
                request.notes.as_deref(),
            )
            .await?;

        tracing::info!(
            "Eyewear check appointment {} booked for prescription {}",
            appointment_id,
            eyewear_id
        );
        Ok(appointment_id)
    }
}

fn validate_choice(field: &str, value: &str, allowed: &[&str]) -> AppResult<()> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(AppError::field_validation(
            field,
            &format!("Must be one of: {}", allowed.join(", ")),
        ))
    }
}

/// Build a reminder when the prescription's next check falls within the
/// horizon. The check is due six months after the prescription was issued.
pub fn build_reminder(
    prescription: &PrescriptionRecord,
    now: DateTime<Utc>,
) -> Option<EyewearReminder> {
    let next_check = next_check_date(prescription.created_at);
    if next_check > (now + Duration::days(REMINDER_HORIZON_DAYS)).date_naive() {
        return None;
    }

    let is_overdue = now.date_naive() >= next_check;
    Some(EyewearReminder {
        id: format!("reminder_{}", prescription.prescription_id),
        eyewear_id: prescription.prescription_id,
        eyewear_label: eyewear_label(&prescription.r#type, prescription.prescription_id),
        next_check_date: next_check.format("%Y-%m-%d").to_string(),
        assessment_date: prescription.appointment_date.format("%Y-%m-%d").to_string(),
        assessed_by: "Your Optometrist".to_string(),
        priority: if is_overdue {
            ReminderPriority::Urgent
        } else {
            ReminderPriority::Normal
        },
        is_overdue,
        created_at: prescription.created_at,
        notes: "Regular check to ensure your eyewear condition is optimal".to_string(),
        r#type: "prescription_check".to_string(),
    })
}

pub fn next_check_date(issued_at: DateTime<Utc>) -> NaiveDate {
    issued_at
        .date_naive()
        .checked_add_months(Months::new(CHECK_INTERVAL_MONTHS))
        .unwrap_or(NaiveDate::MAX)
}

/// Display label: capitalized type plus the first 8 characters of the id
pub fn eyewear_label(kind: &str, id: Uuid) -> String {
    let mut label = String::new();
    let mut chars = kind.chars();
    if let Some(first) = chars.next() {
        label.extend(first.to_uppercase());
        label.push_str(chars.as_str());
    }
    let id = id.to_string();
    format!("{} (ID: {})", label, &id[..8])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(created_at: DateTime<Utc>) -> PrescriptionRecord {
        PrescriptionRecord {
            prescription_id: Uuid::parse_str("1a2b3c4d-0000-0000-0000-000000000000").unwrap(),
            r#type: "glasses".to_string(),
            expiry_date: None,
            appointment_id: 7,
            appointment_date: created_at.date_naive(),
            created_at,
        }
    }

    #[test]
    fn label_capitalizes_type_and_truncates_id() {
        let id = Uuid::parse_str("1a2b3c4d-0000-0000-0000-000000000000").unwrap();
        assert_eq!(eyewear_label("glasses", id), "Glasses (ID: 1a2b3c4d)");
        assert_eq!(eyewear_label("contacts", id), "Contacts (ID: 1a2b3c4d)");
    }

    #[test]
    fn next_check_is_six_months_after_issue() {
        let issued = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        assert_eq!(
            next_check_date(issued),
            NaiveDate::from_ymd_opt(2026, 7, 15).unwrap()
        );
    }

    #[test]
    fn overdue_prescription_is_urgent() {
        let issued = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let reminder = build_reminder(&record(issued), now).unwrap();
        assert!(reminder.is_overdue);
        assert_eq!(reminder.priority, ReminderPriority::Urgent);
    }

    #[test]
    fn check_due_within_two_weeks_is_normal_priority() {
        let issued = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        // Next check 2026-07-01; ten days out
        let now = Utc.with_ymd_and_hms(2026, 6, 21, 0, 0, 0).unwrap();
        let reminder = build_reminder(&record(issued), now).unwrap();
        assert!(!reminder.is_overdue);
        assert_eq!(reminder.priority, ReminderPriority::Normal);
    }

    #[test]
    fn check_beyond_horizon_is_suppressed() {
        let issued = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        // Next check 2026-07-01; a month out
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        assert!(build_reminder(&record(issued), now).is_none());
    }

    #[test]
    fn condition_choices_are_validated() {
        assert!(validate_choice("lens_clarity", "clear", ConditionForm::LENS_CLARITY).is_ok());
        assert!(validate_choice("lens_clarity", "foggy", ConditionForm::LENS_CLARITY).is_err());
    }
}
